//! Asset name checks: a name must be usable verbatim as a single file name.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Returns `Err(reason)` unless `name` is a plain file name.
///
/// - Rejects empty names, `.` and `..`
/// - Rejects NUL, `/`, `\` and control characters
/// - Rejects names longer than 255 bytes
/// - Rejects names ending in `.part` (reserved for in-flight downloads)
pub fn check_file_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty");
    }
    if name == "." || name == ".." {
        return Err("relative path component");
    }
    if name.len() > NAME_MAX {
        return Err("longer than 255 bytes");
    }
    if name
        .chars()
        .any(|c| c == '\0' || c == '/' || c == '\\' || c.is_control())
    {
        return Err("contains a path separator or control character");
    }
    if name.ends_with(crate::storage::PART_SUFFIX) {
        return Err("reserved .part suffix");
    }
    Ok(())
}
