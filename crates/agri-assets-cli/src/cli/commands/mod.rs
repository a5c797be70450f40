//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod list;
mod status;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use list::run_list;
pub use status::run_status;
