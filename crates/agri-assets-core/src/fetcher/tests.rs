use super::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory backend: URL -> (status, body), optional per-URL delay.
#[derive(Default)]
struct FakeFetcher {
    routes: HashMap<String, (u32, Vec<u8>)>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    fn new(routes: &[(&str, u32, &str)]) -> Self {
        let routes = routes
            .iter()
            .map(|(url, code, body)| (url.to_string(), (*code, body.as_bytes().to_vec())))
            .collect();
        Self {
            routes,
            ..Self::default()
        }
    }

    fn delay(mut self, url: &str, millis: u64) -> Self {
        let d = Duration::from_millis(millis);
        self.delays.insert(url.to_string(), d);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delays.get(url) {
            std::thread::sleep(*d);
        }
        match self.routes.get(url) {
            Some((code, body)) if (200..300).contains(code) => Ok(body.clone()),
            Some((code, _)) => Err(FetchError::Http {
                code: *code,
                url: url.to_string(),
            }),
            None => Err(FetchError::Transport(curl::Error::new(6))),
        }
    }
}

/// Writer whose every write fails, like stdout on a closed pipe.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn manifest(pairs: &[(&str, &str)]) -> AssetManifest {
    let entries = pairs.iter().map(|(n, u)| AssetEntry::new(*n, *u));
    AssetManifest::new(entries.collect()).unwrap()
}

/// Runs with `jobs` workers; returns (succeeded, failed) and the printed lines.
fn run(
    fake: &FakeFetcher,
    dir: &Path,
    m: &AssetManifest,
    jobs: usize,
) -> (usize, usize, Vec<String>) {
    let mut out = Vec::new();
    let fetcher = AssetFetcher::new(fake, dir).with_jobs(jobs);
    let summary = fetcher.run(m, &mut out).unwrap();
    let lines = String::from_utf8(out).unwrap();
    let lines = lines.lines().map(str::to_string).collect();
    (summary.succeeded, summary.failed, lines)
}

fn is_failure(line: &str, name: &str) -> bool {
    line.starts_with(&format!("❌ failed to download {}: ", name))
}

#[test]
fn ok_and_not_found_scenario() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("out");
    let fake = FakeFetcher::new(&[("http://h/a", 200, "X"), ("http://h/b", 404, "")]);
    let m = manifest(&[("a.png", "http://h/a"), ("b.png", "http://h/b")]);

    let (ok, failed, lines) = run(&fake, &target, &m, 1);

    assert_eq!((ok, failed), (1, 1));
    assert_eq!(fs::read(target.join("a.png")).unwrap(), b"X");
    assert!(!target.join("b.png").exists());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "✅ downloaded: a.png");
    assert!(is_failure(&lines[1], "b.png"), "{}", lines[1]);
    assert!(lines[1].contains("404"), "{}", lines[1]);
}

#[test]
fn empty_manifest_creates_dir_and_prints_nothing() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("assets").join("images");
    let fake = FakeFetcher::default();

    let (ok, failed, lines) = run(&fake, &target, &AssetManifest::default(), 1);

    assert!(target.is_dir());
    assert!(lines.is_empty());
    assert_eq!((ok, failed), (0, 0));
}

#[test]
fn failure_does_not_stop_later_entries() {
    let root = tempfile::tempdir().unwrap();
    let fake = FakeFetcher::new(&[("http://h/1", 500, ""), ("http://h/3", 200, "three")]);
    let m = manifest(&[
        ("one.png", "http://h/1"),
        ("two.png", "http://h/unrouted"),
        ("three.png", "http://h/3"),
    ]);

    let (ok, failed, lines) = run(&fake, root.path(), &m, 1);

    assert_eq!(fake.calls(), 3);
    assert_eq!((ok, failed), (1, 2));
    assert_eq!(fs::read(root.path().join("three.png")).unwrap(), b"three");
    assert!(is_failure(&lines[0], "one.png"), "{}", lines[0]);
    assert!(is_failure(&lines[1], "two.png"), "{}", lines[1]);
    assert_eq!(lines[2], "✅ downloaded: three.png");
}

#[test]
fn rerun_overwrites_existing_files() {
    let root = tempfile::tempdir().unwrap();
    let m = manifest(&[("a.png", "http://h/a")]);

    let first = FakeFetcher::new(&[("http://h/a", 200, "first version")]);
    run(&first, root.path(), &m, 1);
    let second = FakeFetcher::new(&[("http://h/a", 200, "2nd")]);
    let (ok, _, _) = run(&second, root.path(), &m, 1);

    assert_eq!(ok, 1);
    assert_eq!(fs::read(root.path().join("a.png")).unwrap(), b"2nd");
}

#[test]
fn failed_refetch_keeps_previous_file() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("a.png"), b"cached").unwrap();
    let fake = FakeFetcher::new(&[("http://h/a", 503, "")]);
    let m = manifest(&[("a.png", "http://h/a")]);

    let (_, failed, _) = run(&fake, root.path(), &m, 1);

    assert_eq!(failed, 1);
    assert_eq!(fs::read(root.path().join("a.png")).unwrap(), b"cached");
}

#[test]
fn write_failure_is_reported_per_entry() {
    let root = tempfile::tempdir().unwrap();
    // A non-empty directory where the file should go makes the write fail.
    let blocker = root.path().join("a.png");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();
    let fake = FakeFetcher::new(&[("http://h/a", 200, "A"), ("http://h/b", 200, "B")]);
    let m = manifest(&[("a.png", "http://h/a"), ("b.png", "http://h/b")]);

    let (ok, failed, lines) = run(&fake, root.path(), &m, 1);

    assert_eq!((ok, failed), (1, 1));
    assert!(is_failure(&lines[0], "a.png"), "{}", lines[0]);
    assert!(lines[0].contains("failed to write"), "{}", lines[0]);
    assert_eq!(lines[1], "✅ downloaded: b.png");
    assert_eq!(fs::read(root.path().join("b.png")).unwrap(), b"B");
}

#[test]
fn unwritable_target_dir_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("not_a_dir");
    fs::write(&file, b"x").unwrap();
    let fake = FakeFetcher::default();
    let m = manifest(&[("a.png", "http://h/a")]);

    let fetcher = AssetFetcher::new(&fake, &file);
    let err = fetcher.run(&m, &mut Vec::new()).unwrap_err();

    let msg = format!("{:#}", err);
    assert!(msg.contains("create target directory"), "{}", msg);
    assert_eq!(fake.calls(), 0);
}

#[test]
fn status_output_failure_stops_run_and_keeps_saved_assets() {
    let root = tempfile::tempdir().unwrap();
    let fake = FakeFetcher::new(&[("http://h/a", 200, "A"), ("http://h/b", 200, "B")]);
    let m = manifest(&[("a.png", "http://h/a"), ("b.png", "http://h/b")]);

    let fetcher = AssetFetcher::new(&fake, root.path());
    let err = fetcher.run(&m, &mut BrokenPipe).unwrap_err();

    assert!(format!("{:#}", err).contains("failed to write status line"));
    assert_eq!(fs::read(root.path().join("a.png")).unwrap(), b"A");
    assert!(!root.path().join("b.png").exists());
    assert_eq!(fake.calls(), 1);
}

#[test]
fn pool_keeps_manifest_order() {
    let root = tempfile::tempdir().unwrap();
    // Earlier entries are slower, so they finish last.
    let fake = FakeFetcher::new(&[
        ("http://h/0", 200, "0"),
        ("http://h/1", 404, ""),
        ("http://h/2", 200, "2"),
        ("http://h/3", 200, "3"),
    ])
    .delay("http://h/0", 150)
    .delay("http://h/1", 75);
    let m = manifest(&[
        ("0.png", "http://h/0"),
        ("1.png", "http://h/1"),
        ("2.png", "http://h/2"),
        ("3.png", "http://h/3"),
    ]);

    let (ok, failed, lines) = run(&fake, root.path(), &m, 4);

    assert_eq!((ok, failed), (3, 1));
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "✅ downloaded: 0.png");
    assert!(is_failure(&lines[1], "1.png"), "{}", lines[1]);
    assert_eq!(lines[2], "✅ downloaded: 2.png");
    assert_eq!(lines[3], "✅ downloaded: 3.png");
    for n in ["0", "2", "3"] {
        let saved = fs::read(root.path().join(format!("{}.png", n))).unwrap();
        assert_eq!(saved, n.as_bytes());
    }
    assert!(!root.path().join("1.png").exists());
}

#[test]
fn pool_with_more_jobs_than_entries() {
    let root = tempfile::tempdir().unwrap();
    let fake = FakeFetcher::new(&[("http://h/a", 200, "A")]);
    let m = manifest(&[("a.png", "http://h/a")]);

    let (ok, _, lines) = run(&fake, root.path(), &m, 16);

    assert_eq!(ok, 1);
    assert_eq!(lines, vec!["✅ downloaded: a.png".to_string()]);
}

#[test]
fn zero_jobs_means_sequential() {
    let fake = FakeFetcher::default();
    let f = AssetFetcher::new(&fake, "unused").with_jobs(0);
    assert_eq!(f.jobs, 1);
}
