//! Bounded worker pool for `jobs > 1`.
//!
//! Workers pull entries from a shared queue; outcomes come back over a
//! channel and are re-sequenced so they are emitted in manifest order.

use super::fetch_one;
use crate::fetch::Fetch;
use crate::manifest::AssetEntry;
use crate::report::DownloadOutcome;
use anyhow::Result;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

/// Pending entries with their manifest index.
type Queue<'a> = Mutex<VecDeque<(usize, &'a AssetEntry)>>;

/// Fetches `entries` on `workers` threads, calling `emit` once per entry in index order.
/// An error from `emit` stops emission; workers drain out when the channel closes.
pub(super) fn run_pool<F, E>(
    fetcher: &F,
    target_dir: &Path,
    entries: &[AssetEntry],
    workers: usize,
    mut emit: E,
) -> Result<()>
where
    F: Fetch,
    E: FnMut(DownloadOutcome) -> Result<()>,
{
    let queue: Queue<'_> = Mutex::new(entries.iter().enumerate().collect());
    let num_workers = workers.min(entries.len());

    thread::scope(|s| -> Result<()> {
        let (tx, rx) = mpsc::channel();
        for _ in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            s.spawn(move || worker(queue, fetcher, target_dir, tx));
        }
        drop(tx);

        let mut pending: BTreeMap<usize, DownloadOutcome> = BTreeMap::new();
        let mut next = 0usize;
        for (index, outcome) in rx {
            pending.insert(index, outcome);
            while let Some(outcome) = pending.remove(&next) {
                emit(outcome)?;
                next += 1;
            }
        }
        Ok(())
    })
}

/// Pops entries until the queue is empty or the receiver is gone.
fn worker<F: Fetch>(
    queue: &Queue<'_>,
    fetcher: &F,
    target_dir: &Path,
    tx: mpsc::Sender<(usize, DownloadOutcome)>,
) {
    loop {
        let next = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let (index, entry) = match next {
            Some(item) => item,
            None => break,
        };
        let outcome = fetch_one(fetcher, target_dir, entry);
        if tx.send((index, outcome)).is_err() {
            break;
        }
    }
}
