pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod fetcher;
pub mod manifest;
pub mod report;
pub mod status;
pub mod storage;

pub use fetch::{CurlFetcher, Fetch, FetchError};
pub use fetcher::AssetFetcher;
pub use manifest::{AssetEntry, AssetManifest};
pub use report::{DownloadOutcome, RunSummary};
