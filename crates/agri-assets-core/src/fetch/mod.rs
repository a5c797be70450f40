//! Blocking HTTP GET of a single asset.
//!
//! `Fetch` is the seam between the run loop and the network; `CurlFetcher`
//! is the libcurl-backed implementation.

mod error;

pub use error::FetchError;

use std::time::Duration;

/// Default whole-transfer timeout per asset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads the full body of a URL. Must be shareable across worker threads.
pub trait Fetch: Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

/// GET via a fresh curl `Easy` handle per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CurlFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                code,
                url: url.to_string(),
            });
        }
        Ok(body)
    }
}
