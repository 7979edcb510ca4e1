use encoding_rs::{Encoding, UTF_8};
use engine_logging::{engine_debug, engine_error, engine_warn};
use tokio::sync::Mutex;

use crate::cache::{CacheError, CacheKey, CachedResponse, ResponseCache};
use crate::decode::decode_fixed;
use crate::fetch::Fetcher;
use crate::{FetchError, FetchOutput, HarvestError};

const GET: &str = "GET";

/// Only plain successes are worth keeping across runs.
const CACHEABLE_STATUS: u16 = 200;

/// A fetched page, decoded with the session's fixed encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub text: String,
    pub bytes: Vec<u8>,
    pub from_cache: bool,
}

/// What a call site does when a fetch cannot complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Log and stop the current harvester without a result.
    AbortHarvest,
    /// Log and fail the run.
    Fatal,
}

/// HTTP client plus its response cache.
///
/// Lookups and network calls are serialized, so a URL reaches the network at
/// most once per run no matter how many times it is requested.
pub struct CachedSession {
    fetcher: Box<dyn Fetcher>,
    /// Used by [`CachedSession::get_uncached`]; falls back to `fetcher`.
    transfer: Option<Box<dyn Fetcher>>,
    cache: Box<dyn ResponseCache>,
    encoding: &'static Encoding,
    gate: Mutex<()>,
}

impl CachedSession {
    pub fn new(fetcher: impl Fetcher + 'static, cache: impl ResponseCache + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            transfer: None,
            cache: Box::new(cache),
            encoding: UTF_8,
            gate: Mutex::new(()),
        }
    }

    /// Separate fetcher for uncached bulk downloads.
    pub fn with_transfer_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.transfer = Some(Box::new(fetcher));
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn clear_cache(&self) -> Result<(), CacheError> {
        self.cache.clear()
    }

    /// Cached GET. A miss makes exactly one network call; a 200 response is
    /// stored before it is returned.
    pub async fn get(&self, url: &str) -> Result<Page, FetchError> {
        let key = CacheKey::new(GET, url);
        let _guard = self.gate.lock().await;

        match self.cache.load(&key) {
            Ok(Some(entry)) => {
                engine_debug!("cache hit {}", url);
                return Ok(self.page(entry, true));
            }
            Ok(None) => {}
            Err(err) => engine_warn!("Ignoring unreadable cache entry for {}: {}", url, err),
        }

        let output = self.fetcher.fetch(url).await?;
        let entry = CachedResponse::from_output(GET, &output);
        if entry.status == CACHEABLE_STATUS {
            if let Err(err) = self.cache.store(&key, &entry) {
                engine_warn!("Failed to cache response for {}: {}", url, err);
            }
        } else {
            engine_warn!("{} answered with status {}", url, entry.status);
        }
        Ok(self.page(entry, false))
    }

    /// Direct GET that neither reads nor fills the cache, made with the
    /// transfer fetcher when one is set.
    pub async fn get_uncached(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let fetcher = self.transfer.as_deref().unwrap_or(self.fetcher.as_ref());
        fetcher.fetch(url).await
    }

    fn page(&self, entry: CachedResponse, from_cache: bool) -> Page {
        let decoded = decode_fixed(&entry.body, self.encoding);
        if decoded.had_errors {
            engine_debug!(
                "{} is not valid {}; replaced malformed bytes",
                entry.url,
                decoded.encoding_label
            );
        }
        Page {
            url: entry.url,
            final_url: entry.final_url,
            status: entry.status,
            text: decoded.html,
            bytes: entry.body,
            from_cache,
        }
    }
}

/// Fetch through the session, turning transport failures into a logged `None`.
pub async fn get_response(session: &CachedSession, url: &str) -> Option<Page> {
    match session.get(url).await {
        Ok(page) => Some(page),
        Err(err) => {
            engine_error!("Failed to load page {}: {}", url, err);
            None
        }
    }
}

/// Fetch with an explicit failure policy for this call site.
pub async fn fetch_page(
    session: &CachedSession,
    url: &str,
    policy: FetchFailure,
) -> Result<Option<Page>, HarvestError> {
    match policy {
        FetchFailure::AbortHarvest => Ok(get_response(session, url).await),
        FetchFailure::Fatal => match session.get(url).await {
            Ok(page) => Ok(Some(page)),
            Err(source) => {
                engine_error!("Failed to load page {}: {}", url, source);
                Err(HarvestError::Fetch {
                    url: url.to_string(),
                    source,
                })
            }
        },
    }
}
