//! Harvester engine: fetching, caching, extraction and the harvest strategies.
mod cache;
mod config;
mod decode;
mod engine;
mod extract;
mod fetch;
mod harvest;
mod persist;
mod session;
mod types;

pub use cache::{CacheError, CacheKey, CachedResponse, FileCache, MemoryCache, ResponseCache};
pub use config::{
    HarvestConfig, CACHE_DIR, DOWNLOADS_DIR, LOGS_DIR, MAIN_DOC_URL, PEP_URL, RESULTS_DIR,
};
pub use decode::{decode_fixed, DecodedHtml};
pub use engine::{Engine, EventSink, HarvestOutcome, LogEventSink};
pub use extract::{
    element_text, find_all, find_tag, find_unique_tag, required_attr, AttrMatch, ExtractError,
    ExtractionTarget,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use harvest::{
    article_fields, detail_status, download, entry_links, index_rows, latest_versions,
    locate_archive, pep, version_links, whats_new, HarvestContext, IndexRow,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use session::{fetch_page, get_response, CachedSession, FetchFailure, Page};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestError,
    HarvestProgress,
};
