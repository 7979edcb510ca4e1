use std::path::PathBuf;

use url::Url;

use crate::fetch::FetchSettings;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

pub const DOWNLOADS_DIR: &str = "downloads";
pub const RESULTS_DIR: &str = "results";
pub const LOGS_DIR: &str = "logs";
pub const CACHE_DIR: &str = ".http_cache";

/// Where to harvest from and where run artifacts go.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub main_doc_url: Url,
    pub pep_url: Url,
    /// Working root; every artifact directory lives below it.
    pub root: PathBuf,
    /// Page fetches through the cache.
    pub fetch: FetchSettings,
    /// Uncached bulk downloads.
    pub transfer: FetchSettings,
}

impl HarvestConfig {
    pub fn default_with_root(root: PathBuf) -> Self {
        Self {
            main_doc_url: Url::parse(MAIN_DOC_URL).expect("MAIN_DOC_URL is a valid url"),
            pep_url: Url::parse(PEP_URL).expect("PEP_URL is a valid url"),
            root,
            fetch: FetchSettings::default(),
            transfer: FetchSettings::transfer(),
        }
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.root.join(RESULTS_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }
}
