use std::fmt;

use harvester_core::{Discrepancy, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
}

/// Transport-level failure: the request never produced a complete response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Position of a harvester within its item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestProgress {
    pub mode: Mode,
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(HarvestProgress),
    /// Index status and detail-page status disagree; informational only.
    Discrepancy(Discrepancy),
}

/// Fatal harvest failure; ends the run.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Extract(#[from] crate::ExtractError),
    #[error("no sidebar list mentions \"All versions\"")]
    VersionListNotFound,
    #[error("cannot resolve {href:?} against {base}: {source}")]
    InvalidUrl {
        base: String,
        href: String,
        #[source]
        source: url::ParseError,
    },
    #[error("download url {0} has no file name")]
    NoFileName(String),
    #[error("failed to save download: {0}")]
    Persist(#[from] crate::PersistError),
    #[error("failed to build http client: {0}")]
    Client(#[source] FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
