use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::{FetchMetadata, FetchOutput};

const META_EXT: &str = "json";
const BODY_EXT: &str = "body";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cache write failed: {0}")]
    Persist(#[from] PersistError),
    #[error("corrupt cache entry {key}: {message}")]
    Corrupt { key: String, message: String },
}

/// Cache key derived from the request method and the exact URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(method: &str, url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.to_ascii_uppercase().as_bytes());
        hasher.update(b" ");
        hasher.update(url.as_bytes());
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for byte in digest.iter() {
            let _ = write!(&mut hex, "{byte:02x}");
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored response. Bodies are kept as raw bytes so a hit is byte-identical
/// to the original network response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub method: String,
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn from_output(method: &str, output: &FetchOutput) -> Self {
        let FetchMetadata {
            original_url,
            final_url,
            status,
            content_type,
            ..
        } = &output.metadata;
        Self {
            method: method.to_string(),
            url: original_url.clone(),
            final_url: final_url.clone(),
            status: *status,
            content_type: content_type.clone(),
            body: output.bytes.clone(),
        }
    }
}

/// Backing store for the session cache.
pub trait ResponseCache: Send + Sync {
    fn load(&self, key: &CacheKey) -> Result<Option<CachedResponse>, CacheError>;
    fn store(&self, key: &CacheKey, response: &CachedResponse) -> Result<(), CacheError>;
    /// Drop every entry.
    fn clear(&self) -> Result<(), CacheError>;
}

/// Directory-backed cache that survives across runs.
///
/// Each entry is a `{key}.json` metadata file plus a `{key}.body` file. The
/// body is written first, so a metadata file always has a complete body.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl FileCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    fn path(&self, key: &CacheKey, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{ext}", key.as_str()))
    }
}

impl ResponseCache for FileCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CachedResponse>, CacheError> {
        let meta = match fs::read_to_string(self.path(key, META_EXT)) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut response: CachedResponse =
            serde_json::from_str(&meta).map_err(|err| CacheError::Corrupt {
                key: key.as_str().to_string(),
                message: err.to_string(),
            })?;
        response.body = match fs::read(self.path(key, BODY_EXT)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::Corrupt {
                    key: key.as_str().to_string(),
                    message: "body file missing".into(),
                })
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Some(response))
    }

    fn store(&self, key: &CacheKey, response: &CachedResponse) -> Result<(), CacheError> {
        let meta = serde_json::to_string_pretty(response).map_err(|err| CacheError::Corrupt {
            key: key.as_str().to_string(),
            message: err.to_string(),
        })?;
        self.writer
            .write(&format!("{}.{BODY_EXT}", key.as_str()), &response.body)?;
        self.writer
            .write(&format!("{}.{META_EXT}", key.as_str()), meta)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            let ours = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == META_EXT || ext == BODY_EXT);
            if ours && path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// In-process cache; entries live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, CachedResponse>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CachedResponse>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResponseCache for MemoryCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CachedResponse>, CacheError> {
        Ok(self.lock().get(key).cloned())
    }

    fn store(&self, key: &CacheKey, response: &CachedResponse) -> Result<(), CacheError> {
        self.lock().insert(key.clone(), response.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.lock().clear();
        Ok(())
    }
}
