//! The four harvest strategies.
//!
//! Each harvester parses what it needs out of a page before awaiting the next
//! fetch, so no document tree is held across an await point.
mod download;
mod latest_versions;
mod pep;
mod whats_new;

pub use download::{download, locate_archive};
pub use latest_versions::{latest_versions, version_links};
pub use pep::{detail_status, index_rows, pep, IndexRow};
pub use whats_new::{article_fields, entry_links, whats_new};

use harvester_core::Mode;
use url::Url;

use crate::config::HarvestConfig;
use crate::engine::EventSink;
use crate::session::CachedSession;
use crate::{EngineEvent, HarvestError, HarvestProgress};

/// Everything a harvester needs for one run.
#[derive(Clone, Copy)]
pub struct HarvestContext<'a> {
    pub session: &'a CachedSession,
    pub config: &'a HarvestConfig,
    pub sink: &'a dyn EventSink,
}

impl HarvestContext<'_> {
    fn progress(&self, mode: Mode, current: usize, total: usize) {
        self.sink.emit(EngineEvent::Progress(HarvestProgress {
            mode,
            current,
            total,
        }));
    }
}

fn resolve(base: &Url, href: &str) -> Result<Url, HarvestError> {
    base.join(href).map_err(|source| HarvestError::InvalidUrl {
        base: base.to_string(),
        href: href.to_string(),
        source,
    })
}
