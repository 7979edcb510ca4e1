use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};
use harvester_core::{Mode, Table};

use crate::cache::{CacheError, FileCache};
use crate::config::HarvestConfig;
use crate::fetch::ReqwestFetcher;
use crate::harvest::{self, HarvestContext};
use crate::session::CachedSession;
use crate::{EngineEvent, HarvestError};

/// Receives progress and discrepancy events while a harvester runs.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that writes progress to the debug log. Discrepancies are already
/// logged by the harvester that found them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: EngineEvent) {
        if let EngineEvent::Progress(progress) = event {
            engine_debug!(
                "{}: {}/{}",
                progress.mode,
                progress.current,
                progress.total
            );
        }
    }
}

/// Result of one harvester run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// Tabular result, header row first.
    Report(Table),
    /// A file was written; there is nothing to report.
    Saved(PathBuf),
    /// The harvester stopped early and already logged why.
    Nothing,
}

impl<const N: usize> From<Option<harvester_core::Report<N>>> for HarvestOutcome {
    fn from(report: Option<harvester_core::Report<N>>) -> Self {
        report.map_or(HarvestOutcome::Nothing, |report| {
            HarvestOutcome::Report(report.into())
        })
    }
}

/// Owns the cached session and configuration for a run.
pub struct Engine {
    session: CachedSession,
    config: HarvestConfig,
}

impl Engine {
    /// Engine backed by the network and the on-disk cache under the root.
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let pages = ReqwestFetcher::new(config.fetch.clone()).map_err(HarvestError::Client)?;
        let transfer =
            ReqwestFetcher::new(config.transfer.clone()).map_err(HarvestError::Client)?;
        let session = CachedSession::new(pages, FileCache::new(config.cache_dir()))
            .with_transfer_fetcher(transfer)
            .with_encoding(config.fetch.response_encoding);
        Ok(Self::with_session(config, session))
    }

    pub fn with_session(config: HarvestConfig, session: CachedSession) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn clear_cache(&self) -> Result<(), CacheError> {
        engine_info!("Clearing HTTP cache");
        self.session.clear_cache()
    }

    pub async fn run(
        &self,
        mode: Mode,
        sink: &dyn EventSink,
    ) -> Result<HarvestOutcome, HarvestError> {
        let ctx = HarvestContext {
            session: &self.session,
            config: &self.config,
            sink,
        };
        let outcome: HarvestOutcome = match mode {
            Mode::WhatsNew => harvest::whats_new(ctx).await?.into(),
            Mode::LatestVersions => harvest::latest_versions(ctx).await?.into(),
            Mode::Download => harvest::download(ctx)
                .await?
                .map_or(HarvestOutcome::Nothing, HarvestOutcome::Saved),
            Mode::Pep => harvest::pep(ctx).await?.into(),
        };
        Ok(outcome)
    }

    /// Run a harvester to completion on a fresh single-threaded runtime.
    pub fn run_blocking(
        &self,
        mode: Mode,
        sink: &dyn EventSink,
    ) -> Result<HarvestOutcome, HarvestError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(HarvestError::Runtime)?;
        runtime.block_on(self.run(mode, sink))
    }
}
