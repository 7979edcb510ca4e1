//! Harvester core: pure domain model for the documentation harvester.
//!
//! Nothing in this crate performs IO. The engine feeds it extracted text and
//! collects reports, status decisions and tallies from it.
mod mode;
mod reconcile;
mod report;
mod status;
mod tally;
mod version;

pub use mode::Mode;
pub use reconcile::{reconcile, Discrepancy, Expected};
pub use report::{Report, Table};
pub use status::{
    detect_status, expected_status, parse_status_code, status_label, PepStatus, FALLBACK_STATUSES,
    NONE_OBSERVED,
};
pub use tally::StatusTally;
pub use version::{parse_version_link, VersionEntry};
