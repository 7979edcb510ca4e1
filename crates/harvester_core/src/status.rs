use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Detailed status label used when a detail page names none of the known statuses.
pub const NONE_OBSERVED: &str = "none observed";

/// Statuses accepted for index rows that carry no status code.
pub const FALLBACK_STATUSES: [PepStatus; 2] = [PepStatus::Active, PepStatus::Draft];

static STATUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Active|Draft|Final|Provisional|Rejected|Superseded|Withdrawn|Deferred|April Fool!|Accepted",
    )
    .expect("status pattern is valid")
});

/// Closed set of statuses a PEP detail page may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PepStatus {
    Active,
    Draft,
    Final,
    Provisional,
    Rejected,
    Superseded,
    Withdrawn,
    Deferred,
    AprilFool,
    Accepted,
}

impl PepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PepStatus::Active => "Active",
            PepStatus::Draft => "Draft",
            PepStatus::Final => "Final",
            PepStatus::Provisional => "Provisional",
            PepStatus::Rejected => "Rejected",
            PepStatus::Superseded => "Superseded",
            PepStatus::Withdrawn => "Withdrawn",
            PepStatus::Deferred => "Deferred",
            PepStatus::AprilFool => "April Fool!",
            PepStatus::Accepted => "Accepted",
        }
    }

    fn from_literal(literal: &str) -> Option<Self> {
        Some(match literal {
            "Active" => PepStatus::Active,
            "Draft" => PepStatus::Draft,
            "Final" => PepStatus::Final,
            "Provisional" => PepStatus::Provisional,
            "Rejected" => PepStatus::Rejected,
            "Superseded" => PepStatus::Superseded,
            "Withdrawn" => PepStatus::Withdrawn,
            "Deferred" => PepStatus::Deferred,
            "April Fool!" => PepStatus::AprilFool,
            "Accepted" => PepStatus::Accepted,
            _ => return None,
        })
    }
}

impl fmt::Display for PepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a detected status, `none observed` when absent.
pub fn status_label(status: Option<PepStatus>) -> &'static str {
    status.map_or(NONE_OBSERVED, PepStatus::as_str)
}

/// First known status literal in the flattened detail-page field list.
pub fn detect_status(text: &str) -> Option<PepStatus> {
    STATUS_PATTERN
        .find(text)
        .and_then(|m| PepStatus::from_literal(m.as_str()))
}

/// Status code from the first index cell.
///
/// The cell reads as a type glyph followed by the status letter, so only
/// two-character cells carry a code and it sits at offset 1.
pub fn parse_status_code(cell_text: &str) -> Option<char> {
    let mut chars = cell_text.chars();
    let (_glyph, code) = (chars.next()?, chars.next()?);
    chars.next().is_none().then_some(code)
}

/// Status the index table promises for a code; unknown codes map to `None`.
pub fn expected_status(code: char) -> Option<PepStatus> {
    match code {
        'A' => Some(PepStatus::Active),
        'D' => Some(PepStatus::Draft),
        'F' => Some(PepStatus::Final),
        'P' => Some(PepStatus::Provisional),
        'R' => Some(PepStatus::Rejected),
        'S' => Some(PepStatus::Superseded),
        'W' => Some(PepStatus::Withdrawn),
        _ => None,
    }
}
