use std::fmt;

use crate::status::{expected_status, status_label, PepStatus, FALLBACK_STATUSES};

/// What the index table led us to expect for a PEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Looked up from the index status code.
    Status(PepStatus),
    /// The index carries a code with no known status.
    UnknownCode(char),
    /// No code in the index row; any of these is acceptable.
    OneOf(Vec<PepStatus>),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Status(status) => f.write_str(status.as_str()),
            Expected::UnknownCode(code) => write!(f, "unknown index code {code:?}"),
            Expected::OneOf(statuses) => {
                let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

/// Mismatch between the index table and a PEP's own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub link: String,
    pub detected: Option<PepStatus>,
    pub expected: Expected,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.expected {
            Expected::Status(_) | Expected::UnknownCode(_) => "Expected status",
            Expected::OneOf(_) => "Expected statuses",
        };
        write!(
            f,
            "Mismatched statuses:\n{}\nStatus on page: {}\n{}: {}",
            self.link,
            status_label(self.detected),
            label,
            self.expected
        )
    }
}

/// Compare the index code of a row with the status detected on its page.
///
/// Returns the discrepancy to report, if any. Mismatches never abort a
/// harvest.
pub fn reconcile(
    link: &str,
    code: Option<char>,
    detected: Option<PepStatus>,
) -> Option<Discrepancy> {
    let expected = match code {
        Some(code) => match expected_status(code) {
            Some(expected) if Some(expected) == detected => return None,
            Some(expected) => Expected::Status(expected),
            // A code we cannot interpret only agrees with a page that names no status.
            None if detected.is_none() => return None,
            None => Expected::UnknownCode(code),
        },
        None => {
            if detected.is_some_and(|status| FALLBACK_STATUSES.contains(&status)) {
                return None;
            }
            Expected::OneOf(FALLBACK_STATUSES.to_vec())
        }
    };
    Some(Discrepancy {
        link: link.to_string(),
        detected,
        expected,
    })
}
