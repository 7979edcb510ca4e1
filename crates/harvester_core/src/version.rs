use std::sync::LazyLock;

use regex::Regex;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python\s([\d\.]+)\s\((\w{1,}.*)\)").expect("version pattern is valid")
});

/// One entry of the "All versions" sidebar list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub version: String,
    pub status: String,
}

impl VersionEntry {
    fn matched(text: &str) -> Option<Self> {
        let caps = VERSION_PATTERN.captures(text)?;
        Some(Self {
            version: caps[1].to_string(),
            status: caps[2].to_string(),
        })
    }
}

/// Split a sidebar link text such as `Python 3.11.2 (stable)` into version and
/// status. Text that does not follow that shape becomes the version verbatim
/// with an empty status; this never fails.
pub fn parse_version_link(text: &str) -> VersionEntry {
    VersionEntry::matched(text).unwrap_or_else(|| VersionEntry {
        version: text.to_string(),
        status: String::new(),
    })
}
