//! Release version parsing

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)$").expect("version regex is valid")
});

/// A `<major>.<minor>.<patch>` release number without a ref
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Patch version number
    pub patch: u32,
}

impl ReleaseVersion {
    /// Catalog directory name for this release line (`<major>.<minor>`)
    pub fn line(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse a target version string such as `1.9.2`
pub fn parse_release_version(version: &str) -> Result<ReleaseVersion> {
    let invalid = || Error::InvalidVersion(version.to_string());

    let caps = VERSION_RE.captures(version).ok_or_else(invalid)?;
    let component = |i: usize| -> Result<u32> {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(invalid)
    };

    Ok(ReleaseVersion {
        major: component(1)?,
        minor: component(2)?,
        patch: component(3)?,
    })
}
