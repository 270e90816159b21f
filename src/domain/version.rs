use std::fmt;

use crate::domain::AppError;

/// Numeric `MAJOR.MINOR.PATCH` triple used for thresholds and range membership.
///
/// Ordering is lexicographic over the three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const ZERO: Version = Version::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse the numeric prefix of a version string.
    ///
    /// Anything after the first `-` is ignored, as are components beyond the third.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let base = s.split('-').next().unwrap_or_default();
        let mut sections = base.split('.');
        let mut next = |name: &str| -> Result<u32, AppError> {
            let section = sections.next().ok_or_else(|| {
                AppError::invalid_version(s, format!("missing {} component", name))
            })?;
            section.parse::<u32>().map_err(|_| {
                AppError::invalid_version(
                    s,
                    format!("{} component '{}' is not numeric", name, section),
                )
            })
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;
        Ok(Self { major, minor, patch })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A product version as it appears in download URLs and package names,
/// e.g. `7.1.0`, `7.0.3-MP1` or `0.0.0-forestdb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    number: Version,
}

impl ReleaseVersion {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let number = Version::parse(raw)?;
        Ok(Self { raw: raw.to_string(), number })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn number(&self) -> Version {
        self.number
    }

    /// Everything after the first `-`, or an empty string when there is no suffix.
    pub fn suffix(&self) -> &str {
        self.raw.split_once('-').map(|(_, suffix)| suffix).unwrap_or("")
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
