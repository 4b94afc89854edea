use std::fmt;

use crate::error::{RelverError, Result};

/// Semantic version representation
///
/// Ordering is derived component-wise (major, then minor, then patch), so
/// comparisons are numeric rather than lexical: `10.0.0` sorts after `2.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string strictly as `<Major>.<Minor>.<Patch>`.
    ///
    /// No prefix, suffix, or pre-release component is accepted; anything
    /// that is not exactly three dot-separated unsigned integers is a
    /// format error.
    pub fn parse(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(RelverError::format(format!(
                "`{}` not of form `<Major>.<Minor>.<Patch>`",
                version
            )));
        }

        let major = Self::parse_part(version, "Major", parts[0])?;
        let minor = Self::parse_part(version, "Minor", parts[1])?;
        let patch = Self::parse_part(version, "Patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Parse a version from a recorded tag string (e.g. "v1.2.3" -> 1.2.3).
    ///
    /// Tags created by earlier tooling may carry a `v`/`V` prefix, which is
    /// tolerated here but not in candidate versions given on the command line.
    pub fn parse_tag(tag: &str) -> Result<Self> {
        // At most one prefix character; `vv1.2.3` is not a version tag
        let clean_tag = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);
        Self::parse(clean_tag)
    }

    fn parse_part(version: &str, name: &str, part: &str) -> Result<u32> {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(RelverError::format(format!(
                "{} number in `{}` is not an unsigned integer",
                name, version
            )));
        }
        part.parse::<u32>().map_err(|e| {
            RelverError::format(format!("{} number in `{}` out of range: {}", name, version, e))
        })
    }

    /// Whether this version is exactly one semantic step ahead of `prev`.
    ///
    /// Exactly one of the three single-increment shapes must hold, with
    /// lower components reset to zero:
    /// - major + 1, minor = 0, patch = 0
    /// - same major, minor + 1, patch = 0
    /// - same major and minor, patch + 1
    pub fn is_single_increment_from(&self, prev: &Version) -> bool {
        // checked_add keeps a prior component at u32::MAX from overflowing
        let bumped = |next: u32, base: u32| base.checked_add(1) == Some(next);
        (bumped(self.major, prev.major) && self.minor == 0 && self.patch == 0)
            || (self.major == prev.major && bumped(self.minor, prev.minor) && self.patch == 0)
            || (self.major == prev.major
                && self.minor == prev.minor
                && bumped(self.patch, prev.patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_rejects_prefix() {
        assert!(Version::parse("v1.2.3").is_err());
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1.2.x").is_err());
        assert!(Version::parse("1.-2.3").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("1..3").is_err());
    }

    #[test]
    fn test_version_parse_tag_strips_prefix() {
        assert_eq!(Version::parse_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(Version::parse_tag("V0.1.0").unwrap(), Version::new(0, 1, 0));
        assert_eq!(Version::parse_tag("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_tag_strips_one_prefix_at_most() {
        assert!(Version::parse_tag("vv1.2.3").is_err());
        assert!(Version::parse_tag("Vv1.2.3").is_err());
        assert!(Version::parse_tag("vV1.2.3").is_err());
    }

    #[test]
    fn test_version_ordering_is_numeric() {
        assert!(Version::new(10, 0, 0) > Version::new(2, 0, 0));
        assert!(Version::new(1, 10, 0) > Version::new(1, 2, 0));
        assert!(Version::new(1, 0, 10) > Version::new(1, 0, 2));
    }

    #[test]
    fn test_single_increment_accepts_each_step() {
        let prev = Version::new(1, 2, 3);
        assert!(Version::new(2, 0, 0).is_single_increment_from(&prev));
        assert!(Version::new(1, 3, 0).is_single_increment_from(&prev));
        assert!(Version::new(1, 2, 4).is_single_increment_from(&prev));
    }

    #[test]
    fn test_single_increment_requires_reset() {
        let prev = Version::new(1, 2, 3);
        // Major bump without resetting minor/patch
        assert!(!Version::new(2, 1, 0).is_single_increment_from(&prev));
        assert!(!Version::new(2, 0, 1).is_single_increment_from(&prev));
        // Minor bump without resetting patch
        assert!(!Version::new(1, 3, 1).is_single_increment_from(&prev));
    }

    #[test]
    fn test_single_increment_rejects_skips_and_decreases() {
        let prev = Version::new(1, 2, 3);
        assert!(!Version::new(1, 2, 5).is_single_increment_from(&prev));
        assert!(!Version::new(3, 0, 0).is_single_increment_from(&prev));
        assert!(!Version::new(1, 2, 3).is_single_increment_from(&prev));
        assert!(!Version::new(1, 2, 2).is_single_increment_from(&prev));
        assert!(!Version::new(0, 9, 9).is_single_increment_from(&prev));
    }

    #[test]
    fn test_single_increment_does_not_overflow_at_component_max() {
        let prev = Version::new(u32::MAX, u32::MAX, u32::MAX);
        assert!(!Version::new(0, 0, 0).is_single_increment_from(&prev));
        assert!(!Version::new(u32::MAX, u32::MAX, 0).is_single_increment_from(&prev));
        assert!(!Version::new(u32::MAX, 0, 0).is_single_increment_from(&prev));
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
    }
}
