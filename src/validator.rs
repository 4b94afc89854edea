//! Version-increment validation against previously released versions.
//!
//! The previous version is the numeric maximum of all recorded versions,
//! never the last one in string order; a string sort would misorder
//! `10.0.0` before `2.0.0`.

use crate::domain::Version;
use crate::error::{RelverError, Result};

/// Select the greatest previously recorded version.
///
/// Recorded versions usually come from `git tag` output; entries that do not
/// parse as versions (release candidates, non-release tags) are skipped.
pub fn select_previous(recorded: &[String]) -> Option<Version> {
    recorded
        .iter()
        .filter_map(|tag| Version::parse_tag(tag).ok())
        .max()
}

/// Decide whether `candidate` is an admissible next release.
///
/// Accepts iff the candidate is exactly one semantic step ahead of the
/// previous version. Force mode bypasses the increment rule entirely; it
/// is also the only way to cut a first release, since with no previous
/// version there is nothing to increment from.
pub fn validate_increment(
    candidate: &Version,
    previous: Option<&Version>,
    force: bool,
) -> Result<()> {
    if force {
        return Ok(());
    }

    let prev = previous.ok_or_else(|| {
        RelverError::no_prior_version(format!(
            "no recorded versions, use `-f {}` for a first release",
            candidate
        ))
    })?;

    if !candidate.is_single_increment_from(prev) {
        return Err(RelverError::increment(format!(
            "{} not a single increment from {}",
            candidate, prev
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_previous_numeric_max() {
        let recorded = vec![
            "1.0.0".to_string(),
            "10.0.0".to_string(),
            "2.0.0".to_string(),
        ];
        assert_eq!(select_previous(&recorded), Some(Version::new(10, 0, 0)));
    }

    #[test]
    fn test_select_previous_skips_unparseable() {
        let recorded = vec![
            "v1.2.3".to_string(),
            "nightly".to_string(),
            "1.2.4-rc1".to_string(),
        ];
        assert_eq!(select_previous(&recorded), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_select_previous_empty() {
        assert_eq!(select_previous(&[]), None);
    }

    #[test]
    fn test_validate_single_steps_accepted() {
        let prev = Version::new(1, 2, 3);
        for candidate in [
            Version::new(2, 0, 0),
            Version::new(1, 3, 0),
            Version::new(1, 2, 4),
        ] {
            assert!(validate_increment(&candidate, Some(&prev), false).is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_skip() {
        let prev = Version::new(1, 2, 3);
        let err = validate_increment(&Version::new(1, 2, 5), Some(&prev), false).unwrap_err();
        assert!(matches!(err, RelverError::Increment(_)));
    }

    #[test]
    fn test_validate_rejects_major_without_reset() {
        let prev = Version::new(1, 2, 3);
        let err = validate_increment(&Version::new(2, 1, 0), Some(&prev), false).unwrap_err();
        assert!(matches!(err, RelverError::Increment(_)));
    }

    #[test]
    fn test_validate_force_bypasses_increment() {
        let prev = Version::new(1, 2, 3);
        assert!(validate_increment(&Version::new(7, 7, 7), Some(&prev), true).is_ok());
        assert!(validate_increment(&Version::new(0, 0, 1), Some(&prev), true).is_ok());
    }

    #[test]
    fn test_validate_no_prior_requires_force() {
        let err = validate_increment(&Version::new(0, 1, 0), None, false).unwrap_err();
        assert!(matches!(err, RelverError::NoPriorVersion(_)));

        assert!(validate_increment(&Version::new(0, 1, 0), None, true).is_ok());
    }
}
