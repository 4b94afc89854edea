//! Packaging-manifest special case.
//!
//! The manifest does not carry a marker line of its own; instead a
//! `version = "<Major>.<Minor>.<Patch>"` key-value pair is embedded somewhere
//! in a larger file. Exactly one occurrence must exist, and the version it
//! declares represents an already-published, irrevocable state: the candidate
//! must be strictly greater even when the increment check was forced.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::domain::Version;
use crate::error::{RelverError, Result};
use crate::rewrite::swap::FileSwap;

const MANIFEST_VERSION_PATTERN: &str =
    r#"(?P<attr>version\s*=\s*)(?P<open>["'])(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?P<close>["'])"#;

struct ManifestMarker {
    declared: Version,
    start: usize,
    end: usize,
    replacement: String,
}

fn version_regex() -> Result<Regex> {
    Regex::new(MANIFEST_VERSION_PATTERN)
        .map_err(|e| RelverError::config(format!("Invalid manifest version pattern: {}", e)))
}

/// Locate the single `version = "..."` assignment in manifest text.
///
/// Occurrences with mismatched quote characters are not markers.
fn find_marker(path: &Path, text: &str, candidate: &Version) -> Result<ManifestMarker> {
    let re = version_regex()?;

    let mut found: Option<ManifestMarker> = None;
    for caps in re.captures_iter(text) {
        let open = caps.name("open").map(|m| m.as_str()).unwrap_or_default();
        let close = caps.name("close").map(|m| m.as_str()).unwrap_or_default();
        if open != close {
            continue;
        }

        if found.is_some() {
            return Err(RelverError::ambiguous_marker(
                path,
                format!(
                    "more than one `version = {0}<Major>.<Minor>.<Patch>{0}` assignment found",
                    open
                ),
            ));
        }

        let whole = caps.get(0).ok_or_else(|| {
            RelverError::config("Manifest version pattern produced no match range".to_string())
        })?;
        let declared = Version::parse(&format!(
            "{}.{}.{}",
            &caps["major"], &caps["minor"], &caps["patch"]
        ))?;

        found = Some(ManifestMarker {
            declared,
            start: whole.start(),
            end: whole.end(),
            replacement: format!("{}{}{}{}", &caps["attr"], open, candidate, close),
        });
    }

    found.ok_or_else(|| {
        RelverError::missing_marker(
            path,
            "no `version = \"<Major>.<Minor>.<Patch>\"` assignment found",
        )
    })
}

/// Read-only manifest check: occurrence count plus the strictly-greater rule.
///
/// Returns `Ok(None)` when the manifest does not exist (the step is simply
/// skipped), otherwise the version the manifest currently declares.
pub fn check_manifest(path: &Path, candidate: &Version) -> Result<Option<Version>> {
    if !path.is_file() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let marker = find_marker(path, &text, candidate)?;

    if *candidate <= marker.declared {
        return Err(RelverError::target_version(format!(
            "given version `{}` not greater than published version `{}` in `{}`",
            candidate,
            marker.declared,
            path.display()
        )));
    }

    Ok(Some(marker.declared))
}

/// Rewrite the manifest's version assignment to `candidate`.
///
/// Re-runs the full check so the manifest is never modified when the marker
/// is missing, duplicated, or declares a version the candidate does not
/// exceed. Returns the previously declared version, or `None` when no
/// manifest exists.
pub fn rewrite_manifest(path: &Path, candidate: &Version) -> Result<Option<Version>> {
    if !path.is_file() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let marker = find_marker(path, &text, candidate)?;

    if *candidate <= marker.declared {
        return Err(RelverError::target_version(format!(
            "given version `{}` not greater than published version `{}` in `{}`",
            candidate,
            marker.declared,
            path.display()
        )));
    }

    let mut new_text = String::with_capacity(text.len());
    new_text.push_str(&text[..marker.start]);
    new_text.push_str(&marker.replacement);
    new_text.push_str(&text[marker.end..]);

    let swap = FileSwap::begin(path)?;
    swap.commit(&new_text)?;

    Ok(Some(marker.declared))
}
