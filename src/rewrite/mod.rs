//! Atomic multi-file version-marker rewriting.
//!
//! Two strictly ordered passes over the working tree:
//! 1. a mandatory read-only pre-flight that proves every discovered file
//!    carries a marker line, so a single missing marker can never leave the
//!    tree partially updated;
//! 2. the mutation pass, replacing each marker line via the crash-safe
//!    [swap::FileSwap] primitive while leaving every other line
//!    byte-identical.
//!
//! Only per-file atomicity is guaranteed. A failure mid-mutation leaves the
//! already-rewritten files in place and the failed file's `.bak` backup as
//! the recovery point; concurrent invocations against the same tree are not
//! supported.

pub mod manifest;
pub mod swap;

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::FilesConfig;
use crate::domain::{MarkerFormat, Version};
use crate::error::{RelverError, Result};

/// Enumerate every qualifying source file under `root`.
///
/// A file qualifies when its extension is one of the configured source
/// extensions. Excluded directory names, generated `*.egg-info` metadata
/// directories, and the packaging manifest itself are skipped; the manifest
/// is handled separately by [manifest::rewrite_manifest].
pub fn discover_files(root: &Path, files: &FilesConfig) -> Result<Vec<PathBuf>> {
    let manifest_path = root.join(&files.manifest);
    let mut paths = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is always walked, whatever its name
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !files.excluded_dirs.iter().any(|d| d == name.as_ref())
                && !name.ends_with(".egg-info")
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            RelverError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path == manifest_path {
            continue;
        }
        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| files.extensions.iter().any(|e| e == ext))
            .unwrap_or(false);
        if matches_extension {
            paths.push(path.to_path_buf());
        }
    }

    Ok(paths)
}

/// Read-only pre-flight: every file must contain a marker line.
///
/// Fails with a missing-marker error naming the first offending file; no
/// file has been mutated at that point.
pub fn preflight(paths: &[PathBuf], marker: &MarkerFormat) -> Result<()> {
    for path in paths {
        let text = fs::read_to_string(path)?;
        if !text.lines().any(|line| marker.matches_line(line)) {
            return Err(RelverError::missing_marker(
                path,
                format!("no line beginning `{}`", marker.token),
            ));
        }
    }
    Ok(())
}

/// Build the rewritten content for one file.
///
/// Marker lines are replaced with the rendered template; every other line,
/// including its original terminator, is carried over byte-identical.
fn rewritten_content(
    text: &str,
    marker: &MarkerFormat,
    version: &Version,
    description: &str,
) -> String {
    let mut new_text = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, terminator) = if let Some(stripped) = line.strip_suffix("\r\n") {
            (stripped, "\r\n")
        } else if let Some(stripped) = line.strip_suffix('\n') {
            (stripped, "\n")
        } else {
            (line, "")
        };

        if marker.matches_line(body) {
            new_text.push_str(&marker.render(version, description));
            new_text.push_str(terminator);
        } else {
            new_text.push_str(line);
        }
    }
    new_text
}

fn rewrite_file(
    path: &Path,
    marker: &MarkerFormat,
    version: &Version,
    description: &str,
) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let new_text = rewritten_content(&text, marker, version, description);

    let swap = swap::FileSwap::begin(path)?;
    swap.commit(&new_text)
}

/// Mutation pass: rewrite the marker in each already pre-flighted file.
///
/// Takes the exact list [preflight] validated so discovery never runs a
/// second time between validation and mutation.
pub fn rewrite_files(
    paths: &[PathBuf],
    marker: &MarkerFormat,
    version: &Version,
    description: &str,
) -> Result<()> {
    for path in paths {
        rewrite_file(path, marker, version, description)?;
    }
    Ok(())
}

/// Update every qualifying file's version marker under `root`, or none.
///
/// Returns the rewritten paths in discovery order.
pub fn rewrite_tree(
    root: &Path,
    files: &FilesConfig,
    marker: &MarkerFormat,
    version: &Version,
    description: &str,
) -> Result<Vec<PathBuf>> {
    let paths = discover_files(root, files)?;
    preflight(&paths, marker)?;
    rewrite_files(&paths, marker, version, description)?;
    Ok(paths)
}
