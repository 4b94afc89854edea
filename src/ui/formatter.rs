//! Pure formatting functions for UI output.

use std::path::PathBuf;

use console::style;

use crate::domain::Version;

/// Format and print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a deliberately skipped step.
pub fn display_skipped(message: &str) {
    println!("{} {}", style("-").dim(), message);
}

/// Point the user at the built-in help after a failure.
pub fn display_usage_hint() {
    eprintln!("Run `relver --help` for usage.");
}

/// Display what a release would do, without doing it.
///
/// Used in dry-run mode after validation and pre-flight have passed.
pub fn display_release_plan(
    previous: Option<&Version>,
    candidate: &Version,
    files: &[PathBuf],
    manifest: Option<&Version>,
) {
    match previous {
        Some(prev) => {
            println!("\n{}", style("Proposed Version Change:").bold());
            println!("  From: {}", style(prev).red());
            println!("  To:   {}", style(candidate).green());
        }
        None => {
            println!("\n{}", style("Initial Version:").bold());
            println!("  New version: {}", style(candidate).green());
        }
    }

    if let Some(declared) = manifest {
        println!(
            "  Manifest version {} would become {}",
            style(declared).red(),
            style(candidate).green()
        );
    }

    println!("{}", style(format!("{} file(s) would be rewritten:", files.len())).bold());
    for path in files.iter().take(10) {
        println!("  - {}", path.display());
    }
    if files.len() > 10 {
        println!("  ... and {} more files", files.len() - 10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_release_plan_initial() {
        display_release_plan(None, &Version::new(0, 1, 0), &[], None);
    }

    #[test]
    fn test_display_release_plan_with_previous() {
        display_release_plan(
            Some(&Version::new(1, 2, 3)),
            &Version::new(1, 3, 0),
            &[PathBuf::from("a.py")],
            Some(&Version::new(1, 2, 0)),
        );
    }
}
