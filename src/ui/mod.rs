//! User interface module - status output and diagnostics.
//!
//! The release workflow is non-interactive; everything here is one-way
//! formatting, kept in `formatter` so it stays pure and testable.

pub mod formatter;

pub use formatter::{
    display_error, display_release_plan, display_skipped, display_status, display_success,
    display_usage_hint,
};
