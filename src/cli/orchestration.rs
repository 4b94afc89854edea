//! Main release workflow orchestration logic
//!
//! Sequencing is strict and fully synchronous: validate the candidate
//! version, check and rewrite the packaging manifest, rewrite the source
//! tree, then commit, tag, push, and publish. Version-control and
//! package-upload side effects only run once validation and rewriting have
//! succeeded.

use crate::config::Config;
use crate::domain::Version;
use crate::error::Result;
use crate::git_ops::GitRepo;
use crate::publish::{self, Credentials};
use crate::rewrite::{self, manifest};
use crate::ui;
use crate::validator;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Candidate version string, strictly `<Major>.<Minor>.<Patch>`
    pub version: String,

    /// Release description used for the commit and tag message
    pub description: String,

    /// Bypass the single-increment check (never the manifest check)
    pub force: bool,

    /// Preview mode - validate and pre-flight, mutate nothing
    pub dry_run: bool,

    /// Upload to the alternate package index
    pub alt_target: bool,

    /// Package-index credentials
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// The version that was released
    pub version: Version,

    /// Number of source files whose marker was rewritten
    pub files_rewritten: usize,

    /// Whether the release was pushed to the remote
    pub pushed: bool,

    /// Whether the package was built and uploaded
    pub published: bool,
}

/// Main release workflow
///
/// 1. Open the git repository (must have tracked files)
/// 2. Parse and validate the candidate version against recorded tags
/// 3. Check the packaging manifest (strictly-greater, force-independent)
/// 4. Rewrite version markers across the tree (pre-flight, then mutate)
/// 5. Commit, tag, push when a remote exists, publish when a manifest exists
pub fn run_release(args: &ReleaseArgs, config: &Config) -> Result<ReleaseOutcome> {
    let repo = GitRepo::open()?;
    let root = repo.workdir()?;

    let candidate = Version::parse(&args.version)?;

    let tags = repo.list_tags()?;
    let previous = validator::select_previous(&tags);
    validator::validate_increment(&candidate, previous.as_ref(), args.force)?;

    let marker = config.marker.format()?;
    let manifest_path = root.join(&config.files.manifest);

    // Read-only checks before anything is mutated: the manifest's
    // strictly-greater rule, then the whole-tree marker pre-flight.
    let manifest_declared = manifest::check_manifest(&manifest_path, &candidate)?;
    let files = rewrite::discover_files(&root, &config.files)?;
    rewrite::preflight(&files, &marker)?;

    if args.dry_run {
        ui::display_release_plan(
            previous.as_ref(),
            &candidate,
            &files,
            manifest_declared.as_ref(),
        );
        return Ok(ReleaseOutcome {
            version: candidate,
            files_rewritten: 0,
            pushed: false,
            published: false,
        });
    }

    if manifest_declared.is_some() {
        manifest::rewrite_manifest(&manifest_path, &candidate)?;
        ui::display_success(&format!(
            "Updated manifest {}",
            manifest_path.display()
        ));
    } else {
        ui::display_skipped(&format!(
            "No manifest `{}`, skipping manifest update",
            config.files.manifest
        ));
    }

    rewrite::rewrite_files(&files, &marker, &candidate, &args.description)?;
    ui::display_success(&format!(
        "Rewrote version markers in {} file(s)",
        files.len()
    ));

    repo.commit_all(&args.description)?;
    ui::display_success(&format!("Committed: {}", args.description));

    let tag_name = candidate.to_string();
    repo.create_annotated_tag(&tag_name, &args.description)?;
    ui::display_success(&format!("Created tag: {}", tag_name));

    let pushed = if repo.has_remote(&config.git.remote) {
        ui::display_status(&format!(
            "Pushing {} and tag {} to remote '{}'",
            config.git.branch, tag_name, config.git.remote
        ));
        repo.push_release(&config.git.remote, &config.git.branch, &tag_name)?;
        ui::display_success(&format!("Pushed to remote '{}'", config.git.remote));
        true
    } else {
        ui::display_skipped(&format!(
            "No remote '{}', skipping push",
            config.git.remote
        ));
        false
    };

    let published = if manifest_declared.is_some() {
        ui::display_status("Building and uploading package");
        let credentials = Credentials::new(args.username.clone(), args.password.clone());
        publish::build_and_upload(&config.publish, &root, args.alt_target, &credentials)?;
        ui::display_success("Package uploaded");
        true
    } else {
        false
    };

    Ok(ReleaseOutcome {
        version: candidate,
        files_rewritten: files.len(),
        pushed,
        published,
    })
}
