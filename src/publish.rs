//! Package build and upload via the external packaging toolchain.
//!
//! Each step is an argv array from [crate::config::PublishConfig], run
//! synchronously from the repository root. Credentials are exported to the
//! upload command's environment rather than put on the command line.

use std::path::Path;
use std::process::Command;

use crate::config::PublishConfig;
use crate::error::{RelverError, Result};

/// Credentials for the package-index upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Credentials { username, password }
    }
}

/// Run one toolchain command, failing on a non-zero exit code.
///
/// Output is captured; stderr is folded into the error so the caller can
/// surface it once at the top level.
fn run_command(argv: &[String], cwd: &Path, credentials: &Credentials) -> Result<()> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        RelverError::config("Publish command must not be an empty argv array")
    })?;

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);

    if let Some(ref username) = credentials.username {
        cmd.env("TWINE_USERNAME", username);
    }
    if let Some(ref password) = credentials.password {
        cmd.env("TWINE_PASSWORD", password);
    }

    let rendered = argv.join(" ");
    let output = cmd
        .output()
        .map_err(|e| RelverError::process(&rendered, format!("failed to start: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RelverError::process(
            &rendered,
            format!(
                "exit code {}\nStderr: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim_end()
            ),
        ));
    }

    Ok(())
}

/// Build the package and upload it to the configured index.
///
/// `alt_target` selects the alternate upload command (e.g. a test index).
/// An empty argv in the configuration disables that step.
pub fn build_and_upload(
    config: &PublishConfig,
    cwd: &Path,
    alt_target: bool,
    credentials: &Credentials,
) -> Result<()> {
    if !config.build.is_empty() {
        run_command(&config.build, cwd, &Credentials::default())?;
    }

    let upload = if alt_target {
        &config.alt_upload
    } else {
        &config.upload
    };
    if !upload.is_empty() {
        run_command(upload, cwd, credentials)?;
    }

    Ok(())
}
