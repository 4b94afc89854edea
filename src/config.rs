use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::MarkerFormat;
use crate::error::{RelverError, Result};

/// Represents the complete configuration for relver.
///
/// Covers marker format, file discovery, git targets, and publish commands.
/// Everything here is an explicit value handed to the validator/rewriter;
/// nothing is read from process-wide state.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub marker: MarkerConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Configuration for the version marker written into source files.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarkerConfig {
    #[serde(default = "default_marker_token")]
    pub token: String,

    #[serde(default = "default_marker_template")]
    pub template: String,
}

fn default_marker_token() -> String {
    "__version__".to_string()
}

fn default_marker_template() -> String {
    "__version__ = \"{version}\"".to_string()
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            token: default_marker_token(),
            template: default_marker_template(),
        }
    }
}

impl MarkerConfig {
    /// Build the validated marker format from this configuration
    pub fn format(&self) -> Result<MarkerFormat> {
        MarkerFormat::new(&self.token, &self.template)
    }
}

/// Configuration for file discovery under the working tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string(), "pyi".to_string()]
}

fn default_excluded_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "build".to_string(),
        "dist".to_string(),
        "venv".to_string(),
        ".venv".to_string(),
        "target".to_string(),
    ]
}

fn default_manifest() -> String {
    "setup.py".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            extensions: default_extensions(),
            excluded_dirs: default_excluded_dirs(),
            manifest: default_manifest(),
        }
    }
}

/// Configuration for git targets.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

/// Configuration for the packaging toolchain commands.
///
/// Each command is an argv array executed as-is from the repository root.
/// An empty array disables the step.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_build_command")]
    pub build: Vec<String>,

    #[serde(default = "default_upload_command")]
    pub upload: Vec<String>,

    #[serde(default = "default_alt_upload_command")]
    pub alt_upload: Vec<String>,
}

fn default_build_command() -> Vec<String> {
    vec![
        "python3".to_string(),
        "setup.py".to_string(),
        "sdist".to_string(),
        "bdist_wheel".to_string(),
    ]
}

fn default_upload_command() -> Vec<String> {
    vec![
        "twine".to_string(),
        "upload".to_string(),
        "dist/*".to_string(),
    ]
}

fn default_alt_upload_command() -> Vec<String> {
    vec![
        "twine".to_string(),
        "upload".to_string(),
        "--repository".to_string(),
        "testpypi".to_string(),
        "dist/*".to_string(),
    ]
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            build: default_build_command(),
            upload: default_upload_command(),
            alt_upload: default_alt_upload_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            marker: MarkerConfig::default(),
            files: FilesConfig::default(),
            git: GitConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relver.toml` in current directory
/// 3. `.relver.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relver.toml").exists() {
        fs::read_to_string("./relver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| RelverError::config(e.to_string()))?;
    Ok(config)
}
