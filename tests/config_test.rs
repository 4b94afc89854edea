// tests/config_test.rs
use std::io::Write;

use tempfile::NamedTempFile;

use relver::config::{load_config, Config};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.marker.token, "__version__");
    assert_eq!(config.marker.template, "__version__ = \"{version}\"");
    assert_eq!(config.git.remote, "origin");
    assert_eq!(config.git.branch, "master");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[marker]
token = "VERSION"
template = "VERSION = '{version}: {description}'"

[files]
extensions = ["rs"]
excluded_dirs = ["target"]
manifest = "Cargo.toml"

[git]
branch = "main"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.marker.token, "VERSION");
    assert_eq!(config.files.extensions, vec!["rs".to_string()]);
    assert_eq!(config.files.manifest, "Cargo.toml");
    assert_eq!(config.git.branch, "main");
    // Unspecified sections fall back to defaults
    assert_eq!(config.git.remote, "origin");
    assert_eq!(config.publish.upload[0], "twine");
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[marker\ntoken = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_marker_format_validation_happens_at_use() {
    let mut temp_file = NamedTempFile::new().unwrap();
    // Template does not start with the token
    temp_file
        .write_all(b"[marker]\ntoken = \"__version__\"\ntemplate = \"v = '{version}'\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(config.marker.format().is_err());
}

#[test]
fn test_default_files_config() {
    let config = Config::default();
    assert!(config.files.extensions.contains(&"py".to_string()));
    assert!(config.files.extensions.contains(&"pyi".to_string()));
    assert!(config.files.excluded_dirs.contains(&"build".to_string()));
    assert!(config.files.excluded_dirs.contains(&"dist".to_string()));
    assert_eq!(config.files.manifest, "setup.py");
}
