use crate::domain::Version;
use crate::error::{RelverError, Result};

/// Version marker format: a line-prefix token plus an output template.
///
/// The token identifies marker lines in scanned files (a line qualifies when
/// it starts with the token). The template renders the replacement line,
/// with `{version}` and optional `{description}` placeholders, e.g.
/// `__version__ = "{version}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFormat {
    pub token: String,
    pub template: String,
}

impl MarkerFormat {
    /// Create a marker format, requiring the template to start with the
    /// token and contain a `{version}` placeholder
    pub fn new(token: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let template = template.into();

        if token.is_empty() {
            return Err(RelverError::config("Marker token must not be empty"));
        }
        if !template.starts_with(&token) {
            return Err(RelverError::config(format!(
                "Marker template `{}` must start with token `{}`",
                template, token
            )));
        }
        if !template.contains("{version}") {
            return Err(RelverError::config(format!(
                "Marker template `{}` must contain a {{version}} placeholder",
                template
            )));
        }

        Ok(MarkerFormat { token, template })
    }

    /// Whether a line is a marker line for this format
    pub fn matches_line(&self, line: &str) -> bool {
        line.starts_with(&self.token)
    }

    /// Render the replacement marker line (without trailing newline)
    ///
    /// Example: template `__version__ = "{version}"`, version 1.2.3
    /// -> `__version__ = "1.2.3"`
    pub fn render(&self, version: &Version, description: &str) -> String {
        self.template
            .replace("{version}", &version.to_string())
            .replace("{description}", description)
    }
}

impl Default for MarkerFormat {
    fn default() -> Self {
        MarkerFormat {
            token: "__version__".to_string(),
            template: "__version__ = \"{version}\"".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render() {
        let format = MarkerFormat::default();
        let line = format.render(&Version::new(1, 3, 0), "fix bug");
        assert_eq!(line, "__version__ = \"1.3.0\"");
    }

    #[test]
    fn test_render_with_description() {
        let format =
            MarkerFormat::new("__version__", "__version__ = \"{version}: {description}\"")
                .unwrap();
        let line = format.render(&Version::new(1, 3, 0), "fix bug");
        assert_eq!(line, "__version__ = \"1.3.0: fix bug\"");
    }

    #[test]
    fn test_matches_line() {
        let format = MarkerFormat::default();
        assert!(format.matches_line("__version__ = \"0.1.0\""));
        assert!(format.matches_line("__version__='0.1.0'  # release"));
        assert!(!format.matches_line("  __version__ = \"0.1.0\""));
        assert!(!format.matches_line("version = \"0.1.0\""));
    }

    #[test]
    fn test_template_must_start_with_token() {
        assert!(MarkerFormat::new("__version__", "version = \"{version}\"").is_err());
    }

    #[test]
    fn test_template_requires_version_placeholder() {
        assert!(MarkerFormat::new("__version__", "__version__ = \"fixed\"").is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(MarkerFormat::new("", "{version}").is_err());
    }
}
