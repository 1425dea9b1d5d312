//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the pipeline, so the
//! core never reads process-wide environment variables itself.

use crate::constants::DEFAULT_NAMESPACE;
use crate::output::OutputFormat;
use crate::UuidResult;

/// Configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolkitConfig {
    default_format: OutputFormat,
    default_namespace: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Plain,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Builds a configuration from raw environment values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UuidError::InvalidArgument`] if the format value is not `plain` or `json`.
    pub fn from_env_values(
        format: Option<String>,
        namespace: Option<String>,
    ) -> UuidResult<Self> {
        Ok(Self {
            default_format: format_from_env_value(format)?,
            default_namespace: namespace_from_env_value(namespace),
        })
    }

    /// Format used when `-f` is not given.
    pub fn default_format(&self) -> OutputFormat {
        self.default_format
    }

    /// Namespace token used for v3/v5 when none is given.
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses the default output format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`OutputFormat::Plain`].
pub fn format_from_env_value(value: Option<String>) -> UuidResult<OutputFormat> {
    let parsed = non_blank(value)
        .map(|v| v.parse::<OutputFormat>())
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parses the default namespace token from an optional string value.
///
/// The token is resolved later, together with any token given on the command line, so an
/// invalid value only fails commands that actually need a namespace.
pub fn namespace_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UuidError;

    #[test]
    fn test_format_defaults_to_plain() {
        assert_eq!(format_from_env_value(None).unwrap(), OutputFormat::Plain);
        assert_eq!(
            format_from_env_value(Some("  ".into())).unwrap(),
            OutputFormat::Plain
        );
    }

    #[test]
    fn test_format_parses_value() {
        assert_eq!(
            format_from_env_value(Some(" json ".into())).unwrap(),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_format_rejects_unknown_value() {
        let result = format_from_env_value(Some("yaml".into()));

        assert!(matches!(result, Err(UuidError::InvalidArgument(_))));
    }

    #[test]
    fn test_namespace_defaults_to_dns() {
        assert_eq!(namespace_from_env_value(None), "DNS");
        assert_eq!(namespace_from_env_value(Some(String::new())), "DNS");
        assert_eq!(namespace_from_env_value(Some(" URL ".into())), "URL");
    }

    #[test]
    fn test_from_env_values() {
        let config =
            ToolkitConfig::from_env_values(Some("json".into()), Some("oid".into())).unwrap();

        assert_eq!(config.default_format(), OutputFormat::Json);
        assert_eq!(config.default_namespace(), "oid");
        assert_eq!(ToolkitConfig::default().default_namespace(), "DNS");
    }
}
