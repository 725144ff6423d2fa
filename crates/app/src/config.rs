//! Client configuration file loading.

use std::path::Path;

use anyhow::{Context, Result};
use meridian_domain::ClientConfiguration;
use meridian_infrastructure::parse_structured;
use serde_json::Value;

/// Reads a JSON or YAML configuration file.
///
/// An empty file yields the default configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a
/// configuration.
pub fn load_configuration(path: &Path) -> Result<ClientConfiguration> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    parse_configuration(&text)
        .with_context(|| format!("invalid configuration {}", path.display()))
}

/// Parses configuration text.
///
/// # Errors
///
/// Returns an error if the text is not JSON/YAML or has wrongly typed
/// fields.
pub fn parse_configuration(text: &str) -> Result<ClientConfiguration> {
    if text.trim().is_empty() {
        return Ok(ClientConfiguration::default());
    }
    let value = parse_structured(text)?;
    if value.is_null() {
        return Ok(ClientConfiguration::default());
    }
    Ok(serde_json::from_value::<ClientConfiguration>(value)?)
}

/// Replaces the document source with the contents of `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn attach_document(config: &mut ClientConfiguration, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    config.content = Some(Value::String(text));
    config.url = None;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use meridian_domain::DefaultHttpClient;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_yaml_configuration() {
        let config = parse_configuration(
            "darkMode: true\nproxyUrl: https://proxy.example\ndefaultHttpClient:\n  targetKey: node\n  clientKey: undici\n",
        )
        .unwrap();

        assert_eq!(config.dark_mode, Some(true));
        assert_eq!(config.proxy_url.as_deref(), Some("https://proxy.example"));
        assert_eq!(
            config.default_http_client,
            Some(DefaultHttpClient::new("node", "undici"))
        );
    }

    #[test]
    fn empty_text_is_default() {
        assert_eq!(parse_configuration("  \n").unwrap(), ClientConfiguration::default());
    }

    #[test]
    fn wrongly_typed_field_is_rejected() {
        assert!(parse_configuration(r#"{"darkMode": "yes"}"#).is_err());
    }

    #[test]
    fn document_file_replaces_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        std::fs::write(&path, "openapi: 3.1.0\n").unwrap();
        let mut config = ClientConfiguration {
            url: Some("https://example.com/openapi.json".into()),
            ..ClientConfiguration::default()
        };

        attach_document(&mut config, &path).unwrap();

        assert_eq!(config.url, None);
        assert_eq!(config.content, Some(Value::String("openapi: 3.1.0\n".into())));
    }
}
