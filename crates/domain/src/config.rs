//! Client configuration.
//!
//! The configuration is supplied by the embedding host (or a config file)
//! and is read-mostly: after construction it only changes through
//! [`ClientConfiguration::apply`], which reports the fields that changed so
//! watchers can react to them one by one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page metadata forwarded to the SEO sink, e.g. `title`, `description`.
pub type MetaData = BTreeMap<String, String>;

/// Preferred code sample client, split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultHttpClient {
    /// Target language or platform, e.g. `shell`.
    pub target_key: String,
    /// Client library, e.g. `curl`.
    pub client_key: String,
}

impl DefaultHttpClient {
    /// Creates a new preference.
    #[must_use]
    pub fn new(target_key: impl Into<String>, client_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            client_key: client_key.into(),
        }
    }

    /// The joined `target/client` identifier, not yet validated.
    #[must_use]
    pub fn joined(&self) -> String {
        format!("{}/{}", self.target_key, self.client_key)
    }
}

/// Authentication values to prefill into the active document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationConfig {
    /// Scheme values keyed by the scheme name used in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<BTreeMap<String, serde_json::Value>>,
    /// Name of the scheme selected by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_security_scheme: Option<String>,
}

/// Configuration of a client instance.
///
/// Every field is optional; absent fields leave the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
    /// Proxy used for outgoing requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Theme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Whether the sidebar is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_sidebar: Option<bool>,
    /// Whether the "open client" button is hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_client_button: Option<bool>,
    /// Name of the embedding integration.
    #[serde(
        default,
        rename = "_integration",
        skip_serializing_if = "Option::is_none"
    )]
    pub integration: Option<String>,
    /// Preferred code sample client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_http_client: Option<DefaultHttpClient>,
    /// Dark mode flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    /// Page metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    /// Favicon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Authentication prefill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AuthenticationConfig>,
    /// URL of the API document to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline API document, either a JSON/YAML string or a JSON tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    /// Names of plugins to enable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

/// Individually watchable configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigField {
    /// `proxyUrl`
    ProxyUrl,
    /// `theme`
    Theme,
    /// `showSidebar`
    ShowSidebar,
    /// `hideClientButton`
    HideClientButton,
    /// `_integration`
    Integration,
    /// `defaultHttpClient`
    DefaultHttpClient,
    /// `darkMode`
    DarkMode,
    /// `metaData`
    MetaData,
    /// `favicon`
    Favicon,
    /// `authentication`
    Authentication,
    /// `url`
    Url,
    /// `content`
    Content,
    /// `plugins`
    Plugins,
}

macro_rules! apply_field {
    ($self:ident, $patch:ident, $changed:ident, $field:ident, $tag:expr) => {
        if $patch.$field.is_some() && $patch.$field != $self.$field {
            $self.$field = $patch.$field;
            $changed.push($tag);
        }
    };
}

impl ClientConfiguration {
    /// Returns true when a document source (`url` or `content`) is set.
    #[must_use]
    pub const fn has_document_source(&self) -> bool {
        self.url.is_some() || self.content.is_some()
    }

    /// Applies a partial configuration.
    ///
    /// Fields that are `None` in `patch` are kept. Returns the fields whose
    /// value actually changed, in declaration order.
    pub fn apply(&mut self, patch: Self) -> Vec<ConfigField> {
        let mut changed = Vec::new();
        apply_field!(self, patch, changed, proxy_url, ConfigField::ProxyUrl);
        apply_field!(self, patch, changed, theme, ConfigField::Theme);
        apply_field!(self, patch, changed, show_sidebar, ConfigField::ShowSidebar);
        apply_field!(
            self,
            patch,
            changed,
            hide_client_button,
            ConfigField::HideClientButton
        );
        apply_field!(self, patch, changed, integration, ConfigField::Integration);
        apply_field!(
            self,
            patch,
            changed,
            default_http_client,
            ConfigField::DefaultHttpClient
        );
        apply_field!(self, patch, changed, dark_mode, ConfigField::DarkMode);
        apply_field!(self, patch, changed, meta_data, ConfigField::MetaData);
        apply_field!(self, patch, changed, favicon, ConfigField::Favicon);
        apply_field!(
            self,
            patch,
            changed,
            authentication,
            ConfigField::Authentication
        );
        apply_field!(self, patch, changed, url, ConfigField::Url);
        apply_field!(self, patch, changed, content, ConfigField::Content);
        if !patch.plugins.is_empty() && patch.plugins != self.plugins {
            self.plugins = patch.plugins;
            changed.push(ConfigField::Plugins);
        }
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_camel_case_input() {
        let json = r#"{
            "defaultHttpClient": { "targetKey": "node", "clientKey": "fetch" },
            "darkMode": true,
            "_integration": "docusaurus",
            "authentication": {
                "preferredSecurityScheme": "apiKey",
                "securitySchemes": { "apiKey": { "token": "abc" } }
            }
        }"#;
        let config: ClientConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.default_http_client,
            Some(DefaultHttpClient::new("node", "fetch"))
        );
        assert_eq!(config.dark_mode, Some(true));
        assert_eq!(config.integration.as_deref(), Some("docusaurus"));
        let auth = config.authentication.unwrap();
        assert_eq!(auth.preferred_security_scheme.as_deref(), Some("apiKey"));
        assert_eq!(auth.security_schemes.unwrap().len(), 1);
    }

    #[test]
    fn apply_reports_only_changed_fields() {
        let mut config = ClientConfiguration {
            dark_mode: Some(false),
            favicon: Some("/a.ico".into()),
            ..ClientConfiguration::default()
        };
        let changed = config.apply(ClientConfiguration {
            dark_mode: Some(true),
            favicon: Some("/a.ico".into()),
            theme: Some("purple".into()),
            ..ClientConfiguration::default()
        });
        assert_eq!(changed, vec![ConfigField::Theme, ConfigField::DarkMode]);
        assert_eq!(config.dark_mode, Some(true));
        assert_eq!(config.favicon.as_deref(), Some("/a.ico"));
    }

    #[test]
    fn apply_keeps_fields_missing_from_patch() {
        let mut config = ClientConfiguration {
            proxy_url: Some("https://proxy.example".into()),
            ..ClientConfiguration::default()
        };
        assert!(config.apply(ClientConfiguration::default()).is_empty());
        assert_eq!(config.proxy_url.as_deref(), Some("https://proxy.example"));
    }

    #[test]
    fn document_source_detection() {
        let mut config = ClientConfiguration::default();
        assert!(!config.has_document_source());
        config.url = Some("https://example.com/openapi.json".into());
        assert!(config.has_document_source());
    }
}
