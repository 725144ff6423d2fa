//! Configuration to store synchronization.
//!
//! Configuration flows one way, into the store. Some fields are applied
//! once when the binding is created, others are watched for the lifetime of
//! the returned [`ConfigBinding`]. Nothing here reports errors to the
//! caller: failures are logged and the offending value is skipped.

use std::sync::Arc;

use meridian_domain::{
    ClientId, ConfigField, DocumentPath, StorageKey, WorkspaceUpdate, convert_security_scheme,
    merge_objects, validate_proxy_url,
};
use serde_json::{Value, json};

use crate::config_source::ConfigSource;
use crate::local_storage::SafeLocalStorage;
use crate::observable::{Observable, Subscription};
use crate::ports::PageSinks;
use crate::store::{DocumentScope, WorkspaceState};

/// Keeps the reactive part of the mapping alive.
///
/// Dropping the binding stops watching the configuration.
#[derive(Debug)]
pub struct ConfigBinding {
    subscriptions: Vec<Subscription>,
}

impl ConfigBinding {
    /// Number of active watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Everything the mapper reads from or writes to besides the store.
#[derive(Debug, Clone, Default)]
pub struct MapperContext {
    /// Externally owned dark mode flag; competes with `darkMode` in the
    /// configuration, last writer wins.
    pub is_dark_mode: Observable<bool>,
    /// Page metadata and favicon sinks.
    pub sinks: PageSinks,
    /// Local storage holding the last selected client.
    pub storage: SafeLocalStorage,
}

/// Binds `config` to `store`.
///
/// Handlers are registered in this order: default client, config dark
/// mode, external dark mode, favicon, proxy. One-shot mappings (stored
/// client, metadata, authentication) run before this returns.
pub fn map_config_to_workspace_store<S>(
    config: &ConfigSource,
    store: &Arc<S>,
    context: &MapperContext,
) -> ConfigBinding
where
    S: WorkspaceState + ?Sized + 'static,
{
    adopt_stored_client(store.as_ref(), &context.storage);

    let mut subscriptions = Vec::new();

    let target = Arc::clone(store);
    subscriptions.push(config.watch(ConfigField::DefaultHttpClient, true, move |config| {
        let Some(preference) = &config.default_http_client else {
            return;
        };
        if let Ok(client) = ClientId::from_parts(&preference.target_key, &preference.client_key) {
            target.update(WorkspaceUpdate::DefaultClient(client));
        }
    }));

    let target = Arc::clone(store);
    subscriptions.push(config.watch(ConfigField::DarkMode, false, move |config| {
        target.update(WorkspaceUpdate::DarkMode(config.dark_mode.unwrap_or(false)));
    }));

    let target = Arc::clone(store);
    subscriptions.push(context.is_dark_mode.watch(true, move |dark| {
        target.update(WorkspaceUpdate::DarkMode(*dark));
    }));

    if let Some(seo) = &context.sinks.seo {
        config.read(|config| {
            if let Some(meta) = &config.meta_data {
                seo.apply_meta(meta);
            }
        });
    }

    if let Some(favicon) = context.sinks.favicon.clone() {
        subscriptions.push(config.watch(ConfigField::Favicon, true, move |config| {
            favicon.set_favicon(config.favicon.as_deref());
        }));
    }

    let target = Arc::clone(store);
    subscriptions.push(config.watch(ConfigField::ProxyUrl, true, move |config| {
        let Some(proxy) = &config.proxy_url else {
            return;
        };
        match validate_proxy_url(proxy) {
            Ok(proxy) => target.update(WorkspaceUpdate::ProxyUrl(Some(proxy))),
            Err(e) => tracing::warn!(error = %e, "ignoring configured proxy"),
        }
    }));

    let authentication = config.read(|config| config.authentication.clone());
    if let Some(authentication) = authentication {
        if let Some(schemes) = &authentication.security_schemes {
            tracing::debug!(count = schemes.len(), "mapping authentication to the workspace store");
            for (name, value) in schemes {
                map_security_scheme(store.as_ref(), name, value);
            }
        }
        if let Some(preferred) = &authentication.preferred_security_scheme {
            tracing::debug!(scheme = %preferred, "mapping preferred security scheme");
            if let Err(e) = store.update_document(
                DocumentScope::Active,
                &DocumentPath::active_auth(),
                Value::String(preferred.clone()),
            ) {
                tracing::warn!(scheme = %preferred, error = %e, "failed to set preferred security scheme");
            }
        }
    }

    ConfigBinding { subscriptions }
}

/// Adopts the client stored in local storage unless the store already has
/// a preference.
fn adopt_stored_client<S: WorkspaceState + ?Sized>(store: &S, storage: &SafeLocalStorage) {
    if store.default_client().is_some() {
        return;
    }
    let Some(stored) = storage.get_item(StorageKey::SelectedClient) else {
        return;
    };
    if let Ok(client) = stored.parse::<ClientId>() {
        store.update(WorkspaceUpdate::DefaultClient(client));
    }
}

/// Writes one configured scheme into the active document.
///
/// The merged and converted value is computed for diagnostics only; the
/// incoming value is what gets written, replacing the stored scheme.
fn map_security_scheme<S: WorkspaceState + ?Sized>(store: &S, name: &str, value: &Value) {
    let existing = store.security_scheme(name).unwrap_or_else(|| json!({}));
    let merged = merge_objects(&existing, value);
    let converted = convert_security_scheme(&merged);
    tracing::trace!(scheme = name, %converted, "merged security scheme");

    if let Err(e) = store.update_document(
        DocumentScope::Active,
        &DocumentPath::security_scheme(name),
        value.clone(),
    ) {
        tracing::warn!(scheme = name, error = %e, "failed to map security scheme");
    }
}
