//! Observable client configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use meridian_domain::{ClientConfiguration, ConfigField};
use parking_lot::{Mutex, RwLock};

use crate::observable::{Listeners, Subscription};

/// Shared configuration with per-field change notification.
///
/// Clones share the same configuration and watchers.
#[derive(Clone, Default)]
pub struct ConfigSource {
    config: Arc<RwLock<ClientConfiguration>>,
    watchers: Arc<Mutex<BTreeMap<ConfigField, Arc<Listeners<ClientConfiguration>>>>>,
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("config", &*self.config.read())
            .finish_non_exhaustive()
    }
}

impl ConfigSource {
    /// Creates a source holding `config`.
    #[must_use]
    pub fn new(config: ClientConfiguration) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            watchers: Arc::default(),
        }
    }

    /// A copy of the current configuration.
    #[must_use]
    pub fn snapshot(&self) -> ClientConfiguration {
        self.config.read().clone()
    }

    /// Reads the configuration without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&ClientConfiguration) -> R) -> R {
        f(&self.config.read())
    }

    /// Applies a partial configuration and notifies watchers.
    ///
    /// Watchers of each changed field run once, fields in declaration
    /// order, watchers in registration order. Returns the changed fields.
    pub fn update(&self, patch: ClientConfiguration) -> Vec<ConfigField> {
        let changed = self.config.write().apply(patch);
        if changed.is_empty() {
            return changed;
        }
        let snapshot = self.snapshot();
        for field in &changed {
            let listeners = self.watchers.lock().get(field).cloned();
            if let Some(listeners) = listeners {
                listeners.notify(&snapshot);
            }
        }
        tracing::debug!(?changed, "configuration updated");
        changed
    }

    /// Watches a single field.
    ///
    /// With `immediate`, the handler also runs once with the current
    /// configuration before this returns.
    pub fn watch(
        &self,
        field: ConfigField,
        immediate: bool,
        handler: impl Fn(&ClientConfiguration) + Send + Sync + 'static,
    ) -> Subscription {
        let listeners = Arc::clone(self.watchers.lock().entry(field).or_default());
        let handler: Arc<dyn Fn(&ClientConfiguration) + Send + Sync> = Arc::new(handler);
        let subscription = listeners.add(Arc::clone(&handler));
        if immediate {
            handler(&self.snapshot());
        }
        subscription
    }

    /// Number of watchers registered for `field`.
    #[must_use]
    pub fn watcher_count(&self, field: ConfigField) -> usize {
        self.watchers.lock().get(&field).map_or(0, |l| l.len())
    }
}

impl From<ClientConfiguration> for ConfigSource {
    fn from(config: ClientConfiguration) -> Self {
        Self::new(config)
    }
}
