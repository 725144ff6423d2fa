//! Resolve store use case.

use meridian_domain::{DATA_VERSION, PersistedWorkspaces, StorageKey, Workspace};

use crate::local_storage::SafeLocalStorage;
use crate::store::WorkspaceStore;

/// Input for resolving the store of a new client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveStoreInput {
    /// The client never writes to storage.
    pub is_read_only: bool,
    /// Mutations are written back to storage.
    pub persist_data: bool,
    /// A document `url` or `content` is configured.
    pub has_document_source: bool,
}

/// Where the resolved store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Restored from local storage.
    Loaded,
    /// Fresh default workspace; the data version was stamped.
    FreshDefault,
    /// Default workspace without touching storage.
    BareDefault,
}

/// Use case building the workspace store of a client.
pub struct ResolveStore<'a> {
    storage: &'a SafeLocalStorage,
}

impl<'a> ResolveStore<'a> {
    /// Creates a new `ResolveStore` use case.
    #[must_use]
    pub const fn new(storage: &'a SafeLocalStorage) -> Self {
        Self { storage }
    }

    /// Loads the persisted store or creates a default one.
    ///
    /// Never fails: unreadable or outdated data falls back to a default
    /// workspace.
    #[must_use]
    pub fn execute(&self, input: ResolveStoreInput) -> (WorkspaceStore, StoreOrigin) {
        // Read-only clients never probe, the probe itself writes.
        let available = !input.is_read_only && self.storage.is_available();
        let persisted = if available {
            self.load_persisted()
        } else {
            None
        };

        let (store, origin) = if let Some(persisted) = persisted {
            match WorkspaceStore::from_persisted(persisted) {
                Ok(store) => (store, StoreOrigin::Loaded),
                Err(e) => {
                    tracing::warn!(error = %e, "persisted workspace is inconsistent, starting fresh");
                    self.fresh_or_bare(input)
                }
            }
        } else {
            self.fresh_or_bare(input)
        };

        let store = if input.persist_data && available {
            store.with_persistence(self.storage.clone())
        } else {
            store
        };
        tracing::info!(?origin, persistent = store.is_persistent(), "workspace store resolved");
        (store, origin)
    }

    fn fresh_or_bare(&self, input: ResolveStoreInput) -> (WorkspaceStore, StoreOrigin) {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        if input.is_read_only || input.has_document_source {
            (store, StoreOrigin::BareDefault)
        } else {
            self.storage.set_item(StorageKey::DataVersion, DATA_VERSION);
            (store, StoreOrigin::FreshDefault)
        }
    }

    fn load_persisted(&self) -> Option<PersistedWorkspaces> {
        let raw = self.storage.get_item(StorageKey::Workspace)?;
        let version = self.storage.get_item(StorageKey::DataVersion);
        if version.as_deref() != Some(DATA_VERSION) {
            tracing::warn!(
                found = version.as_deref().unwrap_or("none"),
                expected = DATA_VERSION,
                "ignoring persisted workspace written with another data version"
            );
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(persisted) => Some(persisted),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse persisted workspace");
                None
            }
        }
    }
}
