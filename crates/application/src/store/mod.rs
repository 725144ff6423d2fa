//! Workspace store.
//!
//! The store owns every workspace of a client instance and exposes the
//! mutation entry points the rest of the client uses. When persistence is
//! enabled each successful mutation is written to local storage.

mod mutators;

use std::collections::BTreeMap;

use meridian_domain::{
    ClientId, DomainError, DocumentPath, PersistedWorkspaces, StorageKey, Workspace,
    WorkspaceUpdate,
};
use parking_lot::RwLock;
use serde_json::Value;

use crate::local_storage::SafeLocalStorage;

pub use mutators::{
    CollectionMutators, RequestExampleMutators, SecuritySchemeMutators, WorkspaceMutators,
};

/// Error type for store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No document is selected in the active workspace.
    #[error("no active document")]
    NoActiveDocument,

    /// The named document does not exist.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The workspace does not exist.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// The request does not exist.
    #[error("request not found: {0}")]
    RequestNotFound(String),

    /// The request has no example with that key.
    #[error("request {request} has no example {example}")]
    ExampleNotFound {
        /// Request uid.
        request: String,
        /// Example key.
        example: String,
    },

    /// The mutation is invalid for the document.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Which document a document-level mutation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentScope {
    /// The active document of the active workspace.
    Active,
    /// A document of the active workspace, by name.
    Named(String),
}

/// The slice of the store the configuration mapper needs.
///
/// [`WorkspaceStore`] is the production implementation; tests substitute
/// recording doubles.
pub trait WorkspaceState: Send + Sync {
    /// The preferred code sample client of the active workspace.
    fn default_client(&self) -> Option<ClientId>;

    /// The security scheme `name` of the active document.
    fn security_scheme(&self, name: &str) -> Option<Value>;

    /// Applies a top-level workspace change.
    fn update(&self, update: WorkspaceUpdate);

    /// Writes `value` at `path` inside a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or the path crosses
    /// a non-object value.
    fn update_document(
        &self,
        scope: DocumentScope,
        path: &DocumentPath,
        value: Value,
    ) -> Result<(), StoreError>;
}

/// The active workspace is held apart from the others, so there is always
/// exactly one.
pub(crate) struct StoreState {
    pub(crate) active: Workspace,
    pub(crate) inactive: BTreeMap<String, Workspace>,
}

impl StoreState {
    fn new(active: Workspace) -> Self {
        Self {
            active,
            inactive: BTreeMap::new(),
        }
    }

    /// Inserts or replaces a workspace by uid.
    pub(crate) fn insert(&mut self, workspace: Workspace) {
        if workspace.uid == self.active.uid {
            self.active = workspace;
        } else {
            self.inactive.insert(workspace.uid.clone(), workspace);
        }
    }

    /// Makes `uid` the active workspace.
    pub(crate) fn activate(&mut self, uid: &str) -> Result<(), StoreError> {
        if self.active.uid == uid {
            return Ok(());
        }
        let next = self
            .inactive
            .remove(uid)
            .ok_or_else(|| StoreError::WorkspaceNotFound(uid.to_string()))?;
        let previous = std::mem::replace(&mut self.active, next);
        self.inactive.insert(previous.uid.clone(), previous);
        Ok(())
    }

    fn export(&self) -> PersistedWorkspaces {
        let mut workspaces: Vec<Workspace> = self.inactive.values().cloned().collect();
        workspaces.push(self.active.clone());
        workspaces.sort_by(|a, b| a.uid.cmp(&b.uid));
        PersistedWorkspaces {
            active_workspace: self.active.uid.clone(),
            workspaces,
        }
    }
}

/// Holds the workspaces of a client instance.
pub struct WorkspaceStore {
    state: RwLock<StoreState>,
    persistence: Option<SafeLocalStorage>,
}

impl std::fmt::Debug for WorkspaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("WorkspaceStore")
            .field("active", &state.active.uid)
            .field("inactive", &state.inactive.len())
            .field("persistent", &self.persistence.is_some())
            .finish()
    }
}

impl WorkspaceStore {
    /// Creates an in-memory store holding `workspace`.
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self {
            state: RwLock::new(StoreState::new(workspace)),
            persistence: None,
        }
    }

    /// Restores a store from persisted resources.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WorkspaceNotFound`] when the active workspace
    /// is not among the persisted ones.
    pub fn from_persisted(persisted: PersistedWorkspaces) -> Result<Self, StoreError> {
        let PersistedWorkspaces {
            active_workspace,
            workspaces,
        } = persisted;
        let mut workspaces = workspaces.into_iter();
        let first = workspaces
            .next()
            .ok_or_else(|| StoreError::WorkspaceNotFound(active_workspace.clone()))?;
        let mut state = StoreState::new(first);
        for workspace in workspaces {
            state.insert(workspace);
        }
        state.activate(&active_workspace)?;
        Ok(Self {
            state: RwLock::new(state),
            persistence: None,
        })
    }

    /// Writes every successful mutation to `storage`.
    #[must_use]
    pub fn with_persistence(mut self, storage: SafeLocalStorage) -> Self {
        self.persistence = Some(storage);
        self
    }

    /// Returns true when mutations are persisted.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// A copy of the active workspace.
    #[must_use]
    pub fn workspace(&self) -> Workspace {
        self.state.read().active.clone()
    }

    /// Reads the active workspace without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&Workspace) -> R) -> R {
        f(&self.state.read().active)
    }

    /// A copy of every workspace, in the persisted shape.
    #[must_use]
    pub fn export(&self) -> PersistedWorkspaces {
        self.state.read().export()
    }

    /// Workspace-level mutators.
    #[must_use]
    pub const fn workspaces(&self) -> WorkspaceMutators<'_> {
        WorkspaceMutators::new(self)
    }

    /// Document (collection) mutators.
    #[must_use]
    pub const fn collections(&self) -> CollectionMutators<'_> {
        CollectionMutators::new(self)
    }

    /// Security scheme mutators.
    #[must_use]
    pub const fn security_schemes(&self) -> SecuritySchemeMutators<'_> {
        SecuritySchemeMutators::new(self)
    }

    /// Request example mutators.
    #[must_use]
    pub const fn request_examples(&self) -> RequestExampleMutators<'_> {
        RequestExampleMutators::new(self)
    }

    /// Runs `f` against the state and persists when it succeeds.
    pub(crate) fn mutate<R>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let (result, snapshot) = {
            let mut state = self.state.write();
            let result = f(&mut state)?;
            let snapshot = self.persistence.as_ref().map(|_| state.export());
            (result, snapshot)
        };
        if let (Some(storage), Some(snapshot)) = (&self.persistence, snapshot) {
            match serde_json::to_string(&snapshot) {
                Ok(json) => storage.set_item(StorageKey::Workspace, &json),
                Err(e) => tracing::warn!(error = %e, "failed to serialize workspace"),
            }
        }
        Ok(result)
    }
}

impl WorkspaceState for WorkspaceStore {
    fn default_client(&self) -> Option<ClientId> {
        self.read(|workspace| workspace.default_client)
    }

    fn security_scheme(&self, name: &str) -> Option<Value> {
        self.read(|workspace| {
            workspace
                .active_document()
                .and_then(|document| document.security_scheme(name))
                .cloned()
        })
    }

    fn update(&self, update: WorkspaceUpdate) {
        let key = update.key();
        // Top-level updates cannot fail.
        let _ = self.mutate(|state| {
            state.active.apply(update);
            Ok(())
        });
        tracing::trace!(key, "workspace updated");
    }

    fn update_document(
        &self,
        scope: DocumentScope,
        path: &DocumentPath,
        value: Value,
    ) -> Result<(), StoreError> {
        self.mutate(|state| {
            let workspace = &mut state.active;
            let name = match scope {
                DocumentScope::Active => workspace
                    .active_document
                    .clone()
                    .ok_or(StoreError::NoActiveDocument)?,
                DocumentScope::Named(name) => name,
            };
            let document = workspace
                .documents
                .get_mut(&name)
                .ok_or(StoreError::DocumentNotFound(name))?;
            document.set(path, value)?;
            Ok(())
        })
    }
}
