//! Local storage layout.
//!
//! Persisted state lives in a flat key/value store under namespaced keys.
//! The stamped data version guards the shape of the stored workspace: data
//! written under another version is ignored rather than migrated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workspace::Workspace;

/// Version of the persisted workspace format.
pub const DATA_VERSION: &str = "1";

/// Prefix shared by every key the client writes.
pub const KEY_PREFIX: &str = "meridian-";

/// Keys used in local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Serialized workspace.
    Workspace,
    /// Version the workspace was written with.
    DataVersion,
    /// Last code sample client chosen by the user.
    SelectedClient,
}

impl StorageKey {
    /// The namespaced key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "meridian-workspace",
            Self::DataVersion => "meridian-data-version",
            Self::SelectedClient => "meridian-selected-client",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the value stored under [`StorageKey::Workspace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkspaces {
    /// Uid of the workspace shown on startup.
    pub active_workspace: String,
    /// Every workspace in the store.
    pub workspaces: Vec<Workspace>,
}

impl PersistedWorkspaces {
    /// Returns true when `active_workspace` names one of `workspaces`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.workspaces
            .iter()
            .any(|workspace| workspace.uid == self.active_workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_requires_active_workspace() {
        let mut persisted = PersistedWorkspaces {
            active_workspace: "default".into(),
            workspaces: vec![Workspace::default_workspace()],
        };
        assert!(persisted.is_consistent());
        persisted.active_workspace = "other".into();
        assert!(!persisted.is_consistent());
    }

    #[test]
    fn keys_are_namespaced() {
        for key in [
            StorageKey::Workspace,
            StorageKey::DataVersion,
            StorageKey::SelectedClient,
        ] {
            assert!(key.as_str().starts_with(KEY_PREFIX));
        }
    }
}
