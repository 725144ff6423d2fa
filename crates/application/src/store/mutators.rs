//! Entity mutators of the workspace store.

use meridian_domain::{
    DEFAULT_WORKSPACE_NAME, DocumentPath, RequestDefinition, RequestExample, Workspace,
    WorkspaceDocument, generate_id,
};
use serde_json::Value;

use super::{DocumentScope, StoreError, WorkspaceState, WorkspaceStore};

/// Adds and switches workspaces.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceMutators<'a> {
    store: &'a WorkspaceStore,
}

impl<'a> WorkspaceMutators<'a> {
    pub(super) const fn new(store: &'a WorkspaceStore) -> Self {
        Self { store }
    }

    /// Creates a workspace with a fresh uid and returns the uid.
    ///
    /// A blank name falls back to the default workspace name. The new
    /// workspace is not activated.
    pub fn add(&self, name: &str, proxy_url: Option<String>) -> String {
        let name = match name.trim() {
            "" => DEFAULT_WORKSPACE_NAME,
            trimmed => trimmed,
        };
        let mut workspace = Workspace::new(generate_id(), name);
        workspace.proxy_url = proxy_url;
        let uid = workspace.uid.clone();
        self.raw_add(workspace);
        uid
    }

    /// Inserts `workspace` as is, replacing any workspace with the same uid.
    pub fn raw_add(&self, workspace: Workspace) {
        let _ = self.store.mutate(|state| {
            state.insert(workspace);
            Ok(())
        });
    }

    /// Makes `uid` the active workspace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WorkspaceNotFound`] for unknown uids.
    pub fn activate(&self, uid: &str) -> Result<(), StoreError> {
        self.store.mutate(|state| state.activate(uid))
    }

    /// `(uid, name)` of every workspace, ordered by uid.
    #[must_use]
    pub fn list(&self) -> Vec<(String, String)> {
        self.store
            .export()
            .workspaces
            .into_iter()
            .map(|workspace| (workspace.uid, workspace.name))
            .collect()
    }
}

/// Adds, removes and selects documents of the active workspace.
#[derive(Debug, Clone, Copy)]
pub struct CollectionMutators<'a> {
    store: &'a WorkspaceStore,
}

impl<'a> CollectionMutators<'a> {
    pub(super) const fn new(store: &'a WorkspaceStore) -> Self {
        Self { store }
    }

    /// Adds a document and its requests under `name`.
    ///
    /// A document with the same name is replaced together with its
    /// requests. The first document added becomes the active one.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature matches the other mutators.
    pub fn add(
        &self,
        name: &str,
        document: WorkspaceDocument,
        requests: Vec<RequestDefinition>,
    ) -> Result<(), StoreError> {
        self.store.mutate(|state| {
            let workspace = &mut state.active;
            workspace.requests.retain(|request| request.document != name);
            workspace.requests.extend(requests.into_iter().map(|mut request| {
                request.document = name.to_string();
                request
            }));
            workspace.documents.insert(name.to_string(), document);
            if workspace.active_document().is_none() {
                workspace.active_document = Some(name.to_string());
            }
            Ok(())
        })?;
        tracing::debug!(document = name, "document added to workspace");
        Ok(())
    }

    /// Removes a document and its requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DocumentNotFound`] for unknown names.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        self.store.mutate(|state| {
            let workspace = &mut state.active;
            workspace
                .documents
                .remove(name)
                .ok_or_else(|| StoreError::DocumentNotFound(name.to_string()))?;
            workspace.requests.retain(|request| request.document != name);
            if workspace.active_document.as_deref() == Some(name) {
                workspace.active_document = workspace.documents.keys().next().cloned();
            }
            Ok(())
        })
    }

    /// Selects the active document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DocumentNotFound`] for unknown names.
    pub fn set_active(&self, name: &str) -> Result<(), StoreError> {
        self.store.mutate(|state| {
            let workspace = &mut state.active;
            if !workspace.documents.contains_key(name) {
                return Err(StoreError::DocumentNotFound(name.to_string()));
            }
            workspace.active_document = Some(name.to_string());
            Ok(())
        })
    }
}

/// Reads and writes security schemes of a document.
#[derive(Debug, Clone, Copy)]
pub struct SecuritySchemeMutators<'a> {
    store: &'a WorkspaceStore,
}

impl<'a> SecuritySchemeMutators<'a> {
    pub(super) const fn new(store: &'a WorkspaceStore) -> Self {
        Self { store }
    }

    /// The scheme `name` of the document in `scope`.
    #[must_use]
    pub fn get(&self, scope: &DocumentScope, name: &str) -> Option<Value> {
        self.store.read(|workspace| {
            let document = match scope {
                DocumentScope::Active => workspace.active_document(),
                DocumentScope::Named(document) => workspace.documents.get(document),
            };
            document
                .and_then(|document| document.security_scheme(name))
                .cloned()
        })
    }

    /// Replaces the scheme `name` of the document in `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or its
    /// `components` section is not an object.
    pub fn set(&self, scope: DocumentScope, name: &str, value: Value) -> Result<(), StoreError> {
        self.store
            .update_document(scope, &DocumentPath::security_scheme(name), value)
    }
}

/// Manages the examples of stored requests.
#[derive(Debug, Clone, Copy)]
pub struct RequestExampleMutators<'a> {
    store: &'a WorkspaceStore,
}

impl<'a> RequestExampleMutators<'a> {
    pub(super) const fn new(store: &'a WorkspaceStore) -> Self {
        Self { store }
    }

    /// Adds or replaces the example `key` of a request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RequestNotFound`] for unknown request uids.
    pub fn add(
        &self,
        request_uid: &str,
        key: &str,
        example: RequestExample,
    ) -> Result<(), StoreError> {
        self.with_request(request_uid, |request| {
            request.examples.insert(key.to_string(), example);
            Ok(())
        })
    }

    /// Selects the example `key` of a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or the example does not exist.
    pub fn set_active(&self, request_uid: &str, key: &str) -> Result<(), StoreError> {
        self.with_request(request_uid, |request| {
            if !request.examples.contains_key(key) {
                return Err(StoreError::ExampleNotFound {
                    request: request.uid.clone(),
                    example: key.to_string(),
                });
            }
            request.active_example = key.to_string();
            Ok(())
        })
    }

    /// Removes the example `key`; removing the selected example selects the
    /// first remaining one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or the example does not exist.
    pub fn remove(&self, request_uid: &str, key: &str) -> Result<(), StoreError> {
        self.with_request(request_uid, |request| {
            if request.examples.remove(key).is_none() {
                return Err(StoreError::ExampleNotFound {
                    request: request.uid.clone(),
                    example: key.to_string(),
                });
            }
            if request.active_example == key {
                request.active_example = request.examples.keys().next().cloned().unwrap_or_default();
            }
            Ok(())
        })
    }

    fn with_request(
        &self,
        request_uid: &str,
        f: impl FnOnce(&mut RequestDefinition) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        self.store.mutate(|state| {
            let request = state
                .active
                .request_mut(request_uid)
                .ok_or_else(|| StoreError::RequestNotFound(request_uid.to_string()))?;
            f(request)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use meridian_domain::{DEFAULT_WORKSPACE_UID, HttpMethod, request::DEFAULT_EXAMPLE};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn petstore() -> WorkspaceDocument {
        WorkspaceDocument::new(json!({"info": {"title": "Petstore"}})).unwrap()
    }

    #[test]
    fn first_document_becomes_active() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        store.collections().add("one", petstore(), vec![]).unwrap();
        store.collections().add("two", petstore(), vec![]).unwrap();
        assert_eq!(store.workspace().active_document.as_deref(), Some("one"));
    }

    #[test]
    fn re_adding_a_document_replaces_its_requests() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        let requests = || vec![RequestDefinition::new("ignored", "/pets", HttpMethod::Get)];
        store.collections().add("api", petstore(), requests()).unwrap();
        store.collections().add("api", petstore(), requests()).unwrap();
        let workspace = store.workspace();
        assert_eq!(workspace.requests.len(), 1);
        assert_eq!(workspace.requests[0].document, "api");
    }

    #[test]
    fn removing_active_document_selects_another() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        store.collections().add("a", petstore(), vec![]).unwrap();
        store.collections().add("b", petstore(), vec![]).unwrap();
        store.collections().remove("a").unwrap();
        assert_eq!(store.workspace().active_document.as_deref(), Some("b"));
        assert_eq!(
            store.collections().remove("a").unwrap_err(),
            StoreError::DocumentNotFound("a".into())
        );
    }

    #[test]
    fn workspace_add_and_activate() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        let uid = store.workspaces().add("  ", None);
        assert_eq!(store.workspaces().list().len(), 2);
        assert_eq!(store.workspace().uid, DEFAULT_WORKSPACE_UID);

        store.workspaces().activate(&uid).unwrap();
        let active = store.workspace();
        assert_eq!(active.uid, uid);
        assert_eq!(active.name, DEFAULT_WORKSPACE_NAME);
        assert!(store.workspaces().activate("nope").is_err());
    }

    #[test]
    fn raw_add_replaces_same_uid() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        let mut renamed = Workspace::default_workspace();
        renamed.name = "Renamed".into();
        store.workspaces().raw_add(renamed);
        assert_eq!(store.workspace().name, "Renamed");
        assert_eq!(store.workspaces().list().len(), 1);
    }

    #[test]
    fn security_scheme_set_and_get() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        store.collections().add("api", petstore(), vec![]).unwrap();
        let schemes = store.security_schemes();
        schemes
            .set(DocumentScope::Active, "bearer", json!({"type": "http"}))
            .unwrap();
        assert_eq!(
            schemes.get(&DocumentScope::Named("api".into()), "bearer"),
            Some(json!({"type": "http"}))
        );
    }

    #[test]
    fn request_examples_lifecycle() {
        let store = WorkspaceStore::new(Workspace::default_workspace());
        let request = RequestDefinition::new("api", "/pets", HttpMethod::Post);
        let uid = request.uid.clone();
        store
            .collections()
            .add("api", petstore(), vec![request])
            .unwrap();

        let examples = store.request_examples();
        examples
            .add(
                &uid,
                "large",
                RequestExample {
                    name: "Large".into(),
                    body: Some(json!({"size": 10})),
                },
            )
            .unwrap();
        examples.set_active(&uid, "large").unwrap();
        assert!(examples.set_active(&uid, "missing").is_err());

        examples.remove(&uid, "large").unwrap();
        let workspace = store.workspace();
        assert_eq!(workspace.requests[0].active_example, DEFAULT_EXAMPLE);
        assert!(examples.add("unknown", "x", RequestExample::default()).is_err());
    }
}
