//! Client application factory.
//!
//! [`create_api_client`] resolves a workspace store, binds the
//! configuration to it and returns an [`ApiClient`] that can be mounted
//! into a host surface and navigated.

use std::sync::Arc;

use meridian_domain::{ClientConfiguration, ClientId, ConfigField, HttpMethod, StorageKey};
use parking_lot::RwLock;

use crate::config_source::ConfigSource;
use crate::layout::{ActiveEntities, ClientLayout, ModalState, SidebarState};
use crate::local_storage::SafeLocalStorage;
use crate::mapper::{ConfigBinding, MapperContext, map_config_to_workspace_store};
use crate::observable::Observable;
use crate::plugins::{ClientPlugin, PluginManager};
use crate::ports::{MountTarget, PageSinks};
use crate::router::{ResolvedRoute, RouteLocation, Router, RouterError};
use crate::store::{StoreError, WorkspaceState, WorkspaceStore};
use crate::use_cases::{ResolveStore, ResolveStoreInput, StoreOrigin};

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// The API reference rendered next to the client.
    ApiReference,
    /// A `GitBook` integration.
    Gitbook,
}

impl RouteSource {
    /// The query value carried as `_source`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiReference => "api-reference",
            Self::Gitbook => "gitbook",
        }
    }
}

/// Payload for [`ApiClient::route`] and [`ApiClient::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenClientPayload {
    /// Path of the request.
    pub path: String,
    /// Method of the request.
    pub method: HttpMethod,
    /// Example to select after navigating.
    pub example_name: Option<String>,
    /// Provenance tag.
    pub source: Option<RouteSource>,
}

impl OpenClientPayload {
    /// A payload for `path` and `method`.
    #[must_use]
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            example_name: None,
            source: None,
        }
    }

    /// Sets the provenance tag.
    #[must_use]
    pub const fn with_source(mut self, source: RouteSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the example to select.
    #[must_use]
    pub fn with_example(mut self, example_name: impl Into<String>) -> Self {
        self.example_name = Some(example_name.into());
        self
    }
}

/// Lifecycle phase of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    /// The store is resolved but the client is not attached anywhere.
    StoreResolved,
    /// The client is attached to a mount target.
    Mounted,
}

/// Result of [`ApiClient::mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// Attached to the target with this id.
    Mounted(String),
    /// Neither an argument nor a configured target was available.
    MissingTarget,
}

/// Result of [`ApiClient::route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The router navigated.
    Navigated(ResolvedRoute),
    /// No payload was given.
    Skipped,
    /// No stored request matches the payload.
    NotFound,
    /// A request matched but the router rejected the location.
    Failed(RouterError),
}

/// Shared state handed to the component tree on mount.
#[derive(Clone)]
pub struct ClientContext {
    /// The workspace store.
    pub store: Arc<WorkspaceStore>,
    /// The router.
    pub router: Arc<Router>,
    /// The observable configuration.
    pub config: ConfigSource,
    /// Layout of the client.
    pub layout: ClientLayout,
    /// Pointers to the entities shown.
    pub active: Arc<RwLock<ActiveEntities>>,
    /// Sidebar state.
    pub sidebar: Arc<RwLock<SidebarState>>,
    /// Enabled plugins.
    pub plugins: Arc<PluginManager>,
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("store", &self.store)
            .field("router", &self.router.mode())
            .field("layout", &self.layout)
            .field("active", &*self.active.read())
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

/// Parameters of [`create_api_client`].
pub struct CreateApiClientParams {
    /// Target to mount into when `mount` is called without one.
    pub el: Option<Arc<dyn MountTarget>>,
    /// Configuration, possibly shared with the host.
    pub config: ConfigSource,
    /// The client never writes to storage.
    pub is_read_only: bool,
    /// Persist the workspace to local storage.
    pub persist_data: bool,
    /// Mount into `el` during construction.
    pub mount_on_initialize: bool,
    /// Router flavor to use.
    pub router: Router,
    /// A store created beforehand; skips store resolution.
    pub store: Option<Arc<WorkspaceStore>>,
    /// Layout of the client.
    pub layout: ClientLayout,
    /// Local storage.
    pub storage: SafeLocalStorage,
    /// Externally owned dark mode flag.
    pub is_dark_mode: Observable<bool>,
    /// Page side-effect sinks.
    pub page_sinks: PageSinks,
    /// Plugins that configuration may enable by name.
    pub plugins: Vec<Arc<dyn ClientPlugin>>,
}

impl CreateApiClientParams {
    /// Defaults: not read-only, persistent, mount on initialize, desktop
    /// layout, no storage, no target.
    #[must_use]
    pub fn new(router: Router, config: impl Into<ConfigSource>) -> Self {
        Self {
            el: None,
            config: config.into(),
            is_read_only: false,
            persist_data: true,
            mount_on_initialize: true,
            router,
            store: None,
            layout: ClientLayout::default(),
            storage: SafeLocalStorage::unavailable(),
            is_dark_mode: Observable::new(false),
            page_sinks: PageSinks::default(),
            plugins: Vec::new(),
        }
    }
}

/// A client instance.
pub struct ApiClient {
    context: ClientContext,
    el: Option<Arc<dyn MountTarget>>,
    modal_state: Arc<ModalState>,
    phase: RwLock<ClientPhase>,
    origin: Option<StoreOrigin>,
    storage: SafeLocalStorage,
    is_read_only: bool,
    _binding: ConfigBinding,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("context", &self.context)
            .field("phase", &*self.phase.read())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Creates a client.
///
/// Does not import any document; seed the store before routing.
/// Configured authentication is written once into the active document of
/// the store, so pass a store that already holds it through
/// [`CreateApiClientParams::store`]. Without an active document the
/// authentication is dropped with a warning.
#[must_use]
pub fn create_api_client(params: CreateApiClientParams) -> ApiClient {
    let CreateApiClientParams {
        el,
        config,
        is_read_only,
        persist_data,
        mount_on_initialize,
        router,
        store,
        layout,
        storage,
        is_dark_mode,
        page_sinks,
        plugins,
    } = params;

    let (store, origin) = match store {
        Some(store) => (store, None),
        None => {
            let input = ResolveStoreInput {
                is_read_only,
                persist_data,
                has_document_source: config.read(ClientConfiguration::has_document_source),
            };
            let (store, origin) = ResolveStore::new(&storage).execute(input);
            (Arc::new(store), Some(origin))
        }
    };

    let plugin_manager = config.read(|config| PluginManager::new(&plugins, &config.plugins));

    let binding = map_config_to_workspace_store(
        &config,
        &store,
        &MapperContext {
            is_dark_mode,
            sinks: page_sinks,
            storage: storage.clone(),
        },
    );

    let sidebar = SidebarState {
        open: config.read(|config| config.show_sidebar.unwrap_or(true)),
        ..SidebarState::default()
    };
    let active = ActiveEntities {
        workspace: Some(store.read(|workspace| workspace.uid.clone())),
        document: store.read(|workspace| workspace.active_document.clone()),
        ..ActiveEntities::default()
    };

    let client = ApiClient {
        context: ClientContext {
            store,
            router: Arc::new(router),
            config,
            layout,
            active: Arc::new(RwLock::new(active)),
            sidebar: Arc::new(RwLock::new(sidebar)),
            plugins: Arc::new(plugin_manager),
        },
        el,
        modal_state: Arc::new(ModalState::default()),
        phase: RwLock::new(ClientPhase::StoreResolved),
        origin,
        storage,
        is_read_only,
        _binding: binding,
    };

    if mount_on_initialize {
        let _ = client.mount(None);
    }
    client
}

impl ApiClient {
    /// Attaches the client to `target`, or to the configured target.
    ///
    /// Without any target this logs an error and leaves the client
    /// unmounted; a later call with a target still succeeds.
    pub fn mount(&self, target: Option<Arc<dyn MountTarget>>) -> MountOutcome {
        let Some(target) = target.or_else(|| self.el.clone()) else {
            tracing::error!(
                "could not mount the API client: no mount target was provided. \
                 Pass a target to `mount` or set `el` when creating the client."
            );
            return MountOutcome::MissingTarget;
        };
        target.attach(self.context.clone());
        *self.phase.write() = ClientPhase::Mounted;
        tracing::debug!(target = target.id(), "API client mounted");
        MountOutcome::Mounted(target.id().to_string())
    }

    /// Navigates to the stored request matching `payload`.
    ///
    /// The first request with the same normalized path and method wins.
    pub fn route(&self, payload: Option<&OpenClientPayload>) -> RouteOutcome {
        let Some(payload) = payload else {
            return RouteOutcome::Skipped;
        };

        let found = self.context.store.read(|workspace| {
            workspace
                .find_request(&payload.path, payload.method)
                .map(|request| (workspace.uid.clone(), request.clone()))
        });
        let Some((workspace_uid, request)) = found else {
            tracing::warn!(
                path = %payload.path,
                method = %payload.method,
                "no request matches the route payload"
            );
            return RouteOutcome::NotFound;
        };

        let mut location = RouteLocation::named("request")
            .param("workspace", workspace_uid.as_str())
            .param("document", request.document.as_str())
            .param("path", request.path.as_str())
            .param("method", request.method.as_str());
        if let Some(source) = payload.source {
            location = location.query("_source", source.as_str());
        }

        match self.context.router.push(location) {
            Ok(resolved) => {
                *self.context.active.write() = ActiveEntities {
                    workspace: Some(workspace_uid),
                    document: Some(request.document),
                    request: Some(request.uid),
                    example: Some(request.active_example),
                };
                RouteOutcome::Navigated(resolved)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to navigate to request");
                RouteOutcome::Failed(e)
            }
        }
    }

    /// Opens the modal, optionally navigating to a request first.
    ///
    /// When the payload names an example that exists it is selected.
    pub fn open(&self, payload: Option<&OpenClientPayload>) -> RouteOutcome {
        let outcome = self.route(payload);
        if let (RouteOutcome::Navigated(_), Some(example)) =
            (&outcome, payload.and_then(|p| p.example_name.as_deref()))
        {
            let request = self.context.active.read().request.clone();
            if let Some(request) = request {
                if let Err(e) = self.select_example(&request, example) {
                    tracing::warn!(error = %e, "failed to select example");
                }
            }
        }
        self.modal_state.open();
        outcome
    }

    /// Applies a partial configuration.
    ///
    /// Watched fields are re-applied to the store. Returns the fields that
    /// changed.
    pub fn update_config(&self, patch: ClientConfiguration) -> Vec<ConfigField> {
        self.context.config.update(patch)
    }

    /// Selects `example_key` on the request with `operation_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if no request carries `operation_id` or it has no
    /// such example.
    pub fn update_example(&self, example_key: &str, operation_id: &str) -> Result<(), StoreError> {
        let uid = self
            .context
            .store
            .read(|workspace| {
                workspace
                    .requests
                    .iter()
                    .find(|request| request.operation_id.as_deref() == Some(operation_id))
                    .map(|request| request.uid.clone())
            })
            .ok_or_else(|| StoreError::RequestNotFound(operation_id.to_string()))?;
        self.select_example(&uid, example_key)
    }

    /// Stores a client chosen by the user, in the workspace and in local
    /// storage. Read-only clients only update the workspace.
    pub fn select_client(&self, client: ClientId) {
        self.context
            .store
            .update(meridian_domain::WorkspaceUpdate::DefaultClient(client));
        if self.is_read_only {
            tracing::debug!(%client, "read-only client, selection not stored");
            return;
        }
        self.storage
            .set_item(StorageKey::SelectedClient, client.as_str());
    }

    fn select_example(&self, request_uid: &str, example_key: &str) -> Result<(), StoreError> {
        self.context
            .store
            .request_examples()
            .set_active(request_uid, example_key)?;
        let mut active = self.context.active.write();
        if active.request.as_deref() == Some(request_uid) {
            active.example = Some(example_key.to_string());
        }
        Ok(())
    }

    /// The workspace store.
    #[must_use]
    pub fn store(&self) -> &Arc<WorkspaceStore> {
        &self.context.store
    }

    /// The modal state.
    #[must_use]
    pub fn modal_state(&self) -> &Arc<ModalState> {
        &self.modal_state
    }

    /// The router.
    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.context.router
    }

    /// The shared context handed to mount targets.
    #[must_use]
    pub const fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ClientPhase {
        *self.phase.read()
    }

    /// Whether the client refrains from writing local storage.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    /// How the store was obtained; `None` when it was supplied.
    #[must_use]
    pub const fn store_origin(&self) -> Option<StoreOrigin> {
        self.origin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::local_storage::testing::MapStorage;
    use meridian_domain::{RequestDefinition, RequestExample, WorkspaceDocument};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct Surface {
        attached: Mutex<usize>,
    }

    impl MountTarget for Surface {
        fn id(&self) -> &str {
            "surface"
        }

        fn attach(&self, _context: ClientContext) {
            *self.attached.lock() += 1;
        }
    }

    fn params() -> CreateApiClientParams {
        let mut params = CreateApiClientParams::new(Router::modal(), ClientConfiguration::default());
        params.mount_on_initialize = false;
        params
    }

    fn seeded_client() -> ApiClient {
        let client = create_api_client(params());
        let pets = RequestDefinition::new("petstore", "/pets", HttpMethod::Get)
            .with_operation_id("listPets");
        let create = RequestDefinition::new("petstore", "/pets", HttpMethod::Post)
            .with_operation_id("createPet");
        let document = WorkspaceDocument::new(json!({"info": {"title": "Petstore"}}))
            .unwrap();
        client
            .store()
            .collections()
            .add("petstore", document, vec![pets, create])
            .unwrap();
        let uid = client
            .store()
            .read(|workspace| workspace.requests[1].uid.clone());
        client
            .store()
            .request_examples()
            .add(
                &uid,
                "dog",
                RequestExample {
                    name: "Dog".into(),
                    body: Some(json!({"kind": "dog"})),
                },
            )
            .unwrap();
        client
    }

    #[test]
    fn mount_without_target_then_with_target() {
        let client = create_api_client(params());
        assert_eq!(client.mount(None), MountOutcome::MissingTarget);
        assert_eq!(client.phase(), ClientPhase::StoreResolved);

        let surface = Arc::new(Surface::default());
        let outcome = client.mount(Some(surface.clone()));
        assert_eq!(outcome, MountOutcome::Mounted("surface".into()));
        assert_eq!(client.phase(), ClientPhase::Mounted);
        assert_eq!(*surface.attached.lock(), 1);
    }

    #[test]
    fn mounts_configured_target_on_initialize() {
        let surface = Arc::new(Surface::default());
        let mut params = params();
        params.el = Some(surface.clone());
        params.mount_on_initialize = true;

        let client = create_api_client(params);

        assert_eq!(client.phase(), ClientPhase::Mounted);
        assert_eq!(*surface.attached.lock(), 1);
    }

    #[test]
    fn route_navigates_to_matching_request() {
        let client = seeded_client();
        let payload = OpenClientPayload::new("/pets/", HttpMethod::Get)
            .with_source(RouteSource::ApiReference);

        let RouteOutcome::Navigated(resolved) = client.route(Some(&payload)) else {
            panic!("expected navigation");
        };

        assert_eq!(
            resolved.full_path,
            "/workspace/default/document/petstore/path/%2Fpets/method/get?_source=api-reference"
        );
        let active = client.context().active.read().clone();
        assert_eq!(active.document.as_deref(), Some("petstore"));
        assert!(active.request.is_some());
        assert_eq!(client.router().history_len(), 1);
    }

    #[test]
    fn route_without_match_leaves_router_untouched() {
        let client = seeded_client();
        let payload = OpenClientPayload::new("/owners", HttpMethod::Get);

        assert_eq!(client.route(Some(&payload)), RouteOutcome::NotFound);
        assert_eq!(client.route(None), RouteOutcome::Skipped);
        assert_eq!(client.router().history_len(), 0);
    }

    #[test]
    fn open_shows_modal_and_selects_example() {
        let client = seeded_client();
        let payload = OpenClientPayload::new("/pets", HttpMethod::Post).with_example("dog");

        let outcome = client.open(Some(&payload));

        assert!(matches!(outcome, RouteOutcome::Navigated(_)));
        assert!(client.modal_state().is_open());
        let selected = client
            .store()
            .read(|workspace| workspace.requests[1].active_example.clone());
        assert_eq!(selected, "dog");
        assert_eq!(
            client.context().active.read().example.as_deref(),
            Some("dog")
        );
    }

    #[test]
    fn open_without_payload_only_shows_modal() {
        let client = seeded_client();
        assert_eq!(client.open(None), RouteOutcome::Skipped);
        assert!(client.modal_state().is_open());
    }

    #[test]
    fn update_example_by_operation_id() {
        let client = seeded_client();

        client
            .update_example("dog", "createPet")
            .unwrap();

        let selected = client
            .store()
            .read(|workspace| workspace.requests[1].active_example.clone());
        assert_eq!(selected, "dog");
        assert_eq!(
            client.update_example("dog", "deletePet"),
            Err(StoreError::RequestNotFound("deletePet".into()))
        );
        assert!(matches!(
            client.update_example("cat", "createPet"),
            Err(StoreError::ExampleNotFound { .. })
        ));
    }

    #[test]
    fn update_config_reaches_store() {
        let client = create_api_client(params());

        let changed = client.update_config(ClientConfiguration {
            dark_mode: Some(true),
            ..ClientConfiguration::default()
        });

        assert_eq!(changed, vec![ConfigField::DarkMode]);
        assert!(client.store().read(|workspace| workspace.dark_mode));
    }

    #[test]
    fn select_client_is_remembered() {
        let backend = Arc::new(MapStorage::default());
        let mut params = params();
        params.storage = SafeLocalStorage::new(backend.clone());
        let client = create_api_client(params);
        let curl: ClientId = "shell/curl".parse().unwrap();

        client.select_client(curl);

        assert_eq!(client.store().read(|workspace| workspace.default_client), Some(curl));
        assert_eq!(
            backend.items.lock().get("meridian-selected-client").cloned(),
            Some("shell/curl".to_string())
        );
    }

    #[test]
    fn read_only_selection_stays_out_of_storage() {
        let backend = Arc::new(MapStorage::default());
        let mut params = params();
        params.storage = SafeLocalStorage::new(backend.clone());
        params.is_read_only = true;
        let client = create_api_client(params);
        let curl: ClientId = "shell/curl".parse().unwrap();

        client.select_client(curl);

        assert!(client.is_read_only());
        assert_eq!(client.store().read(|workspace| workspace.default_client), Some(curl));
        assert!(backend.items.lock().is_empty());
    }

    #[test]
    fn supplied_store_skips_resolution() {
        let store = Arc::new(WorkspaceStore::new(meridian_domain::Workspace::new("team", "Team")));
        let mut params = params();
        params.store = Some(Arc::clone(&store));

        let client = create_api_client(params);

        assert_eq!(client.store_origin(), None);
        assert!(Arc::ptr_eq(client.store(), &store));
    }

    #[test]
    fn sidebar_follows_configuration() {
        let client = create_api_client(CreateApiClientParams {
            mount_on_initialize: false,
            ..CreateApiClientParams::new(
                Router::modal(),
                ClientConfiguration {
                    show_sidebar: Some(false),
                    ..ClientConfiguration::default()
                },
            )
        });
        assert!(!client.context().sidebar.read().open);
    }
}
