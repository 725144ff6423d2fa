//! Meridian Application - client bootstrap, state and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (storage, mount targets, page sinks, document sources)
//! - The workspace store and its mutators
//! - Configuration binding and routing
//! - The client factory and its use cases

pub mod client;
pub mod config_source;
pub mod error;
pub mod layout;
pub mod local_storage;
pub mod mapper;
pub mod observable;
pub mod plugins;
pub mod ports;
pub mod router;
pub mod store;
pub mod use_cases;

pub use client::{
    ApiClient, ClientContext, ClientPhase, CreateApiClientParams, MountOutcome, OpenClientPayload,
    RouteOutcome, RouteSource, create_api_client,
};
pub use config_source::ConfigSource;
pub use error::{ApplicationError, ApplicationResult};
pub use layout::{ActiveEntities, ClientLayout, ModalState, SidebarState};
pub use local_storage::SafeLocalStorage;
pub use mapper::{ConfigBinding, MapperContext, map_config_to_workspace_store};
pub use observable::{Observable, Subscription};
pub use plugins::{ClientPlugin, PluginManager, PluginView};
pub use router::{
    HISTORY_LIMIT, HistoryMode, ROUTES, ResolvedRoute, RouteDefinition, RouteLocation, Router,
    RouterError,
};
pub use store::{DocumentScope, StoreError, WorkspaceState, WorkspaceStore};
pub use use_cases::{LoadDocument, ResolveStore, ResolveStoreInput, StoreOrigin};
