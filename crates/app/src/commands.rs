//! Command implementations.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use meridian_application::ports::{KeyValueStorage, PageSinks};
use meridian_application::{
    ApiClient, CreateApiClientParams, LoadDocument, OpenClientPayload, ResolveStore,
    ResolveStoreInput, RouteOutcome, Router, SafeLocalStorage, WorkspaceStore, create_api_client,
};
use meridian_domain::{ClientConfiguration, ClientId, Workspace};
use meridian_infrastructure::{
    FileKeyValueStorage, MemoryKeyValueStorage, OpenApiImporter, ReqwestDocumentFetcher,
    TracingPageSink, to_json_stable,
};

use crate::cli::{Cli, Command, RouteArgs};
use crate::config::{attach_document, load_configuration};
use crate::surface::TerminalSurface;

/// Runs the parsed command line and returns what to print.
///
/// # Errors
///
/// Returns an error if the configuration or document cannot be loaded, or
/// the command fails.
pub async fn run(cli: &Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => load_configuration(path)?,
        None => ClientConfiguration::default(),
    };
    if let Some(path) = &cli.document {
        attach_document(&mut config, path)?;
    }

    // The document must be in the store before the configuration is bound,
    // authentication is only mapped onto the active document at binding.
    let storage = open_storage(cli);
    let (store, _) = ResolveStore::new(&storage).execute(ResolveStoreInput {
        is_read_only: cli.read_only,
        persist_data: true,
        has_document_source: config.has_document_source(),
    });
    let store = Arc::new(store);
    let fetcher = ReqwestDocumentFetcher::new()?;
    LoadDocument::new(fetcher, OpenApiImporter::new())
        .execute(&config, &store)
        .await?;

    let client = bootstrap(cli, config, store, storage)?;

    match &cli.command {
        Command::Route(args) => route(&client, args),
        Command::Requests => Ok(list_requests(&client.store().workspace())),
        Command::Show => Ok(to_json_stable(&client.store().workspace())?),
        Command::SelectClient { client: id } => {
            let id: ClientId = id.parse()?;
            client.select_client(id);
            Ok(format!("selected {id}\n"))
        }
    }
}

/// Creates the client over an already seeded store and mounts it on the
/// terminal.
///
/// # Errors
///
/// Returns an error if the client could not be mounted.
pub fn bootstrap(
    cli: &Cli,
    config: ClientConfiguration,
    store: Arc<WorkspaceStore>,
    storage: SafeLocalStorage,
) -> Result<ApiClient> {
    let sink = Arc::new(TracingPageSink);
    let surface = Arc::new(TerminalSurface::new());

    let mut params = CreateApiClientParams::new(Router::new(cli.history.into()), config);
    params.el = Some(surface.clone());
    params.is_read_only = cli.read_only;
    params.store = Some(store);
    params.storage = storage;
    params.page_sinks = PageSinks {
        seo: Some(sink.clone()),
        favicon: Some(sink),
    };

    let client = create_api_client(params);
    if !surface.is_attached() {
        bail!("client was not mounted");
    }
    Ok(client)
}

fn open_storage(cli: &Cli) -> SafeLocalStorage {
    let backend: Option<Arc<dyn KeyValueStorage>> = if cli.no_storage {
        Some(Arc::new(MemoryKeyValueStorage::new()))
    } else if let Some(path) = &cli.storage {
        Some(Arc::new(FileKeyValueStorage::new(path)))
    } else {
        FileKeyValueStorage::in_config_dir()
            .map(|storage| Arc::new(storage) as Arc<dyn KeyValueStorage>)
    };
    backend.map_or_else(
        || {
            tracing::warn!("no config directory on this platform, storage disabled");
            SafeLocalStorage::unavailable()
        },
        SafeLocalStorage::new,
    )
}

fn route(client: &ApiClient, args: &RouteArgs) -> Result<String> {
    let mut payload = OpenClientPayload::new(&args.path, args.method);
    payload.example_name = args.example.clone();
    payload.source = args.source.map(Into::into);

    match client.open(Some(&payload)) {
        RouteOutcome::Navigated(resolved) => {
            let location = resolved.href.unwrap_or(resolved.full_path);
            Ok(format!("{location}\n"))
        }
        RouteOutcome::NotFound => bail!("no request for {} {}", args.method, args.path),
        RouteOutcome::Failed(e) => Err(e).context("navigation failed"),
        RouteOutcome::Skipped => Ok(String::new()),
    }
}

/// One line per request: method, path, operation id and document.
#[must_use]
pub fn list_requests(workspace: &Workspace) -> String {
    let mut out = String::new();
    for request in &workspace.requests {
        let _ = writeln!(
            out,
            "{:<7} {} {} [{}]",
            request.method.to_string(),
            request.path,
            request.operation_id.as_deref().unwrap_or("-"),
            request.document
        );
    }
    out
}
