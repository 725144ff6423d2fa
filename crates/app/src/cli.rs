//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use meridian_application::{HistoryMode, RouteSource};
use meridian_domain::HttpMethod;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(
    name = "meridian",
    version,
    about = "Meridian API client - headless front end",
    long_about = "Bootstraps an API client from a configuration file and an API document,\n\
                  then routes to requests, lists them or prints the workspace."
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Client configuration file (JSON or YAML).
    #[arg(long, short, value_name = "FILE", env = "MERIDIAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API document to load instead of the configured `url` or `content`.
    #[arg(long, short, value_name = "FILE", global = true)]
    pub document: Option<PathBuf>,

    /// Never write to local storage.
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Local storage file (default: <config dir>/meridian/storage.json).
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "no_storage")]
    pub storage: Option<PathBuf>,

    /// Keep local storage in memory for this run only.
    #[arg(long, global = true)]
    pub no_storage: bool,

    /// Router flavor used to render locations.
    #[arg(long, value_enum, default_value = "web", global = true)]
    pub history: HistoryArg,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the client on a request and print its location.
    Route(RouteArgs),

    /// List the requests of the active workspace.
    Requests,

    /// Print the active workspace as JSON.
    Show,

    /// Remember a code sample client, e.g. `shell/curl`.
    SelectClient {
        /// Client id in `target/client` form.
        #[arg(value_name = "CLIENT")]
        client: String,
    },
}

/// Arguments of `route`.
#[derive(Debug, Parser)]
pub struct RouteArgs {
    /// Request path, e.g. `/pets`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Request method, case-insensitive.
    #[arg(value_name = "METHOD")]
    pub method: HttpMethod,

    /// Example to select after navigating.
    #[arg(long, value_name = "NAME")]
    pub example: Option<String>,

    /// Provenance tag added to the location.
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,
}

/// Router flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryArg {
    /// Plain paths.
    Web,
    /// Paths behind `#`.
    Hash,
    /// No URL, location kept in memory.
    Memory,
}

impl From<HistoryArg> for HistoryMode {
    fn from(value: HistoryArg) -> Self {
        match value {
            HistoryArg::Web => Self::Web,
            HistoryArg::Hash => Self::Hash,
            HistoryArg::Memory => Self::Memory,
        }
    }
}

/// Provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// The API reference.
    ApiReference,
    /// A `GitBook` page.
    Gitbook,
}

impl From<SourceArg> for RouteSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::ApiReference => Self::ApiReference,
            SourceArg::Gitbook => Self::Gitbook,
        }
    }
}
