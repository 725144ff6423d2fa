//! Meridian command line front end.
//!
//! Bootstraps an API client from a configuration file, seeds it with an API
//! document and exposes routing and inspection as subcommands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod surface;

pub use cli::Cli;
pub use commands::{bootstrap, list_requests, run};
pub use surface::TerminalSurface;
