//! Meridian binary.

use std::io::Write;

use clap::Parser;
use meridian::{Cli, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting Meridian v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&cli).await?;
    std::io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
