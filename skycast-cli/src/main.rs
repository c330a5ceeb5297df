//! Binary crate for the `skycast` terminal weather display.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive location and coordinate prompts
//! - Rendering the weather card to the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod screen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
