//! pendata CLI - HTTP API over a MongoDB user-directory collection
//!
//! - `serve`: run the HTTP server (list, aggregation, and bulk routes)
//! - `ping`: force one store connection and report reachability

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "pendata",
    author,
    version,
    about = "HTTP API over a MongoDB user-directory collection"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Check that the document store is reachable
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap resolves env-backed flags.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Ping(args) => commands::ping::run_ping(args).await,
    }
}
