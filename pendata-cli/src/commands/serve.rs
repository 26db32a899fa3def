//! HTTP server command.

use anyhow::{Context, Result};
use clap::Parser;

use pendata_server::db::{Store, StoreConfig};
use pendata_server::http::server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URL", default_value = "mongodb://localhost:27017")]
    pub mongodb_url: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "database")]
    pub db_name: String,

    /// Collection name
    #[arg(long, env = "COLLECTION_NAME", default_value = "pengguna")]
    pub collection: String,

    /// Connect to the store before accepting traffic instead of on first request
    #[arg(long)]
    pub eager: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = Store::new(StoreConfig {
        url: args.mongodb_url,
        database: args.db_name,
        collection: args.collection,
        server_selection_timeout: None,
    });

    if args.eager {
        store
            .warm_up()
            .await
            .context("Failed to connect to the document store")?;
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    tracing::info!("Starting pendata server on {}:{}", config.host, config.port);

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
