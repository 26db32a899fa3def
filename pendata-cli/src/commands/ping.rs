//! Store reachability check.

use anyhow::{Context, Result};
use clap::Parser;

use pendata_server::db::{Store, StoreConfig};

/// Arguments for the ping command
#[derive(Parser, Debug)]
pub struct PingArgs {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URL", default_value = "mongodb://localhost:27017")]
    pub mongodb_url: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "database")]
    pub db_name: String,

    /// Collection name
    #[arg(long, env = "COLLECTION_NAME", default_value = "pengguna")]
    pub collection: String,
}

/// Force one connection through the gate and report the result.
pub async fn run_ping(args: PingArgs) -> Result<()> {
    let store = Store::new(StoreConfig {
        url: args.mongodb_url,
        database: args.db_name,
        collection: args.collection,
        server_selection_timeout: None,
    });

    store
        .warm_up()
        .await
        .context("Document store unreachable")?;

    println!(
        "ok: {}/{}",
        store.config().database,
        store.config().collection
    );
    Ok(())
}
