//! Store configuration and the cached connection handle.
//!
//! Configuration comes from the environment with hard-coded fallbacks. The
//! handle lives behind a [`ConnectionGate`] owned by the [`Store`], which
//! handlers reach through shared state.

use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use thiserror::Error;

use super::gate::ConnectionGate;

const DEFAULT_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "database";
const DEFAULT_COLLECTION: &str = "pengguna";

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string (default: mongodb://localhost:27017)
    pub url: String,

    /// Database name (default: database)
    pub database: String,

    /// Collection name (default: pengguna)
    pub collection: String,

    /// Server selection timeout override. `None` keeps the driver default.
    pub server_selection_timeout: Option<Duration>,
}

impl StoreConfig {
    /// Read `MONGODB_URL`, `DB_NAME`, and `COLLECTION_NAME` from the
    /// environment, falling back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("MONGODB_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            database: std::env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            collection: std::env::var("COLLECTION_NAME")
                .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string()),
            server_selection_timeout: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            server_selection_timeout: None,
        }
    }
}

/// An open client bound to one collection within one database.
#[derive(Debug, Clone)]
pub struct Handle {
    pub client: Client,
    pub collection: Collection<Document>,
}

/// Store-layer error taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection to document store failed: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("document query failed: {0}")]
    Query(#[source] mongodb::error::Error),

    #[error("aggregation failed: {0}")]
    Aggregation(#[source] mongodb::error::Error),

    #[error("bulk write failed: {0}")]
    Write(#[source] mongodb::error::Error),
}

/// Lazily connected document store.
///
/// The handle is created on the first request that needs it and reused for
/// the life of the process. Only the gate ever writes it; every handler
/// reads it.
pub struct Store {
    config: StoreConfig,
    gate: ConnectionGate<Handle>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            gate: ConnectionGate::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The cached handle, connecting on first use.
    pub async fn handle(&self) -> Result<&Handle, StoreError> {
        self.gate.get_or_connect(|| connect(&self.config)).await
    }

    /// Connect now instead of on the first request.
    pub async fn warm_up(&self) -> Result<(), StoreError> {
        self.handle().await.map(|_| ())
    }

    /// Connection attempts made so far, successful or not.
    pub fn connection_attempts(&self) -> u64 {
        self.gate.attempts()
    }
}

/// Open a client, verify the server is reachable, and select the collection.
async fn connect(config: &StoreConfig) -> Result<Handle, StoreError> {
    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(StoreError::Connection)?;
    options.app_name = Some("pendata".to_string());
    if let Some(timeout) = config.server_selection_timeout {
        options.server_selection_timeout = Some(timeout);
    }

    let client = Client::with_options(options).map_err(StoreError::Connection)?;

    // The driver connects lazily; ping so an unreachable store fails inside
    // the gate instead of inside the first query.
    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(StoreError::Connection)?;

    tracing::info!(
        database = %config.database,
        collection = %config.collection,
        "document store connected"
    );

    let collection = client
        .database(&config.database)
        .collection::<Document>(&config.collection);

    Ok(Handle { client, collection })
}
