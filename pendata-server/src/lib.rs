//! pendata-server: HTTP API over a single MongoDB user collection
//!
//! The store handle is created by a connection gate on the first request
//! that needs it and reused for the life of the process. Three routes
//! consume it: list, aggregation, and a fixed bulk batch.

pub mod db;
pub mod http;

pub use db::{Store, StoreConfig, StoreError};
pub use http::server::{run_server, ServerConfig};
