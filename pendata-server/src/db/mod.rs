//! Document store access
//!
//! The gate owns first-use initialization, the store owns configuration and
//! the cached handle, and the repository owns the collection operations.

pub mod gate;
pub mod store;
pub mod users;

pub use gate::ConnectionGate;
pub use store::{Handle, Store, StoreConfig, StoreError};
pub use users::{default_batch, AlamatGroup, BulkOp, BulkSummary, UserRepo};
