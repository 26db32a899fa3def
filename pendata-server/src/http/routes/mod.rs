//! One module per endpoint; each exposes a `router()` merged by the server.

pub mod aggregation;
pub mod bulk;
pub mod health;
pub mod users;
