//! Handler error mapping.
//!
//! Every store failure is caught at the handler boundary, logged, and
//! converted to the fixed 500 body for its endpoint. Clients never see
//! internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

/// Handler-boundary error with a fixed client-facing body per endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// First connection to the store failed (500)
    Connection(StoreError),

    /// Listing documents failed (500)
    Query(StoreError),

    /// Aggregation pipeline failed (500)
    Aggregation(StoreError),

    /// Bulk batch failed (500)
    Bulk(StoreError),
}

impl ApiError {
    /// The fixed client-facing message for this endpoint.
    fn message(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Terjadi kesalahan koneksi ke database",
            Self::Query(_) => "Terjadi kesalahan data",
            Self::Aggregation(_) => "Terjadi kesalahan saat aggregation",
            Self::Bulk(_) => "Terjadi kesalahan pada bulk operations",
        }
    }

    fn source(&self) -> &StoreError {
        match self {
            Self::Connection(e) | Self::Query(e) | Self::Aggregation(e) | Self::Bulk(e) => e,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the actual error, return the generic message.
        tracing::error!(error = %self.source(), "{}", self.message());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}
