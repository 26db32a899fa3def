//! Fixed bulk batch endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::{default_batch, BulkSummary, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /bulk - run the default insert/update/delete batch
async fn run_bulk(State(state): State<Arc<AppState>>) -> Result<Json<BulkSummary>, ApiError> {
    let handle = state.store.handle().await.map_err(ApiError::Connection)?;
    let summary = UserRepo::new(handle)
        .bulk_write(&default_batch())
        .await
        .map_err(ApiError::Bulk)?;

    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/bulk", get(run_bulk))
}
