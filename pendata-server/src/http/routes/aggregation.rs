//! Grouped user counts by alamat.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::{AlamatGroup, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /aggregation - `{_id, totalUsers}` pairs, largest group first
async fn aggregate_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlamatGroup>>, ApiError> {
    let handle = state.store.handle().await.map_err(ApiError::Connection)?;
    let groups = UserRepo::new(handle)
        .group_by_alamat()
        .await
        .map_err(ApiError::Aggregation)?;

    Ok(Json(groups))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/aggregation", get(aggregate_users))
}
