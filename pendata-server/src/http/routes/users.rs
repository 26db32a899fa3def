//! Document listing endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use mongodb::bson::Document;

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET / - every document in the collection
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>, ApiError> {
    let handle = state.store.handle().await.map_err(ApiError::Connection)?;
    let users = UserRepo::new(handle)
        .list()
        .await
        .map_err(ApiError::Query)?;

    Ok(Json(users))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_users))
}
