use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use log::warn;

use crate::{
    error::AppError,
    search::{search, SearchParams, SearchResult},
    state::State as AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(records))
        .route("/api/advocates", get(records))
}

pub async fn records(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let Query(params) = params.map_err(|e| {
        warn!("Rejected query string: {}", e);
        AppError::invalid_argument()
    })?;
    Ok(Json(search(state.store.as_ref(), &params).await?))
}
