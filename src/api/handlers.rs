use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::retail::SearchError;

use super::AppState;
use super::models::{ErrorBody, SearchParams, SearchResultItem};

const MISSING_PARAMS: &str = "Both 'query' and 'visitorId' parameters are required.";

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResultItem>>, (StatusCode, Json<ErrorBody>)> {
    let config = &state.config;

    // Configured overrides win over whatever the caller sent.
    let query = config
        .query_override
        .clone()
        .or(params.query)
        .unwrap_or_default();
    let visitor_id = config
        .visitor_id_override
        .clone()
        .or(params.visitor_id)
        .unwrap_or_default();

    if query.trim().is_empty() || visitor_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorBody::new(MISSING_PARAMS))));
    }

    tracing::info!(%query, %visitor_id, "executing product search");

    let results = state
        .client
        .search(&config.placement, &query, &visitor_id)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "product search failed");
            let message = match err {
                SearchError::Api { message } => format!("An API error occurred: {message}"),
                SearchError::Unexpected { message } => {
                    format!("An unexpected error occurred: {message}")
                }
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(message)),
            )
        })?;

    let items: Vec<SearchResultItem> = results.into_iter().map(SearchResultItem::from).collect();

    Ok(Json(items))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
