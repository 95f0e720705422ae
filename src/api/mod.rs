//! JSON API

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    loader::{DatasetHandle, LoadState},
    models::SearchResult,
    presenter::{Card, Presenter},
    search::{NormalizedQuery, search},
    session::{EMPTY_QUERY_MESSAGE, STILL_LOADING_MESSAGE},
};

/// State shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: DatasetHandle,
    pub presenter: Arc<Presenter>,
}

impl AppState {
    #[must_use]
    pub fn new(dataset: DatasetHandle, presenter: Presenter) -> Self {
        Self {
            dataset,
            presenter: Arc::new(presenter),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResult>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = NormalizedQuery::new(&params.q) else {
        return error_response(StatusCode::BAD_REQUEST, EMPTY_QUERY_MESSAGE);
    };
    let Some(dataset) = state.dataset.get() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, STILL_LOADING_MESSAGE);
    };

    let results = search(&dataset, &query);
    let now = Utc::now();
    let cards = results
        .iter()
        .map(|result| state.presenter.card(result, now))
        .collect();

    Json(SearchResponse {
        query: query.to_string(),
        count: results.len(),
        results,
        cards,
    })
    .into_response()
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = match state.dataset.state() {
        LoadState::Loading => StatusResponse {
            state: "loading",
            message: None,
        },
        LoadState::Ready(_) => StatusResponse {
            state: "ready",
            message: None,
        },
        LoadState::Failed(reason) => StatusResponse {
            state: "failed",
            message: Some(reason),
        },
    };
    Json(response)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_handler))
        .route("/status", get(status_handler))
}
