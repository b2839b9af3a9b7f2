use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::error;

use crate::actions::{DataListResponse, DataResponse, json_error};
use crate::news::NewsItem;
use crate::news_repo::NewsRepository;
use crate::web::AppState;

/// GET /data/news
pub async fn list_news(State(state): State<AppState>) -> impl IntoResponse {
    metrics::counter!("stats.api.news.requests_total").increment(1);

    let repo = NewsRepository::new(state.pool.clone());

    match repo.list().await {
        Ok(items) => {
            let data: Vec<NewsItem> = items
                .into_iter()
                .map(|news| NewsItem::from_news(news, &state.owner))
                .collect();
            (StatusCode::OK, Json(DataListResponse { data })).into_response()
        }
        Err(e) => {
            metrics::counter!("stats.api.errors_total").increment(1);
            error!("Failed to list news: {:#}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list news").into_response()
        }
    }
}

/// GET /data/news/{id}
pub async fn get_news_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    metrics::counter!("stats.api.news.requests_total").increment(1);

    let repo = NewsRepository::new(state.pool.clone());

    match repo.get(id).await {
        Ok(Some(news)) => {
            let data = NewsItem::from_news(news, &state.owner);
            (StatusCode::OK, Json(DataResponse { data })).into_response()
        }
        Ok(None) => json_error(StatusCode::NOT_FOUND, "News item not found").into_response(),
        Err(e) => {
            metrics::counter!("stats.api.errors_total").increment(1);
            error!("Failed to get news item {}: {:#}", id, e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get news item",
            )
            .into_response()
        }
    }
}
