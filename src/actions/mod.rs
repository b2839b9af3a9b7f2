use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;

pub mod news;
pub mod stats;

pub use news::*;
pub use stats::*;

/// Single-object response envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// List response envelope
#[derive(Debug, Serialize)]
pub struct DataListResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    errors: String,
}

pub fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (
        status,
        Json(ErrorResponse {
            errors: message.to_string(),
        }),
    )
}
