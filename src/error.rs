use anyhow::{anyhow, Error};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;

pub const INVALID_PAGINATION: &str = "Invalid page or limit. Both must be positive integers.";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Request failure. Without an explicit status it is an internal error.
#[derive(Debug)]
pub struct AppError((Option<StatusCode>, Error));

impl AppError {
    pub fn status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
        Self((Some(status), err.into()))
    }

    pub fn invalid_argument() -> Self {
        Self::status(StatusCode::BAD_REQUEST, anyhow!(INVALID_PAGINATION))
    }

    pub fn status_code(&self) -> StatusCode {
        self.0 .0.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {:#}", self.0 .1);
            INTERNAL_SERVER_ERROR.to_string()
        } else {
            format!("{}", self.0 .1)
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self((None, err.into()))
    }
}
