use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::http_server::views;
use crate::services::ServiceError;

/// Error half of every page handler. Each variant maps to one of the dedicated
/// error pages; a failed operation never answers with a success status.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => PageError::NotFound,
            ServiceError::Database(db_err) => PageError::Internal(db_err.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            PageError::BadRequest(message) => {
                log::warn!("Rejected form submission: {message}");
                (
                    StatusCode::BAD_REQUEST,
                    Html(views::bad_request_page(&message)),
                )
                    .into_response()
            }
            PageError::Internal(message) => {
                log::error!("{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}
