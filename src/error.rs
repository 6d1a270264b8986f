use crate::provider::ProviderError;
use crate::table::TableError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, warn};
use serde_json::json;
use thiserror::Error;

// Everything a request handler can fail with. The display string is what the
// client sees in the error field of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameter: {field}.")]
    MissingRequiredParameter { field: String },
    #[error("Invalid format for {field}: {reason}.")]
    InvalidParameterFormat { field: String, reason: String },
    #[error("Unknown operation: {name}.")]
    UnknownOperation { name: String },
    #[error("No data found for the given parameters.")]
    NoDataFound,
    #[error("Data provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Column not found in data: {column}.")]
    UnknownColumn { column: String },
    #[error("The table has no rows to chart.")]
    EmptyTable,
    #[error("Unsupported chart type: {requested}.")]
    UnsupportedChartType { requested: String },
    #[error("Malformed table payload: {0}")]
    MalformedTransport(#[from] TableError),
    #[error("Internal error: {0}")]
    Internal(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoDataFound => StatusCode::NOT_FOUND,
            ApiError::Provider(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            warn!("Request failed with {status}: {message}");
        } else {
            debug!("Request rejected with {status}: {message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
