//! Mapping of [`CalcError`] onto HTTP responses.
//!
//! Validation failures come back as 422 with the offending field in the
//! body so the page can show the message inline. Model provider failures
//! are 502 and are not retried. Request bodies go through [`ApiJson`] so a
//! badly typed field gets the same JSON error body as any other validation
//! failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use calc_core::CalcError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug)]
pub struct ApiError(pub CalcError);

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = rejection.body_text();
        debug!(status = %rejection.status(), %reason, "rejected request body");
        match rejection {
            // well-formed JSON with a value of the wrong type or a missing field
            JsonRejection::JsonDataError(_) => ApiError(CalcError::invalid_input("body", "", reason)),
            _ => ApiError(CalcError::SerializationError { reason }),
        }
    }
}

/// `Json<T>` whose rejection is an [`ApiError`]
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: String,
    error: &'a CalcError,
}

pub fn status_for(err: &CalcError) -> StatusCode {
    match err {
        CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::UnknownUnit { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CalcError::NotFound { .. } => StatusCode::NOT_FOUND,
        CalcError::UpstreamFailure { .. } => StatusCode::BAD_GATEWAY,
        CalcError::SerializationError { .. } => StatusCode::BAD_REQUEST,
        CalcError::ConfigError { .. } | CalcError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "request failed");
        }
        let body = ErrorBody {
            code: self.0.error_code(),
            message: self.0.to_string(),
            error: &self.0,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&CalcError::invalid_input("divisor", "0", "zero")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&CalcError::not_found("page")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&CalcError::upstream("model", "down")), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_serialization_error_is_bad_request() {
        let err = CalcError::SerializationError { reason: "EOF while parsing".to_string() };
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }
}
