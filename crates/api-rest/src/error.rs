//! Translation of core errors into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use clinicals_core::ClinicalsError;
use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRes {
    /// HTTP reason phrase, e.g. `"Not Found"`.
    pub error: String,
    pub message: String,
}

/// A handler error; the only place errors become status codes.
#[derive(Debug)]
pub enum ApiError {
    Core(ClinicalsError),
    /// The body could not be read, e.g. it exceeded the size limit.
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                ClinicalsError::Validation(_) | ClinicalsError::InvalidArgument(_) => {
                    StatusCode::BAD_REQUEST
                }
                ClinicalsError::NotFound(_) => StatusCode::NOT_FOUND,
                ClinicalsError::Conflict(_) => StatusCode::CONFLICT,
                ClinicalsError::Database(_)
                | ClinicalsError::StorageLockPoisoned
                | ClinicalsError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Core(err) if err.is_client_error() => {
                tracing::warn!("request rejected ({}): {}", self.status().as_u16(), err);
                err.to_string()
            }
            ApiError::Core(err) => {
                tracing::error!("request failed: {:?}", err);
                "Internal error".to_string()
            }
            ApiError::Body(rejection) => {
                let text = rejection.body_text();
                tracing::warn!("request body rejected ({}): {}", self.status().as_u16(), text);
                text
            }
        }
    }
}

impl From<ClinicalsError> for ApiError {
    fn from(err: ClinicalsError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorRes {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> ErrorRes {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("error body should be JSON")
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ClinicalsError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ClinicalsError::InvalidArgument("i".into()), StatusCode::BAD_REQUEST),
            (ClinicalsError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ClinicalsError::Conflict("c".into()), StatusCode::CONFLICT),
            (
                ClinicalsError::StorageLockPoisoned,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_hide_detail() {
        let response = ApiError::from(ClinicalsError::InvalidConfig("secret path".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "Internal error");
        assert!(!body.message.contains("secret path"));
    }

    #[tokio::test]
    async fn test_client_errors_carry_their_message() {
        let response =
            ApiError::from(ClinicalsError::NotFound("Patient not found with ID: 9".into()))
                .into_response();
        let body = body_of(response).await;
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "Patient not found with ID: 9");
    }
}
