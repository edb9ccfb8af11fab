use crate::error::ApiError;
use axum::{extract::rejection::JsonRejection, Json};
use clinicals_core::ClinicalsError;

/// Unwraps a JSON body where `null` or a body without a JSON content type means "absent".
///
/// Bodies that are present but cannot be decoded become validation errors. A body
/// that cannot be read at all keeps the rejection's own status.
pub(crate) fn json_body<T>(
    payload: Result<Json<Option<T>>, JsonRejection>,
) -> Result<Option<T>, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::JsonDataError(e)) => Err(invalid_body(e.body_text())),
        Err(JsonRejection::JsonSyntaxError(e)) => Err(invalid_body(e.body_text())),
        Err(JsonRejection::MissingJsonContentType(e)) => {
            tracing::debug!("treating request body as absent: {}", e.body_text());
            Ok(None)
        }
        Err(rejection) => Err(ApiError::Body(rejection)),
    }
}

fn invalid_body(detail: String) -> ApiError {
    ClinicalsError::Validation(format!("Invalid request body: {detail}")).into()
}

/// Parses an identifier path segment; anything that is not an integer is an invalid argument.
pub(crate) fn path_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ClinicalsError::InvalidArgument(message.to_string()).into())
}
