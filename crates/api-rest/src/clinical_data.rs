//! `/clinicaldata` handlers.

use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
};
use clinicals_core::models::{ClinicalData, ClinicalDataForPatient, ClinicalDataInput};
use clinicals_core::validation::CLINICAL_DATA_ID_INVALID;

use crate::error::ApiError;
use crate::extract::{json_body, path_id};
use crate::AppState;

#[axum::debug_handler]
pub(crate) async fn list_clinical_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClinicalData>>, ApiError> {
    Ok(Json(state.clinical_data.list_all()?))
}

#[axum::debug_handler]
pub(crate) async fn get_clinical_data(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ClinicalData>, ApiError> {
    let id = path_id(&id, CLINICAL_DATA_ID_INVALID)?;
    Ok(Json(state.clinical_data.get_by_id(id)?))
}

/// Create a measurement with an explicit timestamp and patient reference.
#[axum::debug_handler]
pub(crate) async fn create_clinical_data(
    State(state): State<AppState>,
    payload: Result<Json<Option<ClinicalDataInput>>, JsonRejection>,
) -> Result<(StatusCode, Json<ClinicalData>), ApiError> {
    let input = json_body(payload)?;
    let row = state.clinical_data.create(input.as_ref())?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[axum::debug_handler]
pub(crate) async fn update_clinical_data(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    payload: Result<Json<Option<ClinicalDataInput>>, JsonRejection>,
) -> Result<Json<ClinicalData>, ApiError> {
    let id = path_id(&id, CLINICAL_DATA_ID_INVALID)?;
    let input = json_body(payload)?;
    Ok(Json(state.clinical_data.update(id, input.as_ref())?))
}

#[axum::debug_handler]
pub(crate) async fn delete_clinical_data(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&id, CLINICAL_DATA_ID_INVALID)?;
    state.clinical_data.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Save a measurement for an existing patient; the measurement time is set by the server.
///
/// # Errors
/// - `400 Bad Request` if a component is blank or `patientId` is missing or not positive.
/// - `404 Not Found` if the patient does not exist. Nothing is stored in that case.
#[axum::debug_handler]
pub(crate) async fn save_for_patient(
    State(state): State<AppState>,
    payload: Result<Json<Option<ClinicalDataForPatient>>, JsonRejection>,
) -> Result<(StatusCode, Json<ClinicalData>), ApiError> {
    let dto = json_body(payload)?;
    let row = state.clinical_data.create_for_patient(dto.as_ref())?;
    Ok((StatusCode::CREATED, Json(row)))
}
