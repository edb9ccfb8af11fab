//! `/patients` handlers.

use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
};
use clinicals_core::models::{Patient, PatientInput};
use clinicals_core::validation::PATIENT_ID_INVALID;

use crate::error::ApiError;
use crate::extract::{json_body, path_id};
use crate::AppState;

/// List all patients in the system, each with its clinical data.
#[axum::debug_handler]
pub(crate) async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.patients.list_all()?))
}

/// Fetch one patient.
///
/// # Errors
/// - `400 Bad Request` if the id is not a positive integer.
/// - `404 Not Found` if no patient has this id.
#[axum::debug_handler]
pub(crate) async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = path_id(&id, PATIENT_ID_INVALID)?;
    Ok(Json(state.patients.get_by_id(id)?))
}

/// Create a new patient record.
///
/// Any `id` in the body is ignored; the stored patient is returned with the id
/// assigned by the database.
#[axum::debug_handler]
pub(crate) async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<Option<PatientInput>>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let input = json_body(payload)?;
    let patient = state.patients.create(input.as_ref())?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Replace every field of an existing patient.
#[axum::debug_handler]
pub(crate) async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    payload: Result<Json<Option<PatientInput>>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let id = path_id(&id, PATIENT_ID_INVALID)?;
    let input = json_body(payload)?;
    Ok(Json(state.patients.update(id, input.as_ref())?))
}

#[axum::debug_handler]
pub(crate) async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&id, PATIENT_ID_INVALID)?;
    state.patients.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
