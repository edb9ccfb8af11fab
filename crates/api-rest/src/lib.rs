//! # API REST
//!
//! REST API implementation for the clinicals service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Decoding JSON request bodies into the core input types
//! - Translating core errors into status codes and `{error, message}` bodies
//!
//! Uses `clinicals-core` for all validation and persistence.

#![warn(rust_2018_idioms)]

mod clinical_data;
pub mod error;
mod extract;
mod patients;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use clinicals_core::{ClinicalDataService, PatientService, Repositories};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ErrorRes};

/// Application state for the REST API server
///
/// Shared by all request handlers. Both services point at the same repositories.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientService,
    pub clinical_data: ClinicalDataService,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self {
            patients: PatientService::new(repos.clone()),
            clinical_data: ClinicalDataService::new(repos),
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Builds the complete REST router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/clinicaldata",
            get(clinical_data::list_clinical_data).post(clinical_data::create_clinical_data),
        )
        .route("/clinicaldata/save", post(clinical_data::save_for_patient))
        .route(
            "/clinicaldata/:id",
            get(clinical_data::get_clinical_data)
                .put(clinical_data::update_clinical_data)
                .delete(clinical_data::delete_clinical_data),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Clinicals REST API is alive".into(),
    })
}
