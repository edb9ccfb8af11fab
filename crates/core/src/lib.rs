//! # Clinicals Core
//!
//! Core business logic for the patient clinicals service.
//!
//! This crate contains the pure data operations:
//! - Patient and clinical data entities and their input shapes
//! - Field validation that runs before any persistence call
//! - Repository traits with SQLite and in-memory implementations
//! - `PatientService` and `ClinicalDataService`, which combine the two
//!
//! **No API concerns**: HTTP routing, status codes and JSON error bodies belong in `api-rest`.

pub mod clinical;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod patient;
pub mod repositories;
pub mod validation;

pub use clinical::ClinicalDataService;
pub use clinicals_types::{Age, NonEmptyText, TextError};
pub use config::{database_location_from_env_value, CoreConfig, DatabaseLocation};
pub use error::{ClinicalsError, ClinicalsResult};
pub use patient::PatientService;
pub use repositories::{
    ClinicalDataRepository, InMemoryStore, PatientRepository, Repositories, SqliteStore,
};
