//! Persistence seams.
//!
//! Services depend only on the [`PatientRepository`] and [`ClinicalDataRepository`]
//! traits. [`SqliteStore`] is the production implementation; [`InMemoryStore`] is a
//! drop-in substitute for tests. Both implement the two traits on one value so the
//! clinical data foreign key can be checked against the same patient rows.

mod memory;
mod schema;
mod sqlite;

pub use memory::InMemoryStore;
pub use schema::SCHEMA;
pub use sqlite::SqliteStore;

use crate::config::{CoreConfig, DatabaseLocation};
use crate::models::{ClinicalData, ClinicalDataFields, NewClinicalData, NewPatient, Patient};
use crate::ClinicalsResult;
use std::sync::Arc;

/// Storage operations for patients, keyed by a store-assigned integer id.
pub trait PatientRepository: Send + Sync {
    /// Every patient, ordered by id.
    fn find_all(&self) -> ClinicalsResult<Vec<Patient>>;

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<Patient>>;

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool>;

    /// Inserts a new row and returns it with its assigned id.
    fn insert(&self, patient: &NewPatient) -> ClinicalsResult<Patient>;

    /// Overwrites every field of an existing row. Returns `None` if `id` does not exist.
    fn update(&self, id: i64, patient: &NewPatient) -> ClinicalsResult<Option<Patient>>;

    /// Returns `false` if nothing was deleted.
    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool>;
}

/// Storage operations for clinical data rows.
pub trait ClinicalDataRepository: Send + Sync {
    /// Every row, ordered by id.
    fn find_all(&self) -> ClinicalsResult<Vec<ClinicalData>>;

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<ClinicalData>>;

    /// Rows referencing `patient_id`, ordered by id.
    fn find_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<Vec<ClinicalData>>;

    fn count_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<u64>;

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool>;

    /// Inserts a new row. Fails with `ClinicalsError::Conflict` if the patient is missing.
    fn insert(&self, row: &NewClinicalData) -> ClinicalsResult<ClinicalData>;

    /// Overwrites the measurement fields of an existing row; the patient reference
    /// is unchanged. Returns `None` if `id` does not exist.
    fn update(&self, id: i64, fields: &ClinicalDataFields)
        -> ClinicalsResult<Option<ClinicalData>>;

    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool>;
}

/// The pair of repositories handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub patients: Arc<dyn PatientRepository>,
    pub clinical_data: Arc<dyn ClinicalDataRepository>,
}

impl Repositories {
    /// Uses one store for both repositories.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PatientRepository + ClinicalDataRepository + 'static,
    {
        Self {
            patients: store.clone(),
            clinical_data: store,
        }
    }

    /// Opens the SQLite store described by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicalsError::Database` if the database cannot be opened or the
    /// schema cannot be created.
    pub fn open(cfg: &CoreConfig) -> ClinicalsResult<Self> {
        let store = match cfg.database() {
            DatabaseLocation::File(path) => SqliteStore::open(path)?,
            DatabaseLocation::InMemory => SqliteStore::open_in_memory()?,
        };
        tracing::info!("opened clinicals database at {}", cfg.database());
        Ok(Self::from_store(Arc::new(store)))
    }

    /// A fresh in-memory store, without SQLite.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}
