//! In-memory repositories for tests and throwaway servers.
//!
//! Mirrors the SQLite behaviour: ids come from counters that never go backwards,
//! and the clinical data foreign key is enforced on insert and patient delete.

use super::{ClinicalDataRepository, PatientRepository};
use crate::models::{ClinicalData, ClinicalDataFields, NewClinicalData, NewPatient, Patient};
use crate::{ClinicalsError, ClinicalsResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    patients: BTreeMap<i64, Patient>,
    clinical_data: BTreeMap<i64, ClinicalData>,
    last_patient_id: i64,
    last_clinical_data_id: i64,
}

/// Both repositories over process memory.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> ClinicalsResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| ClinicalsError::StorageLockPoisoned)
    }
}

impl PatientRepository for InMemoryStore {
    fn find_all(&self) -> ClinicalsResult<Vec<Patient>> {
        Ok(self.tables()?.patients.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<Patient>> {
        Ok(self.tables()?.patients.get(&id).cloned())
    }

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        Ok(self.tables()?.patients.contains_key(&id))
    }

    fn insert(&self, patient: &NewPatient) -> ClinicalsResult<Patient> {
        let mut tables = self.tables()?;
        tables.last_patient_id += 1;
        let stored = patient.clone().into_patient(tables.last_patient_id);
        tables.patients.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, id: i64, patient: &NewPatient) -> ClinicalsResult<Option<Patient>> {
        let mut tables = self.tables()?;
        let Some(slot) = tables.patients.get_mut(&id) else {
            return Ok(None);
        };
        *slot = patient.clone().into_patient(id);
        Ok(Some(slot.clone()))
    }

    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        let mut tables = self.tables()?;
        if tables.clinical_data.values().any(|row| row.patient_id == id) {
            return Err(ClinicalsError::Conflict(format!(
                "Patient with ID {id} still has clinical data"
            )));
        }
        Ok(tables.patients.remove(&id).is_some())
    }
}

impl ClinicalDataRepository for InMemoryStore {
    fn find_all(&self) -> ClinicalsResult<Vec<ClinicalData>> {
        Ok(self.tables()?.clinical_data.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<ClinicalData>> {
        Ok(self.tables()?.clinical_data.get(&id).cloned())
    }

    fn find_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<Vec<ClinicalData>> {
        Ok(self
            .tables()?
            .clinical_data
            .values()
            .filter(|row| row.patient_id == patient_id)
            .cloned()
            .collect())
    }

    fn count_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<u64> {
        let tables = self.tables()?;
        let count = tables
            .clinical_data
            .values()
            .filter(|row| row.patient_id == patient_id)
            .count();
        Ok(count as u64)
    }

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        Ok(self.tables()?.clinical_data.contains_key(&id))
    }

    fn insert(&self, row: &NewClinicalData) -> ClinicalsResult<ClinicalData> {
        let mut tables = self.tables()?;
        if !tables.patients.contains_key(&row.patient_id) {
            return Err(ClinicalsError::Conflict(format!(
                "Patient with ID {} does not exist",
                row.patient_id
            )));
        }
        tables.last_clinical_data_id += 1;
        let stored = row.clone().into_clinical_data(tables.last_clinical_data_id);
        tables.clinical_data.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(
        &self,
        id: i64,
        fields: &ClinicalDataFields,
    ) -> ClinicalsResult<Option<ClinicalData>> {
        let mut tables = self.tables()?;
        let Some(slot) = tables.clinical_data.get_mut(&id) else {
            return Ok(None);
        };
        *slot = fields.clone().into_clinical_data(id, slot.patient_id);
        Ok(Some(slot.clone()))
    }

    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        Ok(self.tables()?.clinical_data.remove(&id).is_some())
    }
}
