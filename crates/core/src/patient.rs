//! Patient service.
//!
//! Validation, persistence and not-found translation for patients. No API concerns.

use crate::models::{ClinicalData, Patient, PatientInput};
use crate::repositories::Repositories;
use crate::validation::{validate_id, validate_patient, PATIENT_ID_INVALID};
use crate::{ClinicalsError, ClinicalsResult};
use std::collections::HashMap;

pub(crate) fn patient_not_found(id: i64) -> ClinicalsError {
    ClinicalsError::NotFound(format!("Patient not found with ID: {id}"))
}

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    repos: Repositories,
}

impl PatientService {
    /// Creates a new instance of PatientService over the given repositories.
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Lists every patient with its clinical data attached.
    pub fn list_all(&self) -> ClinicalsResult<Vec<Patient>> {
        let mut by_patient: HashMap<i64, Vec<ClinicalData>> = HashMap::new();
        for row in self.repos.clinical_data.find_all()? {
            by_patient.entry(row.patient_id).or_default().push(row);
        }

        let mut patients = self.repos.patients.find_all()?;
        for patient in &mut patients {
            patient.clinical_data = by_patient.remove(&patient.id).unwrap_or_default();
        }
        Ok(patients)
    }

    /// Fetches one patient with its clinical data attached.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::NotFound` if no patient has this id.
    pub fn get_by_id(&self, id: i64) -> ClinicalsResult<Patient> {
        let id = validate_id(Some(id), PATIENT_ID_INVALID)?;
        let Some(mut patient) = self.repos.patients.find_by_id(id)? else {
            tracing::debug!("patient {} not found", id);
            return Err(patient_not_found(id));
        };
        patient.clinical_data = self.repos.clinical_data.find_by_patient_id(id)?;
        Ok(patient)
    }

    /// Validates and stores a new patient, returning it with its assigned id.
    pub fn create(&self, input: Option<&PatientInput>) -> ClinicalsResult<Patient> {
        let new_patient = validate_patient(input)?;
        let patient = self.repos.patients.insert(&new_patient)?;
        tracing::info!("created patient {}", patient.id);
        Ok(patient)
    }

    /// Replaces every field of an existing patient.
    ///
    /// There is no partial update: a field missing from `input` fails validation
    /// rather than keeping its stored value.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::Validation` if `input` fails validation.
    /// - `ClinicalsError::NotFound` if no patient has this id.
    pub fn update(&self, id: i64, input: Option<&PatientInput>) -> ClinicalsResult<Patient> {
        let id = validate_id(Some(id), PATIENT_ID_INVALID)?;
        let details = validate_patient(input)?;

        let Some(mut patient) = self.repos.patients.update(id, &details)? else {
            tracing::debug!("patient {} not found for update", id);
            return Err(patient_not_found(id));
        };
        patient.clinical_data = self.repos.clinical_data.find_by_patient_id(id)?;
        tracing::info!("updated patient {}", id);
        Ok(patient)
    }

    /// Removes a patient.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::NotFound` if no patient has this id.
    /// - `ClinicalsError::Conflict` if clinical data still references the patient.
    pub fn delete(&self, id: i64) -> ClinicalsResult<()> {
        let id = validate_id(Some(id), PATIENT_ID_INVALID)?;
        if !self.repos.patients.exists_by_id(id)? {
            tracing::debug!("patient {} not found for delete", id);
            return Err(patient_not_found(id));
        }

        let referencing = self.repos.clinical_data.count_by_patient_id(id)?;
        if referencing > 0 {
            tracing::warn!(
                "refusing to delete patient {} referenced by {} clinical data rows",
                id,
                referencing
            );
            return Err(ClinicalsError::Conflict(format!(
                "Patient with ID {id} still has clinical data"
            )));
        }

        if !self.repos.patients.delete_by_id(id)? {
            return Err(patient_not_found(id));
        }
        tracing::info!("deleted patient {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClinicalDataForPatient;
    use crate::ClinicalDataService;

    fn services() -> (PatientService, ClinicalDataService) {
        let repos = Repositories::in_memory();
        (
            PatientService::new(repos.clone()),
            ClinicalDataService::new(repos),
        )
    }

    fn alice() -> PatientInput {
        PatientInput::new("Alice", "Johnson", 28)
    }

    #[test]
    fn test_create_then_get_returns_submitted_fields() {
        let (patients, _) = services();
        let created = patients.create(Some(&alice())).expect("create should succeed");
        assert!(created.id > 0);

        let fetched = patients.get_by_id(created.id).expect("get should succeed");
        assert_eq!(fetched.first_name, "Alice");
        assert_eq!(fetched.last_name, "Johnson");
        assert_eq!(fetched.age, 28);
        assert!(fetched.clinical_data.is_empty());
    }

    #[test]
    fn test_invalid_patient_is_not_persisted() {
        let (patients, _) = services();
        let err = patients
            .create(Some(&PatientInput::new("", "Johnson", 28)))
            .expect_err("blank first name should fail");
        assert!(matches!(err, ClinicalsError::Validation(_)));
        assert!(patients.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_id_rejects_non_positive_and_missing_ids() {
        let (patients, _) = services();
        assert!(matches!(
            patients.get_by_id(0),
            Err(ClinicalsError::InvalidArgument(_))
        ));
        let err = patients.get_by_id(999).unwrap_err();
        assert!(
            matches!(&err, ClinicalsError::NotFound(m) if m == "Patient not found with ID: 999")
        );
    }

    #[test]
    fn test_update_replaces_fields() {
        let (patients, _) = services();
        let created = patients.create(Some(&alice())).unwrap();

        let updated = patients
            .update(created.id, Some(&PatientInput::new("Alicia", "Jones", 29)))
            .expect("update should succeed");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Alicia");
        assert_eq!(updated.age, 29);
    }

    #[test]
    fn test_update_requires_every_field() {
        let (patients, _) = services();
        let created = patients.create(Some(&alice())).unwrap();

        let partial = PatientInput {
            age: None,
            ..PatientInput::new("Alicia", "Jones", 1)
        };
        let err = patients.update(created.id, Some(&partial)).unwrap_err();
        assert!(matches!(err, ClinicalsError::Validation(_)));
        assert_eq!(patients.get_by_id(created.id).unwrap().first_name, "Alice");
    }

    #[test]
    fn test_update_missing_patient_is_not_found() {
        let (patients, _) = services();
        let err = patients.update(42, Some(&alice())).unwrap_err();
        assert!(matches!(err, ClinicalsError::NotFound(_)));
    }

    #[test]
    fn test_delete_twice_is_not_found_the_second_time() {
        let (patients, _) = services();
        let created = patients.create(Some(&alice())).unwrap();

        patients.delete(created.id).expect("first delete should succeed");
        assert!(matches!(
            patients.delete(created.id),
            Err(ClinicalsError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_with_clinical_data_is_conflict() {
        let (patients, clinical) = services();
        let created = patients.create(Some(&alice())).unwrap();
        clinical
            .create_for_patient(Some(&ClinicalDataForPatient::new(
                created.id,
                "Blood Pressure",
                "120/80",
            )))
            .unwrap();

        let err = patients.delete(created.id).unwrap_err();
        assert!(matches!(err, ClinicalsError::Conflict(_)));
        assert!(patients.get_by_id(created.id).is_ok());
    }

    #[test]
    fn test_list_all_attaches_clinical_data_to_owner() {
        let (patients, clinical) = services();
        let first = patients.create(Some(&alice())).unwrap();
        let bob = patients
            .create(Some(&PatientInput::new("Bob", "Smith", 40)))
            .unwrap();
        clinical
            .create_for_patient(Some(&ClinicalDataForPatient::new(bob.id, "Weight", "80kg")))
            .unwrap();

        let listed = patients.list_all().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].clinical_data.is_empty());
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].clinical_data.len(), 1);
        assert_eq!(listed[1].clinical_data[0].component_value, "80kg");
    }
}
