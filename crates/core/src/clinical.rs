//! Clinical data service.
//!
//! Same shape as the patient service, plus creation through the patient-linked DTO.
//! Every insert first resolves the referenced patient so a missing patient is
//! reported as `NotFound` instead of a storage failure.

use crate::models::{ClinicalData, ClinicalDataForPatient, ClinicalDataInput, NewClinicalData};
use crate::patient::patient_not_found;
use crate::repositories::Repositories;
use crate::validation::{
    validate_clinical_data, validate_clinical_data_dto, validate_id, validate_new_clinical_data,
    CLINICAL_DATA_ID_INVALID,
};
use crate::{ClinicalsError, ClinicalsResult};
use chrono::Utc;

fn clinical_data_not_found(id: i64) -> ClinicalsError {
    ClinicalsError::NotFound(format!("Clinical data not found with ID: {id}"))
}

#[derive(Clone)]
pub struct ClinicalDataService {
    repos: Repositories,
}

impl ClinicalDataService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn list_all(&self) -> ClinicalsResult<Vec<ClinicalData>> {
        self.repos.clinical_data.find_all()
    }

    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::NotFound` if no row has this id.
    pub fn get_by_id(&self, id: i64) -> ClinicalsResult<ClinicalData> {
        let id = validate_id(Some(id), CLINICAL_DATA_ID_INVALID)?;
        self.repos.clinical_data.find_by_id(id)?.ok_or_else(|| {
            tracing::debug!("clinical data {} not found", id);
            clinical_data_not_found(id)
        })
    }

    /// Validates and stores a measurement submitted with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::Validation` if a field is blank or missing.
    /// - `ClinicalsError::NotFound` if the referenced patient does not exist.
    pub fn create(&self, input: Option<&ClinicalDataInput>) -> ClinicalsResult<ClinicalData> {
        let row = validate_new_clinical_data(input)?;
        self.insert_for_existing_patient(row)
    }

    /// Creates a measurement for `dto.patient_id`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::Validation` if a component is blank or the patient id is not positive.
    /// - `ClinicalsError::NotFound` if the patient does not exist; nothing is stored.
    pub fn create_for_patient(
        &self,
        dto: Option<&ClinicalDataForPatient>,
    ) -> ClinicalsResult<ClinicalData> {
        let row = validate_clinical_data_dto(dto, Utc::now())?;
        self.insert_for_existing_patient(row)
    }

    fn insert_for_existing_patient(&self, row: NewClinicalData) -> ClinicalsResult<ClinicalData> {
        if !self.repos.patients.exists_by_id(row.patient_id)? {
            tracing::debug!("patient {} not found for clinical data", row.patient_id);
            return Err(patient_not_found(row.patient_id));
        }

        // The patient can disappear between the check and the insert.
        let stored = self
            .repos
            .clinical_data
            .insert(&row)
            .map_err(|e| match e {
                ClinicalsError::Conflict(_) => patient_not_found(row.patient_id),
                other => other,
            })?;
        tracing::info!(
            "created clinical data {} for patient {}",
            stored.id,
            stored.patient_id
        );
        Ok(stored)
    }

    /// Overwrites component name, value and measurement time of an existing row.
    ///
    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::Validation` if `input` fails validation.
    /// - `ClinicalsError::NotFound` if no row has this id.
    pub fn update(
        &self,
        id: i64,
        input: Option<&ClinicalDataInput>,
    ) -> ClinicalsResult<ClinicalData> {
        let id = validate_id(Some(id), CLINICAL_DATA_ID_INVALID)?;
        let fields = validate_clinical_data(input)?;

        let updated = self
            .repos
            .clinical_data
            .update(id, &fields)?
            .ok_or_else(|| clinical_data_not_found(id))?;
        tracing::info!("updated clinical data {}", id);
        Ok(updated)
    }

    /// # Errors
    ///
    /// - `ClinicalsError::InvalidArgument` if `id` is not positive.
    /// - `ClinicalsError::NotFound` if no row has this id.
    pub fn delete(&self, id: i64) -> ClinicalsResult<()> {
        let id = validate_id(Some(id), CLINICAL_DATA_ID_INVALID)?;
        if !self.repos.clinical_data.exists_by_id(id)? {
            return Err(clinical_data_not_found(id));
        }
        if !self.repos.clinical_data.delete_by_id(id)? {
            return Err(clinical_data_not_found(id));
        }
        tracing::info!("deleted clinical data {}", id);
        Ok(())
    }
}
