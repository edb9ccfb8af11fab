//! Clinical data entity and its input shapes.

use chrono::{DateTime, Utc};
use clinicals_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// A single stored clinical measurement, e.g. "Blood Pressure" = "120/80".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub id: i64,
    pub component_name: String,
    pub component_value: String,
    pub measured_date_time: DateTime<Utc>,
    pub patient_id: i64,
}

/// Clinical data as submitted to `POST /clinicaldata` and `PUT /clinicaldata/{id}`.
///
/// `patient_id` is only consulted on creation; updates never move a measurement
/// to a different patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalDataInput {
    pub component_name: Option<String>,
    pub component_value: Option<String>,
    pub measured_date_time: Option<DateTime<Utc>>,
    pub patient_id: Option<i64>,
}

/// Combined input for `POST /clinicaldata/save`: a patient reference plus inline fields.
/// The measurement time is assigned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalDataForPatient {
    pub patient_id: Option<i64>,
    pub component_name: Option<String>,
    pub component_value: Option<String>,
}

impl ClinicalDataForPatient {
    pub fn new(
        patient_id: i64,
        component_name: impl Into<String>,
        component_value: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: Some(patient_id),
            component_name: Some(component_name.into()),
            component_value: Some(component_value.into()),
        }
    }
}

/// The mutable fields of a clinical data row, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalDataFields {
    pub component_name: NonEmptyText,
    pub component_value: NonEmptyText,
    pub measured_date_time: DateTime<Utc>,
}

/// A validated clinical data row that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClinicalData {
    pub patient_id: i64,
    pub fields: ClinicalDataFields,
}

impl NewClinicalData {
    /// Builds the stored entity for this row under `id`.
    pub fn into_clinical_data(self, id: i64) -> ClinicalData {
        self.fields.into_clinical_data(id, self.patient_id)
    }
}

impl ClinicalDataFields {
    pub fn into_clinical_data(self, id: i64, patient_id: i64) -> ClinicalData {
        ClinicalData {
            id,
            component_name: self.component_name.into_inner(),
            component_value: self.component_value.into_inner(),
            measured_date_time: self.measured_date_time,
            patient_id,
        }
    }
}
