//! Patient entity.

use clinicals_types::{Age, NonEmptyText};
use serde::{Deserialize, Serialize};

use super::ClinicalData;

/// A stored patient.
///
/// `clinical_data` is a back-reference filled in by the service from the
/// `clinicaldata` table. Repositories always return it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    #[serde(default)]
    pub clinical_data: Vec<ClinicalData>,
}

/// Patient fields as submitted by a client, before validation.
///
/// Every field is optional so that a missing field is reported as a validation
/// failure instead of a decoding failure. Unknown fields such as `id` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
}

impl PatientInput {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i64) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            age: Some(age),
        }
    }
}

/// Validated patient fields, ready to be inserted or written over an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: NonEmptyText,
    pub last_name: NonEmptyText,
    pub age: Age,
}

impl NewPatient {
    /// Builds the stored entity for this patient under `id`.
    pub fn into_patient(self, id: i64) -> Patient {
        Patient {
            id,
            first_name: self.first_name.into_inner(),
            last_name: self.last_name.into_inner(),
            age: self.age.years(),
            clinical_data: Vec::new(),
        }
    }
}
