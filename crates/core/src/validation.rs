//! Input validation.
//!
//! Every check here is pure and runs before any repository call. Each function
//! accepts an optional input so that an absent request body is reported with the
//! same error type as a malformed field.

use crate::constants::MAX_NAME_CHARS;
use crate::models::{
    ClinicalDataFields, ClinicalDataForPatient, ClinicalDataInput, NewClinicalData, NewPatient,
    PatientInput,
};
use crate::{ClinicalsError, ClinicalsResult};
use chrono::{DateTime, Utc};
use clinicals_types::{Age, AgeError, NonEmptyText, TextError};

pub const PATIENT_ID_INVALID: &str = "Patient ID must be a positive number";
pub const CLINICAL_DATA_ID_INVALID: &str = "Clinical Data ID must be a positive number";

fn invalid(message: impl Into<String>) -> ClinicalsError {
    ClinicalsError::Validation(message.into())
}

fn validate_name(value: Option<&str>, label: &str) -> ClinicalsResult<NonEmptyText> {
    let value = value.unwrap_or_default();
    NonEmptyText::with_max_chars(value, MAX_NAME_CHARS).map_err(|e| match e {
        TextError::Empty => invalid(format!("{label} is required and cannot be empty")),
        TextError::TooLong { max } => {
            invalid(format!("{label} must be between 1 and {max} characters"))
        }
    })
}

fn validate_component(value: Option<&str>, label: &str) -> ClinicalsResult<NonEmptyText> {
    NonEmptyText::new(value.unwrap_or_default())
        .map_err(|_| invalid(format!("{label} is required and cannot be empty")))
}

fn validate_age(age: Option<i64>) -> ClinicalsResult<Age> {
    let age = age.ok_or_else(|| invalid("Age is required"))?;
    Age::new(age).map_err(|e: AgeError| invalid(e.to_string()))
}

/// Validates patient fields for creation or full replacement.
///
/// # Errors
///
/// Returns `ClinicalsError::Validation` if the input is absent, a name is blank or
/// longer than 100 characters, or the age is missing or outside `1..=150`.
pub fn validate_patient(input: Option<&PatientInput>) -> ClinicalsResult<NewPatient> {
    let input = input.ok_or_else(|| invalid("Patient data cannot be null"))?;

    Ok(NewPatient {
        first_name: validate_name(input.first_name.as_deref(), "First name")?,
        last_name: validate_name(input.last_name.as_deref(), "Last name")?,
        age: validate_age(input.age)?,
    })
}

/// Validates the stored fields of a clinical data record.
///
/// `patient_id` is not inspected; see [`validate_new_clinical_data`] for creation.
pub fn validate_clinical_data(
    input: Option<&ClinicalDataInput>,
) -> ClinicalsResult<ClinicalDataFields> {
    let input = input.ok_or_else(|| invalid("Clinical data cannot be null"))?;

    let component_name = validate_component(input.component_name.as_deref(), "Component name")?;
    let component_value =
        validate_component(input.component_value.as_deref(), "Component value")?;
    let measured_date_time = input
        .measured_date_time
        .ok_or_else(|| invalid("Measured date time is required"))?;

    Ok(ClinicalDataFields {
        component_name,
        component_value,
        measured_date_time,
    })
}

/// Validates a directly-submitted clinical data record, including its patient reference.
pub fn validate_new_clinical_data(
    input: Option<&ClinicalDataInput>,
) -> ClinicalsResult<NewClinicalData> {
    let fields = validate_clinical_data(input)?;
    let patient_id = input
        .and_then(|i| i.patient_id)
        .ok_or_else(|| invalid("Patient ID is required"))?;
    if patient_id <= 0 {
        return Err(invalid(PATIENT_ID_INVALID));
    }

    Ok(NewClinicalData { patient_id, fields })
}

/// Validates the patient-linked creation DTO.
///
/// The measurement time is taken from `measured_at`, which the caller sets to the
/// current server time.
pub fn validate_clinical_data_dto(
    input: Option<&ClinicalDataForPatient>,
    measured_at: DateTime<Utc>,
) -> ClinicalsResult<NewClinicalData> {
    let input = input.ok_or_else(|| invalid("Clinical data DTO cannot be null"))?;

    let component_name = validate_component(input.component_name.as_deref(), "Component name")?;
    let component_value =
        validate_component(input.component_value.as_deref(), "Component value")?;
    let patient_id = match input.patient_id {
        Some(id) if id > 0 => id,
        _ => return Err(invalid(PATIENT_ID_INVALID)),
    };

    Ok(NewClinicalData {
        patient_id,
        fields: ClinicalDataFields {
            component_name,
            component_value,
            measured_date_time: measured_at,
        },
    })
}

/// Checks that an identifier is present and positive.
///
/// # Errors
///
/// Returns `ClinicalsError::InvalidArgument` carrying `message` otherwise.
pub fn validate_id(id: Option<i64>, message: &str) -> ClinicalsResult<i64> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ClinicalsError::InvalidArgument(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(err: ClinicalsError) -> String {
        match err {
            ClinicalsError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn measured() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_valid_patient_is_accepted() {
        let input = PatientInput::new("Alice", "Johnson", 28);
        let patient = validate_patient(Some(&input)).expect("patient should be valid");
        assert_eq!(patient.first_name.as_str(), "Alice");
        assert_eq!(patient.last_name.as_str(), "Johnson");
        assert_eq!(patient.age.years(), 28);
    }

    #[test]
    fn test_absent_patient_is_rejected() {
        let err = validate_patient(None).expect_err("absent patient should fail");
        assert_eq!(message(err), "Patient data cannot be null");
    }

    #[test]
    fn test_blank_or_missing_names_are_rejected() {
        let blank_first = PatientInput::new("  ", "Johnson", 28);
        assert_eq!(
            message(validate_patient(Some(&blank_first)).unwrap_err()),
            "First name is required and cannot be empty"
        );

        let missing_last = PatientInput {
            last_name: None,
            ..PatientInput::new("Alice", "x", 28)
        };
        assert_eq!(
            message(validate_patient(Some(&missing_last)).unwrap_err()),
            "Last name is required and cannot be empty"
        );
    }

    #[test]
    fn test_names_longer_than_limit_are_rejected() {
        let long = "a".repeat(101);
        let input = PatientInput::new(long, "Johnson", 28);
        assert_eq!(
            message(validate_patient(Some(&input)).unwrap_err()),
            "First name must be between 1 and 100 characters"
        );

        let exact = PatientInput::new("a".repeat(100), "b".repeat(100), 28);
        assert!(validate_patient(Some(&exact)).is_ok());
    }

    #[test]
    fn test_age_outside_range_is_rejected() {
        for (age, expected) in [
            (Some(0), "Age must be at least 1"),
            (Some(-3), "Age must be at least 1"),
            (Some(151), "Age must not exceed 150"),
            (None, "Age is required"),
        ] {
            let input = PatientInput {
                age,
                ..PatientInput::new("Alice", "Johnson", 1)
            };
            assert_eq!(message(validate_patient(Some(&input)).unwrap_err()), expected);
        }
    }

    #[test]
    fn test_clinical_data_requires_all_fields() {
        let complete = ClinicalDataInput {
            component_name: Some("Blood Pressure".into()),
            component_value: Some("120/80".into()),
            measured_date_time: Some(measured()),
            patient_id: Some(1),
        };
        let fields = validate_clinical_data(Some(&complete)).expect("should be valid");
        assert_eq!(fields.measured_date_time, measured());

        let no_time = ClinicalDataInput {
            measured_date_time: None,
            ..complete.clone()
        };
        assert_eq!(
            message(validate_clinical_data(Some(&no_time)).unwrap_err()),
            "Measured date time is required"
        );

        let blank_value = ClinicalDataInput {
            component_value: Some(" ".into()),
            ..complete.clone()
        };
        assert_eq!(
            message(validate_clinical_data(Some(&blank_value)).unwrap_err()),
            "Component value is required and cannot be empty"
        );

        assert_eq!(
            message(validate_clinical_data(None).unwrap_err()),
            "Clinical data cannot be null"
        );
    }

    #[test]
    fn test_new_clinical_data_requires_positive_patient_id() {
        let base = ClinicalDataInput {
            component_name: Some("Heart Rate".into()),
            component_value: Some("72".into()),
            measured_date_time: Some(measured()),
            patient_id: None,
        };
        assert_eq!(
            message(validate_new_clinical_data(Some(&base)).unwrap_err()),
            "Patient ID is required"
        );

        let negative = ClinicalDataInput {
            patient_id: Some(-1),
            ..base.clone()
        };
        assert_eq!(
            message(validate_new_clinical_data(Some(&negative)).unwrap_err()),
            PATIENT_ID_INVALID
        );

        let ok = ClinicalDataInput {
            patient_id: Some(7),
            ..base
        };
        assert_eq!(validate_new_clinical_data(Some(&ok)).unwrap().patient_id, 7);
    }

    #[test]
    fn test_dto_assigns_measurement_time() {
        let dto = ClinicalDataForPatient::new(3, "Weight", "70kg");
        let row = validate_clinical_data_dto(Some(&dto), measured()).expect("dto should be valid");
        assert_eq!(row.patient_id, 3);
        assert_eq!(row.fields.measured_date_time, measured());
    }

    #[test]
    fn test_dto_rejects_blank_component_and_bad_patient_id() {
        let blank = ClinicalDataForPatient::new(3, "", "70kg");
        assert_eq!(
            message(validate_clinical_data_dto(Some(&blank), measured()).unwrap_err()),
            "Component name is required and cannot be empty"
        );

        let zero = ClinicalDataForPatient::new(0, "Weight", "70kg");
        assert_eq!(
            message(validate_clinical_data_dto(Some(&zero), measured()).unwrap_err()),
            PATIENT_ID_INVALID
        );

        let missing = ClinicalDataForPatient {
            patient_id: None,
            ..ClinicalDataForPatient::new(1, "Weight", "70kg")
        };
        assert!(validate_clinical_data_dto(Some(&missing), measured()).is_err());
        assert!(validate_clinical_data_dto(None, measured()).is_err());
    }

    #[test]
    fn test_validate_id_rejects_missing_and_non_positive() {
        assert_eq!(validate_id(Some(5), PATIENT_ID_INVALID).unwrap(), 5);
        for id in [None, Some(0), Some(-9)] {
            let err = validate_id(id, PATIENT_ID_INVALID).unwrap_err();
            assert!(matches!(err, ClinicalsError::InvalidArgument(m) if m == PATIENT_ID_INVALID));
        }
    }
}
