//! SQLite-backed repositories.

use super::{ClinicalDataRepository, PatientRepository, SCHEMA};
use crate::models::{ClinicalData, ClinicalDataFields, NewClinicalData, NewPatient, Patient};
use crate::{ClinicalsError, ClinicalsResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const PATIENT_COLUMNS: &str = "id, first_name, last_name, age";
const CLINICAL_DATA_COLUMNS: &str =
    "id, component_name, component_value, measured_date_time, patient_id";

/// Both repositories over a single SQLite connection.
///
/// Every operation is a single statement, so each one commits on its own.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> ClinicalsResult<Self> {
        Self::initialise(Connection::open(path)?)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> ClinicalsResult<Self> {
        Self::initialise(Connection::open_in_memory()?)
    }

    fn initialise(conn: Connection) -> ClinicalsResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> ClinicalsResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ClinicalsError::StorageLockPoisoned)
    }
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        age: row.get(3)?,
        clinical_data: Vec::new(),
    })
}

fn clinical_data_from_row(row: &Row<'_>) -> rusqlite::Result<ClinicalData> {
    Ok(ClinicalData {
        id: row.get(0)?,
        component_name: row.get(1)?,
        component_value: row.get(2)?,
        measured_date_time: row.get(3)?,
        patient_id: row.get(4)?,
    })
}

/// Maps a foreign key violation to `Conflict`, leaving other failures as database errors.
fn foreign_key_conflict(err: rusqlite::Error, message: impl FnOnce() -> String) -> ClinicalsError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            ClinicalsError::Conflict(message())
        }
        _ => ClinicalsError::Database(err),
    }
}

impl PatientRepository for SqliteStore {
    fn find_all(&self) -> ClinicalsResult<Vec<Patient>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patient ORDER BY id"
        ))?;
        let patients = stmt
            .query_map([], patient_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(patients)
    }

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<Patient>> {
        let conn = self.conn()?;
        let patient = conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patient WHERE id = ?1"),
                [id],
                patient_from_row,
            )
            .optional()?;
        Ok(patient)
    }

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM patient WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn insert(&self, patient: &NewPatient) -> ClinicalsResult<Patient> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO patient (first_name, last_name, age) VALUES (?1, ?2, ?3)",
            params![
                patient.first_name.as_str(),
                patient.last_name.as_str(),
                patient.age.years(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(patient.clone().into_patient(id))
    }

    fn update(&self, id: i64, patient: &NewPatient) -> ClinicalsResult<Option<Patient>> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "UPDATE patient SET first_name = ?2, last_name = ?3, age = ?4 WHERE id = ?1",
            params![
                id,
                patient.first_name.as_str(),
                patient.last_name.as_str(),
                patient.age.years(),
            ],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(patient.clone().into_patient(id)))
    }

    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        let conn = self.conn()?;
        let rows_affected = conn
            .execute("DELETE FROM patient WHERE id = ?1", [id])
            .map_err(|e| {
                foreign_key_conflict(e, || format!("Patient with ID {id} still has clinical data"))
            })?;
        Ok(rows_affected > 0)
    }
}

impl ClinicalDataRepository for SqliteStore {
    fn find_all(&self) -> ClinicalsResult<Vec<ClinicalData>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CLINICAL_DATA_COLUMNS} FROM clinicaldata ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([], clinical_data_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn find_by_id(&self, id: i64) -> ClinicalsResult<Option<ClinicalData>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {CLINICAL_DATA_COLUMNS} FROM clinicaldata WHERE id = ?1"),
                [id],
                clinical_data_from_row,
            )
            .optional()?;
        Ok(row)
    }

    fn find_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<Vec<ClinicalData>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CLINICAL_DATA_COLUMNS} FROM clinicaldata WHERE patient_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([patient_id], clinical_data_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count_by_patient_id(&self, patient_id: i64) -> ClinicalsResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM clinicaldata WHERE patient_id = ?1",
            [patient_id],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn exists_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM clinicaldata WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn insert(&self, row: &NewClinicalData) -> ClinicalsResult<ClinicalData> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO clinicaldata (
                component_name, component_value, measured_date_time, patient_id
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                row.fields.component_name.as_str(),
                row.fields.component_value.as_str(),
                row.fields.measured_date_time,
                row.patient_id,
            ],
        )
        .map_err(|e| {
            foreign_key_conflict(e, || {
                format!("Patient with ID {} does not exist", row.patient_id)
            })
        })?;
        let id = conn.last_insert_rowid();
        Ok(row.clone().into_clinical_data(id))
    }

    fn update(
        &self,
        id: i64,
        fields: &ClinicalDataFields,
    ) -> ClinicalsResult<Option<ClinicalData>> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            r#"
            UPDATE clinicaldata SET
                component_name = ?2,
                component_value = ?3,
                measured_date_time = ?4
            WHERE id = ?1
            "#,
            params![
                id,
                fields.component_name.as_str(),
                fields.component_value.as_str(),
                fields.measured_date_time,
            ],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }
        let row = conn
            .query_row(
                &format!("SELECT {CLINICAL_DATA_COLUMNS} FROM clinicaldata WHERE id = ?1"),
                [id],
                clinical_data_from_row,
            )
            .optional()?;
        Ok(row)
    }

    fn delete_by_id(&self, id: i64) -> ClinicalsResult<bool> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM clinicaldata WHERE id = ?1", [id])?;
        Ok(rows_affected > 0)
    }
}
