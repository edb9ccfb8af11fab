//! SQLite schema definition.

/// Complete database schema, applied on every open.
///
/// `AUTOINCREMENT` keeps ids from being reused after a delete. Name rules live in
/// validation only; SQLite `length()` stops at the first NUL and would disagree.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patient (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 1 AND 150)
);

CREATE TABLE IF NOT EXISTS clinicaldata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    component_name TEXT NOT NULL,
    component_value TEXT NOT NULL,
    measured_date_time TEXT NOT NULL,
    patient_id INTEGER NOT NULL REFERENCES patient(id)
);

CREATE INDEX IF NOT EXISTS idx_clinicaldata_patient ON clinicaldata(patient_id);
"#;
