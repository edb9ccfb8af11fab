//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! repositories. Request handling never reads environment variables.

use crate::constants::{DEFAULT_DATABASE_PATH, IN_MEMORY_DATABASE};
use crate::{ClinicalsError, ClinicalsResult};
use std::path::{Path, PathBuf};

/// Where the SQLite database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file on disk, created on first open.
    File(PathBuf),
    /// A private in-memory database that disappears with the process.
    InMemory,
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseLocation::File(path) => write!(f, "{}", path.display()),
            DatabaseLocation::InMemory => f.write_str(IN_MEMORY_DATABASE),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database: DatabaseLocation,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicalsError::InvalidConfig` if a file location points into a
    /// directory that does not exist.
    pub fn new(database: DatabaseLocation) -> ClinicalsResult<Self> {
        if let DatabaseLocation::File(path) = &database {
            if path.as_os_str().is_empty() {
                return Err(ClinicalsError::InvalidConfig(
                    "database path cannot be empty".into(),
                ));
            }
            let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                if !parent.is_dir() {
                    return Err(ClinicalsError::InvalidConfig(format!(
                        "database directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(Self { database })
    }

    pub fn database(&self) -> &DatabaseLocation {
        &self.database
    }
}

/// Parse the database location from an optional string value.
///
/// `None` or a blank value selects [`DEFAULT_DATABASE_PATH`]; `:memory:` selects an
/// in-memory database; anything else is treated as a file path.
pub fn database_location_from_env_value(value: Option<String>) -> DatabaseLocation {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => DatabaseLocation::File(Path::new(DEFAULT_DATABASE_PATH).to_path_buf()),
        Some(IN_MEMORY_DATABASE) => DatabaseLocation::InMemory,
        Some(path) => DatabaseLocation::File(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_value_uses_default_file() {
        assert_eq!(
            database_location_from_env_value(None),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
        assert_eq!(
            database_location_from_env_value(Some("  ".into())),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
    }

    #[test]
    fn test_memory_marker_selects_in_memory() {
        assert_eq!(
            database_location_from_env_value(Some(":memory:".into())),
            DatabaseLocation::InMemory
        );
    }

    #[test]
    fn test_config_accepts_file_in_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let location = DatabaseLocation::File(temp_dir.path().join("clinicals.db"));
        let cfg = CoreConfig::new(location.clone()).expect("config should be valid");
        assert_eq!(cfg.database(), &location);
    }

    #[test]
    fn test_config_accepts_bare_file_name() {
        let cfg = CoreConfig::new(DatabaseLocation::File(PathBuf::from("clinicals.db")));
        assert!(cfg.is_ok());
    }

    #[test]
    fn test_config_rejects_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let location = DatabaseLocation::File(temp_dir.path().join("missing").join("db.sqlite"));
        let err = CoreConfig::new(location).expect_err("missing directory should be rejected");
        assert!(matches!(err, ClinicalsError::InvalidConfig(_)));
    }
}
