//! Constants used throughout the clinicals core crate.

/// Default SQLite database file when no explicit location is configured.
pub const DEFAULT_DATABASE_PATH: &str = "clinicals.db";

/// Value of `CLINICALS_DB_PATH` that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Maximum number of characters in a patient first or last name.
pub const MAX_NAME_CHARS: usize = 100;
