//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DATABASE_PATH, IN_MEMORY_DATABASE};
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Where the clinic database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database: DatabaseLocation,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// A file location must name a file whose parent directory already exists; the file
    /// itself is created on first open.
    pub fn new(database: DatabaseLocation) -> ClinicResult<Self> {
        if let DatabaseLocation::File(path) = &database {
            if path.as_os_str().is_empty() {
                return Err(ClinicError::InvalidInput(
                    "database path cannot be empty".into(),
                ));
            }
            if path.is_dir() {
                return Err(ClinicError::InvalidInput(format!(
                    "database path is a directory: {}",
                    path.display()
                )));
            }
            let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                if !parent.is_dir() {
                    return Err(ClinicError::InvalidInput(format!(
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

    /// Returns the database file path, or `None` for an in-memory database.
    pub fn database_path(&self) -> Option<&Path> {
        match &self.database {
            DatabaseLocation::File(path) => Some(path),
            DatabaseLocation::InMemory => None,
        }
    }
}

/// Parse the database location from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default file. `:memory:` selects an
/// in-memory database.
pub fn database_location_from_env_value(value: Option<String>) -> DatabaseLocation {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        Some(IN_MEMORY_DATABASE) => DatabaseLocation::InMemory,
        Some(path) => DatabaseLocation::File(PathBuf::from(path)),
        None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_value_defaults_to_clinic_db() {
        assert_eq!(
            database_location_from_env_value(None),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
        assert_eq!(
            database_location_from_env_value(Some("   ".into())),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
    }

    #[test]
    fn test_env_value_selects_in_memory() {
        assert_eq!(
            database_location_from_env_value(Some(":memory:".into())),
            DatabaseLocation::InMemory
        );
    }

    #[test]
    fn test_new_accepts_file_in_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("records.db");
        let cfg = CoreConfig::new(DatabaseLocation::File(path.clone()))
            .expect("CoreConfig::new should succeed");
        assert_eq!(cfg.database_path(), Some(path.as_path()));
    }

    #[test]
    fn test_new_rejects_missing_parent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("records.db");
        let err = CoreConfig::new(DatabaseLocation::File(path)).expect_err("should fail");
        assert!(matches!(err, ClinicError::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_directory_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(DatabaseLocation::File(temp_dir.path().to_path_buf()))
            .expect_err("should fail");
        assert!(matches!(err, ClinicError::InvalidInput(_)));
    }
}
