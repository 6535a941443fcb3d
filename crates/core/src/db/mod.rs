//! SQLite persistence.
//!
//! The process holds a single connection behind a mutex. Each service call locks it, runs to
//! completion and releases it; there is no connection pool and no cross-request caching.

pub mod sqlite;

pub use sqlite::{open_database, open_memory_database, run_migrations};

use crate::config::{CoreConfig, DatabaseLocation};
use crate::{ClinicError, ClinicResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Shared handle to the clinic database.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Opens (creating and migrating if needed) the database named by `cfg`.
    pub fn open(cfg: &CoreConfig) -> ClinicResult<Self> {
        let conn = match cfg.database() {
            DatabaseLocation::File(path) => {
                tracing::info!("opening clinic database at {}", path.display());
                open_database(path)?
            }
            DatabaseLocation::InMemory => {
                tracing::info!("opening in-memory clinic database");
                open_memory_database()?
            }
        };
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> ClinicResult<Self> {
        Ok(Self::from_connection(open_memory_database()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> ClinicResult<T>) -> ClinicResult<T> {
        let guard = self.conn.lock().map_err(|_| ClinicError::LockPoisoned)?;
        f(&guard)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
