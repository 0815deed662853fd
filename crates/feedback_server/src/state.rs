use std::sync::{Arc, Mutex};

use feedback_core::{
    db::{open_db, open_db_in_memory},
    SqliteFeedbackRepository, SubmissionService,
};
use rusqlite::Connection;

use crate::{config::DbLocation, error::AppError};

pub struct AppState {
    conn: Mutex<Connection>,
}

impl AppState {
    /// Opens the configured store and applies migrations.
    pub fn open(db: &DbLocation) -> Result<Arc<Self>, AppError> {
        let conn = match db {
            DbLocation::File(path) => open_db(path)?,
            DbLocation::Memory => open_db_in_memory()?,
        };

        Ok(Self::new(conn))
    }

    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Arc<Self> {
        Arc::new(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` against a service bound to the shared connection.
    ///
    /// Blocks on the connection lock; call from a blocking task.
    /// A poisoned lock is recovered: every write is a single statement.
    pub fn with_service<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&SubmissionService<SqliteFeedbackRepository<'_>>) -> T,
    {
        let conn = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let service = SubmissionService::new(SqliteFeedbackRepository::new(&conn));

        f(&service)
    }
}
