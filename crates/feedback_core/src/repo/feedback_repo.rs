//! Feedback persistence contract and its SQLite implementation.
//!
//! # Responsibility
//! - Expose the two operations the endpoint needs: insert one row, list all.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Writes call `NewFeedback::validate()` before touching SQL.
//! - `id` and `created_at` are assigned here, never by callers.
//! - Listing applies no filter and no explicit ordering.

use crate::db::DbError;
use crate::model::feedback::{FeedbackRecord, FeedbackValidationError, NewFeedback};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const FEEDBACK_COLUMNS: &str = "id, name, email, message, created_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors reported by a feedback store.
#[derive(Debug)]
pub enum RepoError {
    Validation(FeedbackValidationError),
    Db(DbError),
    InvalidData(String),
    /// Failure reported by a non-SQL backend, message passed through as-is.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted feedback: {message}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Backend(_) => None,
        }
    }
}

impl From<FeedbackValidationError> for RepoError {
    fn from(value: FeedbackValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The persistence collaborator behind the submission endpoint.
pub trait FeedbackRepository {
    /// Inserts one submission and returns the stored row.
    fn insert_one(&self, feedback: &NewFeedback) -> RepoResult<FeedbackRecord>;
    /// Returns every stored submission in the store's natural order.
    fn list_all(&self) -> RepoResult<Vec<FeedbackRecord>>;
}

impl<R: FeedbackRepository + ?Sized> FeedbackRepository for &R {
    fn insert_one(&self, feedback: &NewFeedback) -> RepoResult<FeedbackRecord> {
        (**self).insert_one(feedback)
    }

    fn list_all(&self) -> RepoResult<Vec<FeedbackRecord>> {
        (**self).list_all()
    }
}

/// SQLite-backed feedback store over the `feedbacks` table.
pub struct SqliteFeedbackRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFeedbackRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FeedbackRepository for SqliteFeedbackRepository<'_> {
    fn insert_one(&self, feedback: &NewFeedback) -> RepoResult<FeedbackRecord> {
        feedback.validate()?;

        let record = self.conn.query_row(
            &format!(
                "INSERT INTO feedbacks (id, name, email, message)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {FEEDBACK_COLUMNS};"
            ),
            params![
                Uuid::new_v4().to_string(),
                feedback.name(),
                feedback.email(),
                feedback.message(),
            ],
            |row| Ok(parse_feedback_row(row)),
        )??;

        Ok(record)
    }

    fn list_all(&self) -> RepoResult<Vec<FeedbackRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_feedback_row(row)?);
        }

        Ok(records)
    }
}

fn parse_feedback_row(row: &Row<'_>) -> RepoResult<FeedbackRecord> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in feedbacks.id"))
    })?;

    Ok(FeedbackRecord {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
    })
}
