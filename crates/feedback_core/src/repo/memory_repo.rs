//! In-process feedback store.
//!
//! Used by tests and by callers that do not need durability. Insert
//! failures can be injected to exercise the endpoint error path.

use crate::model::feedback::{FeedbackRecord, NewFeedback};
use crate::repo::feedback_repo::{FeedbackRepository, RepoError, RepoResult};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<FeedbackRecord>,
    insert_failure: Option<String>,
}

/// Vec-backed store preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryFeedbackRepository {
    state: Mutex<MemoryState>,
}

impl MemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following insert fail with `message` until cleared.
    pub fn fail_inserts_with(&self, message: impl Into<String>) {
        self.lock().insert_failure = Some(message.into());
    }

    pub fn clear_insert_failure(&self) {
        self.lock().insert_failure = None;
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-call;
        // the Vec itself is still consistent.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FeedbackRepository for MemoryFeedbackRepository {
    fn insert_one(&self, feedback: &NewFeedback) -> RepoResult<FeedbackRecord> {
        feedback.validate()?;

        let mut state = self.lock();
        if let Some(message) = &state.insert_failure {
            return Err(RepoError::Backend(message.clone()));
        }

        let record = FeedbackRecord {
            id: Uuid::new_v4(),
            name: feedback.name().to_string(),
            email: feedback.email().to_string(),
            message: feedback.message().to_string(),
            created_at: now_epoch_ms(),
        };
        state.rows.push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> RepoResult<Vec<FeedbackRecord>> {
        Ok(self.lock().rows.clone())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
