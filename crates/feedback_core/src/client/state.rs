//! Form state and its reducer.
//!
//! # Invariants
//! - `reduce` is pure: same state and action always give the same result.
//! - `submitting` is only entered by `SubmitStarted` and only left by
//!   `SubmitSucceeded`/`SubmitFailed`.
//! - `SubmitStarted` while already submitting leaves the state unchanged.
//! - Hiding the list never clears the cached records.

use crate::model::feedback::{
    FeedbackDraft, FeedbackField, FeedbackRecord, FeedbackValidationError,
};
use std::time::{Duration, Instant};

/// How long the success notice stays up after a submission.
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// User-facing text for any failed submit request.
pub const SUBMIT_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Everything the form renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: FeedbackDraft,
    pub submitting: bool,
    /// When the success notice was shown, if it is still up.
    pub notice_shown_at: Option<Instant>,
    /// Current user-visible error text.
    pub error: Option<String>,
    /// Last fetched submissions, kept while the list is hidden.
    pub feedbacks: Vec<FeedbackRecord>,
    pub list_visible: bool,
}

impl FormState {
    /// Whether the success notice should be rendered at `now`.
    pub fn notice_visible(&self, now: Instant) -> bool {
        self.notice_shown_at.is_some_and(|shown_at| {
            now.saturating_duration_since(shown_at) < SUCCESS_NOTICE_DURATION
        })
    }

    /// Whether the notice window has fully elapsed at `now`.
    pub fn notice_expired(&self, now: Instant) -> bool {
        self.notice_shown_at.is_some_and(|shown_at| {
            now.saturating_duration_since(shown_at) >= SUCCESS_NOTICE_DURATION
        })
    }
}

/// Named transitions of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    FieldChanged { field: FeedbackField, value: String },
    /// Client-side validation failed; nothing was sent.
    SubmitRejected(FeedbackValidationError),
    SubmitStarted,
    SubmitSucceeded { at: Instant },
    SubmitFailed,
    NoticeExpired,
    /// Replaces the cached list with freshly fetched records.
    ListLoaded(Vec<FeedbackRecord>),
    /// Flips list visibility.
    ListToggled,
    ListClosed,
}

/// Applies one action to the form state.
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::FieldChanged { field, value } => {
            state.draft.set_field(field, value);
        }
        FormAction::SubmitRejected(reason) => {
            state.error = Some(reason.user_message().to_string());
        }
        FormAction::SubmitStarted => {
            if !state.submitting {
                state.submitting = true;
                state.error = None;
            }
        }
        FormAction::SubmitSucceeded { at } => {
            state.submitting = false;
            state.draft = FeedbackDraft::default();
            state.error = None;
            state.notice_shown_at = Some(at);
        }
        FormAction::SubmitFailed => {
            state.submitting = false;
            state.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
        }
        FormAction::NoticeExpired => {
            state.notice_shown_at = None;
        }
        FormAction::ListLoaded(records) => {
            state.feedbacks = records;
        }
        FormAction::ListToggled => {
            state.list_visible = !state.list_visible;
        }
        FormAction::ListClosed => {
            state.list_visible = false;
        }
    }
    state
}
