//! Form controller: drives `FormState` through a transport.
//!
//! # Responsibility
//! - Gate submissions on client-side validation before any request.
//! - Translate transport outcomes into reducer actions.
//!
//! # Invariants
//! - State changes only go through `reduce`.
//! - An invalid draft never reaches the transport.
//! - Every transport failure collapses into one generic message.

use crate::client::state::{reduce, FormAction, FormState};
use crate::client::transport::{FeedbackTransport, TransportError};
use crate::model::feedback::{FeedbackField, FeedbackValidationError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Failures surfaced by controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Draft failed the local gate; nothing was sent.
    Validation(FeedbackValidationError),
    /// Request failed for any reason; detail is kept for logs only.
    Server(TransportError),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Server(_) => write!(f, "Something went wrong"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Server(err) => Some(err),
        }
    }
}

impl From<FeedbackValidationError> for ClientError {
    fn from(value: FeedbackValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        Self::Server(value)
    }
}

/// Result of a `submit` call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Request sent and accepted.
    Submitted,
    /// A submission was already in flight; nothing was sent.
    Ignored,
}

pub struct FormController<T: FeedbackTransport> {
    transport: T,
    state: FormState,
}

impl<T: FeedbackTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    /// Applies one action through the reducer.
    pub fn dispatch(&mut self, action: FormAction) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }

    /// Merges one field into the draft. No validation.
    pub fn update_field(&mut self, field: FeedbackField, value: impl Into<String>) {
        self.dispatch(FormAction::FieldChanged {
            field,
            value: value.into(),
        });
    }

    /// Validates the draft and, if valid, posts it once.
    ///
    /// # Contract
    /// - Validation failure: error text set, no request, `Err(Validation)`.
    /// - Already submitting: no request, `Ok(Ignored)`.
    /// - Transport failure: draft kept, generic error text, `Err(Server)`.
    /// - Success: draft cleared, notice shown, `Ok(Submitted)`.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ClientError> {
        if self.state.submitting {
            debug!("event=form_submit module=client status=ignored reason=in_flight");
            return Ok(SubmitOutcome::Ignored);
        }

        let feedback = match self.state.draft.validate() {
            Ok(feedback) => feedback,
            Err(reason) => {
                debug!("event=form_submit module=client status=rejected reason={reason}");
                self.dispatch(FormAction::SubmitRejected(reason));
                return Err(reason.into());
            }
        };

        self.dispatch(FormAction::SubmitStarted);
        match self.transport.post_feedback(&feedback) {
            Ok(()) => {
                self.dispatch(FormAction::SubmitSucceeded { at: Instant::now() });
                debug!("event=form_submit module=client status=ok");
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                warn!("event=form_submit module=client status=error error={err}");
                self.dispatch(FormAction::SubmitFailed);
                Err(err.into())
            }
        }
    }

    /// Hides the success notice once its window has passed.
    ///
    /// Returns whether the notice was hidden by this call.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if !self.state.notice_expired(now) {
            return false;
        }
        self.dispatch(FormAction::NoticeExpired);
        true
    }

    /// Hides a visible list, or fetches and shows a hidden one.
    ///
    /// A failed fetch leaves the list hidden and the cache untouched.
    pub fn toggle_feedback_list(&mut self) -> Result<(), ClientError> {
        if self.state.list_visible {
            self.dispatch(FormAction::ListToggled);
            return Ok(());
        }

        let records = self.transport.fetch_feedbacks().map_err(|err| {
            warn!("event=feedback_list module=client status=error error={err}");
            ClientError::from(err)
        })?;
        debug!(
            "event=feedback_list module=client status=ok count={}",
            records.len()
        );
        self.dispatch(FormAction::ListLoaded(records));
        self.dispatch(FormAction::ListToggled);
        Ok(())
    }

    /// Hides the list, keeping cached records.
    pub fn close_feedback_list(&mut self) {
        self.dispatch(FormAction::ListClosed);
    }
}
