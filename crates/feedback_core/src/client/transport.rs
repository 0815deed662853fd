//! Outbound calls made by the form controller.

use crate::model::feedback::{FeedbackRecord, NewFeedback};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SUBMIT_FEEDBACK_PATH: &str = "/api/submit-feedback";
pub const LIST_FEEDBACKS_PATH: &str = "/api/feedbacks";

/// Failure of one outbound request. Non-2xx statuses are failures too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request never produced a response (connect, timeout, TLS).
    Network(String),
    /// Server answered with a non-success status.
    Status { code: u16, body: String },
    /// Response body could not be decoded.
    Decode(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(details) => write!(f, "network error: {details}"),
            Self::Status { code, body } => write!(f, "server returned {code}: {body}"),
            Self::Decode(details) => write!(f, "invalid response body: {details}"),
        }
    }
}

impl Error for TransportError {}

/// Seam between the controller and whatever carries requests to the server.
pub trait FeedbackTransport {
    /// Issues one `POST /api/submit-feedback` with the submission as JSON.
    fn post_feedback(&self, feedback: &NewFeedback) -> Result<(), TransportError>;
    /// Issues one `GET /api/feedbacks`.
    fn fetch_feedbacks(&self) -> Result<Vec<FeedbackRecord>, TransportError>;
}

impl<T: FeedbackTransport + ?Sized> FeedbackTransport for &T {
    fn post_feedback(&self, feedback: &NewFeedback) -> Result<(), TransportError> {
        (**self).post_feedback(feedback)
    }

    fn fetch_feedbacks(&self) -> Result<Vec<FeedbackRecord>, TransportError> {
        (**self).fetch_feedbacks()
    }
}
