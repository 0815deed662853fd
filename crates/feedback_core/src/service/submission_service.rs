//! Submission endpoint pipeline, independent of any HTTP framework.
//!
//! # Responsibility
//! - Parse a raw JSON body, check required fields, forward the insert.
//! - Map every outcome to a status code and JSON body.
//!
//! # Invariants
//! - No failure escapes `handle_submit`/`handle_list`; each becomes a response.
//! - Only presence is checked here; email shape is a client concern.
//! - Collaborator error messages are passed through; anything else is
//!   reported as the generic `"Server error"`.
//! - The inserted row is never echoed back to the caller.

use crate::model::feedback::{FeedbackRecord, NewFeedback};
use crate::repo::feedback_repo::{FeedbackRepository, RepoError, RepoResult};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing fields";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Failure classes of one submission attempt.
#[derive(Debug)]
pub enum SubmitError {
    /// Body is not valid JSON.
    Malformed(serde_json::Error),
    /// A required field is absent, null, empty or not a string.
    MissingFields,
    /// The collaborator rejected the insert.
    Persistence(RepoError),
    /// Anything else that prevented handling the request.
    Unexpected(String),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed request body: {err}"),
            Self::MissingFields => write!(f, "missing fields"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Unexpected(details) => write!(f, "unexpected error: {details}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::MissingFields | Self::Unexpected(_) => None,
        }
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(_) => Self::MissingFields,
            other => Self::Persistence(other),
        }
    }
}

/// JSON body shapes produced by the endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success { success: bool },
    Error { error: String },
    Feedbacks(Vec<FeedbackRecord>),
}

impl ResponseBody {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Status code plus JSON body, ready to be written by a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl EndpointResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_OK,
            body: ResponseBody::Success { success: true },
        }
    }

    /// Generic 500 that leaks no detail to the caller.
    pub fn server_error() -> Self {
        Self {
            status: STATUS_INTERNAL_ERROR,
            body: ResponseBody::error(SERVER_ERROR_MESSAGE),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&SubmitError> for EndpointResponse {
    fn from(value: &SubmitError) -> Self {
        match value {
            SubmitError::MissingFields => Self {
                status: STATUS_BAD_REQUEST,
                body: ResponseBody::error(MISSING_FIELDS_MESSAGE),
            },
            SubmitError::Persistence(err) => Self {
                status: STATUS_INTERNAL_ERROR,
                body: ResponseBody::error(err.to_string()),
            },
            SubmitError::Malformed(_) | SubmitError::Unexpected(_) => Self::server_error(),
        }
    }
}

/// Parses a raw request body into a presence-checked submission.
///
/// # Contract
/// - Invalid JSON is `Malformed`.
/// - A `null` body is `Unexpected`; any other non-object body has no fields.
/// - Each field must be a non-empty JSON string; anything else is missing.
/// - Keys other than `name`, `email` and `message` are ignored.
pub fn parse_submission(body: &[u8]) -> Result<NewFeedback, SubmitError> {
    let value: Value = serde_json::from_slice(body).map_err(SubmitError::Malformed)?;
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => {
            return Err(SubmitError::Unexpected(
                "request body is JSON null".to_string(),
            ))
        }
        _ => Map::new(),
    };

    match (
        required_text(&fields, "name"),
        required_text(&fields, "email"),
        required_text(&fields, "message"),
    ) {
        (Some(name), Some(email), Some(message)) => {
            NewFeedback::new(name, email, message).map_err(|_| SubmitError::MissingFields)
        }
        _ => Err(SubmitError::MissingFields),
    }
}

fn required_text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    match fields.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
        _ => None,
    }
}

/// Stateless request handler over a feedback collaborator.
pub struct SubmissionService<R: FeedbackRepository> {
    repo: R,
}

impl<R: FeedbackRepository> SubmissionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs parse → check → insert and returns the stored row.
    pub fn submit(&self, body: &[u8]) -> Result<FeedbackRecord, SubmitError> {
        let feedback = parse_submission(body)?;
        let record = self.repo.insert_one(&feedback)?;
        Ok(record)
    }

    /// Handles `POST /api/submit-feedback`.
    ///
    /// # Side effects
    /// - Inserts one row on success.
    /// - Logs rejections at `warn` and failures at `error`; field contents
    ///   are never logged.
    pub fn handle_submit(&self, body: &[u8]) -> EndpointResponse {
        match self.submit(body) {
            Ok(record) => {
                info!(
                    "event=feedback_submit module=service status=ok id={} message_len={}",
                    record.id,
                    record.message.chars().count()
                );
                EndpointResponse::success()
            }
            Err(err) => {
                match &err {
                    SubmitError::MissingFields => warn!(
                        "event=feedback_submit module=service status=rejected error_code=missing_fields"
                    ),
                    SubmitError::Persistence(cause) => error!(
                        "event=feedback_submit module=service status=error error_code=insert_failed error={}",
                        cause
                    ),
                    SubmitError::Malformed(_) | SubmitError::Unexpected(_) => error!(
                        "event=feedback_submit module=service status=error error_code=unexpected error={}",
                        err
                    ),
                }
                EndpointResponse::from(&err)
            }
        }
    }

    /// Returns every stored submission.
    pub fn list_feedbacks(&self) -> RepoResult<Vec<FeedbackRecord>> {
        self.repo.list_all()
    }

    /// Handles `GET /api/feedbacks`.
    pub fn handle_list(&self) -> EndpointResponse {
        match self.list_feedbacks() {
            Ok(records) => {
                info!(
                    "event=feedback_list module=service status=ok count={}",
                    records.len()
                );
                EndpointResponse {
                    status: STATUS_OK,
                    body: ResponseBody::Feedbacks(records),
                }
            }
            Err(err) => {
                error!(
                    "event=feedback_list module=service status=error error_code=list_failed error={}",
                    err
                );
                EndpointResponse {
                    status: STATUS_INTERNAL_ERROR,
                    body: ResponseBody::error(err.to_string()),
                }
            }
        }
    }
}
