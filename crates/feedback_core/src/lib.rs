//! Core domain logic for feedback collection.
//! This crate is the single source of truth for submission invariants.

pub mod client;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use client::controller::{ClientError, FormController, SubmitOutcome};
pub use client::state::{
    reduce, FormAction, FormState, SUBMIT_FAILED_MESSAGE, SUCCESS_NOTICE_DURATION,
};
pub use client::transport::{
    FeedbackTransport, TransportError, LIST_FEEDBACKS_PATH, SUBMIT_FEEDBACK_PATH,
};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use model::feedback::{
    is_valid_email, FeedbackDraft, FeedbackField, FeedbackId, FeedbackRecord,
    FeedbackValidationError, NewFeedback,
};
pub use repo::feedback_repo::{
    FeedbackRepository, RepoError, RepoResult, SqliteFeedbackRepository,
};
pub use repo::memory_repo::MemoryFeedbackRepository;
pub use service::submission_service::{
    parse_submission, EndpointResponse, ResponseBody, SubmissionService, SubmitError,
    MISSING_FIELDS_MESSAGE, SERVER_ERROR_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
