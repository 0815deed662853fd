//! Feedback domain model.
//!
//! # Responsibility
//! - Define the draft, submission and persisted record shapes.
//! - Own the client-side and server-side validation rules.
//!
//! # Invariants
//! - A `NewFeedback` always carries three non-empty strings.
//! - Server-side checks are presence-only; email shape is a client gate.
//! - `FeedbackRecord::id` and `created_at` are assigned by storage, never by callers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

// `\s` here lacks U+FEFF, which browsers count as whitespace.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("valid email regex")
});

/// Stable identifier assigned to a persisted feedback row.
pub type FeedbackId = Uuid;

/// Names of the user-editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackField {
    Name,
    Email,
    Message,
}

impl FeedbackField {
    pub const ALL: [FeedbackField; 3] = [Self::Name, Self::Email, Self::Message];

    /// Wire/form key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl FromStr for FeedbackField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "message" => Ok(Self::Message),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Returned when a form key does not name a known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown feedback field `{}`", self.0)
    }
}

impl Error for UnknownFieldError {}

/// Validation failures for feedback input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackValidationError {
    /// At least one of name/email/message is empty.
    MissingFields,
    /// Email does not have a `local@domain.tld` shape.
    InvalidEmail,
}

impl FeedbackValidationError {
    /// Text shown to the person filling in the form.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingFields => "Please fill in all fields before submitting.",
            Self::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

impl Display for FeedbackValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "missing fields"),
            Self::InvalidEmail => write!(f, "invalid email"),
        }
    }
}

impl Error for FeedbackValidationError {}

/// In-progress form state. Never validated until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FeedbackDraft {
    /// Replaces one field value, leaving the others untouched.
    pub fn set_field(&mut self, field: FeedbackField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FeedbackField::Name => self.name = value,
            FeedbackField::Email => self.email = value,
            FeedbackField::Message => self.message = value,
        }
    }

    pub fn field(&self, field: FeedbackField) -> &str {
        match field {
            FeedbackField::Name => &self.name,
            FeedbackField::Email => &self.email,
            FeedbackField::Message => &self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        FeedbackField::ALL
            .iter()
            .all(|field| self.field(*field).is_empty())
    }

    /// Client-side gate run before any network request.
    ///
    /// # Contract
    /// - Whitespace-only values count as missing.
    /// - Missing fields are reported before email shape.
    /// - Values are passed through untrimmed on success.
    pub fn validate(&self) -> Result<NewFeedback, FeedbackValidationError> {
        let missing = FeedbackField::ALL
            .iter()
            .any(|field| self.field(*field).trim().is_empty());
        if missing {
            return Err(FeedbackValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(FeedbackValidationError::InvalidEmail);
        }

        Ok(NewFeedback {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }
}

/// A submission that passed presence validation and may be persisted.
///
/// Serializes to exactly `name`, `email` and `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFeedback {
    name: String,
    email: String,
    message: String,
}

impl NewFeedback {
    /// Server-side constructor: presence check only, no email shape check.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, FeedbackValidationError> {
        let feedback = Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        };
        feedback.validate()?;
        Ok(feedback)
    }

    pub fn validate(&self) -> Result<(), FeedbackValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(FeedbackValidationError::MissingFields);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Persisted feedback row as returned by the listing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Unix epoch milliseconds, assigned on insert.
    pub created_at: i64,
}

/// Returns whether `value` has a basic `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
