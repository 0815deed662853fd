//! Server-side use-case services.
//!
//! # Responsibility
//! - Turn raw request bodies into collaborator calls and responses.
//! - Keep HTTP frameworks decoupled from validation and storage details.

pub mod submission_service;
