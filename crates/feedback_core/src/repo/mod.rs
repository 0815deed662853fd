//! Persistence collaborators for feedback submissions.
//!
//! # Responsibility
//! - Define the insert/list contract the endpoint depends on.
//! - Provide SQLite and in-memory implementations of it.
//!
//! # Invariants
//! - Every implementation validates presence before storing a row.

pub mod feedback_repo;
pub mod memory_repo;
