//! Domain model for feedback submissions.
//!
//! # Responsibility
//! - Define canonical data structures shared by the endpoint and the client.
//!
//! # Invariants
//! - Persisted feedback is immutable; this system only inserts and lists.

pub mod feedback;
