//! Client-side form logic, independent of any rendering layer.
//!
//! # Responsibility
//! - Hold the draft and transient UI state in one `FormState` value.
//! - Validate before sending and map responses to state transitions.
//!
//! # Invariants
//! - No request is issued for a draft that fails local validation.

pub mod controller;
pub mod state;
pub mod transport;
