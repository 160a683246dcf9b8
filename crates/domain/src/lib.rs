//! Domain layer for the Mentor Match backend.
//!
//! This crate contains:
//! - Domain models (recurrence rules, mentorship requests, sessions)
//! - Availability expansion and scheduling-conflict logic
//! - The scheduling coordinator and its storage abstraction
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::DomainError;
