//! Shared utilities and common types for the Mentor Match backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Time-of-day and calendar-date parsing
//! - Common validation logic
//! - JWT access-token handling for the identity collaborator

pub mod jwt;
pub mod time;
pub mod validation;
