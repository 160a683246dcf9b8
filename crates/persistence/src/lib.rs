//! Persistence layer for the Mentor Match backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - The PostgreSQL scheduling store used by the request workflow

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
