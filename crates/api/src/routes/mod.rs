//! HTTP route handlers.

pub mod availability;
pub mod health;
pub mod requests;
pub mod sessions;
