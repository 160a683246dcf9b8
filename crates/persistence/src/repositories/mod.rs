//! Repository implementations for database operations.

pub mod availability;
pub mod scheduling;
pub mod session;
pub mod user;

pub use availability::AvailabilityRepository;
pub use scheduling::{PgSchedulingStore, PgSchedulingTx};
pub use session::SessionRepository;
pub use user::UserRepository;
