//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod availability;
pub mod mentorship_request;
pub mod session;
pub mod user;

pub use availability::{
    rules_from_entities, AvailabilityEntity, RecurrenceColumns, RecurrenceKindDb,
};
pub use mentorship_request::{MentorshipRequestEntity, RequestStatusDb};
pub use session::{SessionEntity, SessionStatusDb};
pub use user::UserEntity;
