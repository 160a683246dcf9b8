//! Domain models for Mentor Match.

pub mod availability;
pub mod mentorship_request;
pub mod session;
pub mod user;

pub use availability::{
    AvailabilityResponse, CreateAvailabilityRequest, DateWindow, ExpandedSlot,
    MentorSlotsResponse, NewRecurrenceRule, Recurrence, RecurrenceKind, RecurrenceRule,
    SlotEntry, SlotRangeQuery, StoredAvailability, UpdateAvailabilityRequest,
};
pub use mentorship_request::{
    MentorshipRequest, RequestDecision, RequestStatus, RespondRequest, RespondResponse,
    SendRequestRequest,
};
pub use session::{NewSession, Session, SessionStatus};
pub use user::{Principal, User, MENTEE_ROLE, MENTOR_ROLE};
