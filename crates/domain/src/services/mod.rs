//! Domain services for Mentor Match.
//!
//! Services contain business logic that operates on domain models.

pub mod conflict;
pub mod memory_store;
pub mod scheduling;
pub mod slot_expansion;

pub use conflict::{find_conflict, has_conflict};
pub use memory_store::InMemorySchedulingStore;
pub use scheduling::{SchedulingCoordinator, SchedulingStore, SchedulingTx};
pub use slot_expansion::{expand, group_by_date};
