//! Student roster: record types, profile rendering, and the lock-guarded store.

pub mod profile;
mod store;
pub mod types;

pub use store::{RosterApi, StudentStore};
pub use types::{RosterError, Student, StudentDraft, StudentId};
