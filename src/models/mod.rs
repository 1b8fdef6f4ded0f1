// Models for the line-oriented todo store

pub mod common;
pub mod recurrence;
pub mod todo;

pub use common::{StatusFilter, TodoState};
pub use recurrence::{Recurrence, RecurrenceUnit};
pub use todo::Todo;
