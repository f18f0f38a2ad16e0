//! Turn scheduling.
//!
//! A fixed ring of seats with an active flag per seat and a one-shot
//! "blocked" flag that River attacks set.

pub mod scheduler;

pub use scheduler::{TurnNode, TurnScheduler};
