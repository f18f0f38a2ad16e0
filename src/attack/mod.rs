//! Attack protocol engine.
//!
//! ## Key Types
//!
//! - `AttackState`: the six machine states
//! - `AttackContext`: the single live record of the attack in progress
//! - `AttackMachine`: sequences states, suspends on victim and defense replies
//! - `AttackHooks`: everything the machine needs from the game
//! - `AttackOrchestrator`: the hooks implementation over a `Table`
//!
//! There is exactly one context per machine and the machine refuses to
//! start while it is armed, so concurrent attacks cannot exist.

pub mod context;
pub mod machine;
pub mod orchestrator;
pub mod state;

pub use context::AttackContext;
pub use machine::{AttackHooks, AttackMachine, AttackProgress, Awaiting, EffectProgress, PendingReply, Step};
pub use orchestrator::AttackOrchestrator;
pub use state::AttackState;
