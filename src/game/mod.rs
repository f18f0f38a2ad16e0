//! Game flow around the attack engine.
//!
//! ## Key Types
//!
//! - `Table`: player registry, card registry, deck and used pile
//! - `Game`: turn flow and every public entry point
//! - `GameResult`: how the game ended
//! - `GameSnapshot`: serializable read-only view

pub mod result;
pub mod session;
pub mod snapshot;
pub mod table;

pub use result::{EndReason, GameResult};
pub use session::{CoupleOutcome, DrawOutcome, Game};
pub use snapshot::{GameSnapshot, PlayerView};
pub use table::{Player, Seat, Table};
