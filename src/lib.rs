//! # wildtrail
//!
//! Game server core for a turn-based multiplayer survival card game.
//!
//! Cards can start *attacks*: multi-step interactions between a player and
//! a target (steal a card, skip a turn, reveal who holds a map half, or a
//! disaster that eliminates the player who drew it). The attack protocol is
//! a state machine driven against a turn ring and a capability-based card
//! model, with templated notifications at every step.
//!
//! ## Design Principles
//!
//! 1. **One writer**: `Game` owns all mutable state and every entry point
//!    takes `&mut self`. The async `GameServer` wraps it in a single mutex.
//!
//! 2. **Capabilities, not casts**: callers ask a card what it can do
//!    (`as_attacker`, `as_defender`, `has(Capability::Owned)`), never which
//!    concrete card it is.
//!
//! 3. **Explicit context**: the attack in progress is one `AttackContext`
//!    owned by the machine, not shared globals.
//!
//! 4. **Ordered narrative**: notifications are queued in the exact order
//!    the machine produced them.
//!
//! ## Modules
//!
//! - `core`: seats, per-seat storage, RNG, configuration
//! - `cards`: capability model, card kinds and instances, catalog, couples
//! - `turns`: turn ring with skip support
//! - `attack`: attack state machine and orchestrator
//! - `messages`: templates, rendering, addressed notifications
//! - `game`: table, turn flow, results and snapshots
//! - `server`: async front with timeouts and notification fan-out
//!
//! ## Example
//!
//! ```
//! use wildtrail::{Game, GameConfig, PlayerId, Seat, StandardCatalog};
//!
//! let seats = vec![Seat::new("Ann"), Seat::new("Bo"), Seat::new("Cy")];
//! let mut game = Game::new(GameConfig::new(42), &StandardCatalog::new(), seats).unwrap();
//!
//! assert_eq!(game.current_player(), PlayerId::new(0));
//! game.draw(PlayerId::new(0)).unwrap();
//! assert!(game.result().is_none());
//! ```

pub mod attack;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod messages;
pub mod server;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, GameRngState, PlayerId, PlayerMap};

pub use crate::error::EngineError;

pub use crate::cards::{
    AttackKind, Capability, CapabilitySet, Card, CardCatalog, CardInstanceId, CardKind, CatalogEntry,
    CoupleEffect, DefenseProfile, DisasterKind, Forage, MapSide, Multiplicity, StandardCatalog, Threat,
};

pub use crate::turns::TurnScheduler;

pub use crate::attack::{
    AttackContext, AttackHooks, AttackMachine, AttackOrchestrator, AttackProgress, AttackState, Awaiting,
    PendingReply,
};

pub use crate::messages::{
    AttackMessage, Destination, MessageKind, MessageTemplate, Notification, Recipients, Stage, TemplateBook,
    TemplateToken,
};

pub use crate::game::{
    CoupleOutcome, DrawOutcome, EndReason, Game, GameResult, GameSnapshot, Player, PlayerView, Seat, Table,
};

pub use crate::server::GameServer;
