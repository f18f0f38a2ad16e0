//! Card capability model: kinds, instances, catalog, couples.
//!
//! ## Key Types
//!
//! - `CardKind`: closed set of catalog types, each wired to a `CapabilitySet`
//! - `AttackKind`: the attack a card drives, with its protocol flags
//! - `DefenseProfile`: which threats a defense card neutralizes
//! - `Card`: runtime instance (owner, score contribution)
//! - `CardCatalog`: deck contents and message templates
//! - `pair`: symmetric couple compatibility
//!
//! Callers ask capability questions; nothing outside this module matches on
//! `CardKind` to decide behaviour.

pub mod capability;
pub mod card;
pub mod catalog;
pub mod couple;
pub mod kind;

pub use capability::{AttackKind, Capability, CapabilitySet, DefenseProfile, DisasterKind, Threat};
pub use card::{Card, CardInstanceId};
pub use catalog::{CardCatalog, CatalogEntry, Multiplicity, StandardCatalog};
pub use couple::{pair, CoupleEffect};
pub use kind::{CardKind, Forage, MapSide};
