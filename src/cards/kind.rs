//! Card variants and their capability accessors.
//!
//! `CardKind` is the closed set of catalog types. Each variant is wired to
//! a fixed `CapabilitySet` in `capabilities()`; the typed accessors
//! (`as_attacker`, `as_defender`, `score_value`, ...) return `None` when
//! the capability is absent, so no caller ever has to match on the variant
//! to find out what a card can do.

use serde::{Deserialize, Serialize};

use super::capability::{
    AttackKind, Capability, CapabilitySet, DefenseProfile, DisasterKind, Threat,
};

/// Regular gathering cards. Worth points, pair up with an identical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Forage {
    Berry,
    Mushroom,
    Fish,
    Honey,
}

impl Forage {
    pub const ALL: [Forage; 4] = [Forage::Berry, Forage::Mushroom, Forage::Fish, Forage::Honey];

    /// Points the card is worth while held.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Forage::Berry => 1,
            Forage::Mushroom => 2,
            Forage::Fish => 3,
            Forage::Honey => 4,
        }
    }
}

/// The two halves of the treasure map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MapSide {
    West,
    East,
}

impl MapSide {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            MapSide::West => MapSide::East,
            MapSide::East => MapSide::West,
        }
    }
}

/// Catalog card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    Forage(Forage),
    Steal,
    Rock,
    River,
    Tree,
    Disaster(DisasterKind),
    Guard,
    Rope,
    Shelter,
    MapHalf(MapSide),
    Flint,
    Tinder,
    Lifeline,
}

impl CardKind {
    /// Capabilities this variant is built with.
    #[must_use]
    pub const fn capabilities(self) -> CapabilitySet {
        let none = CapabilitySet::empty();
        match self {
            CardKind::Forage(_) => none.with(Capability::Coupled).with(Capability::Valued),
            CardKind::Steal
            | CardKind::Rock
            | CardKind::River
            | CardKind::Tree
            | CardKind::Disaster(_) => none.with(Capability::Attackable),
            CardKind::Guard | CardKind::Rope | CardKind::Shelter => {
                none.with(Capability::Defensible)
            }
            CardKind::MapHalf(_) => none.with(Capability::Coupled).with(Capability::Owned),
            CardKind::Flint | CardKind::Tinder => none.with(Capability::Coupled),
            CardKind::Lifeline => none.with(Capability::FailNotifiable),
        }
    }

    /// Shorthand for a capability check.
    #[must_use]
    pub const fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// The attack this card drives, if it is Attackable.
    #[must_use]
    pub const fn as_attacker(self) -> Option<AttackKind> {
        match self {
            CardKind::Steal => Some(AttackKind::Steal),
            CardKind::Rock => Some(AttackKind::Rock),
            CardKind::River => Some(AttackKind::River),
            CardKind::Tree => Some(AttackKind::Tree),
            CardKind::Disaster(kind) => Some(AttackKind::Disaster(kind)),
            _ => None,
        }
    }

    /// Can a player start this card's attack by playing it from hand?
    ///
    /// Disasters are attackable but are never held; they fire on draw.
    #[must_use]
    pub const fn is_playable_attack(self) -> bool {
        match self.as_attacker() {
            Some(kind) => kind.has_attacker(),
            None => false,
        }
    }

    /// Defense coverage, if the card is Defensible.
    #[must_use]
    pub fn as_defender(self) -> Option<DefenseProfile> {
        let pit = Threat::Disaster(DisasterKind::Pit);
        let cliff = Threat::Disaster(DisasterKind::Cliff);
        match self {
            CardKind::Guard => Some(DefenseProfile::new([Threat::Steal])),
            CardKind::Rope => Some(DefenseProfile::new([pit, cliff])),
            CardKind::Shelter => Some(
                DefenseProfile::new([pit, cliff, Threat::Disaster(DisasterKind::Avalanche)])
                    .limited(),
            ),
            _ => None,
        }
    }

    /// Points contributed while held, if Valued.
    #[must_use]
    pub const fn score_value(self) -> Option<i64> {
        match self {
            CardKind::Forage(forage) => Some(forage.value()),
            _ => None,
        }
    }

    /// Win-type special card (revealed by Tree attacks).
    #[must_use]
    pub const fn is_win_special(self) -> bool {
        matches!(self, CardKind::MapHalf(_))
    }

    #[must_use]
    pub const fn is_disaster(self) -> bool {
        matches!(self, CardKind::Disaster(_))
    }

    /// Display name used when the catalog supplies none.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            CardKind::Forage(Forage::Berry) => "Berry",
            CardKind::Forage(Forage::Mushroom) => "Mushroom",
            CardKind::Forage(Forage::Fish) => "Fish",
            CardKind::Forage(Forage::Honey) => "Honey",
            CardKind::Steal => "Steal",
            CardKind::Rock => "Rock",
            CardKind::River => "River",
            CardKind::Tree => "Tree",
            CardKind::Disaster(DisasterKind::Pit) => "Pit",
            CardKind::Disaster(DisasterKind::Cliff) => "Cliff",
            CardKind::Disaster(DisasterKind::Avalanche) => "Avalanche",
            CardKind::Guard => "Guard",
            CardKind::Rope => "Rope",
            CardKind::Shelter => "Shelter",
            CardKind::MapHalf(MapSide::West) => "West Map",
            CardKind::MapHalf(MapSide::East) => "East Map",
            CardKind::Flint => "Flint",
            CardKind::Tinder => "Tinder",
            CardKind::Lifeline => "Lifeline",
        }
    }
}
