//! Card instances - one per physical card in the game.
//!
//! A `Card` is created once when the deck is built and is immutable after
//! that except for two fields: the owner of Owned cards, and the
//! accumulated score contribution of Valued cards. Everything else about a
//! card (what it attacks, what it defends) comes from its `CardKind`.

use serde::{Deserialize, Serialize};

use super::capability::{Capability, CapabilitySet};
use super::kind::CardKind;
use crate::core::PlayerId;

/// Unique in-game card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardInstanceId(pub u32);

impl CardInstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique instance id.
    pub id: CardInstanceId,

    /// Catalog type.
    pub kind: CardKind,

    /// Display name.
    pub name: String,

    /// Image reference for clients.
    pub image: String,

    owner: Option<PlayerId>,

    contribution: i64,
}

impl Card {
    /// Create a card instance.
    #[must_use]
    pub fn new(
        id: CardInstanceId,
        kind: CardKind,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            image: image.into(),
            owner: None,
            contribution: 0,
        }
    }

    /// Capabilities of this card's kind.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.kind.capabilities()
    }

    /// Current owner. Always `None` for cards without the Owned capability.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Record who holds this card.
    ///
    /// Returns `false` (and does nothing) for cards that are not Owned.
    pub fn set_owner(&mut self, owner: Option<PlayerId>) -> bool {
        if !self.kind.has(Capability::Owned) {
            return false;
        }
        self.owner = owner;
        true
    }

    /// Total points this card has contributed over the game.
    #[must_use]
    pub fn contribution(&self) -> i64 {
        self.contribution
    }

    /// Credit this card's value as it enters a hand.
    ///
    /// Returns the points credited, `None` for cards that are not Valued.
    pub fn credit(&mut self) -> Option<i64> {
        let value = self.kind.score_value()?;
        self.contribution += value;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Forage, MapSide};

    #[test]
    fn test_owner_only_for_owned_cards() {
        let mut map = Card::new(CardInstanceId(1), CardKind::MapHalf(MapSide::West), "West Map", "map_w.png");
        let mut rock = Card::new(CardInstanceId(2), CardKind::Rock, "Rock", "rock.png");

        assert!(map.set_owner(Some(PlayerId::new(1))));
        assert_eq!(map.owner(), Some(PlayerId::new(1)));

        assert!(!rock.set_owner(Some(PlayerId::new(1))));
        assert_eq!(rock.owner(), None);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut honey = Card::new(CardInstanceId(3), CardKind::Forage(Forage::Honey), "Honey", "honey.png");

        assert_eq!(honey.credit(), Some(4));
        assert_eq!(honey.credit(), Some(4));
        assert_eq!(honey.contribution(), 8);

        let mut guard = Card::new(CardInstanceId(4), CardKind::Guard, "Guard", "guard.png");
        assert_eq!(guard.credit(), None);
        assert_eq!(guard.contribution(), 0);
    }

    #[test]
    fn test_display_and_serde() {
        let card = Card::new(CardInstanceId(12), CardKind::Tree, "Tree", "tree.png");
        assert_eq!(format!("{}", card.id), "Card#12");

        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
