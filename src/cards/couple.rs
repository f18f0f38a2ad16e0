//! Couples: two cards played together for a combined effect.
//!
//! Compatibility is symmetric: `pair(a, b) == pair(b, a)` for every pair of
//! kinds. Only cards with the Coupled capability ever pair.

use serde::{Deserialize, Serialize};

use super::capability::Capability;
use super::kind::CardKind;

/// What a couple does once played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoupleEffect {
    /// Two identical forage cards: start a Steal attack.
    StealAttack,
    /// Both map halves: the player wins immediately.
    Win,
    /// Flint and Tinder: every active player gains the campfire bonus.
    Campfire,
}

/// Check whether two kinds form a couple.
///
/// ```
/// use wildtrail::cards::{pair, CardKind, CoupleEffect, Forage, MapSide};
///
/// let berry = CardKind::Forage(Forage::Berry);
/// assert_eq!(pair(berry, berry), Some(CoupleEffect::StealAttack));
/// assert_eq!(
///     pair(CardKind::MapHalf(MapSide::East), CardKind::MapHalf(MapSide::West)),
///     Some(CoupleEffect::Win)
/// );
/// assert_eq!(pair(berry, CardKind::Forage(Forage::Fish)), None);
/// ```
#[must_use]
pub fn pair(a: CardKind, b: CardKind) -> Option<CoupleEffect> {
    if !a.has(Capability::Coupled) || !b.has(Capability::Coupled) {
        return None;
    }

    match (a, b) {
        (CardKind::Forage(x), CardKind::Forage(y)) if x == y => Some(CoupleEffect::StealAttack),
        (CardKind::MapHalf(x), CardKind::MapHalf(y)) if x.other() == y => Some(CoupleEffect::Win),
        (CardKind::Flint, CardKind::Tinder) | (CardKind::Tinder, CardKind::Flint) => {
            Some(CoupleEffect::Campfire)
        }
        _ => None,
    }
}
