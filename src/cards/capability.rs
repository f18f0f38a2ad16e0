//! Capabilities and attack kinds.
//!
//! A card never answers "what are you?" to the rest of the engine, only
//! "can you do X?". The answers live here:
//!
//! - `Capability` / `CapabilitySet`: which behaviours a card variant has
//! - `AttackKind`: what an attack does and which protocol steps it needs
//! - `Threat` / `DefenseProfile`: which attacks a defense card neutralizes
//!
//! Defense matching is per threat, not per "is a defense card": a Rope stops
//! a pit or a cliff but not an avalanche, a Guard stops theft and nothing
//! else.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A behaviour a card variant may support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Can drive an attack.
    Attackable,
    /// Can neutralize some attacks.
    Defensible,
    /// Holder is notified, possibly eliminated, when it is lost.
    FailNotifiable,
    /// Pairs with another card for a combined effect.
    Coupled,
    /// Tracks the player holding it.
    Owned,
    /// Contributes to its holder's score.
    Valued,
}

impl Capability {
    const ALL: [Capability; 6] = [
        Capability::Attackable,
        Capability::Defensible,
        Capability::FailNotifiable,
        Capability::Coupled,
        Capability::Owned,
        Capability::Valued,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Fixed set of capabilities, one bit each.
///
/// ```
/// use wildtrail::cards::{Capability, CapabilitySet};
///
/// let set: CapabilitySet = [Capability::Coupled, Capability::Valued].into_iter().collect();
/// assert!(set.contains(Capability::Valued));
/// assert!(!set.contains(Capability::Owned));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// Empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a capability (builder style).
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Capabilities in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Natural disaster sub-kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisasterKind {
    Pit,
    Cliff,
    Avalanche,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 3] = [DisasterKind::Pit, DisasterKind::Cliff, DisasterKind::Avalanche];
}

/// What an attack does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackKind {
    /// Take a random card from the victim unless they guard.
    Steal,
    /// Knock a random card out of the victim's hand into the attacker's.
    Rock,
    /// Block the next player's turn.
    River,
    /// Reveal who holds map halves.
    Tree,
    /// Eliminate the player who drew it unless they defend.
    Disaster(DisasterKind),
}

impl AttackKind {
    /// Does the attacker pick a victim before the effect runs?
    #[must_use]
    pub const fn needs_pre_attack(self) -> bool {
        matches!(self, Self::Steal | Self::Rock)
    }

    /// Is there an acting player? Disasters strike the drawer with no attacker.
    #[must_use]
    pub const fn has_attacker(self) -> bool {
        !matches!(self, Self::Disaster(_))
    }

    /// The threat a defense card must cover to stop this attack.
    #[must_use]
    pub const fn threat(self) -> Option<Threat> {
        match self {
            Self::Steal => Some(Threat::Steal),
            Self::Disaster(kind) => Some(Threat::Disaster(kind)),
            Self::Rock | Self::River | Self::Tree => None,
        }
    }

    /// Can the victim answer with a defense card at all?
    #[must_use]
    pub const fn is_defensible(self) -> bool {
        self.threat().is_some()
    }

    /// Would `defense` neutralize this attack?
    ///
    /// A card without the Defensible capability, or one whose coverage does
    /// not include this attack's threat, simply returns `false`.
    #[must_use]
    pub fn defense_succeeded(self, defense: Option<&DefenseProfile>) -> bool {
        match (self.threat(), defense) {
            (Some(threat), Some(profile)) => profile.covers(threat),
            _ => false,
        }
    }

    /// Stable lower-case label used in logs and template keys.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steal => "steal",
            Self::Rock => "rock",
            Self::River => "river",
            Self::Tree => "tree",
            Self::Disaster(DisasterKind::Pit) => "pit",
            Self::Disaster(DisasterKind::Cliff) => "cliff",
            Self::Disaster(DisasterKind::Avalanche) => "avalanche",
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Something a defense card can cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Threat {
    Steal,
    Disaster(DisasterKind),
}

/// What a defense card stops, and at what price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseProfile {
    covers: SmallVec<[Threat; 3]>,

    /// Limited-use defenses save the victim from a disaster but cost them
    /// every other card in hand.
    pub limited_use: bool,
}

impl DefenseProfile {
    /// Defense covering the given threats.
    pub fn new(covers: impl IntoIterator<Item = Threat>) -> Self {
        Self {
            covers: covers.into_iter().collect(),
            limited_use: false,
        }
    }

    /// Mark as limited-use.
    #[must_use]
    pub fn limited(mut self) -> Self {
        self.limited_use = true;
        self
    }

    /// Does this defense cover `threat`?
    #[must_use]
    pub fn covers(&self, threat: Threat) -> bool {
        self.covers.contains(&threat)
    }

    /// Threats covered.
    #[must_use]
    pub fn threats(&self) -> &[Threat] {
        &self.covers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_set() {
        let set = CapabilitySet::empty()
            .with(Capability::Owned)
            .with(Capability::Coupled);

        assert!(set.contains(Capability::Owned));
        assert!(set.contains(Capability::Coupled));
        assert!(!set.contains(Capability::Attackable));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Capability::Coupled, Capability::Owned]
        );
        assert!(CapabilitySet::empty().is_empty());
    }

    #[test]
    fn test_attack_protocol_flags() {
        assert!(AttackKind::Steal.needs_pre_attack());
        assert!(AttackKind::Rock.needs_pre_attack());
        assert!(!AttackKind::River.needs_pre_attack());
        assert!(!AttackKind::Tree.needs_pre_attack());
        assert!(!AttackKind::Disaster(DisasterKind::Pit).needs_pre_attack());

        assert!(!AttackKind::Disaster(DisasterKind::Cliff).has_attacker());
        assert!(AttackKind::Tree.has_attacker());

        assert!(AttackKind::Steal.is_defensible());
        assert!(!AttackKind::Rock.is_defensible());
        assert!(!AttackKind::River.is_defensible());
    }

    #[test]
    fn test_defense_matching_is_per_threat() {
        let rope = DefenseProfile::new([
            Threat::Disaster(DisasterKind::Pit),
            Threat::Disaster(DisasterKind::Cliff),
        ]);
        let guard = DefenseProfile::new([Threat::Steal]);

        assert!(AttackKind::Disaster(DisasterKind::Pit).defense_succeeded(Some(&rope)));
        assert!(AttackKind::Disaster(DisasterKind::Cliff).defense_succeeded(Some(&rope)));
        assert!(!AttackKind::Disaster(DisasterKind::Avalanche).defense_succeeded(Some(&rope)));
        assert!(!AttackKind::Steal.defense_succeeded(Some(&rope)));

        assert!(AttackKind::Steal.defense_succeeded(Some(&guard)));
        assert!(!AttackKind::Disaster(DisasterKind::Pit).defense_succeeded(Some(&guard)));

        assert!(!AttackKind::Steal.defense_succeeded(None));
        assert!(!AttackKind::Rock.defense_succeeded(Some(&guard)));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AttackKind::Disaster(DisasterKind::Avalanche).to_string(), "avalanche");
        assert_eq!(AttackKind::Steal.to_string(), "steal");
    }
}
