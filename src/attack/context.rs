//! The record of the attack in progress.
//!
//! One `AttackContext` lives inside the `AttackMachine`. It is armed when an
//! attack starts, filled in as the attack progresses, and reset when the
//! machine returns to `NoAttack`. Nothing outside the machine and its hooks
//! writes to it.

use serde::{Deserialize, Serialize};

use crate::cards::{AttackKind, CardInstanceId};
use crate::core::PlayerId;

/// Shared state of a single attack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackContext {
    /// Sequence number, unique per attack within a game.
    pub sequence: u64,

    /// What the attack does. `None` while idle.
    pub kind: Option<AttackKind>,

    /// Card that started the attack.
    pub card: Option<CardInstanceId>,

    /// Acting player. `None` for disasters.
    pub attacker: Option<PlayerId>,

    /// Target. Chosen during `PreAttack` for kinds that need it.
    pub victim: Option<PlayerId>,

    /// Card taken from the victim, or the card they defended with.
    pub helper: Option<CardInstanceId>,

    /// `true` when the attack lands.
    pub outcome: bool,

    /// Players revealed by the attack (Tree).
    pub revealed: Vec<PlayerId>,
}

impl AttackContext {
    /// Arm the context for a new attack.
    pub fn arm(
        &mut self,
        sequence: u64,
        kind: AttackKind,
        card: CardInstanceId,
        attacker: Option<PlayerId>,
        victim: Option<PlayerId>,
    ) {
        *self = Self {
            sequence,
            kind: Some(kind),
            card: Some(card),
            attacker,
            victim,
            ..Self::default()
        };
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Is an attack loaded?
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.kind.is_some() && self.card.is_some()
    }

    /// Is `player` the attacker or the victim?
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.attacker == Some(player) || self.victim == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_reset() {
        let mut ctx = AttackContext::default();
        assert!(!ctx.is_armed());

        ctx.helper = Some(CardInstanceId::new(99));
        ctx.arm(4, AttackKind::Steal, CardInstanceId::new(3), Some(PlayerId::new(0)), None);

        assert!(ctx.is_armed());
        assert_eq!(ctx.sequence, 4);
        assert_eq!(ctx.helper, None, "arming clears leftovers");
        assert!(!ctx.outcome);

        ctx.reset();
        assert_eq!(ctx, AttackContext::default());
    }

    #[test]
    fn test_involves() {
        let mut ctx = AttackContext::default();
        ctx.arm(
            1,
            AttackKind::Rock,
            CardInstanceId::new(1),
            Some(PlayerId::new(0)),
            Some(PlayerId::new(2)),
        );

        assert!(ctx.involves(PlayerId::new(0)));
        assert!(ctx.involves(PlayerId::new(2)));
        assert!(!ctx.involves(PlayerId::new(1)));
    }
}
