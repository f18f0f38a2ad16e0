//! Error taxonomy for the game core.
//!
//! Most variants describe a client message that cannot be honoured in the
//! current state (wrong turn, stale reply, card not held). Those leave the
//! game untouched and the caller is free to drop them. Only the fatal
//! variants mean the attack context points at something the registry no
//! longer knows about; the attack in progress is aborted when one of those
//! surfaces.

use thiserror::Error;

use crate::attack::AttackState;
use crate::cards::CardInstanceId;
use crate::core::PlayerId;

/// Errors returned by game and attack entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested step does not apply to the machine's current state.
    #[error("cannot {action} while the attack machine is in {state}")]
    IllegalTransition {
        action: &'static str,
        state: AttackState,
    },

    /// Someone other than the current player tried to act.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// Turn actions are locked while an attack resolves.
    #[error("an attack is already in progress")]
    AttackInProgress,

    /// Client referenced a seat that does not exist.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// Player has been eliminated or left.
    #[error("{0} is no longer in the game")]
    InactivePlayer(PlayerId),

    /// Card is not in the player's hand.
    #[error("{player} does not hold {card}")]
    CardNotInHand {
        player: PlayerId,
        card: CardInstanceId,
    },

    /// Card cannot start an attack on its own.
    #[error("{0} cannot start an attack")]
    NotAnAttackCard(CardInstanceId),

    /// The two cards do not form a couple.
    #[error("{0} and {1} do not form a couple")]
    NotACouple(CardInstanceId, CardInstanceId),

    /// Victim choice is not allowed (self, inactive).
    #[error("{0} cannot be chosen as victim")]
    InvalidVictim(PlayerId),

    /// A reply came from a seat the attack is not waiting on.
    #[error("no reply is expected from {0}")]
    UnexpectedReply(PlayerId),

    /// The game has already ended.
    #[error("the game is over")]
    GameOver,

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Attack context references a seat the registry does not have.
    #[error("attack context references missing player {0}")]
    MissingPlayer(PlayerId),

    /// Attack context references a card the registry does not have.
    #[error("attack context references missing card {0}")]
    MissingCard(CardInstanceId),
}

impl EngineError {
    /// Does this error corrupt the attack in progress?
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingPlayer(_) | Self::MissingCard(_))
    }
}
