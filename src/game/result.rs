//! How a game ended.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Only one player (or none) is still active.
    LastStanding,
    /// Someone played both map halves.
    MapAssembled,
    /// The deck ran out; highest score takes it.
    DeckExhausted,
}

/// Game result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner { player: PlayerId, reason: EndReason },
    /// Draw (tied top score, or nobody left).
    Draw { reason: EndReason },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner { player: p, .. } if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner { player, .. } => Some(*player),
            GameResult::Draw { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> EndReason {
        match self {
            GameResult::Winner { reason, .. } | GameResult::Draw { reason } => *reason,
        }
    }

    /// Pick the winner by score. A tie at the top is a draw.
    pub fn by_score(scores: impl IntoIterator<Item = (PlayerId, i64)>) -> Self {
        let mut best: Option<(PlayerId, i64)> = None;
        let mut tied = false;

        for (player, score) in scores {
            match best {
                Some((_, top)) if score < top => {}
                Some((_, top)) if score == top => tied = true,
                _ => {
                    best = Some((player, score));
                    tied = false;
                }
            }
        }

        let reason = EndReason::DeckExhausted;
        match best {
            Some((player, _)) if !tied => GameResult::Winner { player, reason },
            _ => GameResult::Draw { reason },
        }
    }
}
