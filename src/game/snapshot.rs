//! Read-only views of a game.

use serde::{Deserialize, Serialize};

use super::result::GameResult;
use crate::attack::{AttackState, PendingReply};
use crate::core::PlayerId;
use crate::messages::Notification;

/// Public view of one seat. Hands are hidden; only their size shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub image: String,
    pub active: bool,
    pub score: i64,
    pub hand_size: usize,
}

/// Point-in-time copy of the game.
///
/// The narrative is an `im::Vector`, so taking a snapshot shares structure
/// with the game's own log instead of copying it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerView>,
    pub current_player: PlayerId,
    /// Active seats after the current one, in turn order.
    pub upcoming: Vec<PlayerId>,
    pub deck_size: usize,
    pub used_size: usize,
    pub attack_state: AttackState,
    pub pending: Option<PendingReply>,
    pub result: Option<GameResult>,
    pub narrative: im::Vector<Notification>,
}

impl GameSnapshot {
    /// Narrative entries `player` was meant to see.
    pub fn narrative_for(&self, player: PlayerId) -> impl Iterator<Item = &Notification> {
        self.narrative
            .iter()
            .filter(move |n| n.recipients.includes(player))
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == player)
    }
}
