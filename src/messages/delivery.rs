//! Addressed notifications, ready for the transport.

use serde::{Deserialize, Serialize};

use super::render::AttackMessage;
use crate::core::PlayerId;

/// Concrete recipients of a notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipients {
    One(PlayerId),
    Many(Vec<PlayerId>),
    Broadcast,
}

impl Recipients {
    /// Would `player` receive this?
    #[must_use]
    pub fn includes(&self, player: PlayerId) -> bool {
        match self {
            Recipients::One(p) => *p == player,
            Recipients::Many(ps) => ps.contains(&player),
            Recipients::Broadcast => true,
        }
    }
}

/// A message plus where it goes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Sequence number of the attack that produced it, `None` for
    /// game-level announcements.
    pub attack: Option<u64>,
    pub recipients: Recipients,
    pub message: AttackMessage,
}
