//! Circular, skip-aware turn rotation.
//!
//! The ring is built once, in join order, and never shrinks: eliminated
//! players are only marked inactive and skipped. Nodes live in a `Vec` and
//! link to the next seat by index, which gives the ring without shared
//! ownership.
//!
//! ```
//! use wildtrail::core::PlayerId;
//! use wildtrail::turns::TurnScheduler;
//!
//! let mut turns = TurnScheduler::new(PlayerId::all(3));
//! assert_eq!(turns.current_player(), PlayerId::new(0));
//!
//! turns.mark_inactive(PlayerId::new(1));
//! assert_eq!(turns.advance(), PlayerId::new(2));
//!
//! turns.block_next();
//! assert_eq!(turns.advance(), PlayerId::new(2)); // seat 0 skipped, seat 2 again
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One seat in the ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnNode {
    pub player: PlayerId,
    pub active: bool,
    next: usize,
}

/// Turn rotation over all seats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnScheduler {
    nodes: Vec<TurnNode>,
    current: usize,
    blocked: bool,
}

impl TurnScheduler {
    /// Build the ring in the given order. The first player starts.
    ///
    /// Panics on an empty player list.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        let players: Vec<PlayerId> = players.into_iter().collect();
        assert!(!players.is_empty(), "Turn ring needs at least 1 player");

        let len = players.len();
        let nodes = players
            .into_iter()
            .enumerate()
            .map(|(i, player)| TurnNode {
                player,
                active: true,
                next: (i + 1) % len,
            })
            .collect();

        Self {
            nodes,
            current: 0,
            blocked: false,
        }
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.nodes[self.current].player
    }

    /// Move to the next active seat.
    ///
    /// With the blocked flag set, one additional active seat is skipped and
    /// the flag is cleared. With a single active seat left, that seat is
    /// returned. Never loops more than once around the ring.
    pub fn advance(&mut self) -> PlayerId {
        match self.next_active(self.current) {
            Some(next) => self.current = next,
            None => {
                warn!("turns: advance with no active seat, staying on {}", self.current_player());
                return self.current_player();
            }
        }

        if self.blocked {
            self.blocked = false;
            if let Some(next) = self.next_active(self.current) {
                debug!("turns: {} is blocked and loses their turn", self.current_player());
                self.current = next;
            }
        }

        debug!("turns: {} to play", self.current_player());
        self.current_player()
    }

    /// Make the next `advance` skip one extra active seat.
    pub fn block_next(&mut self) {
        self.blocked = true;
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Flip a seat to inactive. Returns `false` for unknown or already
    /// inactive seats.
    ///
    /// The current pointer is left alone; callers eliminating the current
    /// player follow up with `advance`.
    pub fn mark_inactive(&mut self, player: PlayerId) -> bool {
        match self.nodes.iter_mut().find(|n| n.player == player) {
            Some(node) if node.active => {
                node.active = false;
                true
            }
            _ => false,
        }
    }

    /// Is this seat still in the rotation?
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.nodes.iter().any(|n| n.player == player && n.active)
    }

    /// Number of active seats.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.active).count()
    }

    /// Active seats in turn order, starting after the current one.
    #[must_use]
    pub fn upcoming(&self) -> Vec<PlayerId> {
        let mut out = Vec::new();
        let mut idx = self.nodes[self.current].next;
        for _ in 0..self.nodes.len() {
            if self.nodes[idx].active {
                out.push(self.nodes[idx].player);
            }
            idx = self.nodes[idx].next;
        }
        out
    }

    fn next_active(&self, from: usize) -> Option<usize> {
        let mut idx = self.nodes[from].next;
        for _ in 0..self.nodes.len() {
            if self.nodes[idx].active {
                return Some(idx);
            }
            idx = self.nodes[idx].next;
        }
        None
    }
}
