//! Async front for one game.
//!
//! `GameServer` is the piece connection handlers talk to. It serializes
//! every command through one `tokio::sync::Mutex` around the `Game`, so a
//! defense reply racing a timeout can never interleave with it: whichever
//! takes the lock first runs to completion, and the other finds the
//! machine no longer waiting on it.
//!
//! Notifications are published on a `broadcast` channel while the lock is
//! still held, so subscribers see them in exactly the order the game
//! produced them. Each subscriber filters by `Recipients` for its seat.
//!
//! Whenever a command leaves the attack suspended, a timer task is spawned
//! for that suspension. When it fires it calls `Game::expire_pending` with
//! the reply it was armed for, which is a no-op if the reply already came.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{broadcast, Mutex};

use crate::attack::{AttackProgress, Awaiting, PendingReply};
use crate::cards::CardInstanceId;
use crate::core::PlayerId;
use crate::error::EngineError;
use crate::game::{CoupleOutcome, DrawOutcome, Game, GameSnapshot};
use crate::messages::Notification;

struct Session {
    game: Game,
    /// Last suspension a timer was spawned for.
    armed: Option<PendingReply>,
}

/// Shared handle to a running game.
#[derive(Clone)]
pub struct GameServer {
    session: Arc<Mutex<Session>>,
    events: broadcast::Sender<Notification>,
}

impl GameServer {
    /// Wrap a game. Notifications produced while setting it up are
    /// published to the first subscribers as soon as a command runs.
    #[must_use]
    pub fn new(game: Game) -> Self {
        let (events, _) = broadcast::channel(game.config().channel_capacity);
        Self {
            session: Arc::new(Mutex::new(Session { game, armed: None })),
            events,
        }
    }

    /// Receive every notification from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }

    // === Commands ===

    pub async fn play_card(&self, player: PlayerId, card: CardInstanceId) -> Result<AttackProgress, EngineError> {
        self.run(|game| game.play_card(player, card)).await
    }

    pub async fn play_couple(
        &self,
        player: PlayerId,
        first: CardInstanceId,
        second: CardInstanceId,
    ) -> Result<CoupleOutcome, EngineError> {
        self.run(|game| game.play_couple(player, first, second)).await
    }

    pub async fn draw(&self, player: PlayerId) -> Result<DrawOutcome, EngineError> {
        self.run(|game| game.draw(player)).await
    }

    pub async fn choose_victim(&self, chooser: PlayerId, victim: PlayerId) -> Result<AttackProgress, EngineError> {
        self.run(|game| game.choose_victim(chooser, victim)).await
    }

    pub async fn defend(&self, victim: PlayerId, card: CardInstanceId) -> Result<AttackProgress, EngineError> {
        self.run(|game| game.player_defends(card, victim)).await
    }

    pub async fn decline_defense(&self, victim: PlayerId) -> Result<AttackProgress, EngineError> {
        self.run(|game| game.decline_defense(victim)).await
    }

    pub async fn leave(&self, player: PlayerId) -> Result<(), EngineError> {
        self.run(|game| game.leave(player)).await
    }

    /// Flush anything the game produced outside a command, such as the
    /// opening announcements.
    pub async fn publish_pending(&self) {
        self.run(|_| Ok::<(), EngineError>(())).await.ok();
    }

    // === Queries ===

    pub async fn snapshot(&self) -> GameSnapshot {
        self.session.lock().await.game.snapshot()
    }

    /// Read access to the game under the lock.
    pub async fn inspect<T>(&self, f: impl FnOnce(&Game) -> T) -> T {
        f(&self.session.lock().await.game)
    }

    // === Internals ===

    async fn run<T>(&self, command: impl FnOnce(&mut Game) -> Result<T, EngineError>) -> Result<T, EngineError> {
        let mut session = self.session.lock().await;
        let result = command(&mut session.game);
        if let Err(err) = &result {
            debug!("server: command rejected: {}", err);
        }
        self.publish(&mut session);
        self.arm_timer(&mut session);
        result
    }

    async fn expire(&self, reply: PendingReply) {
        let mut session = self.session.lock().await;
        match session.game.expire_pending(reply) {
            Ok(Some(progress)) => debug!("server: attack #{} timed out: {:?}", reply.sequence, progress),
            Ok(None) => {}
            Err(err) => warn!("server: timeout for attack #{} failed: {}", reply.sequence, err),
        }
        self.publish(&mut session);
        self.arm_timer(&mut session);
    }

    fn publish(&self, session: &mut Session) {
        for notification in session.game.drain_notifications() {
            if self.events.send(notification).is_err() {
                debug!("server: no subscribers for notification");
            }
        }
    }

    fn arm_timer(&self, session: &mut Session) {
        let Some(reply) = session.game.pending() else {
            session.armed = None;
            return;
        };
        if session.armed == Some(reply) {
            return;
        }
        session.armed = Some(reply);

        let config = session.game.config();
        let timeout = match reply.awaiting {
            Awaiting::Victim => config.pre_attack_timeout(),
            Awaiting::Defense => config.defense_timeout(),
        };
        debug!(
            "server: attack #{} waits {:?} for {:?}",
            reply.sequence, timeout, reply.awaiting
        );

        let server = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            server.expire(reply).await;
        });
    }
}
