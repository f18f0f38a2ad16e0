//! A running game: turn flow around the attack engine.
//!
//! `Game` owns the table, the turn ring, the attack machine and the
//! notification log. Every entry point takes `&mut self`, so the game is a
//! single writer by construction; the async server serializes callers with
//! one mutex around it.
//!
//! ## Turn flow
//!
//! On their turn a player may play attack cards and couples any number of
//! times, then draws, which ends the turn. Nothing except replies to the
//! attack in progress is accepted while an attack is active.
//!
//! ## Notifications
//!
//! Messages are appended to an outbox in the order the machine produced
//! them, then moved to the narrative and the delivery queue when the entry
//! point returns. `drain_notifications` hands the delivery queue to the
//! transport.

use log::{debug, info, warn};

use super::result::{EndReason, GameResult};
use super::snapshot::{GameSnapshot, PlayerView};
use super::table::{Player, Seat, Table};
use crate::attack::{AttackMachine, AttackOrchestrator, AttackProgress, AttackState, Awaiting, PendingReply};
use crate::cards::{pair, AttackKind, CardCatalog, CardInstanceId, CoupleEffect};
use crate::core::{GameConfig, GameRng, PlayerId};
use crate::error::EngineError;
use crate::messages::{AttackMessage, Notification, Recipients, TemplateBook};
use crate::turns::TurnScheduler;

/// What drawing did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Card went to hand; the turn passed.
    Drew(CardInstanceId),
    /// A disaster struck the drawer. The turn passes once it resolves.
    Disaster {
        card: CardInstanceId,
        progress: AttackProgress,
    },
    /// Nothing left to draw; the game is over.
    DeckExhausted,
}

/// What playing a couple did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoupleOutcome {
    /// Identical forage cards started a Steal.
    Attack(AttackProgress),
    /// Both map halves: the player won.
    Won,
    /// Campfire: every active player gained the bonus.
    Campfire,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    templates: TemplateBook,
    table: Table,
    turns: TurnScheduler,
    attack: AttackMachine,
    /// Scratch buffer the orchestrator writes into.
    outbox: Vec<Notification>,
    deliveries: Vec<Notification>,
    narrative: im::Vector<Notification>,
    result: Option<GameResult>,
    /// A disaster hit the drawer; advance once the attack is over.
    turn_ends_after_attack: bool,
}

impl Game {
    /// Seat players, build the deck and deal.
    pub fn new(config: GameConfig, catalog: &impl CardCatalog, seats: Vec<Seat>) -> Result<Self, EngineError> {
        config.validate(seats.len())?;

        let mut table = Table::new(seats, GameRng::new(config.seed));
        table.build_deck(&catalog.entries());
        table.deal(config.starting_hand_size)?;
        let turns = TurnScheduler::new(table.player_ids());

        info!(
            "game: {} players, seed {}, {} cards left in deck",
            table.player_count(),
            config.seed,
            table.deck_len()
        );

        let mut game = Self {
            config,
            templates: catalog.templates(),
            table,
            turns,
            attack: AttackMachine::new(),
            outbox: Vec::new(),
            deliveries: Vec::new(),
            narrative: im::Vector::new(),
            result: None,
            turn_ends_after_attack: false,
        };
        game.announce_turn();
        game.flush();
        Ok(game)
    }

    // === Turn actions ===

    /// Play an attack card from hand.
    pub fn play_card(&mut self, player: PlayerId, card: CardInstanceId) -> Result<AttackProgress, EngineError> {
        self.ensure_turn(player)?;
        self.ensure_held(player, card)?;
        if !self.table.card(card)?.kind.is_playable_attack() {
            return Err(EngineError::NotAnAttackCard(card));
        }

        self.table.play(player, card)?;
        info!("game: {} plays {}", player, card);
        self.start_attack(card, player)
    }

    /// Play two cards together.
    pub fn play_couple(
        &mut self,
        player: PlayerId,
        first: CardInstanceId,
        second: CardInstanceId,
    ) -> Result<CoupleOutcome, EngineError> {
        self.ensure_turn(player)?;
        if first == second {
            return Err(EngineError::NotACouple(first, second));
        }
        self.ensure_held(player, first)?;
        self.ensure_held(player, second)?;

        let effect = pair(self.table.card(first)?.kind, self.table.card(second)?.kind)
            .ok_or(EngineError::NotACouple(first, second))?;
        let name = self.table.player(player)?.name.clone();
        info!("game: {} plays a couple ({:?})", player, effect);

        // The couple is spent only once its effect has started.
        let outcome = match effect {
            CoupleEffect::StealAttack => {
                let mut hooks =
                    AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
                let result = self
                    .attack
                    .start(AttackKind::Steal, first, Some(player), None, &mut hooks);
                let progress = self.settle(result)?;
                self.spend(player, first, second)?;
                CoupleOutcome::Attack(progress)
            }
            CoupleEffect::Win => {
                self.spend(player, first, second)?;
                self.broadcast(AttackMessage::banner(format!("{} put the map together", name)));
                self.conclude(GameResult::Winner {
                    player,
                    reason: EndReason::MapAssembled,
                });
                CoupleOutcome::Won
            }
            CoupleEffect::Campfire => {
                self.spend(player, first, second)?;
                let bonus = self.config.campfire_bonus;
                let warmed: Vec<PlayerId> = self.table.active_players().map(|p| p.id).collect();
                for seat in warmed {
                    self.table.adjust_score(seat, bonus)?;
                }
                self.broadcast(AttackMessage::banner(format!(
                    "{} lit a campfire: everyone gains {} points",
                    name, bonus
                )));
                CoupleOutcome::Campfire
            }
        };

        self.flush();
        Ok(outcome)
    }

    /// Draw a card, ending the turn.
    pub fn draw(&mut self, player: PlayerId) -> Result<DrawOutcome, EngineError> {
        self.ensure_turn(player)?;

        let Some(card) = self.table.draw() else {
            self.conclude_by_score();
            self.flush();
            return Ok(DrawOutcome::DeckExhausted);
        };

        let drawn = self.table.card(card)?;
        if let Some(kind) = drawn.kind.as_attacker().filter(|k| !k.has_attacker()) {
            info!("game: {} drew {}", player, kind);
            self.table.discard(card)?;
            self.turn_ends_after_attack = true;

            let mut hooks =
                AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
            let result = self.attack.start(kind, card, None, Some(player), &mut hooks);
            let progress = self.settle(result)?;
            return Ok(DrawOutcome::Disaster { card, progress });
        }

        let name = drawn.name.clone();
        self.table.give(player, card)?;
        debug!("game: {} drew {}", player, card);
        self.notify(Recipients::One(player), AttackMessage::popup("Draw", format!("You drew {}", name)));

        self.check_game_over();
        if self.result.is_none() {
            self.end_turn();
        }
        self.flush();
        Ok(DrawOutcome::Drew(card))
    }

    /// A player disconnected or quit.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let seat = self.seat(player)?;
        if !seat.active {
            return Err(EngineError::InactivePlayer(player));
        }
        let name = seat.name.clone();
        info!("game: {} left", player);

        let involved = self.attack.context().involves(player);
        if let Some(pending) = self.attack.pending().filter(|_| involved) {
            let mut hooks =
                AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
            let result = if pending.awaiting == Awaiting::Defense && pending.from == Some(player) {
                self.attack.decline(&mut hooks)
            } else {
                self.attack.abandon(&mut hooks)
            };
            self.settle(result)?;
        }

        if self.table.player(player)?.active {
            self.table.eliminate(player)?;
            self.turns.mark_inactive(player);
        }
        self.broadcast(AttackMessage::banner(format!("{} left the game", name)));

        self.check_game_over();
        if self.result.is_none() && self.turns.current_player() == player && !self.attack.is_active() {
            self.turn_ends_after_attack = false;
            self.end_turn();
        }
        self.flush();
        Ok(())
    }

    // === Attack entry points ===

    /// Start an attack with `card`, already out of the attacker's hand.
    pub fn start_attack(&mut self, card: CardInstanceId, attacker: PlayerId) -> Result<AttackProgress, EngineError> {
        self.ensure_running()?;
        self.ensure_idle()?;
        let kind = self
            .table
            .card(card)?
            .kind
            .as_attacker()
            .filter(|k| k.has_attacker())
            .ok_or(EngineError::NotAnAttackCard(card))?;
        self.ensure_active(attacker)?;

        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        let result = self.attack.start(kind, card, Some(attacker), None, &mut hooks);
        self.settle(result)
    }

    /// Start an attack that has no attacker (disasters) against `victim`.
    pub fn start_attack_on_victim(
        &mut self,
        card: CardInstanceId,
        victim: PlayerId,
    ) -> Result<AttackProgress, EngineError> {
        self.ensure_running()?;
        self.ensure_idle()?;
        let kind = self
            .table
            .card(card)?
            .kind
            .as_attacker()
            .filter(|k| !k.has_attacker())
            .ok_or(EngineError::NotAnAttackCard(card))?;
        self.ensure_active(victim)?;

        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        let result = self.attack.start(kind, card, None, Some(victim), &mut hooks);
        self.settle(result)
    }

    /// The attacker's victim choice.
    pub fn resolve_victim_choice(&mut self, victim: PlayerId) -> Result<AttackProgress, EngineError> {
        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        let result = self.attack.resolve_victim(victim, &mut hooks);
        self.settle(result)
    }

    /// Victim choice from a client, checked against the seat that sent it.
    pub fn choose_victim(&mut self, chooser: PlayerId, victim: PlayerId) -> Result<AttackProgress, EngineError> {
        self.ensure_awaited(chooser, Awaiting::Victim)?;
        self.resolve_victim_choice(victim)
    }

    /// The victim plays `defense_card`.
    pub fn player_defends(
        &mut self,
        defense_card: CardInstanceId,
        victim: PlayerId,
    ) -> Result<AttackProgress, EngineError> {
        self.ensure_awaited(victim, Awaiting::Defense)?;
        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        let result = self.attack.defend(defense_card, &mut hooks);
        self.settle(result)
    }

    /// The victim passes on defending.
    pub fn decline_defense(&mut self, victim: PlayerId) -> Result<AttackProgress, EngineError> {
        self.ensure_awaited(victim, Awaiting::Defense)?;
        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        let result = self.attack.decline(&mut hooks);
        self.settle(result)
    }

    /// A reply deadline passed. `Ok(None)` when `reply` is stale.
    pub fn expire_pending(&mut self, reply: PendingReply) -> Result<Option<AttackProgress>, EngineError> {
        let mut hooks = AttackOrchestrator::new(&mut self.table, &mut self.turns, &self.templates, &mut self.outbox);
        match self.attack.expire(reply, &mut hooks) {
            Ok(None) => Ok(None),
            Ok(Some(progress)) => self.settle(Ok(progress)).map(Some),
            Err(err) => self.settle(Err(err)).map(Some),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn is_attack_active(&self) -> bool {
        self.attack.is_active()
    }

    #[must_use]
    pub fn current_attacker(&self) -> Option<&Player> {
        self.attack
            .context()
            .attacker
            .and_then(|p| self.table.player(p).ok())
    }

    #[must_use]
    pub fn current_victim(&self) -> Option<&Player> {
        self.attack
            .context()
            .victim
            .and_then(|p| self.table.player(p).ok())
    }

    #[must_use]
    pub fn attack_state(&self) -> AttackState {
        self.attack.state()
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingReply> {
        self.attack.pending()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turns.current_player()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn turns(&self) -> &TurnScheduler {
        &self.turns
    }

    /// Every notification produced so far, in order.
    #[must_use]
    pub fn narrative(&self) -> &im::Vector<Notification> {
        &self.narrative
    }

    /// Notifications not yet handed to the transport.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.deliveries)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self
                .table
                .players()
                .map(|p| PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    image: p.image.clone(),
                    active: p.active,
                    score: p.score,
                    hand_size: p.hand().len(),
                })
                .collect(),
            current_player: self.turns.current_player(),
            upcoming: self.turns.upcoming(),
            deck_size: self.table.deck_len(),
            used_size: self.table.used_pile().len(),
            attack_state: self.attack.state(),
            pending: self.attack.pending(),
            result: self.result.clone(),
            narrative: self.narrative.clone(),
        }
    }

    /// Mutable table access for test setup.
    #[doc(hidden)]
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    // === Internals ===

    /// Post-process a machine call: flush messages and, once the machine is
    /// idle, run the end-of-attack checks.
    fn settle(&mut self, result: Result<AttackProgress, EngineError>) -> Result<AttackProgress, EngineError> {
        if !self.attack.is_active() {
            self.after_attack();
        }
        self.flush();
        result
    }

    fn after_attack(&mut self) {
        self.check_game_over();
        if self.turn_ends_after_attack {
            self.turn_ends_after_attack = false;
            if self.result.is_none() {
                self.end_turn();
            }
        }
    }

    fn end_turn(&mut self) {
        self.turns.advance();
        self.announce_turn();
    }

    fn announce_turn(&mut self) {
        let current = self.turns.current_player();
        if let Ok(player) = self.table.player(current) {
            let text = format!("It is {}'s turn", player.name);
            self.broadcast(AttackMessage::banner(text));
        }
    }

    fn check_game_over(&mut self) {
        if self.result.is_some() || self.attack.is_active() {
            return;
        }

        let (first, second) = {
            let mut active = self.table.active_players().map(|p| p.id);
            (active.next(), active.next())
        };
        match (first, second) {
            (Some(player), None) => self.conclude(GameResult::Winner {
                player,
                reason: EndReason::LastStanding,
            }),
            (None, _) => self.conclude(GameResult::Draw {
                reason: EndReason::LastStanding,
            }),
            _ if self.table.deck_len() == 0 => self.conclude_by_score(),
            _ => {}
        }
    }

    fn conclude_by_score(&mut self) {
        let scores: Vec<(PlayerId, i64)> = self.table.active_players().map(|p| (p.id, p.score)).collect();
        self.conclude(GameResult::by_score(scores));
    }

    fn conclude(&mut self, result: GameResult) {
        if self.result.is_some() {
            return;
        }
        if self.attack.is_active() {
            warn!("game: ending with attack #{} unresolved", self.attack.context().sequence);
            self.attack.abort();
        }

        let text = match result.winner().and_then(|p| self.table.player(p).ok()) {
            Some(winner) => format!("{} wins!", winner.name),
            None => "The game ends in a draw".to_string(),
        };
        info!("game: over ({:?})", result);
        self.broadcast(AttackMessage::popup("Game over", text));
        self.result = Some(result);
    }

    fn spend(&mut self, player: PlayerId, first: CardInstanceId, second: CardInstanceId) -> Result<(), EngineError> {
        self.table.play(player, first)?;
        self.table.play(player, second)
    }

    fn broadcast(&mut self, message: AttackMessage) {
        self.notify(Recipients::Broadcast, message);
    }

    fn notify(&mut self, recipients: Recipients, message: AttackMessage) {
        self.outbox.push(Notification {
            attack: None,
            recipients,
            message,
        });
    }

    fn flush(&mut self) {
        for notification in self.outbox.drain(..) {
            self.narrative.push_back(notification.clone());
            self.deliveries.push(notification);
        }
    }

    fn seat(&self, player: PlayerId) -> Result<&Player, EngineError> {
        self.table
            .player(player)
            .map_err(|_| EngineError::UnknownPlayer(player))
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        match self.result {
            Some(_) => Err(EngineError::GameOver),
            None => Ok(()),
        }
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.attack.is_active() {
            warn!("game: rejected turn action during attack #{}", self.attack.context().sequence);
            return Err(EngineError::AttackInProgress);
        }
        Ok(())
    }

    fn ensure_active(&self, player: PlayerId) -> Result<(), EngineError> {
        if !self.seat(player)?.active {
            return Err(EngineError::InactivePlayer(player));
        }
        Ok(())
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), EngineError> {
        self.ensure_running()?;
        self.ensure_active(player)?;
        self.ensure_idle()?;
        if self.turns.current_player() != player {
            warn!("game: {} acted out of turn", player);
            return Err(EngineError::NotYourTurn(player));
        }
        Ok(())
    }

    fn ensure_held(&self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        if !self.seat(player)?.holds(card) {
            return Err(EngineError::CardNotInHand { player, card });
        }
        Ok(())
    }

    fn ensure_awaited(&self, player: PlayerId, awaiting: Awaiting) -> Result<(), EngineError> {
        match self.attack.pending() {
            Some(reply) if reply.awaiting == awaiting && reply.from == Some(player) => Ok(()),
            Some(_) => {
                warn!("game: unexpected reply from {}", player);
                Err(EngineError::UnexpectedReply(player))
            }
            None => Err(EngineError::IllegalTransition {
                action: match awaiting {
                    Awaiting::Victim => "resolve a victim",
                    Awaiting::Defense => "defend",
                },
                state: self.attack.state(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::StandardCatalog;

    fn game(players: usize) -> Game {
        let seats = ["Ann", "Bo", "Cy", "Di"]
            .iter()
            .take(players)
            .map(|n| Seat::new(*n))
            .collect();
        Game::new(GameConfig::new(11), &StandardCatalog::new(), seats).unwrap()
    }

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_new_deals_and_announces_first_turn() {
        let mut g = game(3);
        for player in g.table().players() {
            assert_eq!(player.hand().len(), 5);
        }
        assert_eq!(g.current_player(), p(0));

        let sent = g.drain_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message.text, "It is Ann's turn");
        assert!(g.drain_notifications().is_empty());
        assert_eq!(g.narrative().len(), 1);
    }

    #[test]
    fn test_out_of_turn_actions_rejected() {
        let mut g = game(2);
        assert_eq!(g.draw(p(1)).unwrap_err(), EngineError::NotYourTurn(p(1)));
        assert_eq!(g.draw(p(7)).unwrap_err(), EngineError::UnknownPlayer(p(7)));
        assert_eq!(g.current_player(), p(0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let seats = vec![Seat::new("Solo")];
        let err = Game::new(GameConfig::default(), &StandardCatalog::new(), seats).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_reply_checks() {
        let mut g = game(2);
        let err = g.decline_defense(p(1)).unwrap_err();
        assert!(matches!(err, EngineError::IllegalTransition { state: AttackState::NoAttack, .. }));
    }

    #[test]
    fn test_game_over_blocks_turn_actions() {
        let mut g = game(2);
        g.leave(p(1)).unwrap();

        assert!(g.result().unwrap().is_winner(p(0)));
        assert_eq!(g.draw(p(0)).unwrap_err(), EngineError::GameOver);
    }

    #[test]
    fn test_departures_leave_last_standing_winner() {
        let mut g = game(3);
        g.leave(p(2)).unwrap();
        assert!(g.result().is_none());
        g.leave(p(1)).unwrap();

        assert_eq!(
            g.result(),
            Some(&GameResult::Winner {
                player: p(0),
                reason: EndReason::LastStanding
            })
        );
    }
}
