//! The attack state machine.
//!
//! The machine owns the `AttackContext` and the current `AttackState` and
//! knows nothing about hands, decks or seats: everything that touches the
//! table goes through `AttackHooks`. Each call to `execute` runs exactly one
//! state's work and either moves to the next state or suspends; `drive`
//! repeats `execute` until the attack suspends or returns to `NoAttack`.
//!
//! ## Suspension
//!
//! Two replies can suspend the machine:
//!
//! - `PreAttack` waits for the attacker to name a victim
//! - `DoAttack` waits for the victim's defense, and only when the hooks say
//!   the victim holds a card that could answer the attack
//!
//! Both carry the attack's sequence number so a late timeout for an attack
//! that has already moved on is ignored.
//!
//! ## Errors
//!
//! Entry points called in the wrong state return `IllegalTransition`
//! without touching anything. Errors raised by hooks while the machine is
//! driving abort the attack: the context is cleared and the machine returns
//! to `NoAttack`.

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::context::AttackContext;
use super::state::AttackState;
use crate::cards::{AttackKind, CardInstanceId};
use crate::core::PlayerId;
use crate::error::EngineError;
use crate::messages::Stage;

/// Reply the machine is suspended on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Awaiting {
    /// Attacker must name a victim.
    Victim,
    /// Victim may play a defense card.
    Defense,
}

/// A suspended attack, as seen from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReply {
    pub sequence: u64,
    pub awaiting: Awaiting,
    /// Seat whose reply is expected.
    pub from: Option<PlayerId>,
}

/// Result of the attack effect hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectProgress {
    /// Outcome recorded in the context.
    Resolved,
    /// The victim can defend; wait for their reply.
    AwaitingDefense,
}

/// Where a drive left the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackProgress {
    /// Nothing to do.
    Idle,
    /// Suspended on a reply.
    Awaiting(Awaiting),
    /// The attack ran to completion and the machine is back in `NoAttack`.
    Resolved { kind: AttackKind, succeeded: bool },
    /// The attack was dropped before it resolved.
    Abandoned,
}

impl AttackProgress {
    /// Did the attack leave the machine?
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Abandoned)
    }
}

/// Outcome of a single `execute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Moved(AttackState),
    Suspended(Awaiting),
    Finished { kind: AttackKind, succeeded: bool },
    Idle,
}

/// Everything the machine needs from the game.
///
/// The machine calls these in a fixed order per attack:
///
/// 1. `announce(PreAttack)` when a victim is needed
/// 2. `announce(DoAttack)` then `perform`
/// 3. `announce(DefenseRequested)` if `perform` asked for a defense, then
///    one of `defend` / `undefended` once the reply arrives
/// 4. `succeed` or `fail`, then the matching announcement
///
/// `check_victim` and `defend` must validate before mutating: a non-fatal
/// error from either leaves the attack suspended where it was.
pub trait AttackHooks {
    /// Emit the messages for `stage`.
    fn announce(&mut self, stage: Stage, ctx: &AttackContext) -> Result<(), EngineError>;

    /// Is `victim` an acceptable target?
    fn check_victim(&self, ctx: &AttackContext, victim: PlayerId) -> Result<(), EngineError>;

    /// Run the attack effect.
    fn perform(&mut self, ctx: &mut AttackContext) -> Result<EffectProgress, EngineError>;

    /// The victim answered with `defense`. Record the outcome.
    fn defend(&mut self, ctx: &mut AttackContext, defense: CardInstanceId) -> Result<(), EngineError>;

    /// The victim declined, left or timed out. Record the outcome.
    fn undefended(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError>;

    /// Success effects.
    fn succeed(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError>;

    /// Failure effects.
    fn fail(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError>;
}

/// The attack state machine.
#[derive(Clone, Debug, Default)]
pub struct AttackMachine {
    state: AttackState,
    ctx: AttackContext,
    awaiting: Option<Awaiting>,
    effect_done: bool,
    last_sequence: u64,
}

impl AttackMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> AttackState {
        self.state
    }

    #[must_use]
    pub fn context(&self) -> &AttackContext {
        &self.ctx
    }

    /// Is an attack in progress?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != AttackState::NoAttack
    }

    /// The reply the machine is suspended on, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingReply> {
        let awaiting = self.awaiting?;
        let from = match awaiting {
            Awaiting::Victim => self.ctx.attacker,
            Awaiting::Defense => self.ctx.victim,
        };
        Some(PendingReply {
            sequence: self.ctx.sequence,
            awaiting,
            from,
        })
    }

    /// Sequence number of the most recently started attack.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    // === Entry points ===

    /// Arm a new attack and drive it.
    pub fn start<H: AttackHooks>(
        &mut self,
        kind: AttackKind,
        card: CardInstanceId,
        attacker: Option<PlayerId>,
        victim: Option<PlayerId>,
        hooks: &mut H,
    ) -> Result<AttackProgress, EngineError> {
        if self.is_active() || self.ctx.is_armed() {
            return Err(self.illegal("start an attack"));
        }

        self.last_sequence += 1;
        self.ctx.arm(self.last_sequence, kind, card, attacker, victim);
        self.effect_done = false;
        debug!("attack #{}: {} armed with {}", self.last_sequence, kind, card);

        self.drive(hooks)
    }

    /// The attacker named a victim.
    pub fn resolve_victim<H: AttackHooks>(
        &mut self,
        victim: PlayerId,
        hooks: &mut H,
    ) -> Result<AttackProgress, EngineError> {
        if self.awaiting != Some(Awaiting::Victim) {
            return Err(self.illegal("resolve a victim"));
        }
        let result = hooks.check_victim(&self.ctx, victim);
        self.guard(result)?;

        self.ctx.victim = Some(victim);
        self.drive(hooks)
    }

    /// The victim answered with a defense card.
    pub fn defend<H: AttackHooks>(
        &mut self,
        defense: CardInstanceId,
        hooks: &mut H,
    ) -> Result<AttackProgress, EngineError> {
        if self.awaiting != Some(Awaiting::Defense) {
            return Err(self.illegal("defend"));
        }
        let result = hooks.defend(&mut self.ctx, defense);
        self.guard(result)?;

        self.awaiting = None;
        self.effect_done = true;
        self.drive(hooks)
    }

    /// The victim passed on defending.
    pub fn decline<H: AttackHooks>(&mut self, hooks: &mut H) -> Result<AttackProgress, EngineError> {
        if self.awaiting != Some(Awaiting::Defense) {
            return Err(self.illegal("decline a defense"));
        }
        let result = hooks.undefended(&mut self.ctx);
        self.guard(result)?;

        self.awaiting = None;
        self.effect_done = true;
        self.drive(hooks)
    }

    /// Drop the attack in progress without resolving it.
    pub fn abandon<H: AttackHooks>(&mut self, hooks: &mut H) -> Result<AttackProgress, EngineError> {
        if !self.is_active() {
            return Err(self.illegal("abandon"));
        }

        debug!("attack #{}: abandoned in {}", self.ctx.sequence, self.state);
        if let Err(err) = hooks.announce(Stage::Abandoned, &self.ctx) {
            warn!("attack #{}: abandon announcement failed: {}", self.ctx.sequence, err);
        }
        self.abort();
        Ok(AttackProgress::Abandoned)
    }

    /// A reply deadline passed.
    ///
    /// `reply` is the suspension the deadline was armed for. Returns
    /// `Ok(None)` when the machine is no longer waiting on exactly that
    /// reply. A missed victim choice abandons the attack; a missed defense
    /// counts as declined.
    pub fn expire<H: AttackHooks>(
        &mut self,
        reply: PendingReply,
        hooks: &mut H,
    ) -> Result<Option<AttackProgress>, EngineError> {
        if self.pending() != Some(reply) {
            debug!("attack #{}: stale {:?} timeout ignored", reply.sequence, reply.awaiting);
            return Ok(None);
        }

        debug!("attack #{}: timed out waiting for {:?}", reply.sequence, reply.awaiting);
        let progress = match reply.awaiting {
            Awaiting::Victim => self.abandon(hooks)?,
            Awaiting::Defense => self.decline(hooks)?,
        };
        Ok(Some(progress))
    }

    /// Clear everything and return to `NoAttack` without running any hook.
    pub fn abort(&mut self) {
        self.state = AttackState::NoAttack;
        self.ctx.reset();
        self.awaiting = None;
        self.effect_done = false;
    }

    // === Stepping ===

    /// Run until the attack suspends or completes.
    pub fn drive<H: AttackHooks>(&mut self, hooks: &mut H) -> Result<AttackProgress, EngineError> {
        loop {
            match self.execute(hooks) {
                Ok(Step::Moved(_)) => continue,
                Ok(Step::Suspended(awaiting)) => return Ok(AttackProgress::Awaiting(awaiting)),
                Ok(Step::Finished { kind, succeeded }) => {
                    return Ok(AttackProgress::Resolved { kind, succeeded })
                }
                Ok(Step::Idle) => return Ok(AttackProgress::Idle),
                Err(err) => {
                    error!(
                        "attack #{}: {} while in {}, aborting",
                        self.ctx.sequence, err, self.state
                    );
                    self.abort();
                    return Err(err);
                }
            }
        }
    }

    /// Run the current state's work once.
    pub fn execute<H: AttackHooks>(&mut self, hooks: &mut H) -> Result<Step, EngineError> {
        match self.state {
            AttackState::NoAttack => {
                let Some(kind) = self.ctx.kind.filter(|_| self.ctx.is_armed()) else {
                    return Ok(Step::Idle);
                };
                if kind.needs_pre_attack() && self.ctx.victim.is_none() {
                    Ok(self.enter(AttackState::PreAttack))
                } else {
                    Ok(self.enter(AttackState::DoAttack))
                }
            }

            AttackState::PreAttack => {
                if self.ctx.victim.is_some() {
                    self.awaiting = None;
                    return Ok(self.enter(AttackState::DoAttack));
                }
                if self.awaiting.is_none() {
                    self.announce_entry(hooks)?;
                    self.awaiting = Some(Awaiting::Victim);
                }
                Ok(Step::Suspended(Awaiting::Victim))
            }

            AttackState::DoAttack => {
                if let Some(awaiting) = self.awaiting {
                    return Ok(Step::Suspended(awaiting));
                }
                if !self.effect_done {
                    self.announce_entry(hooks)?;
                    match hooks.perform(&mut self.ctx)? {
                        EffectProgress::Resolved => self.effect_done = true,
                        EffectProgress::AwaitingDefense => {
                            hooks.announce(Stage::DefenseRequested, &self.ctx)?;
                            self.awaiting = Some(Awaiting::Defense);
                            return Ok(Step::Suspended(Awaiting::Defense));
                        }
                    }
                }
                Ok(self.enter(AttackState::FinishAttack))
            }

            AttackState::FinishAttack => {
                let next = if self.ctx.outcome {
                    AttackState::AttackSucceeded
                } else {
                    AttackState::AttackFailed
                };
                Ok(self.enter(next))
            }

            AttackState::AttackSucceeded => {
                hooks.succeed(&mut self.ctx)?;
                self.announce_entry(hooks)?;
                Ok(self.finish(true))
            }

            AttackState::AttackFailed => {
                hooks.fail(&mut self.ctx)?;
                self.announce_entry(hooks)?;
                Ok(self.finish(false))
            }
        }
    }

    // === Internals ===

    /// Announce the state the machine is in, if it has a stage.
    fn announce_entry<H: AttackHooks>(&self, hooks: &mut H) -> Result<(), EngineError> {
        match Stage::entering(self.state) {
            Some(stage) => hooks.announce(stage, &self.ctx),
            None => Ok(()),
        }
    }

    fn enter(&mut self, next: AttackState) -> Step {
        debug!("attack #{}: {} -> {}", self.ctx.sequence, self.state, next);
        self.state = next;
        Step::Moved(next)
    }

    fn finish(&mut self, succeeded: bool) -> Step {
        let step = match self.ctx.kind {
            Some(kind) => Step::Finished { kind, succeeded },
            None => Step::Idle,
        };
        debug!(
            "attack #{}: {} -> {}",
            self.ctx.sequence,
            self.state,
            AttackState::NoAttack
        );
        self.abort();
        step
    }

    /// Pass non-fatal errors through untouched; abort on fatal ones.
    fn guard(&mut self, result: Result<(), EngineError>) -> Result<(), EngineError> {
        if let Err(err) = &result {
            if err.is_fatal() {
                error!("attack #{}: {}, aborting", self.ctx.sequence, err);
                self.abort();
            }
        }
        result
    }

    fn illegal(&self, action: &'static str) -> EngineError {
        warn!("attack: cannot {} in {}", action, self.state);
        EngineError::IllegalTransition {
            action,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hooks that record every call and follow a fixed script.
    #[derive(Default)]
    struct Script {
        log: Vec<String>,
        await_defense: bool,
        outcome: bool,
        fail_on_success: bool,
    }

    impl AttackHooks for Script {
        fn announce(&mut self, stage: Stage, _ctx: &AttackContext) -> Result<(), EngineError> {
            self.log.push(format!("announce {:?}", stage));
            Ok(())
        }

        fn check_victim(&self, ctx: &AttackContext, victim: PlayerId) -> Result<(), EngineError> {
            if ctx.attacker == Some(victim) {
                return Err(EngineError::InvalidVictim(victim));
            }
            Ok(())
        }

        fn perform(&mut self, ctx: &mut AttackContext) -> Result<EffectProgress, EngineError> {
            self.log.push("perform".into());
            if self.await_defense {
                return Ok(EffectProgress::AwaitingDefense);
            }
            ctx.outcome = self.outcome;
            Ok(EffectProgress::Resolved)
        }

        fn defend(&mut self, ctx: &mut AttackContext, defense: CardInstanceId) -> Result<(), EngineError> {
            self.log.push(format!("defend {}", defense));
            ctx.helper = Some(defense);
            ctx.outcome = false;
            Ok(())
        }

        fn undefended(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError> {
            self.log.push("undefended".into());
            ctx.outcome = true;
            Ok(())
        }

        fn succeed(&mut self, _ctx: &mut AttackContext) -> Result<(), EngineError> {
            self.log.push("succeed".into());
            if self.fail_on_success {
                return Err(EngineError::MissingPlayer(PlayerId::new(9)));
            }
            Ok(())
        }

        fn fail(&mut self, _ctx: &mut AttackContext) -> Result<(), EngineError> {
            self.log.push("fail".into());
            Ok(())
        }
    }

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    fn card(n: u32) -> CardInstanceId {
        CardInstanceId::new(n)
    }

    #[test]
    fn test_river_runs_straight_through() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            outcome: true,
            ..Script::default()
        };

        let progress = machine
            .start(AttackKind::River, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();

        assert_eq!(
            progress,
            AttackProgress::Resolved {
                kind: AttackKind::River,
                succeeded: true
            }
        );
        assert_eq!(machine.state(), AttackState::NoAttack);
        assert!(!machine.context().is_armed());
        assert_eq!(
            hooks.log,
            vec!["announce DoAttack", "perform", "succeed", "announce AttackSucceeded"]
        );
    }

    #[test]
    fn test_no_victim_kinds_never_wait_in_pre_attack() {
        for kind in [AttackKind::River, AttackKind::Tree] {
            let mut machine = AttackMachine::new();
            let mut hooks = Script::default();
            machine.start(kind, card(1), Some(p(0)), None, &mut hooks).unwrap();

            assert!(!hooks.log.iter().any(|l| l == "announce PreAttack"), "{}", kind);
        }
    }

    #[test]
    fn test_steal_waits_for_victim() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            outcome: true,
            ..Script::default()
        };

        let progress = machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        assert_eq!(progress, AttackProgress::Awaiting(Awaiting::Victim));
        assert_eq!(machine.state(), AttackState::PreAttack);
        assert_eq!(
            machine.pending(),
            Some(PendingReply {
                sequence: 1,
                awaiting: Awaiting::Victim,
                from: Some(p(0)),
            })
        );

        // Driving again while suspended neither re-announces nor moves.
        assert_eq!(
            machine.drive(&mut hooks).unwrap(),
            AttackProgress::Awaiting(Awaiting::Victim)
        );
        assert_eq!(hooks.log, vec!["announce PreAttack"]);

        let progress = machine.resolve_victim(p(1), &mut hooks).unwrap();
        assert!(progress.is_complete());
        assert_eq!(machine.state(), AttackState::NoAttack);
    }

    #[test]
    fn test_second_victim_choice_is_rejected() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            await_defense: true,
            ..Script::default()
        };

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        machine.resolve_victim(p(1), &mut hooks).unwrap();
        assert_eq!(machine.state(), AttackState::DoAttack);

        let err = machine.resolve_victim(p(2), &mut hooks).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalTransition {
                action: "resolve a victim",
                state: AttackState::DoAttack
            }
        );
        assert_eq!(machine.context().victim, Some(p(1)));
    }

    #[test]
    fn test_invalid_victim_keeps_waiting() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        machine
            .start(AttackKind::Rock, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        let err = machine.resolve_victim(p(0), &mut hooks).unwrap_err();

        assert_eq!(err, EngineError::InvalidVictim(p(0)));
        assert_eq!(machine.state(), AttackState::PreAttack);
        assert_eq!(machine.pending().map(|r| r.awaiting), Some(Awaiting::Victim));
    }

    #[test]
    fn test_resolve_victim_while_idle_is_illegal() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        let err = machine.resolve_victim(p(1), &mut hooks).unwrap_err();
        assert!(matches!(err, EngineError::IllegalTransition { state: AttackState::NoAttack, .. }));
        assert!(hooks.log.is_empty());
    }

    #[test]
    fn test_start_while_active_is_illegal() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        let before = machine.context().clone();

        let err = machine
            .start(AttackKind::River, card(2), Some(p(0)), None, &mut hooks)
            .unwrap_err();
        assert!(matches!(err, EngineError::IllegalTransition { .. }));
        assert_eq!(machine.context(), &before);
    }

    #[test]
    fn test_defended_attack_fails() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            await_defense: true,
            ..Script::default()
        };

        let progress = machine
            .start(
                AttackKind::Disaster(crate::cards::DisasterKind::Pit),
                card(5),
                None,
                Some(p(1)),
                &mut hooks,
            )
            .unwrap();
        assert_eq!(progress, AttackProgress::Awaiting(Awaiting::Defense));
        assert_eq!(machine.pending().and_then(|r| r.from), Some(p(1)));

        let progress = machine.defend(card(7), &mut hooks).unwrap();
        assert!(matches!(progress, AttackProgress::Resolved { succeeded: false, .. }));
        assert_eq!(
            hooks.log,
            vec![
                "announce DoAttack",
                "perform",
                "announce DefenseRequested",
                "defend Card#7",
                "fail",
                "announce AttackFailed",
            ]
        );
    }

    #[test]
    fn test_expire_defense_counts_as_declined() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            await_defense: true,
            ..Script::default()
        };

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), Some(p(1)), &mut hooks)
            .unwrap();
        let reply = machine.pending().unwrap();

        let progress = machine.expire(reply, &mut hooks).unwrap();
        assert!(matches!(progress, Some(AttackProgress::Resolved { succeeded: true, .. })));
        assert!(hooks.log.contains(&"undefended".to_string()));
    }

    #[test]
    fn test_expire_victim_choice_abandons() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        let reply = machine.pending().unwrap();

        assert_eq!(machine.expire(reply, &mut hooks).unwrap(), Some(AttackProgress::Abandoned));
        assert_eq!(machine.state(), AttackState::NoAttack);
        assert_eq!(hooks.log.last().map(String::as_str), Some("announce Abandoned"));
        assert!(!hooks.log.contains(&"perform".to_string()));
    }

    #[test]
    fn test_stale_timeout_is_ignored() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        let reply = machine.pending().unwrap();
        machine.resolve_victim(p(1), &mut hooks).unwrap();
        machine
            .start(AttackKind::Rock, card(2), Some(p(0)), None, &mut hooks)
            .unwrap();

        let log_len = hooks.log.len();
        assert_eq!(machine.expire(reply, &mut hooks).unwrap(), None);
        assert_eq!(machine.state(), AttackState::PreAttack);
        assert_eq!(hooks.log.len(), log_len);
        assert_eq!(machine.last_sequence(), reply.sequence + 1);
    }

    #[test]
    fn test_victim_timeout_does_not_expire_defense_wait() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            await_defense: true,
            ..Script::default()
        };

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        let victim_reply = machine.pending().unwrap();
        machine.resolve_victim(p(1), &mut hooks).unwrap();

        assert_eq!(machine.expire(victim_reply, &mut hooks).unwrap(), None);
        assert_eq!(machine.pending().map(|r| r.awaiting), Some(Awaiting::Defense));
        assert_eq!(machine.pending().map(|r| r.sequence), Some(victim_reply.sequence));
    }

    #[test]
    fn test_fatal_hook_error_resets_machine() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script {
            outcome: true,
            fail_on_success: true,
            ..Script::default()
        };

        let err = machine
            .start(AttackKind::River, card(1), Some(p(0)), None, &mut hooks)
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(machine.state(), AttackState::NoAttack);
        assert!(!machine.context().is_armed());
        assert!(machine.pending().is_none());
    }

    #[test]
    fn test_step_by_step() {
        let mut machine = AttackMachine::new();
        let mut hooks = Script::default();

        machine
            .start(AttackKind::Steal, card(1), Some(p(0)), None, &mut hooks)
            .unwrap();
        assert_eq!(machine.execute(&mut hooks).unwrap(), Step::Suspended(Awaiting::Victim));

        machine.abort();
        assert_eq!(machine.execute(&mut hooks).unwrap(), Step::Idle);
    }
}
