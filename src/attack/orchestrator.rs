//! Attack effects against the table.
//!
//! `AttackOrchestrator` is the `AttackHooks` implementation the game uses.
//! It borrows the table, the turn ring, the template book and the outbox for
//! the duration of one machine call, so every effect and every message of an
//! attack happens under the same exclusive borrow of the game.

use log::{debug, info, warn};

use super::context::AttackContext;
use super::machine::{AttackHooks, EffectProgress};
use crate::cards::{AttackKind, Capability, CardInstanceId};
use crate::core::PlayerId;
use crate::error::EngineError;
use crate::game::Table;
use crate::messages::{
    render, AttackMessage, Destination, Notification, Recipients, RenderScope, Stage, TemplateBook,
};
use crate::turns::TurnScheduler;

/// Hooks over a borrowed game.
pub struct AttackOrchestrator<'a> {
    table: &'a mut Table,
    turns: &'a mut TurnScheduler,
    templates: &'a TemplateBook,
    outbox: &'a mut Vec<Notification>,
}

impl<'a> AttackOrchestrator<'a> {
    pub fn new(
        table: &'a mut Table,
        turns: &'a mut TurnScheduler,
        templates: &'a TemplateBook,
        outbox: &'a mut Vec<Notification>,
    ) -> Self {
        Self {
            table,
            turns,
            templates,
            outbox,
        }
    }

    /// Map a destination class to concrete seats.
    ///
    /// `None` when the class is empty for this attack (no victim yet, or a
    /// two-player table with nobody left for "everyone else").
    fn recipients(&self, destination: Destination, ctx: &AttackContext) -> Option<Recipients> {
        match destination {
            Destination::Victim => ctx.victim.map(Recipients::One),
            Destination::Attacker => ctx.attacker.map(Recipients::One),
            Destination::AllButVictim => self.everyone_except(&[ctx.victim]),
            Destination::AllButAttackerAndVictim => self.everyone_except(&[ctx.attacker, ctx.victim]),
            Destination::All => Some(Recipients::Broadcast),
        }
    }

    fn everyone_except(&self, excluded: &[Option<PlayerId>]) -> Option<Recipients> {
        let seats: Vec<PlayerId> = self
            .table
            .active_players()
            .map(|p| p.id)
            .filter(|p| !excluded.contains(&Some(*p)))
            .collect();
        (!seats.is_empty()).then_some(Recipients::Many(seats))
    }

    fn notify(&mut self, attack: u64, recipients: Recipients, message: AttackMessage) {
        self.outbox.push(Notification {
            attack: Some(attack),
            recipients,
            message,
        });
    }

    /// Move `card` from the victim to the attacker and apply loss rules.
    fn seize(&mut self, ctx: &AttackContext, card: CardInstanceId) -> Result<(), EngineError> {
        let (Some(victim), Some(attacker)) = (ctx.victim, ctx.attacker) else {
            return Ok(());
        };
        self.table.transfer(victim, attacker, card)?;

        let lost = self.table.card(card)?;
        if !lost.kind.has(Capability::FailNotifiable) {
            return Ok(());
        }

        let (kind, name) = (lost.kind, lost.name.clone());
        self.notify(
            ctx.sequence,
            Recipients::One(victim),
            AttackMessage::popup(name.clone(), format!("You lost your {}", name)),
        );
        if !self.table.holds_kind(victim, kind)? {
            let victim_name = self.table.player(victim)?.name.clone();
            self.eliminate(victim)?;
            self.notify(
                ctx.sequence,
                Recipients::Broadcast,
                AttackMessage::banner(format!("{} lost their last {} and is out", victim_name, name)),
            );
        }
        Ok(())
    }

    fn eliminate(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.table.eliminate(player)?;
        self.turns.mark_inactive(player);
        info!("{} eliminated, {} players left", player, self.turns.active_count());
        Ok(())
    }
}

impl AttackHooks for AttackOrchestrator<'_> {
    fn announce(&mut self, stage: Stage, ctx: &AttackContext) -> Result<(), EngineError> {
        let Some(kind) = ctx.kind else {
            return Ok(());
        };
        let templates: &TemplateBook = self.templates;
        let templates = templates.lookup(kind, stage);
        if templates.is_empty() {
            return Ok(());
        }

        let attacker = ctx.attacker.map(|p| self.table.player(p)).transpose()?;
        let victim = ctx.victim.map(|p| self.table.player(p)).transpose()?;
        let card = ctx.card.map(|c| self.table.card(c)).transpose()?;
        let helper = ctx.helper.map(|c| self.table.card(c)).transpose()?;
        let items = ctx
            .revealed
            .iter()
            .map(|&p| self.table.player(p).map(|pl| pl.name.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let scope = RenderScope {
            attacker: attacker.map(|p| p.name.as_str()),
            victim: victim.map(|p| p.name.as_str()),
            card: card.map(|c| c.name.as_str()),
            helper: helper.map(|c| c.name.as_str()),
            card_image: card.map(|c| c.image.as_str()),
            helper_image: helper.map(|c| c.image.as_str()),
            items: &items,
        };

        let mut rendered = Vec::with_capacity(templates.len());
        for template in templates {
            if let Some(recipients) = self.recipients(template.destination, ctx) {
                rendered.push((recipients, render(template, &scope)));
            }
        }
        for (recipients, message) in rendered {
            self.notify(ctx.sequence, recipients, message);
        }
        Ok(())
    }

    fn check_victim(&self, ctx: &AttackContext, victim: PlayerId) -> Result<(), EngineError> {
        if !self.table.contains_player(victim) {
            return Err(EngineError::UnknownPlayer(victim));
        }
        if ctx.attacker == Some(victim) || !self.table.player(victim)?.active {
            return Err(EngineError::InvalidVictim(victim));
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut AttackContext) -> Result<EffectProgress, EngineError> {
        let Some(kind) = ctx.kind else {
            return Ok(EffectProgress::Resolved);
        };

        match kind {
            AttackKind::Steal | AttackKind::Disaster(_) => {
                let Some(victim) = ctx.victim else {
                    ctx.outcome = false;
                    return Ok(EffectProgress::Resolved);
                };
                if self.table.defense_for(victim, kind)?.is_some() {
                    return Ok(EffectProgress::AwaitingDefense);
                }
                self.undefended(ctx)?;
            }
            AttackKind::Rock => {
                ctx.helper = match ctx.victim {
                    Some(victim) => self.table.random_card(victim)?,
                    None => None,
                };
                ctx.outcome = ctx.helper.is_some();
            }
            AttackKind::River => ctx.outcome = true,
            AttackKind::Tree => {
                ctx.revealed = self.table.map_holders();
                ctx.outcome = !ctx.revealed.is_empty();
            }
        }
        Ok(EffectProgress::Resolved)
    }

    fn defend(&mut self, ctx: &mut AttackContext, defense: CardInstanceId) -> Result<(), EngineError> {
        let (Some(kind), Some(victim)) = (ctx.kind, ctx.victim) else {
            return self.undefended(ctx);
        };
        if !self.table.player(victim)?.holds(defense) {
            return Err(EngineError::CardNotInHand {
                player: victim,
                card: defense,
            });
        }

        let profile = self.table.card(defense)?.kind.as_defender();
        if !kind.defense_succeeded(profile.as_ref()) {
            debug!("attack #{}: {} does not stop {}", ctx.sequence, defense, kind);
            ctx.outcome = true;
            return Ok(());
        }

        ctx.outcome = false;
        ctx.helper = Some(defense);
        self.table.play(victim, defense)?;

        if matches!(kind, AttackKind::Disaster(_)) && profile.is_some_and(|p| p.limited_use) {
            let discarded = self.table.discard_hand(victim)?;
            debug!("attack #{}: limited defense cost {} {} cards", ctx.sequence, victim, discarded);
            self.notify(
                ctx.sequence,
                Recipients::One(victim),
                AttackMessage::popup("Saved", format!("You survived but lost {} cards", discarded)),
            );
        }
        Ok(())
    }

    fn undefended(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError> {
        ctx.outcome = match (ctx.kind, ctx.victim) {
            (Some(AttackKind::Steal), Some(victim)) => !self.table.player(victim)?.hand().is_empty(),
            (Some(_), Some(_)) => true,
            _ => false,
        };
        Ok(())
    }

    fn succeed(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError> {
        let Some(kind) = ctx.kind else {
            return Ok(());
        };
        info!("attack #{}: {} succeeded", ctx.sequence, kind);

        match kind {
            AttackKind::Steal => {
                let taken = match ctx.victim {
                    Some(victim) => self.table.random_card(victim)?,
                    None => None,
                };
                match taken {
                    Some(card) => {
                        ctx.helper = Some(card);
                        self.seize(ctx, card)?;
                    }
                    None => warn!("attack #{}: nothing left to steal", ctx.sequence),
                }
            }
            AttackKind::Rock => {
                if let Some(card) = ctx.helper {
                    self.seize(ctx, card)?;
                }
            }
            AttackKind::River => self.turns.block_next(),
            AttackKind::Tree => {}
            AttackKind::Disaster(_) => {
                if let Some(victim) = ctx.victim {
                    self.eliminate(victim)?;
                }
            }
        }
        Ok(())
    }

    fn fail(&mut self, ctx: &mut AttackContext) -> Result<(), EngineError> {
        if let Some(kind) = ctx.kind {
            info!("attack #{}: {} failed", ctx.sequence, kind);
        }
        Ok(())
    }
}
