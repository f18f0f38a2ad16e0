//! Wording shipped with the standard catalog.

use crate::cards::{AttackKind, DisasterKind};

use super::template::{
    Destination, MessageKind, MessageTemplate, Stage, TemplateBook,
    TemplateToken::{AttackerName, CardName, HelperName, VictimName},
};

impl TemplateBook {
    /// Templates for every attack kind in the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut book = TemplateBook::new();
        steal(&mut book);
        rock(&mut book);
        river(&mut book);
        tree(&mut book);
        for kind in DisasterKind::ALL {
            disaster(&mut book, kind);
        }
        book
    }
}

fn abandoned(book: &mut TemplateBook, kind: AttackKind) {
    book.insert(
        kind,
        Stage::Abandoned,
        MessageTemplate::banner(Destination::All, " put away the ")
            .pre(AttackerName)
            .post(CardName),
    );
}

fn steal(book: &mut TemplateBook) {
    let kind = AttackKind::Steal;
    book.insert(
        kind,
        Stage::PreAttack,
        MessageTemplate::popup(Destination::Attacker, "Steal", "Choose a player to steal from"),
    );
    book.insert(
        kind,
        Stage::DoAttack,
        MessageTemplate::banner(Destination::AllButAttackerAndVictim, " is trying to steal from ")
            .pre(AttackerName)
            .post(VictimName),
    );
    book.insert(
        kind,
        Stage::DefenseRequested,
        MessageTemplate::popup(Destination::Victim, "Defend?", " is stealing from you. Play a Guard to stop them")
            .pre(AttackerName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::new(MessageKind::ImagePopup, Destination::Attacker, "You stole ")
            .post(HelperName)
            .titled("Steal"),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::Victim, " stole your ")
            .pre(AttackerName)
            .post(HelperName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::AllButAttackerAndVictim, " stole a card from ")
            .pre(AttackerName)
            .post(VictimName),
    );
    book.insert(
        kind,
        Stage::AttackFailed,
        MessageTemplate::banner(Destination::All, " kept their cards away from ")
            .pre(VictimName)
            .post(AttackerName),
    );
    abandoned(book, kind);
}

fn rock(book: &mut TemplateBook) {
    let kind = AttackKind::Rock;
    book.insert(
        kind,
        Stage::PreAttack,
        MessageTemplate::popup(Destination::Attacker, "Rock", "Choose a player to throw the rock at"),
    );
    book.insert(
        kind,
        Stage::DoAttack,
        MessageTemplate::banner(Destination::All, " throws a rock at ")
            .pre(AttackerName)
            .post(VictimName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::new(MessageKind::ImagePopup, Destination::Attacker, "You caught ")
            .post(HelperName)
            .titled("Rock"),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::Victim, " knocked away your ")
            .pre(AttackerName)
            .post(HelperName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::AllButAttackerAndVictim, " dropped a card")
            .pre(VictimName),
    );
    book.insert(
        kind,
        Stage::AttackFailed,
        MessageTemplate::banner(Destination::All, " had nothing to drop").pre(VictimName),
    );
    abandoned(book, kind);
}

fn river(book: &mut TemplateBook) {
    let kind = AttackKind::River;
    book.insert(
        kind,
        Stage::DoAttack,
        MessageTemplate::banner(Destination::All, " floods the trail with a ")
            .pre(AttackerName)
            .post(CardName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::All, "The next player loses their turn"),
    );
}

fn tree(book: &mut TemplateBook) {
    let kind = AttackKind::Tree;
    book.insert(
        kind,
        Stage::DoAttack,
        MessageTemplate::banner(Destination::All, " climbs a tree to look around").pre(AttackerName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::new(MessageKind::List, Destination::Attacker, "Map halves are held by")
            .titled("Tree"),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::AllButAttackerAndVictim, " spotted the map holders")
            .pre(AttackerName),
    );
    book.insert(
        kind,
        Stage::AttackFailed,
        MessageTemplate::popup(Destination::Attacker, "Tree", "Nobody holds a map half yet"),
    );
}

fn disaster(book: &mut TemplateBook, disaster: DisasterKind) {
    let kind = AttackKind::Disaster(disaster);
    let (strikes, perished) = match disaster {
        DisasterKind::Pit => (" fell into a pit", " did not climb out of the pit"),
        DisasterKind::Cliff => (" slipped off a cliff", " did not survive the fall"),
        DisasterKind::Avalanche => (" is caught in an avalanche", " was buried by the avalanche"),
    };

    book.insert(
        kind,
        Stage::DoAttack,
        MessageTemplate::banner(Destination::All, strikes).pre(VictimName),
    );
    book.insert(
        kind,
        Stage::DefenseRequested,
        MessageTemplate::popup(Destination::Victim, "Defend?", "Play a card to survive the ").post(CardName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::banner(Destination::AllButVictim, perished).pre(VictimName),
    );
    book.insert(
        kind,
        Stage::AttackSucceeded,
        MessageTemplate::popup(Destination::Victim, "Out", "You are out of the game"),
    );
    book.insert(
        kind,
        Stage::AttackFailed,
        MessageTemplate::new(MessageKind::ImagePopup, Destination::All, " escaped with a ")
            .pre(VictimName)
            .post(HelperName)
            .titled("Saved"),
    );
}
