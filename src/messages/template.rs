//! Message templates.
//!
//! A template is `pre token + literal + post token`, plus the message kind
//! and the destination class it is meant for. Templates are keyed by
//! attack kind and stage; one key may carry several templates, one per
//! destination, so the attacker, the victim and the bystanders each get
//! their own wording.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::attack::AttackState;
use crate::cards::AttackKind;

/// How a client presents a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// A list of strings (Tree reveals).
    List,
    /// Transient on-screen banner.
    Banner,
    /// Popup with a title.
    Popup,
    /// Popup showing two card images side by side.
    ImagePopup,
}

/// Placeholder substituted at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateToken {
    #[default]
    None,
    AttackerName,
    VictimName,
    /// Name of the card driving the attack.
    CardName,
    /// Name of the helper card (the one taken, or the one defended with).
    HelperName,
}

/// Who a message is for, relative to the attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Victim,
    Attacker,
    AllButVictim,
    AllButAttackerAndVictim,
    All,
}

/// Points in an attack where messages are emitted.
///
/// Mostly the machine states, plus the two moments that are not a state of
/// their own: a defense request while `DoAttack` waits, and an attack
/// abandoned before it resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    PreAttack,
    DoAttack,
    DefenseRequested,
    AttackSucceeded,
    AttackFailed,
    Abandoned,
}

impl Stage {
    /// Stage announced when the machine enters `state`, if any.
    #[must_use]
    pub fn entering(state: AttackState) -> Option<Stage> {
        match state {
            AttackState::PreAttack => Some(Stage::PreAttack),
            AttackState::DoAttack => Some(Stage::DoAttack),
            AttackState::AttackSucceeded => Some(Stage::AttackSucceeded),
            AttackState::AttackFailed => Some(Stage::AttackFailed),
            AttackState::NoAttack | AttackState::FinishAttack => None,
        }
    }
}

/// One template record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub kind: MessageKind,
    pub destination: Destination,
    pub pre: TemplateToken,
    pub literal: String,
    pub post: TemplateToken,
    /// Popup title, ignored for other kinds.
    pub title: Option<String>,
}

impl MessageTemplate {
    /// Template with no tokens.
    #[must_use]
    pub fn new(kind: MessageKind, destination: Destination, literal: impl Into<String>) -> Self {
        Self {
            kind,
            destination,
            pre: TemplateToken::None,
            literal: literal.into(),
            post: TemplateToken::None,
            title: None,
        }
    }

    /// Banner shorthand.
    #[must_use]
    pub fn banner(destination: Destination, literal: impl Into<String>) -> Self {
        Self::new(MessageKind::Banner, destination, literal)
    }

    /// Titled popup shorthand.
    #[must_use]
    pub fn popup(destination: Destination, title: impl Into<String>, literal: impl Into<String>) -> Self {
        Self::new(MessageKind::Popup, destination, literal).titled(title)
    }

    /// Set the leading token.
    #[must_use]
    pub fn pre(mut self, token: TemplateToken) -> Self {
        self.pre = token;
        self
    }

    /// Set the trailing token.
    #[must_use]
    pub fn post(mut self, token: TemplateToken) -> Self {
        self.post = token;
        self
    }

    /// Set the popup title.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Templates keyed by attack kind and stage.
#[derive(Clone, Debug, Default)]
pub struct TemplateBook {
    templates: FxHashMap<(AttackKind, Stage), Vec<MessageTemplate>>,
}

impl TemplateBook {
    /// Empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template for a kind and stage.
    pub fn insert(&mut self, kind: AttackKind, stage: Stage, template: MessageTemplate) {
        self.templates.entry((kind, stage)).or_default().push(template);
    }

    /// Builder form of `insert`.
    #[must_use]
    pub fn with(mut self, kind: AttackKind, stage: Stage, template: MessageTemplate) -> Self {
        self.insert(kind, stage, template);
        self
    }

    /// Templates for a kind and stage, in insertion order.
    #[must_use]
    pub fn lookup(&self, kind: AttackKind, stage: Stage) -> &[MessageTemplate] {
        self.templates
            .get(&(kind, stage))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of template records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
