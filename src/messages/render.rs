//! Rendering templates into message payloads.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::template::{MessageKind, MessageTemplate, TemplateToken};

/// Values available to token substitution.
///
/// Absent values render as the empty string.
#[derive(Clone, Debug, Default)]
pub struct RenderScope<'a> {
    pub attacker: Option<&'a str>,
    pub victim: Option<&'a str>,
    pub card: Option<&'a str>,
    pub helper: Option<&'a str>,
    pub card_image: Option<&'a str>,
    pub helper_image: Option<&'a str>,
    /// List payload (Tree reveals).
    pub items: &'a [String],
}

impl<'a> RenderScope<'a> {
    fn token(&self, token: TemplateToken) -> &'a str {
        let value = match token {
            TemplateToken::None => None,
            TemplateToken::AttackerName => self.attacker,
            TemplateToken::VictimName => self.victim,
            TemplateToken::CardName => self.card,
            TemplateToken::HelperName => self.helper,
        };
        value.unwrap_or("")
    }
}

/// Rendered payload handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackMessage {
    pub kind: MessageKind,
    pub title: Option<String>,
    pub text: String,
    pub images: SmallVec<[String; 2]>,
    pub items: Vec<String>,
}

impl AttackMessage {
    /// Plain banner, for game-level announcements outside any template.
    #[must_use]
    pub fn banner(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Banner,
            title: None,
            text: text.into(),
            images: SmallVec::new(),
            items: Vec::new(),
        }
    }

    /// Titled popup outside any template.
    #[must_use]
    pub fn popup(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Popup,
            title: Some(title.into()),
            ..Self::banner(text)
        }
    }
}

/// The rendered string: `pre + literal + post`.
#[must_use]
pub fn render_text(template: &MessageTemplate, scope: &RenderScope<'_>) -> String {
    let pre = scope.token(template.pre);
    let post = scope.token(template.post);

    let mut text = String::with_capacity(pre.len() + template.literal.len() + post.len());
    text.push_str(pre);
    text.push_str(&template.literal);
    text.push_str(post);
    text
}

/// Render a full payload.
///
/// Image popups carry the attack card and helper card images; lists carry
/// the scope's items.
#[must_use]
pub fn render(template: &MessageTemplate, scope: &RenderScope<'_>) -> AttackMessage {
    let images = match template.kind {
        MessageKind::ImagePopup => scope
            .card_image
            .into_iter()
            .chain(scope.helper_image)
            .map(str::to_string)
            .collect(),
        _ => SmallVec::new(),
    };

    let items = match template.kind {
        MessageKind::List => scope.items.to_vec(),
        _ => Vec::new(),
    };

    let title = match template.kind {
        MessageKind::Popup | MessageKind::ImagePopup | MessageKind::List => template.title.clone(),
        MessageKind::Banner => None,
    };

    AttackMessage {
        kind: template.kind,
        title,
        text: render_text(template, scope),
        images,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Destination;

    #[test]
    fn test_attacker_victim_substitution() {
        let template = MessageTemplate::banner(Destination::AllButAttackerAndVictim, " stole a card from ")
            .pre(TemplateToken::AttackerName)
            .post(TemplateToken::VictimName);
        let scope = RenderScope {
            attacker: Some("Ann"),
            victim: Some("Bo"),
            ..RenderScope::default()
        };

        assert_eq!(render_text(&template, &scope), "Ann stole a card from Bo");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let template = MessageTemplate::banner(Destination::All, " fell")
            .pre(TemplateToken::VictimName)
            .post(TemplateToken::HelperName);

        assert_eq!(render_text(&template, &RenderScope::default()), " fell");
    }

    #[test]
    fn test_image_popup_carries_both_images() {
        let template = MessageTemplate::new(
            crate::messages::MessageKind::ImagePopup,
            Destination::Attacker,
            "You took ",
        )
        .post(TemplateToken::HelperName)
        .titled("Steal");
        let scope = RenderScope {
            helper: Some("Honey"),
            card_image: Some("steal.png"),
            helper_image: Some("honey.png"),
            ..RenderScope::default()
        };

        let message = render(&template, &scope);
        assert_eq!(message.text, "You took Honey");
        assert_eq!(message.images.as_slice(), ["steal.png".to_string(), "honey.png".to_string()]);
        assert_eq!(message.title.as_deref(), Some("Steal"));
        assert!(message.items.is_empty());
    }

    #[test]
    fn test_list_carries_items_and_banner_drops_title() {
        let items = vec!["Ann".to_string(), "Cy".to_string()];
        let scope = RenderScope {
            items: &items,
            ..RenderScope::default()
        };

        let list = MessageTemplate::new(MessageKind::List, Destination::Attacker, "Map holders");
        assert_eq!(render(&list, &scope).items, items);

        let banner = MessageTemplate::banner(Destination::All, "x").titled("ignored");
        let message = render(&banner, &scope);
        assert!(message.items.is_empty());
        assert!(message.title.is_none());
    }

    #[test]
    fn test_message_serde() {
        let message = AttackMessage::popup("Out", "You are out of the game");
        let json = serde_json::to_string(&message).unwrap();
        let back: AttackMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(message, back);
    }
}
