//! Message templating for attack notifications.
//!
//! The attack engine asks for messages at each stage of an attack; this
//! module turns the matching templates into payloads. It never decides who
//! actually receives them: templates name a destination class, and the
//! orchestrator maps classes to seats as `Recipients`.

pub mod delivery;
pub mod render;
pub mod standard;
pub mod template;

pub use delivery::{Notification, Recipients};
pub use render::{render, render_text, AttackMessage, RenderScope};
pub use template::{Destination, MessageKind, MessageTemplate, Stage, TemplateBook, TemplateToken};
