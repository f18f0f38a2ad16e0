//! Attack machine states.

use serde::{Deserialize, Serialize};

/// Where the attack machine is.
///
/// ```text
/// NoAttack ──start──▶ PreAttack ──victim──▶ DoAttack ──▶ FinishAttack
///     │                                        ▲              │
///     └──────────── (no victim needed) ────────┘     ┌────────┴────────┐
///                                                    ▼                 ▼
///                                            AttackSucceeded    AttackFailed
///                                                    │                 │
///                                                    └──▶ NoAttack ◀───┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    NoAttack,
    /// Waiting for the attacker to name a victim.
    PreAttack,
    /// The effect runs; may wait for the victim's defense.
    DoAttack,
    /// Routes on the recorded outcome.
    FinishAttack,
    AttackSucceeded,
    AttackFailed,
}

impl std::fmt::Display for AttackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoAttack => "NoAttack",
            Self::PreAttack => "PreAttack",
            Self::DoAttack => "DoAttack",
            Self::FinishAttack => "FinishAttack",
            Self::AttackSucceeded => "AttackSucceeded",
            Self::AttackFailed => "AttackFailed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_default() {
        assert_eq!(AttackState::default(), AttackState::NoAttack);
        assert_eq!(AttackState::AttackSucceeded.to_string(), "AttackSucceeded");
    }
}
