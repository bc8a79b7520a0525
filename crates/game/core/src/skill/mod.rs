//! Active skills: the catalog and the cast pipeline.

mod effects;

pub use effects::{cast_skill, SkillContext};

use serde::{Deserialize, Serialize};
use strum::Display;

/// Every learnable skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "title_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    Fireball,
    Heal,
    Whirlwind,
    ShieldBash,
    BattleShout,
    Dash,
    Radiance,
    ToxicMist,
    Freeze,
    Entangle,
    Lightning,
    MagicMissile,
    FlameZone,
}

impl SkillId {
    pub const ALL: [SkillId; 13] = [
        SkillId::Fireball,
        SkillId::Heal,
        SkillId::Whirlwind,
        SkillId::ShieldBash,
        SkillId::BattleShout,
        SkillId::Dash,
        SkillId::Radiance,
        SkillId::ToxicMist,
        SkillId::Freeze,
        SkillId::Entangle,
        SkillId::Lightning,
        SkillId::MagicMissile,
        SkillId::FlameZone,
    ];

    pub fn spec(self) -> &'static SkillSpec {
        &SKILL_SPECS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Damage,
    Heal,
    Control,
    Buff,
    Utility,
}

/// Static per-skill data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillSpec {
    pub id: SkillId,
    pub name: &'static str,
    pub cost: i32,
    pub kind: SkillKind,
    pub description: &'static str,
}

// Indexed by SkillId discriminant.
static SKILL_SPECS: [SkillSpec; 13] = [
    SkillSpec {
        id: SkillId::Fireball,
        name: "Fireball",
        cost: 10,
        kind: SkillKind::Damage,
        description: "Hurls a fireball that deals true damage to enemies within 2 tiles.",
    },
    SkillSpec {
        id: SkillId::Heal,
        name: "Heal",
        cost: 15,
        kind: SkillKind::Heal,
        description: "Restores 30% of max HP.",
    },
    SkillSpec {
        id: SkillId::Whirlwind,
        name: "Whirlwind",
        cost: 20,
        kind: SkillKind::Damage,
        description: "Damages all adjacent enemies.",
    },
    SkillSpec {
        id: SkillId::ShieldBash,
        name: "Shield Bash",
        cost: 8,
        kind: SkillKind::Control,
        description: "Strikes an adjacent enemy with a 70% chance to stun.",
    },
    SkillSpec {
        id: SkillId::BattleShout,
        name: "Battle Shout",
        cost: 12,
        kind: SkillKind::Buff,
        description: "Attack +5 and defense +3 for 5 turns.",
    },
    SkillSpec {
        id: SkillId::Dash,
        name: "Dash",
        cost: 5,
        kind: SkillKind::Utility,
        description: "Rushes 2 tiles in a chosen direction.",
    },
    SkillSpec {
        id: SkillId::Radiance,
        name: "Radiance",
        cost: 8,
        kind: SkillKind::Utility,
        description: "Restores 50% of the torch.",
    },
    SkillSpec {
        id: SkillId::ToxicMist,
        name: "Toxic Mist",
        cost: 18,
        kind: SkillKind::Damage,
        description: "Raises a lingering poison cloud on the target area.",
    },
    SkillSpec {
        id: SkillId::Freeze,
        name: "Freeze",
        cost: 15,
        kind: SkillKind::Control,
        description: "Encases an enemy in ice for a long stun.",
    },
    SkillSpec {
        id: SkillId::Entangle,
        name: "Entangle",
        cost: 10,
        kind: SkillKind::Control,
        description: "Vines halve an enemy's movement speed.",
    },
    SkillSpec {
        id: SkillId::Lightning,
        name: "Lightning",
        cost: 25,
        kind: SkillKind::Damage,
        description: "A bolt of true damage against a single enemy.",
    },
    SkillSpec {
        id: SkillId::MagicMissile,
        name: "Magic Missile",
        cost: 5,
        kind: SkillKind::Damage,
        description: "An unerring bolt of force.",
    },
    SkillSpec {
        id: SkillId::FlameZone,
        name: "Flame Zone",
        cost: 20,
        kind: SkillKind::Damage,
        description: "Ignites the target area and leaves it burning.",
    },
];

/// Where a cast is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTarget {
    /// Pick the nearest valid enemy automatically.
    Auto,
    /// Aim at a specific tile.
    At(crate::state::Position),
}

/// What a cast did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillOutcome {
    /// No valid target. The cast costs nothing.
    Fizzled { reason: String },
    Cast,
    /// Dash is armed and waits for a direction.
    AwaitDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lookup_matches_id() {
        for id in SkillId::ALL {
            assert_eq!(id.spec().id, id);
        }
    }

    #[test]
    fn costs_match_the_balance_sheet() {
        assert_eq!(SkillId::Fireball.spec().cost, 10);
        assert_eq!(SkillId::MagicMissile.spec().cost, 5);
        assert_eq!(SkillId::Lightning.spec().cost, 25);
        assert_eq!(SkillId::Whirlwind.spec().cost, 20);
    }

    #[test]
    fn skill_id_serializes_snake_case() {
        let json = serde_json::to_string(&SkillId::ShieldBash).unwrap();
        assert_eq!(json, "\"shield_bash\"");
        let back: SkillId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SkillId::ShieldBash);
    }
}
