//! Relics: passive trinkets that hook into combat, kills, gold, and casts.

mod effects;

pub use effects::{
    passive_attack_bonus, process_attack_relics, process_damage_taken, process_gold_gain,
    process_kill_relics, process_level_up_relics, process_skill_use, AttackRelicOutcome,
    DamageTakenOutcome,
};

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::rng::DiceRoller;

/// Every relic in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "title_case")]
#[serde(rename_all = "snake_case")]
pub enum RelicId {
    BloodStone,
    GoldMagnet,
    IronSkin,
    BerserkerHeart,
    MidasTouch,
    VampiricBlade,
    ExecutionerAxe,
    WealthIsPower,
    GlassCannon,
    GlassCannonDefense,
    SoulCollector,
    ChainLightning,
    InfinityGauntlet,
    PhoenixFeather,
    TimeLoop,
    GreedIncarnate,
}

impl RelicId {
    pub const ALL: [RelicId; 16] = [
        RelicId::BloodStone,
        RelicId::GoldMagnet,
        RelicId::IronSkin,
        RelicId::BerserkerHeart,
        RelicId::MidasTouch,
        RelicId::VampiricBlade,
        RelicId::ExecutionerAxe,
        RelicId::WealthIsPower,
        RelicId::GlassCannon,
        RelicId::GlassCannonDefense,
        RelicId::SoulCollector,
        RelicId::ChainLightning,
        RelicId::InfinityGauntlet,
        RelicId::PhoenixFeather,
        RelicId::TimeLoop,
        RelicId::GreedIncarnate,
    ];

    pub fn spec(self) -> &'static RelicSpec {
        &RELIC_SPECS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl RelicRarity {
    /// Drop weight out of 100.
    fn weight(self) -> u32 {
        match self {
            Self::Common => 50,
            Self::Uncommon => 30,
            Self::Rare => 15,
            Self::Legendary => 5,
        }
    }
}

/// When a relic's effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicTrigger {
    OnAttack,
    OnKill,
    OnDamageTaken,
    OnGoldGain,
    OnSkillUse,
    OnLevelUp,
    Passive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelicSpec {
    pub id: RelicId,
    pub name: &'static str,
    pub rarity: RelicRarity,
    pub trigger: RelicTrigger,
    pub description: &'static str,
}

// Indexed by RelicId discriminant.
static RELIC_SPECS: [RelicSpec; 16] = [
    RelicSpec {
        id: RelicId::BloodStone,
        name: "Blood Stone",
        rarity: RelicRarity::Common,
        trigger: RelicTrigger::OnKill,
        description: "Restores 5 HP on every kill.",
    },
    RelicSpec {
        id: RelicId::GoldMagnet,
        name: "Gold Magnet",
        rarity: RelicRarity::Common,
        trigger: RelicTrigger::OnGoldGain,
        description: "Gold gains grant an extra 20%.",
    },
    RelicSpec {
        id: RelicId::IronSkin,
        name: "Iron Skin",
        rarity: RelicRarity::Common,
        trigger: RelicTrigger::OnDamageTaken,
        description: "Reduces damage taken by 2.",
    },
    RelicSpec {
        id: RelicId::BerserkerHeart,
        name: "Berserker Heart",
        rarity: RelicRarity::Uncommon,
        trigger: RelicTrigger::OnAttack,
        description: "Doubles attack damage below 30% HP.",
    },
    RelicSpec {
        id: RelicId::MidasTouch,
        name: "Midas Touch",
        rarity: RelicRarity::Uncommon,
        trigger: RelicTrigger::OnKill,
        description: "Kills grant bonus gold equal to your luck.",
    },
    RelicSpec {
        id: RelicId::VampiricBlade,
        name: "Vampiric Blade",
        rarity: RelicRarity::Uncommon,
        trigger: RelicTrigger::OnAttack,
        description: "Attacks heal 10% of the damage dealt.",
    },
    RelicSpec {
        id: RelicId::ExecutionerAxe,
        name: "Executioner's Axe",
        rarity: RelicRarity::Uncommon,
        trigger: RelicTrigger::OnAttack,
        description: "Double damage to enemies below 20% HP.",
    },
    RelicSpec {
        id: RelicId::WealthIsPower,
        name: "Wealth Is Power",
        rarity: RelicRarity::Rare,
        trigger: RelicTrigger::Passive,
        description: "+5 attack per 100 gold carried.",
    },
    RelicSpec {
        id: RelicId::GlassCannon,
        name: "Glass Cannon",
        rarity: RelicRarity::Rare,
        trigger: RelicTrigger::OnAttack,
        description: "Damage dealt +50%.",
    },
    RelicSpec {
        id: RelicId::GlassCannonDefense,
        name: "Glass Cannon (curse)",
        rarity: RelicRarity::Rare,
        trigger: RelicTrigger::OnDamageTaken,
        description: "Damage taken +50%.",
    },
    RelicSpec {
        id: RelicId::SoulCollector,
        name: "Soul Collector",
        rarity: RelicRarity::Rare,
        trigger: RelicTrigger::OnKill,
        description: "Each kill permanently grants +1 max HP.",
    },
    RelicSpec {
        id: RelicId::ChainLightning,
        name: "Chain Lightning",
        rarity: RelicRarity::Rare,
        trigger: RelicTrigger::OnAttack,
        description: "20% chance to zap all other enemies for 5.",
    },
    RelicSpec {
        id: RelicId::InfinityGauntlet,
        name: "Infinity Gauntlet",
        rarity: RelicRarity::Legendary,
        trigger: RelicTrigger::OnLevelUp,
        description: "Level-up bonuses are doubled.",
    },
    RelicSpec {
        id: RelicId::PhoenixFeather,
        name: "Phoenix Feather",
        rarity: RelicRarity::Legendary,
        trigger: RelicTrigger::OnDamageTaken,
        description: "Survive death once, reviving at 50% HP.",
    },
    RelicSpec {
        id: RelicId::TimeLoop,
        name: "Time Loop",
        rarity: RelicRarity::Legendary,
        trigger: RelicTrigger::OnSkillUse,
        description: "30% chance a skill costs no mana.",
    },
    RelicSpec {
        id: RelicId::GreedIncarnate,
        name: "Greed Incarnate",
        rarity: RelicRarity::Legendary,
        trigger: RelicTrigger::OnGoldGain,
        description: "Gold gains are doubled.",
    },
];

/// A relic in the player's possession. Duplicates stack instead of occupying
/// a second slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedRelic {
    pub id: RelicId,
    pub stacks: i32,
}

/// Weighted random relic: 50% common, 30% uncommon, 15% rare, 5% legendary.
pub fn random_relic(dice: &mut dyn DiceRoller) -> RelicId {
    let roll = dice.range(100);
    let mut acc = 0;
    let rarity = [
        RelicRarity::Common,
        RelicRarity::Uncommon,
        RelicRarity::Rare,
        RelicRarity::Legendary,
    ]
    .into_iter()
    .find(|r| {
        acc += r.weight();
        roll < acc
    })
    .unwrap_or(RelicRarity::Legendary);

    let pool: Vec<RelicId> = RelicId::ALL
        .iter()
        .copied()
        .filter(|id| id.spec().rarity == rarity)
        .collect();
    pool[dice.range(pool.len() as u32) as usize]
}
