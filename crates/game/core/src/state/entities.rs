use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::GameConfig;
use crate::relic::OwnedRelic;
use crate::skill::SkillId;
use crate::state::effects::EffectList;
use crate::state::Position;

/// The player character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    /// Shared light and life budget; the run ends when it burns out.
    pub torch: i32,
    pub max_torch: i32,
    pub attack: i32,
    pub defense: i32,
    pub move_speed: i32,
    pub attack_speed: i32,
    /// Percent chance to land a critical hit.
    pub crit_chance: i32,
    /// Critical damage as a percentage of normal damage.
    pub crit_damage: i32,
    /// Percent chance to evade an incoming attack.
    pub evasion: i32,
    /// Scales item drop rolls during floor generation.
    pub luck: i32,
    pub hp_regen: i32,
    pub mp_regen: i32,
    /// Heal on hit: `ceil(damage * lifesteal / 50)`.
    pub lifesteal: i32,
    /// Flat damage reflected to melee attackers.
    pub thorns: i32,
    pub level: i32,
    pub exp: i32,
    pub next_level_exp: i32,
    pub gold: i32,
    pub skill_slots: usize,
    pub skill_ids: ArrayVec<SkillId, { GameConfig::MAX_SKILL_SLOTS }>,
    pub relics: Vec<OwnedRelic>,
    pub arrows: i32,
    pub max_arrows: i32,
    pub ap: i32,
    pub effects: EffectList,
    pub stunned: i32,
    /// Set by the dash skill; the next move resolves as a two-tile dash.
    pub is_dashing: bool,
}

impl Player {
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.effects.iter().map(|e| e.attack).sum::<i32>()
    }

    pub fn effective_defense(&self) -> i32 {
        self.defense + self.effects.iter().map(|e| e.defense).sum::<i32>()
    }

    pub fn effective_move_speed(&self) -> i32 {
        (self.move_speed + self.effects.iter().map(|e| e.move_speed).sum::<i32>()).max(1)
    }

    pub fn effective_attack_speed(&self) -> i32 {
        (self.attack_speed + self.effects.iter().map(|e| e.attack_speed).sum::<i32>()).max(1)
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    pub fn restore_mp(&mut self, amount: i32) {
        self.mp = (self.mp + amount.max(0)).min(self.max_mp);
    }

    pub fn restore_torch(&mut self, amount: i32) {
        self.torch = (self.torch + amount.max(0)).min(self.max_torch);
    }

    pub fn knows_skill(&self, id: SkillId) -> bool {
        self.skill_ids.contains(&id)
    }

    /// Count of a given relic held, for stack-scaled triggers.
    pub fn relic_stacks(&self, id: crate::relic::RelicId) -> i32 {
        self.relics
            .iter()
            .find(|r| r.id == id)
            .map_or(0, |r| r.stacks)
    }
}

/// A hostile actor on the current floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Catalog id this enemy was spawned from.
    pub kind: String,
    pub name: String,
    pub glyph: char,
    pub pos: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub move_speed: i32,
    pub attack_speed: i32,
    pub evasion: i32,
    pub exp: i32,
    pub special: SpecialBehavior,
    /// Attack reach in tiles; melee monsters use 1.
    pub attack_range: i32,
    pub ap: i32,
    pub effects: EffectList,
    pub stunned: i32,
}

impl Enemy {
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.effects.iter().map(|e| e.attack).sum::<i32>()
    }

    pub fn effective_defense(&self) -> i32 {
        self.defense + self.effects.iter().map(|e| e.defense).sum::<i32>()
    }

    pub fn effective_move_speed(&self) -> i32 {
        (self.move_speed + self.effects.iter().map(|e| e.move_speed).sum::<i32>()).max(1)
    }

    pub fn effective_attack_speed(&self) -> i32 {
        (self.attack_speed + self.effects.iter().map(|e| e.attack_speed).sum::<i32>()).max(1)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Monster quirks that change turn behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpecialBehavior {
    #[default]
    None,
    /// Splits into weaker copies on death.
    Split,
    /// Heals a wounded nearby ally instead of advancing.
    Heal,
    /// Half the time moves randomly instead of closing in.
    Erratic,
    /// Attacks from `attack_range` tiles away.
    Ranged,
    /// Ranged, with splash flavor in the log.
    RangedAoe,
}

/// Something lying on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Position,
    pub kind: ItemKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "title_case")]
pub enum ItemKind {
    /// Descends to the next floor. Never consumed.
    Portal,
    Gold,
    Potion,
    Oil,
    Arrow,
}

/// Trajectory marker for the latest arrow shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowShot {
    pub from: Position,
    pub to: Position,
    pub fired_at_ms: u64,
}
