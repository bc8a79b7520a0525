//! Content schema: data tables the simulation consumes.
//!
//! The tables themselves (monster catalog, shop stock, difficulty presets)
//! ship in the content crate; this module defines their shapes plus the small
//! amount of logic bound to them, such as stat scaling and shop effects.

use serde::{Deserialize, Serialize};

use crate::rng::DiceRoller;
use crate::skill::SkillId;
use crate::state::{Enemy, Player, Position, SpecialBehavior};

/// One monster archetype. Scaling stats are `[base, per_floor]` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterDefinition {
    pub id: String,
    pub name: String,
    pub glyph: char,
    pub min_floor: i32,
    pub max_floor: i32,
    pub hp: [i32; 2],
    pub attack: [i32; 2],
    pub defense: [i32; 2],
    pub exp: [i32; 2],
    pub evasion: i32,
    pub speed: i32,
    #[serde(default)]
    pub special: SpecialBehavior,
    #[serde(default = "default_attack_range")]
    pub attack_range: i32,
}

fn default_attack_range() -> i32 {
    1
}

fn scaled(pair: [i32; 2], floor: i32, multiplier: f64) -> i32 {
    (((pair[0] + floor * pair[1]) as f64) * multiplier) as i32
}

impl MonsterDefinition {
    /// Instantiate this archetype at `pos`, scaled to the floor and difficulty.
    pub fn spawn(&self, pos: Position, floor: i32, difficulty: &DifficultyMultipliers) -> Enemy {
        let hp = scaled(self.hp, floor, difficulty.hp);
        Enemy {
            kind: self.id.clone(),
            name: self.name.clone(),
            glyph: self.glyph,
            pos,
            hp,
            max_hp: hp,
            attack: scaled(self.attack, floor, difficulty.attack),
            defense: scaled(self.defense, floor, difficulty.defense),
            move_speed: ((self.speed as f64) * difficulty.speed) as i32,
            attack_speed: ((self.speed as f64) * difficulty.speed) as i32,
            evasion: self.evasion,
            exp: scaled(self.exp, floor, difficulty.exp),
            special: self.special,
            attack_range: self.attack_range,
            ap: 0,
            effects: Default::default(),
            stunned: 0,
        }
    }
}

/// The full monster roster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterDefinition>,
}

impl MonsterCatalog {
    pub fn get(&self, id: &str) -> Option<&MonsterDefinition> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Archetypes that may spawn naturally on `floor`.
    pub fn eligible(&self, floor: i32) -> Vec<&MonsterDefinition> {
        self.monsters
            .iter()
            .filter(|m| floor >= m.min_floor && floor <= m.max_floor)
            .collect()
    }

    /// Uniform pick among floor-eligible archetypes.
    pub fn pick(&self, floor: i32, dice: &mut dyn DiceRoller) -> Option<&MonsterDefinition> {
        let eligible = self.eligible(floor);
        if eligible.is_empty() {
            return None;
        }
        let idx = dice.range(eligible.len() as u32) as usize;
        Some(eligible[idx])
    }
}

/// Difficulty scaling applied to every spawned monster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMultipliers {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub exp: f64,
    pub speed: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            hp: 1.0,
            attack: 1.0,
            defense: 1.0,
            exp: 1.0,
            speed: 1.0,
        }
    }
}

/// Starting stat block for a fresh player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBaseStats {
    pub max_hp: i32,
    pub max_mp: i32,
    pub max_torch: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub crit_chance: i32,
    pub crit_damage: i32,
    pub evasion: i32,
    pub luck: i32,
    pub hp_regen: i32,
    pub mp_regen: i32,
    pub lifesteal: i32,
    pub thorns: i32,
    pub skill_slots: usize,
    pub arrows: i32,
    pub max_arrows: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopCategory {
    Consumable,
    Permanent,
    Special,
}

/// What buying a shop item does.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopEffect {
    HealPercent(i32),
    RestoreManaFull,
    RestoreTorchPercent(i32),
    FullRestore,
    BoostAttack(i32),
    BoostDefense(i32),
    BoostSpeed(i32),
    BoostMaxHp(i32),
    BoostMaxMp(i32),
    BoostLuck(i32),
    BoostLifesteal(i32),
    BoostThorns(i32),
    BoostCritChance(i32),
    BoostCritDamage(i32),
    BoostMaxTorch(i32),
    BoostHpRegen(i32),
    SkillSlot,
    SkillReset,
    RandomSkill,
    /// Grants a percentage of the exp still needed for the next level.
    ExpOrbPercent(i32),
}

impl ShopEffect {
    /// Whether the purchase would do anything for this player.
    pub fn can_buy(&self, player: &Player) -> bool {
        match self {
            Self::SkillSlot => player.skill_slots < 6,
            Self::SkillReset => !player.skill_ids.is_empty(),
            Self::RandomSkill => {
                player.skill_ids.len() < player.skill_slots
                    && SkillId::ALL.iter().any(|id| !player.knows_skill(*id))
            }
            _ => true,
        }
    }

    /// Apply the purchase. Returns a short description of what happened.
    pub fn apply(&self, player: &mut Player, dice: &mut dyn DiceRoller) -> String {
        match *self {
            Self::HealPercent(pct) => {
                let amount = player.max_hp * pct / 100;
                player.heal(amount);
                format!("Restored {amount} HP.")
            }
            Self::RestoreManaFull => {
                player.mp = player.max_mp;
                "Mana fully restored.".to_owned()
            }
            Self::RestoreTorchPercent(pct) => {
                let amount = player.max_torch * pct / 100;
                player.restore_torch(amount);
                format!("Torch refueled by {amount}.")
            }
            Self::FullRestore => {
                player.hp = player.max_hp;
                player.mp = player.max_mp;
                player.torch = player.max_torch;
                "Fully restored.".to_owned()
            }
            Self::BoostAttack(n) => {
                player.attack += n;
                format!("Attack +{n}.")
            }
            Self::BoostDefense(n) => {
                player.defense += n;
                format!("Defense +{n}.")
            }
            Self::BoostSpeed(n) => {
                player.move_speed += n;
                player.attack_speed += n;
                format!("Speed +{n}.")
            }
            Self::BoostMaxHp(n) => {
                player.max_hp += n;
                player.hp += n;
                format!("Max HP +{n}.")
            }
            Self::BoostMaxMp(n) => {
                player.max_mp += n;
                player.mp += n;
                format!("Max MP +{n}.")
            }
            Self::BoostLuck(n) => {
                player.luck += n;
                format!("Luck +{n}.")
            }
            Self::BoostLifesteal(n) => {
                player.lifesteal += n;
                format!("Lifesteal +{n}.")
            }
            Self::BoostThorns(n) => {
                player.thorns += n;
                format!("Thorns +{n}.")
            }
            Self::BoostCritChance(n) => {
                player.crit_chance += n;
                format!("Crit chance +{n}%.")
            }
            Self::BoostCritDamage(n) => {
                player.crit_damage += n;
                format!("Crit damage +{n}%.")
            }
            Self::BoostMaxTorch(n) => {
                player.max_torch += n;
                format!("Max torch +{n}.")
            }
            Self::BoostHpRegen(n) => {
                player.hp_regen += n;
                format!("HP regen +{n}.")
            }
            Self::SkillSlot => {
                player.skill_slots += 1;
                "Skill slot unlocked.".to_owned()
            }
            Self::SkillReset => {
                player.skill_ids.clear();
                "All skills forgotten.".to_owned()
            }
            Self::RandomSkill => {
                let unknown: Vec<SkillId> = SkillId::ALL
                    .iter()
                    .copied()
                    .filter(|id| !player.knows_skill(*id))
                    .collect();
                match unknown.get(dice.range(unknown.len() as u32) as usize) {
                    Some(&id) if player.skill_ids.len() < player.skill_ids.capacity() => {
                        let _ = player.skill_ids.try_push(id);
                        format!("Learned {}.", id)
                    }
                    _ => "No skill learned.".to_owned(),
                }
            }
            Self::ExpOrbPercent(pct) => {
                let amount = player.next_level_exp * pct / 100;
                player.exp += amount;
                format!("Gained {amount} experience.")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub category: ShopCategory,
    pub effect: ShopEffect,
}

/// Roll a floor's shop stock from the full catalog. Consumables are always
/// offered, permanent upgrades unlock with a floor-scaled chance, and special
/// services only appear from floor 4 on. At most eight items are shown.
pub fn sample_shop_inventory(
    catalog: &[ShopItem],
    floor: i32,
    dice: &mut dyn DiceRoller,
) -> Vec<ShopItem> {
    let unlock_chance = (30 + floor * 10).min(100);
    let mut stock: Vec<ShopItem> = catalog
        .iter()
        .filter(|item| match item.category {
            ShopCategory::Consumable => true,
            ShopCategory::Permanent => dice.chance_percent(unlock_chance),
            ShopCategory::Special => floor >= 4,
        })
        .cloned()
        .collect();
    crate::rng::shuffle(dice, &mut stock);
    stock.truncate(8);
    stock
}

/// Everything data-driven, bundled for session construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameContent {
    pub monsters: MonsterCatalog,
    pub difficulty: DifficultyMultipliers,
    pub shop: Vec<ShopItem>,
    pub default_stats: PlayerBaseStats,
}
