//! Built-in tables: the monster roster, shop catalog, difficulty presets,
//! default player stats, and character-creation allocation steps.

use crawl_core::{
    DifficultyMultipliers, GameContent, MonsterCatalog, MonsterDefinition, PlayerBaseStats,
    ShopCategory, ShopEffect, ShopItem, SpecialBehavior,
};

/// Difficulty preset. Scales every spawned monster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub fn multipliers(self) -> DifficultyMultipliers {
        match self {
            Self::Easy => DifficultyMultipliers {
                hp: 0.8,
                attack: 0.8,
                defense: 0.8,
                exp: 1.2,
                speed: 0.9,
            },
            Self::Normal => DifficultyMultipliers::default(),
            Self::Hard => DifficultyMultipliers {
                hp: 1.3,
                attack: 1.2,
                defense: 1.2,
                exp: 0.9,
                speed: 1.1,
            },
            Self::Nightmare => DifficultyMultipliers {
                hp: 1.6,
                attack: 1.4,
                defense: 1.4,
                exp: 0.8,
                speed: 1.2,
            },
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn monster(
    id: &str,
    name: &str,
    glyph: char,
    floors: (i32, i32),
    hp: [i32; 2],
    attack: [i32; 2],
    defense: [i32; 2],
    exp: [i32; 2],
    evasion: i32,
    speed: i32,
    special: SpecialBehavior,
) -> MonsterDefinition {
    MonsterDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        glyph,
        min_floor: floors.0,
        max_floor: floors.1,
        hp,
        attack,
        defense,
        exp,
        evasion,
        speed,
        special,
        attack_range: 1,
    }
}

/// The stock roster. Stats are `[base, per_floor]` pairs; `mini_slime` only
/// spawns from a slime splitting, never naturally.
pub fn monster_catalog() -> MonsterCatalog {
    use SpecialBehavior::{Erratic, Heal, None, Split};
    MonsterCatalog {
        monsters: vec![
            monster("goblin", "Goblin", 'g', (1, 3), [12, 2], [3, 1], [1, 0], [5, 1], 5, 10, None),
            monster("slime", "Slime", 'm', (1, 2), [15, 3], [2, 1], [0, 0], [4, 1], 0, 5, Split),
            monster("mini_slime", "Mini Slime", 'm', (99, 99), [5, 0], [2, 0], [0, 0], [1, 0], 0, 8, None),
            monster("bat", "Cave Bat", 'b', (2, 4), [10, 2], [4, 1], [0, 0], [8, 1], 30, 15, Erratic),
            monster("skeleton", "Skeleton", 's', (3, 5), [25, 3], [5, 1], [2, 1], [10, 2], 0, 8, None),
            monster("shaman", "Goblin Shaman", 'S', (3, 5), [18, 2], [3, 1], [1, 0], [12, 1], 5, 9, Heal),
            monster("dire_wolf", "Dire Wolf", 'w', (3, 6), [30, 4], [7, 1], [2, 1], [20, 2], 10, 12, None),
            monster("orc", "Orc Warrior", 'O', (4, 7), [40, 5], [8, 1], [3, 1], [25, 2], 0, 7, None),
            monster("golem", "Stone Golem", 'G', (5, 8), [50, 4], [6, 1], [8, 1], [30, 1], 0, 4, None),
            monster("shadow_stalker", "Shadow Stalker", 'h', (6, 9), [35, 3], [9, 2], [2, 1], [40, 3], 40, 14, None),
            monster("fire_imp", "Fire Imp", 'i', (4, 7), [20, 2], [10, 2], [1, 0], [18, 2], 20, 13, None),
            monster("necromancer", "Necromancer", 'N', (7, 10), [45, 3], [7, 1], [3, 1], [50, 3], 10, 8, Heal),
            monster("dragon_whelp", "Dragon Whelp", 'D', (8, 99), [80, 5], [12, 2], [5, 1], [80, 5], 15, 10, None),
        ],
    }
}

fn shop_item(
    id: &str,
    name: &str,
    description: &str,
    price: i32,
    category: ShopCategory,
    effect: ShopEffect,
) -> ShopItem {
    ShopItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        category,
        effect,
    }
}

/// The full shop catalog: 5 consumables, 12 permanent upgrades, 4 specials.
/// Per-floor stock is sampled from this via
/// [`crawl_core::sample_shop_inventory`].
pub fn shop_catalog() -> Vec<ShopItem> {
    use ShopCategory::{Consumable, Permanent, Special};
    vec![
        shop_item("potion_small", "Healing Potion", "Restores 30% of max HP.", 30, Consumable, ShopEffect::HealPercent(30)),
        shop_item("potion_large", "Greater Healing Potion", "Restores 60% of max HP.", 60, Consumable, ShopEffect::HealPercent(60)),
        shop_item("mana_potion", "Mana Potion", "Restores all MP.", 25, Consumable, ShopEffect::RestoreManaFull),
        shop_item("oil_premium", "Premium Lamp Oil", "Refuels 80% of the torch.", 40, Consumable, ShopEffect::RestoreTorchPercent(80)),
        shop_item("elixir", "Elixir", "Fully restores HP, MP, and torch.", 150, Consumable, ShopEffect::FullRestore),
        shop_item("whetstone", "Whetstone", "Attack +3, permanently.", 100, Permanent, ShopEffect::BoostAttack(3)),
        shop_item("armor_plate", "Armor Plate", "Defense +2, permanently.", 80, Permanent, ShopEffect::BoostDefense(2)),
        shop_item("swift_boots", "Swift Boots", "Speed +2, permanently.", 120, Permanent, ShopEffect::BoostSpeed(2)),
        shop_item("life_crystal", "Life Crystal", "Max HP +30, permanently.", 90, Permanent, ShopEffect::BoostMaxHp(30)),
        shop_item("mana_crystal", "Mana Crystal", "Max MP +10, permanently.", 70, Permanent, ShopEffect::BoostMaxMp(10)),
        shop_item("lucky_coin", "Lucky Coin", "Luck +3, permanently.", 60, Permanent, ShopEffect::BoostLuck(3)),
        shop_item("vampiric_fang", "Vampiric Fang", "Lifesteal +2, permanently.", 150, Permanent, ShopEffect::BoostLifesteal(2)),
        shop_item("thorn_ring", "Thorn Ring", "Thorns +3, permanently.", 100, Permanent, ShopEffect::BoostThorns(3)),
        shop_item("crit_lens", "Precision Lens", "Crit chance +3%, permanently.", 110, Permanent, ShopEffect::BoostCritChance(3)),
        shop_item("power_gem", "Power Gem", "Crit damage +15%, permanently.", 130, Permanent, ShopEffect::BoostCritDamage(15)),
        shop_item("torch_holder", "Torch Bracket", "Max torch +50, permanently.", 50, Permanent, ShopEffect::BoostMaxTorch(50)),
        shop_item("regeneration_ring", "Regeneration Ring", "HP regen +1, permanently.", 200, Permanent, ShopEffect::BoostHpRegen(1)),
        shop_item("skill_slot", "Skill Scroll", "Unlocks one more skill slot.", 200, Special, ShopEffect::SkillSlot),
        shop_item("skill_reset", "Potion of Forgetting", "Forget every learned skill.", 250, Special, ShopEffect::SkillReset),
        shop_item("random_skill", "Mysterious Scroll", "Learn a random new skill.", 150, Special, ShopEffect::RandomSkill),
        shop_item("exp_orb", "Experience Orb", "Grants 50% of the exp needed for the next level.", 180, Special, ShopEffect::ExpOrbPercent(50)),
    ]
}

/// Starting stat block before character-creation allocation.
pub fn default_stats() -> PlayerBaseStats {
    PlayerBaseStats {
        max_hp: 200,
        max_mp: 30,
        max_torch: 500,
        attack: 20,
        defense: 0,
        speed: 10,
        crit_chance: 5,
        crit_damage: 200,
        evasion: 5,
        luck: 10,
        hp_regen: 0,
        mp_regen: 0,
        lifesteal: 0,
        thorns: 0,
        skill_slots: 2,
        arrows: 5,
        max_arrows: 20,
    }
}

/// Bundle the built-in tables for session construction.
pub fn default_content(difficulty: Difficulty) -> GameContent {
    GameContent {
        monsters: monster_catalog(),
        difficulty: difficulty.multipliers(),
        shop: shop_catalog(),
        default_stats: default_stats(),
    }
}

/// Points a fresh character may spend on [`AllocatableStat`] steps.
pub const STAT_ALLOCATION_POINTS: u32 = 10;

/// One spendable stat at character creation. Each point buys one step of a
/// stat-specific size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocatableStat {
    MaxHp,
    MaxMp,
    MaxTorch,
    Attack,
    Defense,
    Speed,
    CritChance,
    CritDamage,
    Evasion,
    Luck,
    HpRegen,
    MpRegen,
    Lifesteal,
    Thorns,
    SkillSlots,
}

impl AllocatableStat {
    pub const ALL: [AllocatableStat; 15] = [
        Self::MaxHp,
        Self::MaxMp,
        Self::MaxTorch,
        Self::Attack,
        Self::Defense,
        Self::Speed,
        Self::CritChance,
        Self::CritDamage,
        Self::Evasion,
        Self::Luck,
        Self::HpRegen,
        Self::MpRegen,
        Self::Lifesteal,
        Self::Thorns,
        Self::SkillSlots,
    ];

    /// How much one point buys.
    pub fn step(self) -> i32 {
        match self {
            Self::MaxHp => 20,
            Self::MaxMp => 5,
            Self::MaxTorch => 20,
            Self::Attack => 2,
            Self::CritDamage => 5,
            Self::Thorns => 2,
            Self::Defense
            | Self::Speed
            | Self::CritChance
            | Self::Evasion
            | Self::Luck
            | Self::HpRegen
            | Self::MpRegen
            | Self::Lifesteal
            | Self::SkillSlots => 1,
        }
    }

    /// Spend one point on this stat.
    pub fn apply(self, stats: &mut PlayerBaseStats) {
        let step = self.step();
        match self {
            Self::MaxHp => stats.max_hp += step,
            Self::MaxMp => stats.max_mp += step,
            Self::MaxTorch => stats.max_torch += step,
            Self::Attack => stats.attack += step,
            Self::Defense => stats.defense += step,
            Self::Speed => stats.speed += step,
            Self::CritChance => stats.crit_chance += step,
            Self::CritDamage => stats.crit_damage += step,
            Self::Evasion => stats.evasion += step,
            Self::Luck => stats.luck += step,
            Self::HpRegen => stats.hp_regen += step,
            Self::MpRegen => stats.mp_regen += step,
            Self::Lifesteal => stats.lifesteal += step,
            Self::Thorns => stats.thorns += step,
            Self::SkillSlots => stats.skill_slots += step as usize,
        }
    }
}
