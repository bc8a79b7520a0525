//! Entity factories and lifecycle rules: player creation, floor population,
//! item pickups, level ups, and monster splitting.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::config::GameConfig;
use crate::rng::{shuffle, DiceRoller};
use crate::skill::SkillId;
use crate::state::{
    Enemy, Item, ItemKind, Player, Position, Room, SpecialBehavior, TileGrid,
};
use crate::tables::{DifficultyMultipliers, MonsterCatalog, PlayerBaseStats};

/// Catalog id the split special spawns.
pub const SPLIT_OFFSPRING: &str = "mini_slime";

/// Fresh level-1 player from a base stat block and starting skills.
pub fn new_player(
    stats: &PlayerBaseStats,
    skills: &[SkillId],
    config: &GameConfig,
) -> Player {
    let mut skill_ids = arrayvec::ArrayVec::new();
    for &id in skills.iter().take(GameConfig::MAX_SKILL_SLOTS) {
        skill_ids.push(id);
    }
    Player {
        pos: Position::default(),
        hp: stats.max_hp,
        max_hp: stats.max_hp,
        mp: stats.max_mp,
        max_mp: stats.max_mp,
        torch: stats.max_torch,
        max_torch: stats.max_torch,
        attack: stats.attack,
        defense: stats.defense,
        move_speed: stats.speed,
        attack_speed: stats.speed,
        crit_chance: stats.crit_chance,
        crit_damage: stats.crit_damage,
        evasion: stats.evasion,
        luck: stats.luck,
        hp_regen: stats.hp_regen,
        mp_regen: stats.mp_regen,
        lifesteal: stats.lifesteal,
        thorns: stats.thorns,
        level: 1,
        exp: 0,
        next_level_exp: config.initial_next_level_exp,
        gold: 0,
        skill_slots: stats.skill_slots,
        skill_ids,
        relics: Vec::new(),
        arrows: stats.arrows,
        max_arrows: stats.max_arrows,
        ap: 0,
        effects: Default::default(),
        stunned: 0,
        is_dashing: false,
    }
}

/// Spawn positions and starting rosters for a new floor.
pub struct Placement {
    pub player_start: Position,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

/// Populate a generated floor: player in the first region, portal in the
/// last, enemies and items scattered through the ones between.
pub fn place_entities(
    rooms: &[Room],
    grid: &TileGrid,
    floor: i32,
    player_luck: i32,
    catalog: &MonsterCatalog,
    difficulty: &DifficultyMultipliers,
    dice: &mut dyn DiceRoller,
) -> Placement {
    let mut enemies = Vec::new();
    let mut items = Vec::new();

    let Some(first) = rooms.first() else {
        return Placement {
            player_start: Position::new(1, 1),
            enemies,
            items,
        };
    };
    let player_start = first.center();

    if let Some(last) = rooms.last() {
        items.push(Item {
            pos: last.center(),
            kind: ItemKind::Portal,
        });
    }

    for room in rooms.iter().skip(1).take(rooms.len().saturating_sub(2)) {
        let enemy_count = dice.range_i32(floor + 4) + 3;
        for _ in 0..enemy_count {
            let Some(pos) = open_spot_in_room(room, grid, player_start, &enemies, &items, dice)
            else {
                continue;
            };
            if let Some(def) = catalog.pick(floor, dice) {
                enemies.push(def.spawn(pos, floor, difficulty));
            }
        }

        let item_count = dice.range_i32(2 + player_luck / 10);
        for _ in 0..item_count {
            let Some(pos) = open_spot_in_room(room, grid, player_start, &enemies, &items, dice)
            else {
                continue;
            };
            items.push(Item {
                pos,
                kind: roll_item_kind(dice),
            });
        }
    }

    debug!(floor, enemies = enemies.len(), items = items.len(), "floor populated");
    Placement {
        player_start,
        enemies,
        items,
    }
}

fn is_spot_free(pos: Position, player: Position, enemies: &[Enemy], items: &[Item]) -> bool {
    player != pos && !enemies.iter().any(|e| e.pos == pos) && !items.iter().any(|i| i.pos == pos)
}

/// Up to 20 random probes inside the room interior.
fn open_spot_in_room(
    room: &Room,
    grid: &TileGrid,
    player: Position,
    enemies: &[Enemy],
    items: &[Item],
    dice: &mut dyn DiceRoller,
) -> Option<Position> {
    for _ in 0..20 {
        let pos = Position::new(
            dice.range_i32(room.w - 2) + room.x + 1,
            dice.range_i32(room.h - 2) + room.y + 1,
        );
        if grid.is_walkable(pos) && is_spot_free(pos, player, enemies, items) {
            return Some(pos);
        }
    }
    None
}

/// Weighted item type roll: 50% gold, 20% oil, 15% potion, 15% arrows.
pub fn roll_item_kind(dice: &mut dyn DiceRoller) -> ItemKind {
    match dice.range(100) {
        0..=49 => ItemKind::Gold,
        50..=69 => ItemKind::Oil,
        70..=84 => ItemKind::Potion,
        _ => ItemKind::Arrow,
    }
}

/// Result of stepping onto an item tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickupOutcome {
    pub consumed: bool,
    pub message: String,
    /// Gold added by this pickup, before relic bonuses.
    pub gold_gained: i32,
}

/// Apply an item pickup to the player. Portals are handled by the engine and
/// pass through untouched.
pub fn pick_up_item(
    player: &mut Player,
    kind: ItemKind,
    floor: i32,
    config: &GameConfig,
) -> PickupOutcome {
    match kind {
        ItemKind::Gold => {
            let amount = config.gold_base + floor * config.gold_per_floor;
            player.gold += amount;
            PickupOutcome {
                consumed: true,
                message: format!("You pick up {amount} gold."),
                gold_gained: amount,
            }
        }
        ItemKind::Potion => {
            let amount = player.max_hp * config.potion_heal_percent / 100;
            let healed = amount.min(player.max_hp - player.hp);
            player.heal(amount);
            PickupOutcome {
                consumed: true,
                message: format!("You drink a potion and recover {healed} HP."),
                gold_gained: 0,
            }
        }
        ItemKind::Oil => {
            let amount = player.max_torch * config.oil_restore_percent / 100;
            let restored = amount.min(player.max_torch - player.torch);
            player.restore_torch(amount);
            PickupOutcome {
                consumed: true,
                message: format!("You refill the lamp; the torch recovers {restored}."),
                gold_gained: 0,
            }
        }
        ItemKind::Arrow => {
            let picked = config.arrow_pickup_count.min(player.max_arrows - player.arrows);
            if picked > 0 {
                player.arrows = (player.arrows + config.arrow_pickup_count).min(player.max_arrows);
                PickupOutcome {
                    consumed: true,
                    message: format!("You pick up {picked} arrows."),
                    gold_gained: 0,
                }
            } else {
                PickupOutcome {
                    consumed: false,
                    message: "Your quiver is full.".to_owned(),
                    gold_gained: 0,
                }
            }
        }
        ItemKind::Portal => PickupOutcome {
            consumed: false,
            message: String::new(),
            gold_gained: 0,
        },
    }
}

/// One stat a level up may improve.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "title_case")]
pub enum LevelUpBonus {
    MaxHp,
    HpRegen,
    Defense,
    Attack,
    Speed,
    CritChance,
    CritDamage,
    Evasion,
    MaxMp,
    MpRegen,
    SkillSlots,
    Luck,
    Lifesteal,
    Thorns,
    MaxTorch,
}

impl LevelUpBonus {
    fn base_amount(self) -> i32 {
        match self {
            Self::MaxHp | Self::MaxTorch => 20,
            Self::MaxMp | Self::CritDamage => 5,
            Self::Attack | Self::Thorns => 2,
            _ => 1,
        }
    }
}

/// A concrete choice offered on level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpOption {
    pub bonus: LevelUpBonus,
    pub amount: i32,
}

impl LevelUpOption {
    pub fn describe(&self) -> String {
        format!("{} +{}", self.bonus, self.amount)
    }

    pub fn apply(&self, player: &mut Player) {
        let n = self.amount;
        match self.bonus {
            LevelUpBonus::MaxHp => player.max_hp += n,
            LevelUpBonus::HpRegen => player.hp_regen += n,
            LevelUpBonus::Defense => player.defense += n,
            LevelUpBonus::Attack => player.attack += n,
            LevelUpBonus::Speed => {
                player.move_speed += n;
                player.attack_speed += n;
            }
            LevelUpBonus::CritChance => player.crit_chance += n,
            LevelUpBonus::CritDamage => player.crit_damage += n,
            LevelUpBonus::Evasion => player.evasion += n,
            LevelUpBonus::MaxMp => player.max_mp += n,
            LevelUpBonus::MpRegen => player.mp_regen += n,
            LevelUpBonus::SkillSlots => {
                player.skill_slots =
                    (player.skill_slots + n.max(0) as usize).min(GameConfig::MAX_SKILL_SLOTS)
            }
            LevelUpBonus::Luck => player.luck += n,
            LevelUpBonus::Lifesteal => player.lifesteal += n,
            LevelUpBonus::Thorns => player.thorns += n,
            LevelUpBonus::MaxTorch => player.max_torch += n,
        }
    }
}

/// Five distinct random choices for a pending level up.
pub fn level_up_options(dice: &mut dyn DiceRoller) -> Vec<LevelUpOption> {
    let mut all: Vec<LevelUpBonus> = LevelUpBonus::iter().collect();
    shuffle(dice, &mut all);
    all.into_iter()
        .take(5)
        .map(|bonus| LevelUpOption {
            bonus,
            amount: bonus.base_amount(),
        })
        .collect()
}

pub fn can_level_up(player: &Player) -> bool {
    player.exp >= player.next_level_exp
}

/// Consume the banked exp, raise the level, and heal a slice of max HP. The
/// chosen option is applied separately so relic hooks can rewrite it first.
pub fn perform_level_up(player: &mut Player, config: &GameConfig) {
    player.level += 1;
    player.exp -= player.next_level_exp;
    player.next_level_exp =
        ((player.next_level_exp as f64) * GameConfig::LEVEL_EXP_GROWTH) as i32;
    let heal = player.max_hp * config.level_up_heal_percent / 100;
    player.heal(heal);
}

/// Roll the split special: half the time the dying slime leaves up to two
/// offspring on adjacent open tiles.
pub fn split_offspring(
    dead: &Enemy,
    grid: &TileGrid,
    player: Position,
    enemies: &[Enemy],
    items: &[Item],
    floor: i32,
    catalog: &MonsterCatalog,
    difficulty: &DifficultyMultipliers,
    dice: &mut dyn DiceRoller,
) -> Vec<Enemy> {
    if dead.special != SpecialBehavior::Split || !dice.chance_percent(50) {
        return Vec::new();
    }
    let Some(def) = catalog.get(SPLIT_OFFSPRING) else {
        return Vec::new();
    };

    let mut spawned: Vec<Enemy> = Vec::new();
    for _ in 0..2 {
        let mut dirs = [
            (0, -1),
            (0, 1),
            (-1, 0),
            (1, 0),
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
        ];
        shuffle(dice, &mut dirs);
        for (dx, dy) in dirs {
            let pos = dead.pos.offset(dx, dy);
            if grid.is_walkable(pos)
                && is_spot_free(pos, player, enemies, items)
                && !spawned.iter().any(|e| e.pos == pos)
            {
                spawned.push(def.spawn(pos, floor, difficulty));
                break;
            }
        }
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgDice, SequenceDice};
    use crate::state::Tile;
    use crate::tables::MonsterDefinition;

    fn base_stats() -> PlayerBaseStats {
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

    fn slime_catalog() -> MonsterCatalog {
        MonsterCatalog {
            monsters: vec![
                MonsterDefinition {
                    id: "slime".into(),
                    name: "Slime".into(),
                    glyph: 'm',
                    min_floor: 1,
                    max_floor: 2,
                    hp: [15, 3],
                    attack: [2, 1],
                    defense: [0, 0],
                    exp: [4, 1],
                    evasion: 0,
                    speed: 5,
                    special: SpecialBehavior::Split,
                    attack_range: 1,
                },
                MonsterDefinition {
                    id: SPLIT_OFFSPRING.into(),
                    name: "Mini Slime".into(),
                    glyph: 'm',
                    min_floor: 99,
                    max_floor: 99,
                    hp: [5, 0],
                    attack: [2, 0],
                    defense: [0, 0],
                    exp: [1, 0],
                    evasion: 0,
                    speed: 8,
                    special: SpecialBehavior::None,
                    attack_range: 1,
                },
            ],
        }
    }

    #[test]
    fn gold_pickup_scales_with_floor() {
        let config = GameConfig::new();
        let mut player = new_player(&base_stats(), &[], &config);
        let outcome = pick_up_item(&mut player, ItemKind::Gold, 3, &config);
        assert!(outcome.consumed);
        assert_eq!(outcome.gold_gained, 25);
        assert_eq!(player.gold, 25);
    }

    #[test]
    fn potion_heals_exact_fraction() {
        let config = GameConfig::new();
        let mut player = new_player(&base_stats(), &[], &config);
        player.hp = 100;
        let outcome = pick_up_item(&mut player, ItemKind::Potion, 1, &config);
        assert!(outcome.consumed);
        assert_eq!(player.hp, 140);
    }

    #[test]
    fn full_quiver_rejects_arrows() {
        let config = GameConfig::new();
        let mut player = new_player(&base_stats(), &[], &config);
        player.arrows = player.max_arrows;
        let outcome = pick_up_item(&mut player, ItemKind::Arrow, 1, &config);
        assert!(!outcome.consumed);
        assert_eq!(player.arrows, player.max_arrows);
    }

    #[test]
    fn arrow_pickup_caps_at_quiver() {
        let config = GameConfig::new();
        let mut player = new_player(&base_stats(), &[], &config);
        player.arrows = 19;
        let outcome = pick_up_item(&mut player, ItemKind::Arrow, 1, &config);
        assert!(outcome.consumed);
        assert_eq!(player.arrows, 20);
        assert!(outcome.message.contains('1'));
    }

    #[test]
    fn level_curve_follows_growth_factor() {
        let config = GameConfig::new();
        let mut player = new_player(&base_stats(), &[], &config);
        let mut thresholds = vec![player.next_level_exp];
        for _ in 0..4 {
            player.exp = player.next_level_exp;
            perform_level_up(&mut player, &config);
            thresholds.push(player.next_level_exp);
        }
        assert_eq!(thresholds, vec![10, 16, 25, 40, 64]);
        assert_eq!(player.level, 5);
    }

    #[test]
    fn level_up_offers_five_distinct_options() {
        let mut dice = PcgDice::new(17);
        let options = level_up_options(&mut dice);
        assert_eq!(options.len(), 5);
        for i in 0..options.len() {
            for j in i + 1..options.len() {
                assert_ne!(options[i].bonus, options[j].bonus);
            }
        }
    }

    #[test]
    fn split_roll_fails_half_the_time() {
        let catalog = slime_catalog();
        let grid = TileGrid::filled(10, 10, Tile::Floor);
        let slime = catalog.monsters[0].spawn(Position::new(5, 5), 1, &Default::default());

        // range(100) = 50 fails the 50% check.
        let mut dice = SequenceDice::new([50]);
        let spawned = split_offspring(
            &slime,
            &grid,
            Position::new(1, 1),
            &[],
            &[],
            1,
            &catalog,
            &Default::default(),
            &mut dice,
        );
        assert!(spawned.is_empty());
    }

    #[test]
    fn split_spawns_adjacent_offspring() {
        let catalog = slime_catalog();
        let grid = TileGrid::filled(10, 10, Tile::Floor);
        let slime = catalog.monsters[0].spawn(Position::new(5, 5), 1, &Default::default());

        let mut dice = SequenceDice::new([0]); // pass the 50% roll
        let spawned = split_offspring(
            &slime,
            &grid,
            Position::new(1, 1),
            &[],
            &[],
            1,
            &catalog,
            &Default::default(),
            &mut dice,
        );
        assert_eq!(spawned.len(), 2);
        for mini in &spawned {
            assert_eq!(mini.kind, SPLIT_OFFSPRING);
            assert_eq!(mini.pos.chebyshev(slime.pos), 1);
        }
        assert_ne!(spawned[0].pos, spawned[1].pos);
    }

    #[test]
    fn split_rate_converges_to_half() {
        let catalog = slime_catalog();
        let grid = TileGrid::filled(10, 10, Tile::Floor);
        let slime = catalog.monsters[0].spawn(Position::new(5, 5), 1, &Default::default());

        let mut dice = PcgDice::new(123);
        let mut splits = 0;
        for _ in 0..1000 {
            let spawned = split_offspring(
                &slime,
                &grid,
                Position::new(1, 1),
                &[],
                &[],
                1,
                &catalog,
                &Default::default(),
                &mut dice,
            );
            if spawned.is_empty() {
                continue;
            }
            splits += 1;
            assert!((1..=2).contains(&spawned.len()));
            for mini in &spawned {
                assert_eq!(mini.kind, SPLIT_OFFSPRING);
                assert_eq!(mini.pos.chebyshev(slime.pos), 1);
            }
            if spawned.len() == 2 {
                assert_ne!(spawned[0].pos, spawned[1].pos);
            }
        }
        assert!((450..=550).contains(&splits), "{splits} splits in 1000 deaths");
    }

    #[test]
    fn placement_keeps_player_start_clear() {
        let config = GameConfig::new();
        let grid = TileGrid::filled(config.map_width, config.map_height, Tile::Floor);
        let rooms = vec![
            Room { x: 3, y: 3, w: 6, h: 6 },
            Room { x: 20, y: 20, w: 6, h: 6 },
            Room { x: 40, y: 30, w: 6, h: 6 },
        ];
        let catalog = slime_catalog();
        let mut dice = PcgDice::new(8);
        let placement = place_entities(
            &rooms,
            &grid,
            1,
            10,
            &catalog,
            &Default::default(),
            &mut dice,
        );
        assert_eq!(placement.player_start, Position::new(6, 6));
        assert!(placement
            .items
            .iter()
            .any(|i| i.kind == ItemKind::Portal && i.pos == Position::new(43, 33)));
        assert!(!placement.enemies.is_empty());
        for e in &placement.enemies {
            assert_ne!(e.pos, placement.player_start);
        }
    }
}
