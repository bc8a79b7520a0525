//! Player-facing session operations.
//!
//! Every method validates first and mutates second: an `Err` return means the
//! state is exactly as it was. Soft failures that cost nothing (a skill with
//! no target) come back as `Ok` results instead.

use crate::combat::{perform_attack, Combatant};
use crate::config::GameConfig;
use crate::entity::{can_level_up, pick_up_item};
use crate::relic::{process_attack_relics, process_gold_gain, process_skill_use};
use crate::skill::{cast_skill, SkillContext, SkillId, SkillOutcome, SkillTarget};
use crate::state::{ArrowShot, GameState, ItemKind, LogKind, Position};
use crate::tables::{sample_shop_inventory, ShopCategory, ShopItem};

use super::{ActionError, GameSession, Phase, SkillCastResult};

impl GameSession {
    /// Step one tile. Bumping an enemy attacks it; stepping on an item picks
    /// it up; stepping on the portal descends without spending the action.
    /// While a dash is armed, the step resolves as the dash instead.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Result<(), ActionError> {
        self.expire_arrow_marker();
        self.require_awaiting_input()?;
        if self.state.player.is_dashing {
            return self.dash(dx, dy);
        }
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return Err(ActionError::BadDirection);
        }

        let target = self.state.player.pos.offset(dx, dy);
        if let Some(idx) = self.state.enemy_at(target) {
            self.player_attacks(idx);
            self.commit_action();
            return Ok(());
        }
        if !self.state.grid.is_walkable(target) {
            return Err(ActionError::Blocked);
        }

        self.state.player.pos = target;
        self.recompute_fov();

        if let Some(item_idx) = self.state.item_at(target) {
            let kind = self.state.items[item_idx].kind;
            if kind == ItemKind::Portal {
                self.descend();
                return Ok(());
            }
            let outcome =
                pick_up_item(&mut self.state.player, kind, self.state.floor, &self.config);
            if outcome.consumed {
                self.state.items.remove(item_idx);
                self.state.log.push(LogKind::Item, outcome.message);
                if outcome.gold_gained > 0 {
                    let (total, messages) =
                        process_gold_gain(&self.state.player.relics, outcome.gold_gained);
                    self.state.player.gold += total - outcome.gold_gained;
                    for text in messages {
                        self.state.log.push(LogKind::Skill, text);
                    }
                }
            } else if !outcome.message.is_empty() {
                self.state.log.push(LogKind::System, outcome.message);
            }
        }
        self.commit_action();
        Ok(())
    }

    /// Pass the turn.
    pub fn wait_turn(&mut self) -> Result<(), ActionError> {
        self.expire_arrow_marker();
        self.require_awaiting_input()?;
        self.cancel_dash_if_armed();
        self.state.log.push(LogKind::System, "You hold your ground.");
        self.commit_action();
        Ok(())
    }

    /// Cast the skill equipped in `slot`.
    ///
    /// Insufficient mana is a hard error and mutates nothing. A fizzled cast
    /// costs neither mana nor time. Dash arms instead of committing; its mana
    /// is taken up front and refunded on cancel.
    pub fn use_skill(
        &mut self,
        slot: usize,
        target: SkillTarget,
    ) -> Result<SkillCastResult, ActionError> {
        self.expire_arrow_marker();
        self.require_awaiting_input()?;
        self.cancel_dash_if_armed();

        if slot >= self.state.player.skill_slots {
            return Err(ActionError::EmptySkillSlot(slot));
        }
        let Some(&id) = self.state.player.skill_ids.get(slot) else {
            return Err(ActionError::EmptySkillSlot(slot));
        };
        let cost = id.spec().cost;
        if self.state.player.mp < cost {
            return Err(ActionError::InsufficientMana {
                required: cost,
                available: self.state.player.mp,
            });
        }

        let outcome = {
            let GameState {
                player,
                enemies,
                grid,
                log,
                ground_effects,
                ..
            } = &mut self.state;
            let mut ctx = SkillContext {
                enemies,
                grid: &*grid,
                log,
                ground_effects,
                dice: self.dice.as_mut(),
            };
            cast_skill(id, player, target, &mut ctx)
        };

        match outcome {
            SkillOutcome::Fizzled { .. } => Ok(SkillCastResult::Fizzled),
            SkillOutcome::AwaitDirection => {
                self.state.player.mp -= cost;
                self.state.player.is_dashing = true;
                Ok(SkillCastResult::AwaitingDirection)
            }
            SkillOutcome::Cast => {
                let (free, messages) =
                    process_skill_use(&self.state.player.relics, self.dice.as_mut());
                if !free {
                    self.state.player.mp -= cost;
                }
                for text in messages {
                    self.state.log.push(LogKind::Skill, text);
                }
                self.sweep_dead_enemies();
                self.commit_action();
                Ok(SkillCastResult::Cast)
            }
        }
    }

    /// Resolve an armed dash: up to two tiles, stopping at the first tile
    /// that is blocked or occupied.
    pub fn dash(&mut self, dx: i32, dy: i32) -> Result<(), ActionError> {
        self.expire_arrow_marker();
        self.require_awaiting_input()?;
        if !self.state.player.is_dashing {
            return Err(ActionError::NotDashing);
        }
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return Err(ActionError::BadDirection);
        }

        let mut pos = self.state.player.pos;
        for _ in 0..2 {
            let next = pos.offset(dx, dy);
            if self.state.grid.is_walkable(next)
                && self.state.enemy_at(next).is_none()
                && self.state.item_at(next).is_none()
            {
                pos = next;
            } else {
                break;
            }
        }
        self.state.player.is_dashing = false;
        self.state.player.pos = pos;
        self.recompute_fov();
        self.state.log.push(LogKind::Skill, "You dash across the stones!");
        self.commit_action();
        Ok(())
    }

    /// Call off an armed dash and refund its mana.
    pub fn cancel_dash(&mut self) -> Result<(), ActionError> {
        if !self.state.player.is_dashing {
            return Err(ActionError::NotDashing);
        }
        self.cancel_dash_if_armed();
        Ok(())
    }

    pub(super) fn cancel_dash_if_armed(&mut self) {
        if self.state.player.is_dashing {
            self.state.player.is_dashing = false;
            self.state.player.restore_mp(SkillId::Dash.spec().cost);
            self.state.log.push(LogKind::System, "You abandon the dash.");
        }
    }

    /// Fire an arrow at a visible enemy. Arrow damage is flat and ignores
    /// defense and evasion.
    pub fn shoot_arrow(&mut self, target: Position) -> Result<(), ActionError> {
        self.expire_arrow_marker();
        self.require_awaiting_input()?;
        self.cancel_dash_if_armed();

        if self.state.player.arrows <= 0 {
            return Err(ActionError::OutOfArrows);
        }
        let idx = self.state.enemy_at(target).ok_or(ActionError::NoTarget)?;
        if self.state.player.pos.euclidean(target) > self.config.arrow_range as f64 {
            return Err(ActionError::OutOfRange);
        }
        if !self.state.fov.is_visible(target) {
            return Err(ActionError::NotVisible);
        }

        self.state.player.arrows -= 1;
        let damage = self.config.arrow_damage;
        self.state.enemies[idx].hp -= damage;
        let name = self.state.enemies[idx].name.clone();
        self.state.log.push(
            LogKind::Player,
            format!("Your arrow strikes {name} for {damage} damage!"),
        );
        self.state.arrow_shot = Some(ArrowShot {
            from: self.state.player.pos,
            to: target,
            fired_at_ms: self.clock.now_ms(),
        });
        self.sweep_dead_enemies();
        self.commit_action();
        Ok(())
    }

    /// Pick one of the pending level-up bonuses.
    pub fn choose_level_up(&mut self, index: usize) -> Result<(), ActionError> {
        let options = match &self.state.phase {
            Phase::ChoosingLevelUp { options } => options.clone(),
            Phase::GameOver { .. } => return Err(ActionError::GameOver),
            Phase::AwaitingInput => return Err(ActionError::NoLevelUpPending),
        };
        let option = *options
            .get(index)
            .ok_or(ActionError::InvalidLevelUpOption(index))?;
        option.apply(&mut self.state.player);
        self.state
            .log
            .push(LogKind::System, format!("{}.", option.describe()));
        if can_level_up(&self.state.player) {
            self.enter_level_up();
        } else {
            self.state.phase = Phase::AwaitingInput;
        }
        Ok(())
    }

    /// Roll the merchant's stock for this floor. Browsing costs nothing.
    pub fn open_shop(&mut self) -> Result<&[ShopItem], ActionError> {
        self.require_awaiting_input()?;
        if !GameConfig::is_shop_floor(self.state.floor) {
            return Err(ActionError::NoShopHere);
        }
        self.shop_stock =
            sample_shop_inventory(&self.content.shop, self.state.floor, self.dice.as_mut());
        Ok(&self.shop_stock)
    }

    /// Stock rolled by the last [`GameSession::open_shop`].
    pub fn shop_stock(&self) -> &[ShopItem] {
        &self.shop_stock
    }

    /// Buy from the open shop. Purchases cost gold but no action points.
    /// Permanents and specials leave the stock once bought.
    pub fn purchase(&mut self, item_id: &str) -> Result<String, ActionError> {
        self.require_awaiting_input()?;
        if !GameConfig::is_shop_floor(self.state.floor) {
            return Err(ActionError::NoShopHere);
        }
        let item = self
            .shop_stock
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownShopItem(item_id.to_owned()))?;
        if self.state.player.gold < item.price {
            return Err(ActionError::CannotAfford);
        }
        if !item.effect.can_buy(&self.state.player) {
            return Err(ActionError::UnavailableItem);
        }

        self.state.player.gold -= item.price;
        let outcome = item.effect.apply(&mut self.state.player, self.dice.as_mut());
        if item.category != ShopCategory::Consumable {
            self.shop_stock.retain(|i| i.id != item.id);
        }
        self.state
            .log
            .push(LogKind::Item, format!("You buy {}. {}", item.name, outcome));
        Ok(outcome)
    }

    /// Equip a skill into a free slot (after a skill reset or slot purchase).
    pub fn learn_skill(&mut self, id: SkillId) -> Result<(), ActionError> {
        if self.state.player.knows_skill(id) {
            return Err(ActionError::AlreadyKnown);
        }
        if self.state.player.skill_ids.len() >= self.state.player.skill_slots {
            return Err(ActionError::NoFreeSkillSlot);
        }
        let _ = self.state.player.skill_ids.try_push(id);
        self.state
            .log
            .push(LogKind::System, format!("You learn {}.", id.spec().name));
        Ok(())
    }

    fn player_attacks(&mut self, idx: usize) {
        let name = self.state.enemies[idx].name.clone();
        let result = perform_attack(
            Combatant::Player(&mut self.state.player),
            Combatant::Enemy(&mut self.state.enemies[idx]),
            self.dice.as_mut(),
        );
        if result.evaded {
            self.state
                .log
                .push(LogKind::System, format!("{name} evades your attack!"));
            return;
        }

        // Relics rework the applied damage; only the difference lands twice.
        let relics = self.state.player.relics.clone();
        let adjusted = process_attack_relics(
            &mut self.state.player,
            &relics,
            &mut self.state.enemies,
            idx,
            result.damage,
            self.dice.as_mut(),
        );
        let extra = adjusted.final_damage - result.damage;
        if extra != 0 {
            self.state.enemies[idx].hp -= extra;
        }

        let text = if result.is_crit {
            format!("Critical! You hit {name} for {} damage!", adjusted.final_damage)
        } else {
            format!("You hit {name} for {} damage!", adjusted.final_damage)
        };
        self.state.log.push(LogKind::Player, text);
        if result.lifesteal_healed > 0 {
            self.state.log.push(
                LogKind::Player,
                format!("You siphon {} HP.", result.lifesteal_healed),
            );
        }
        for message in adjusted.messages {
            self.state.log.push(LogKind::Skill, message);
        }
        self.sweep_dead_enemies();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::super::{GameOverCause, NewGame};
    use super::*;
    use crate::clock::ManualClock;
    use crate::relic::RelicId;
    use crate::rng::PcgDice;
    use crate::state::{Enemy, FovGrid, Item, SpecialBehavior, Tile, TileGrid};
    use crate::tables::{
        DifficultyMultipliers, GameContent, MonsterCatalog, MonsterDefinition, PlayerBaseStats,
        ShopEffect,
    };

    fn base_stats() -> PlayerBaseStats {
        PlayerBaseStats {
            max_hp: 200,
            max_mp: 30,
            max_torch: 500,
            attack: 20,
            defense: 0,
            speed: 10,
            crit_chance: 0,
            crit_damage: 200,
            evasion: 0,
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

    fn content() -> GameContent {
        GameContent {
            // min_floor 99 keeps natural spawns out of the arena tests.
            monsters: MonsterCatalog {
                monsters: vec![MonsterDefinition {
                    id: "rat".into(),
                    name: "Rat".into(),
                    glyph: 'r',
                    min_floor: 99,
                    max_floor: 99,
                    hp: [10, 0],
                    attack: [5, 0],
                    defense: [0, 0],
                    exp: [5, 0],
                    evasion: 0,
                    speed: 10,
                    special: SpecialBehavior::None,
                    attack_range: 1,
                }],
            },
            difficulty: DifficultyMultipliers::default(),
            shop: vec![
                crate::tables::ShopItem {
                    id: "potion_small".into(),
                    name: "Small Potion".into(),
                    description: "Restores 30% HP.".into(),
                    price: 30,
                    category: ShopCategory::Consumable,
                    effect: ShopEffect::HealPercent(30),
                },
                crate::tables::ShopItem {
                    id: "whetstone".into(),
                    name: "Whetstone".into(),
                    description: "Attack +3.".into(),
                    price: 100,
                    category: ShopCategory::Permanent,
                    effect: ShopEffect::BoostAttack(3),
                },
            ],
            default_stats: base_stats(),
        }
    }

    fn new_game(seed: u64) -> NewGame {
        NewGame {
            seed,
            skills: vec![SkillId::Fireball, SkillId::Dash],
            stats: None,
        }
    }

    /// A session rebuilt onto a bare 20x20 arena with nothing in it.
    fn arena(seed: u64) -> GameSession {
        let mut session = GameSession::with_parts(
            content(),
            GameConfig::new(),
            new_game(seed),
            Box::new(PcgDice::new(seed)),
            Box::new(ManualClock::new()),
        );
        let mut grid = TileGrid::filled(20, 20, Tile::Floor);
        for x in 0..20 {
            grid.set(Position::new(x, 0), Tile::Wall);
            grid.set(Position::new(x, 19), Tile::Wall);
        }
        for y in 0..20 {
            grid.set(Position::new(0, y), Tile::Wall);
            grid.set(Position::new(19, y), Tile::Wall);
        }
        session.state.grid = grid;
        session.state.fov = FovGrid::new(20, 20);
        session.state.enemies.clear();
        session.state.items.clear();
        session.state.player.pos = Position::new(10, 10);
        session.recompute_fov();
        session
    }

    fn rat_at(pos: Position, hp: i32) -> Enemy {
        let mut enemy = content().monsters.monsters[0].spawn(
            pos,
            0,
            &DifficultyMultipliers::default(),
        );
        enemy.hp = hp;
        enemy.max_hp = hp.max(enemy.max_hp);
        enemy
    }

    #[test]
    fn new_session_awaits_input_on_a_walkable_tile() {
        let session = GameSession::new(content(), GameConfig::new(), new_game(7));
        let state = session.state();
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert!(state.fov.is_visible(state.player.pos));
        assert_eq!(state.floor, 1);
        assert_eq!(state.turn_count, 0);
        assert!(!state.log.is_empty());
    }

    #[test]
    fn blocked_moves_cost_nothing() {
        let mut session = arena(1);
        session.state.player.pos = Position::new(1, 1);
        let err = session.move_player(-1, 0);
        assert_eq!(err, Err(ActionError::Blocked));
        assert_eq!(session.state.turn_count, 0);
        assert_eq!(session.state.phase, Phase::AwaitingInput);
    }

    #[test]
    fn open_move_commits_the_action() {
        let mut session = arena(2);
        session.move_player(1, 0).unwrap();
        assert_eq!(session.state.player.pos, Position::new(11, 10));
        assert!(session.state.turn_count > 0);
        assert_eq!(session.state.phase, Phase::AwaitingInput);
    }

    #[test]
    fn bumping_an_enemy_attacks_it() {
        let mut session = arena(3);
        session.state.enemies.push(rat_at(Position::new(11, 10), 5));
        session.move_player(1, 0).unwrap();
        assert!(session.state.enemies.is_empty(), "the rat died to one hit");
        assert_eq!(session.state.player.exp, 5);
        assert_eq!(session.state.player.pos, Position::new(10, 10));
    }

    #[test]
    fn insufficient_mana_is_rejected_without_mutation() {
        let mut session = arena(4);
        session.state.player.mp = 5;
        let err = session.use_skill(0, SkillTarget::Auto);
        assert_eq!(
            err,
            Err(ActionError::InsufficientMana {
                required: 10,
                available: 5
            })
        );
        assert_eq!(session.state.player.mp, 5);
        assert_eq!(session.state.turn_count, 0);
    }

    #[test]
    fn fizzled_cast_spends_nothing() {
        let mut session = arena(5);
        let result = session.use_skill(0, SkillTarget::Auto).unwrap();
        assert_eq!(result, SkillCastResult::Fizzled);
        assert_eq!(session.state.player.mp, 30);
        assert_eq!(session.state.turn_count, 0);
    }

    #[test]
    fn successful_cast_spends_mana_and_time() {
        let mut session = arena(6);
        session.state.enemies.push(rat_at(Position::new(12, 10), 50));
        let result = session.use_skill(0, SkillTarget::Auto).unwrap();
        assert_eq!(result, SkillCastResult::Cast);
        assert_eq!(session.state.player.mp, 20);
        // Fireball at level 1 deals 12 true damage.
        assert_eq!(session.state.enemies[0].hp, 38);
        assert!(session.state.turn_count > 0);
    }

    #[test]
    fn empty_slot_is_an_error() {
        let mut session = arena(7);
        assert_eq!(
            session.use_skill(5, SkillTarget::Auto),
            Err(ActionError::EmptySkillSlot(5))
        );
    }

    #[test]
    fn dash_arms_resolves_and_cancels() {
        let mut session = arena(8);
        let result = session.use_skill(1, SkillTarget::Auto).unwrap();
        assert_eq!(result, SkillCastResult::AwaitingDirection);
        assert_eq!(session.state.player.mp, 25);
        assert!(session.state.player.is_dashing);

        // A directional move resolves the dash two tiles out.
        session.move_player(1, 0).unwrap();
        assert_eq!(session.state.player.pos, Position::new(12, 10));
        assert!(!session.state.player.is_dashing);

        // Arm again and cancel; the mana comes back.
        session.use_skill(1, SkillTarget::Auto).unwrap();
        session.cancel_dash().unwrap();
        assert_eq!(session.state.player.mp, 25);
        assert!(!session.state.player.is_dashing);
        assert_eq!(session.cancel_dash(), Err(ActionError::NotDashing));
    }

    #[test]
    fn dash_stops_at_obstacles() {
        let mut session = arena(9);
        session.state.enemies.push(rat_at(Position::new(12, 10), 50));
        session.use_skill(1, SkillTarget::Auto).unwrap();
        session.dash(1, 0).unwrap();
        assert_eq!(session.state.player.pos, Position::new(11, 10));
    }

    #[test]
    fn arrow_requires_target_range_and_sight() {
        let mut session = arena(10);
        assert_eq!(
            session.shoot_arrow(Position::new(13, 10)),
            Err(ActionError::NoTarget)
        );

        session.state.enemies.push(rat_at(Position::new(14, 10), 50));
        session.state.grid.set(Position::new(12, 10), Tile::Wall);
        session.recompute_fov();
        assert_eq!(
            session.shoot_arrow(Position::new(14, 10)),
            Err(ActionError::NotVisible)
        );

        session.state.player.arrows = 0;
        assert_eq!(
            session.shoot_arrow(Position::new(14, 10)),
            Err(ActionError::OutOfArrows)
        );
        assert_eq!(session.state.turn_count, 0);
    }

    #[test]
    fn arrow_hits_and_the_marker_expires() {
        let clock = Rc::new(ManualClock::new());
        let mut session = GameSession::with_parts(
            content(),
            GameConfig::new(),
            new_game(11),
            Box::new(PcgDice::new(11)),
            Box::new(Rc::clone(&clock)),
        );
        session.state.grid = TileGrid::filled(20, 20, Tile::Floor);
        session.state.fov = FovGrid::new(20, 20);
        session.state.enemies.clear();
        session.state.items.clear();
        session.state.player.pos = Position::new(10, 10);
        session.recompute_fov();
        session.state.enemies.push(rat_at(Position::new(13, 10), 50));

        session.shoot_arrow(Position::new(13, 10)).unwrap();
        assert_eq!(session.state.player.arrows, 4);
        assert_eq!(session.state.enemies[0].hp, 35);
        assert!(session.state.arrow_shot.is_some());

        clock.advance(300);
        assert!(session.snapshot().arrow_shot.is_none());
    }

    #[test]
    fn torch_burnout_ends_the_run() {
        let mut session = arena(12);
        session.state.player.torch = 1;
        session.wait_turn().unwrap();
        assert_eq!(
            session.state.phase,
            Phase::GameOver {
                cause: GameOverCause::TorchExtinguished
            }
        );
        assert_eq!(session.move_player(1, 0), Err(ActionError::GameOver));
    }

    #[test]
    fn level_up_pauses_for_a_choice() {
        let mut session = arena(13);
        session.state.player.exp = session.state.player.next_level_exp;
        session.wait_turn().unwrap();

        let Phase::ChoosingLevelUp { options } = session.state.phase.clone() else {
            panic!("expected a level-up choice");
        };
        assert_eq!(options.len(), 5);
        assert_eq!(session.state.player.level, 2);
        assert_eq!(session.move_player(1, 0), Err(ActionError::LevelUpPending));

        session.choose_level_up(0).unwrap();
        assert_eq!(session.state.phase, Phase::AwaitingInput);
        assert_eq!(
            session.choose_level_up(0),
            Err(ActionError::NoLevelUpPending)
        );
    }

    #[test]
    fn gold_pickup_routes_through_relic_bonuses() {
        let mut session = arena(14);
        session.grant_relic(RelicId::GreedIncarnate);
        session.state.items.push(Item {
            pos: Position::new(11, 10),
            kind: ItemKind::Gold,
        });
        session.move_player(1, 0).unwrap();
        // Base 10 + floor 1 * 5, doubled by Greed Incarnate.
        assert_eq!(session.state.player.gold, 30);
        assert!(session.state.items.is_empty());
    }

    #[test]
    fn portal_descends_without_spending_time() {
        let mut session = arena(15);
        session.state.items.push(Item {
            pos: Position::new(11, 10),
            kind: ItemKind::Portal,
        });
        session.move_player(1, 0).unwrap();
        assert_eq!(session.state.floor, 2);
        assert_eq!(session.state.turn_count, 0);
        assert_eq!(session.state.phase, Phase::AwaitingInput);
        assert!(session.state.ground_effects.is_empty());
    }

    #[test]
    fn stunned_enemies_skip_their_actions() {
        let mut session = arena(16);
        let mut rat = rat_at(Position::new(11, 10), 50);
        rat.stunned = 2;
        session.state.enemies.push(rat);

        session.wait_turn().unwrap();
        session.wait_turn().unwrap();
        assert_eq!(session.state.player.hp, 200, "both attacks were stunned away");

        session.wait_turn().unwrap();
        assert_eq!(session.state.player.hp, 195);
    }

    #[test]
    fn shop_opens_on_shop_floors_only() {
        let mut session = arena(17);
        session.state.player.gold = 100;
        let ids: Vec<String> = session
            .open_shop()
            .unwrap()
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert!(ids.contains(&"potion_small".to_owned()));

        session.state.player.hp = 100;
        session.purchase("potion_small").unwrap();
        assert_eq!(session.state.player.gold, 70);
        assert_eq!(session.state.player.hp, 160);

        assert_eq!(
            session.purchase("no_such_item"),
            Err(ActionError::UnknownShopItem("no_such_item".to_owned()))
        );
        session.state.player.gold = 0;
        assert_eq!(
            session.purchase("potion_small"),
            Err(ActionError::CannotAfford)
        );

        session.state.floor = 2;
        assert_eq!(session.open_shop().err(), Some(ActionError::NoShopHere));
    }

    #[test]
    fn snapshot_round_trips_through_serde() {
        let mut session = arena(18);
        session.state.enemies.push(rat_at(Position::new(12, 12), 10));
        let json = serde_json::to_string(session.state()).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, session.state());
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }
}
