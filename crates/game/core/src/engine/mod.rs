//! Turn engine.
//!
//! [`GameSession`] is the only mutation surface: it owns the state, the
//! content tables, the dice, and the clock, and exposes one method per player
//! action. Committing an action deducts action points and runs the scheduler
//! until the player may act again, the run ends, or a level-up choice is due.
//!
//! Scheduling is action-point based. Every committed action costs
//! [`GameConfig::action_cost`] AP; while nobody has enough, the turn counter
//! advances and every living actor gains its effective move speed. Ties go to
//! the player, then to earlier enemies.

mod actions;
mod errors;

pub use errors::ActionError;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::combat::{
    consume_stun, decide_enemy_turn, perform_attack, update_effects, Combatant, EnemyTurnOutcome,
};
use crate::config::GameConfig;
use crate::entity::{
    can_level_up, level_up_options, new_player, perform_level_up, place_entities,
    split_offspring, LevelUpOption,
};
use crate::map::{compute_fov, generate_floor};
use crate::relic::{
    process_damage_taken, process_gold_gain, process_kill_relics, process_level_up_relics,
    random_relic, OwnedRelic, RelicId,
};
use crate::rng::{DiceRoller, PcgDice};
use crate::skill::SkillId;
use crate::state::{
    EventLog, FovGrid, GameState, LogKind, SpecialBehavior,
};
use crate::tables::{GameContent, PlayerBaseStats, ShopItem};

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverCause {
    /// The torch burned down to nothing.
    TorchExtinguished,
    /// The player's HP reached zero.
    Slain,
}

/// What the session is waiting for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The player may act.
    AwaitingInput,
    /// A level was gained; one of these bonuses must be chosen first.
    ChoosingLevelUp { options: Vec<LevelUpOption> },
    GameOver { cause: GameOverCause },
}

/// How a skill cast resolved at the session level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillCastResult {
    /// The skill fired and the action was committed.
    Cast,
    /// Dash is armed; the next directional input resolves it.
    AwaitingDirection,
    /// No valid target. Nothing was spent and no time passed.
    Fizzled,
}

/// Parameters for starting a run.
#[derive(Clone, Debug)]
pub struct NewGame {
    pub seed: u64,
    /// Starting skills, capped at the player's slot count.
    pub skills: Vec<SkillId>,
    /// Overrides the content default stat block when set.
    pub stats: Option<PlayerBaseStats>,
}

/// A run in progress.
pub struct GameSession {
    state: GameState,
    content: GameContent,
    config: GameConfig,
    dice: Box<dyn DiceRoller>,
    clock: Box<dyn Clock>,
    shop_stock: Vec<ShopItem>,
}

enum Actor {
    Player,
    Enemy(usize),
}

impl GameSession {
    /// Start a run with the real clock and a seeded PCG stream.
    pub fn new(content: GameContent, config: GameConfig, new_game: NewGame) -> Self {
        let dice = Box::new(PcgDice::new(new_game.seed));
        Self::with_parts(content, config, new_game, dice, Box::new(SystemClock::new()))
    }

    /// Start a run with injected dice and clock.
    pub fn with_parts(
        content: GameContent,
        config: GameConfig,
        new_game: NewGame,
        mut dice: Box<dyn DiceRoller>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let stats = new_game.stats.unwrap_or(content.default_stats);
        let mut player = new_player(&stats, &new_game.skills, &config);

        let floor = 1;
        let generated = generate_floor(&config, dice.as_mut());
        let placement = place_entities(
            &generated.rooms,
            &generated.grid,
            floor,
            player.luck,
            &content.monsters,
            &content.difficulty,
            dice.as_mut(),
        );
        player.pos = placement.player_start;

        let mut fov = FovGrid::new(config.map_width, config.map_height);
        compute_fov(&generated.grid, &mut fov, player.pos, config.fov_radius);

        let mut log = EventLog::new(config.max_log_entries);
        log.push(
            LogKind::System,
            "You descend into the crawl. Keep the torch burning.",
        );
        if GameConfig::is_shop_floor(floor) {
            log.push(LogKind::System, "A merchant has set up camp nearby.");
        }

        let state = GameState {
            grid: generated.grid,
            fov,
            rooms: generated.rooms,
            player,
            enemies: placement.enemies,
            items: placement.items,
            ground_effects: Vec::new(),
            floor,
            turn_count: 0,
            phase: Phase::AwaitingInput,
            log,
            arrow_shot: None,
        };
        Self {
            state,
            content,
            config,
            dice,
            clock,
            shop_stock: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current state with presentation-only staleness (the arrow marker)
    /// pruned against the clock.
    pub fn snapshot(&mut self) -> &GameState {
        self.expire_arrow_marker();
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn content(&self) -> &GameContent {
        &self.content
    }

    /// Add a relic, stacking duplicates.
    pub fn grant_relic(&mut self, id: RelicId) {
        match self.state.player.relics.iter_mut().find(|r| r.id == id) {
            Some(owned) => owned.stacks += 1,
            None => self.state.player.relics.push(OwnedRelic { id, stacks: 1 }),
        }
        self.state
            .log
            .push(LogKind::Item, format!("You claim the {}!", id.spec().name));
    }

    /// Add a rarity-weighted random relic.
    pub fn grant_random_relic(&mut self) -> RelicId {
        let id = random_relic(self.dice.as_mut());
        self.grant_relic(id);
        id
    }

    // ===== scheduler =====

    fn require_awaiting_input(&self) -> Result<(), ActionError> {
        match self.state.phase {
            Phase::AwaitingInput => Ok(()),
            Phase::ChoosingLevelUp { .. } => Err(ActionError::LevelUpPending),
            Phase::GameOver { .. } => Err(ActionError::GameOver),
        }
    }

    fn commit_action(&mut self) {
        self.state.player.ap -= self.config.action_cost;
        self.run_turns();
    }

    fn next_actor(&self) -> Actor {
        let mut best = Actor::Player;
        let mut best_ap = self.state.player.ap;
        for (i, enemy) in self.state.enemies.iter().enumerate() {
            if enemy.ap > best_ap {
                best = Actor::Enemy(i);
                best_ap = enemy.ap;
            }
        }
        best
    }

    fn actor_ap(&self, actor: &Actor) -> i32 {
        match actor {
            Actor::Player => self.state.player.ap,
            Actor::Enemy(idx) => self.state.enemies[*idx].ap,
        }
    }

    /// Advance the world until the player may act again or the run ends.
    fn run_turns(&mut self) {
        loop {
            if matches!(self.state.phase, Phase::GameOver { .. }) {
                return;
            }

            while self.actor_ap(&self.next_actor()) < self.config.action_cost {
                self.state.turn_count += 1;
                let gain = self.state.player.effective_move_speed();
                self.state.player.ap += gain;
                for enemy in &mut self.state.enemies {
                    enemy.ap += enemy.effective_move_speed();
                }
            }

            match self.next_actor() {
                Actor::Player => {
                    if self.take_player_turn() {
                        return;
                    }
                }
                Actor::Enemy(idx) => self.take_enemy_turn(idx),
            }
        }
    }

    /// Player upkeep. Returns false when the turn was lost to a stun and the
    /// scheduler should keep running.
    fn take_player_turn(&mut self) -> bool {
        for name in update_effects(&mut self.state.player.effects) {
            self.state
                .log
                .push(LogKind::System, format!("{name} wears off."));
        }
        if consume_stun(&mut self.state.player.stunned) {
            self.state
                .log
                .push(LogKind::System, "You are stunned and lose the turn!");
            self.state.player.ap -= self.config.action_cost;
            return false;
        }

        if self.state.turn_count % self.config.regen_interval == 0 {
            if self.state.player.hp_regen > 0 && self.state.player.hp < self.state.player.max_hp {
                let n = self.state.player.hp_regen;
                self.state.player.heal(n);
                self.state
                    .log
                    .push(LogKind::System, format!("You recover {n} HP."));
            }
            if self.state.player.mp_regen > 0 && self.state.player.mp < self.state.player.max_mp {
                let n = self.state.player.mp_regen;
                self.state.player.restore_mp(n);
                self.state
                    .log
                    .push(LogKind::System, format!("You recover {n} MP."));
            }
        }

        self.state.player.torch -= 1;
        if self.state.player.torch <= 0 {
            self.state
                .log
                .push(LogKind::System, "The torch gutters out. Darkness swallows you.");
            info!(turn = self.state.turn_count, "torch extinguished");
            self.state.phase = Phase::GameOver {
                cause: GameOverCause::TorchExtinguished,
            };
            return true;
        }

        self.tick_ground_effects();

        if can_level_up(&self.state.player) {
            self.enter_level_up();
        } else {
            self.state.phase = Phase::AwaitingInput;
        }
        true
    }

    /// Lingering skill zones damage enemies standing in them once per player
    /// turn. Zone kills grant nothing and never split.
    fn tick_ground_effects(&mut self) {
        let mut messages = Vec::new();
        for effect in &mut self.state.ground_effects {
            for enemy in &mut self.state.enemies {
                if enemy.hp > 0 && effect.covers(enemy.pos) {
                    enemy.hp -= effect.tick_damage;
                    messages.push(format!(
                        "{} takes {} damage from the {}.",
                        enemy.name, effect.tick_damage, effect.kind
                    ));
                    if enemy.hp <= 0 {
                        messages.push(format!("{} succumbs to the {}.", enemy.name, effect.kind));
                    }
                }
            }
            effect.duration -= 1;
        }
        for text in messages {
            self.state.log.push(LogKind::Skill, text);
        }
        self.state.ground_effects.retain(|g| g.duration > 0);
        self.state.enemies.retain(|e| e.hp > 0);
    }

    fn take_enemy_turn(&mut self, idx: usize) {
        let _ = update_effects(&mut self.state.enemies[idx].effects);
        if consume_stun(&mut self.state.enemies[idx].stunned) {
            if self.state.enemies[idx].stunned == 0
                && self.state.fov.is_visible(self.state.enemies[idx].pos)
            {
                let name = self.state.enemies[idx].name.clone();
                self.state
                    .log
                    .push(LogKind::Enemy, format!("{name} shakes off the stun."));
            }
            self.state.enemies[idx].ap -= self.config.action_cost;
            return;
        }

        let outcome = decide_enemy_turn(
            idx,
            &self.state.enemies,
            &self.state.player,
            &self.state.grid,
            self.config.fov_radius,
            self.dice.as_mut(),
        );
        let mut survived = true;
        match outcome {
            EnemyTurnOutcome::Idle => {}
            EnemyTurnOutcome::Move(pos) => self.state.enemies[idx].pos = pos,
            EnemyTurnOutcome::Heal { ally, amount } => {
                let healed = {
                    let target = &mut self.state.enemies[ally];
                    let before = target.hp;
                    target.hp = (target.hp + amount).min(target.max_hp);
                    target.hp - before
                };
                if self.state.fov.is_visible(self.state.enemies[ally].pos) {
                    let healer = self.state.enemies[idx].name.clone();
                    let target = self.state.enemies[ally].name.clone();
                    self.state.log.push(
                        LogKind::Enemy,
                        format!("{healer} mends {target} for {healed} HP."),
                    );
                }
            }
            EnemyTurnOutcome::Attack => survived = self.enemy_attacks_player(idx),
        }
        if survived {
            self.state.enemies[idx].ap -= self.config.action_cost;
        }
    }

    /// Returns false when thorns killed the attacker.
    fn enemy_attacks_player(&mut self, idx: usize) -> bool {
        let name = self.state.enemies[idx].name.clone();
        let splash = self.state.enemies[idx].special == SpecialBehavior::RangedAoe;
        let result = perform_attack(
            Combatant::Enemy(&mut self.state.enemies[idx]),
            Combatant::Player(&mut self.state.player),
            self.dice.as_mut(),
        );
        if result.evaded {
            self.state
                .log
                .push(LogKind::Player, format!("You evade {name}'s attack!"));
            return true;
        }

        // The raw hit already landed; relics rework it after the fact and the
        // difference is refunded.
        let relics = self.state.player.relics.clone();
        let adjusted = process_damage_taken(&mut self.state.player, &relics, result.damage);
        if !adjusted.revived {
            self.state.player.hp += result.damage - adjusted.final_damage;
        }
        let verb = if splash { "blasts" } else { "hits" };
        self.state.log.push(
            LogKind::Enemy,
            format!("{name} {verb} you for {} damage!", adjusted.final_damage),
        );
        for text in adjusted.messages {
            self.state.log.push(LogKind::Skill, text);
        }

        let mut survived = true;
        if result.thorns_damage > 0 {
            self.state.log.push(
                LogKind::Player,
                format!("Your thorns tear into {name} for {}!", result.thorns_damage),
            );
            if result.attacker_died {
                self.state
                    .log
                    .push(LogKind::Player, format!("{name} is slain by your thorns!"));
                self.state.enemies.remove(idx);
                survived = false;
            }
        }

        if self.state.player.hp <= 0 {
            self.state
                .log
                .push(LogKind::System, "You fall, and the crawl claims another.");
            info!(floor = self.state.floor, "player slain");
            self.state.phase = Phase::GameOver {
                cause: GameOverCause::Slain,
            };
        }
        survived
    }

    // ===== kill pipeline =====

    /// Reap every enemy at or below zero HP, in roster order. Chain kills
    /// (splash relics, area skills) all flow through here.
    fn sweep_dead_enemies(&mut self) {
        while let Some(idx) = self.state.enemies.iter().position(|e| e.hp <= 0) {
            self.kill_enemy(idx);
        }
    }

    fn kill_enemy(&mut self, idx: usize) {
        let dead = self.state.enemies.remove(idx);
        self.state.log.push(
            LogKind::Player,
            format!("{} is defeated! You gain {} exp.", dead.name, dead.exp),
        );
        self.state.player.exp += dead.exp;

        let spawned = split_offspring(
            &dead,
            &self.state.grid,
            self.state.player.pos,
            &self.state.enemies,
            &self.state.items,
            self.state.floor,
            &self.content.monsters,
            &self.content.difficulty,
            self.dice.as_mut(),
        );
        if !spawned.is_empty() {
            self.state
                .log
                .push(LogKind::Enemy, format!("{} splits apart!", dead.name));
            self.state.enemies.extend(spawned);
        }

        let relics = self.state.player.relics.clone();
        let (gold, messages) = process_kill_relics(&mut self.state.player, &relics);
        for text in messages {
            self.state.log.push(LogKind::Skill, text);
        }
        if gold > 0 {
            self.award_gold(gold);
        }
    }

    /// Credit gold that has not been added yet, relic bonuses included.
    fn award_gold(&mut self, base: i32) {
        let (total, messages) = process_gold_gain(&self.state.player.relics, base);
        self.state.player.gold += total;
        for text in messages {
            self.state.log.push(LogKind::Skill, text);
        }
    }

    // ===== level ups and floors =====

    fn enter_level_up(&mut self) {
        perform_level_up(&mut self.state.player, &self.config);
        self.state.log.push(
            LogKind::System,
            format!("You reach level {}!", self.state.player.level),
        );
        let (factor, messages) = process_level_up_relics(&self.state.player.relics);
        for text in messages {
            self.state.log.push(LogKind::Skill, text);
        }
        let mut options = level_up_options(self.dice.as_mut());
        if factor > 1 {
            for option in &mut options {
                option.amount *= factor;
            }
        }
        self.state.phase = Phase::ChoosingLevelUp { options };
    }

    /// Move to the next floor. Stepping on a portal costs no action points.
    fn descend(&mut self) {
        self.state.floor += 1;
        let floor = self.state.floor;
        let generated = generate_floor(&self.config, self.dice.as_mut());
        let placement = place_entities(
            &generated.rooms,
            &generated.grid,
            floor,
            self.state.player.luck,
            &self.content.monsters,
            &self.content.difficulty,
            self.dice.as_mut(),
        );
        self.state.grid = generated.grid;
        self.state.rooms = generated.rooms;
        self.state.enemies = placement.enemies;
        self.state.items = placement.items;
        self.state.ground_effects.clear();
        self.state.arrow_shot = None;
        self.state.player.pos = placement.player_start;
        self.state.fov = FovGrid::new(self.config.map_width, self.config.map_height);
        self.recompute_fov();
        self.shop_stock.clear();

        self.state
            .log
            .push(LogKind::System, format!("You step through the portal. Floor {floor}."));
        if GameConfig::is_shop_floor(floor) {
            self.state
                .log
                .push(LogKind::System, "A merchant has set up camp nearby.");
        }
        debug!(floor, enemies = self.state.enemies.len(), "descended");
    }

    fn recompute_fov(&mut self) {
        compute_fov(
            &self.state.grid,
            &mut self.state.fov,
            self.state.player.pos,
            self.config.fov_radius,
        );
    }

    fn expire_arrow_marker(&mut self) {
        if let Some(shot) = self.state.arrow_shot {
            if self.clock.now_ms().saturating_sub(shot.fired_at_ms) >= self.config.arrow_marker_ms
            {
                self.state.arrow_shot = None;
            }
        }
    }
}
