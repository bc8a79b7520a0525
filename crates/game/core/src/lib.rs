//! Deterministic dungeon-crawler simulation core.
//!
//! `crawl-core` defines the canonical rules of the crawl: map generation and
//! field of view, entity factories, combat resolution, the skill and relic
//! effect pipelines, and the action-point turn scheduler. All state mutation
//! flows through [`engine::GameSession`]; rendering and input layers consume
//! the snapshot it exposes and submit discrete player actions.
pub mod clock;
pub mod combat;
pub mod config;
pub mod engine;
pub mod entity;
pub mod map;
pub mod relic;
pub mod rng;
pub mod skill;
pub mod state;
pub mod tables;

pub use clock::{Clock, ManualClock, SystemClock};
pub use combat::{CombatResult, Combatant, EnemyTurnOutcome};
pub use config::GameConfig;
pub use engine::{ActionError, GameOverCause, GameSession, NewGame, Phase, SkillCastResult};
pub use entity::{LevelUpBonus, LevelUpOption, PickupOutcome};
pub use map::{FovGrid, TileGrid};
pub use relic::{OwnedRelic, RelicId, RelicRarity, RelicSpec, RelicTrigger};
pub use rng::{shuffle, DiceRoller, PcgDice, SequenceDice};
pub use skill::{SkillContext, SkillId, SkillKind, SkillOutcome, SkillSpec, SkillTarget};
pub use state::{
    ActiveEffect, ArrowShot, Enemy, EventLog, GameState, GroundEffect, GroundEffectKind, Item,
    ItemKind, LogEntry, LogKind, Player, Position, Room, SpecialBehavior, Tile,
};
pub use tables::{
    sample_shop_inventory, DifficultyMultipliers, GameContent, MonsterCatalog,
    MonsterDefinition, PlayerBaseStats, ShopCategory, ShopEffect, ShopItem,
};
