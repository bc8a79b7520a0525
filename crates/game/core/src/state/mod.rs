//! Canonical game state.
//!
//! Everything a rendering or persistence layer needs lives here: the tile
//! grid, visibility, entities, timed effects, and the event log. The whole
//! tree is serde-serializable so a session snapshot round-trips losslessly.

mod common;
mod effects;
mod entities;
mod log;
mod world;

pub use common::Position;
pub use effects::{ActiveEffect, EffectKind, EffectList, GroundEffect, GroundEffectKind};
pub use entities::{ArrowShot, Enemy, Item, ItemKind, Player, SpecialBehavior};
pub use log::{EventLog, LogEntry, LogKind};
pub use world::{FovGrid, Room, Tile, TileGrid};

use serde::{Deserialize, Serialize};

use crate::engine::Phase;

/// Complete snapshot of a run in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: TileGrid,
    pub fov: FovGrid,
    pub rooms: Vec<Room>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub ground_effects: Vec<GroundEffect>,
    pub floor: i32,
    /// Total committed actions, across all actors. Drives regen cadence.
    pub turn_count: u64,
    pub phase: Phase,
    pub log: EventLog,
    /// Trajectory marker for the most recent arrow shot, if still fresh.
    pub arrow_shot: Option<ArrowShot>,
}

impl GameState {
    /// Enemy occupying `pos`, if any. Dead enemies are swept eagerly so every
    /// entry counts as an obstacle.
    pub fn enemy_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|e| e.pos == pos)
    }

    /// Item lying on `pos`, if any.
    pub fn item_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|i| i.pos == pos)
    }

    /// True when `pos` is floor and not occupied by the player or an enemy.
    pub fn is_open(&self, pos: Position) -> bool {
        self.grid.is_walkable(pos) && self.player.pos != pos && self.enemy_at(pos).is_none()
    }
}
