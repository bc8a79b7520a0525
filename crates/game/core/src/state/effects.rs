use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::GameConfig;
use crate::state::Position;

/// Timed stat modifier attached to one entity.
///
/// Deltas are flat and applied on top of base stats while the effect lasts.
/// Durations are measured in the affected entity's own committed turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub duration: i32,
    pub attack: i32,
    pub defense: i32,
    pub move_speed: i32,
    pub attack_speed: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "title_case")]
pub enum EffectKind {
    BattleShout,
    Entangled,
}

pub type EffectList = ArrayVec<ActiveEffect, { GameConfig::MAX_ACTIVE_EFFECTS }>;

/// Area effect persisting on the floor, damaging enemies that stand in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundEffect {
    pub kind: GroundEffectKind,
    pub tiles: Vec<Position>,
    /// Remaining ticks; decremented once per player turn.
    pub duration: i32,
    pub tick_damage: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "title_case")]
pub enum GroundEffectKind {
    ToxicMist,
    FlameZone,
}

impl GroundEffect {
    pub fn covers(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }
}
