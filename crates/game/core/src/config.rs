/// Game configuration constants and tunable balance parameters.
///
/// Compile-time caps are associated constants (used as array-capacity type
/// parameters); everything else is a runtime-tunable field whose default
/// matches the reference balance sheet.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    /// Map width in tiles.
    pub map_width: i32,
    /// Map height in tiles.
    pub map_height: i32,
    /// AP threshold an actor must reach before it may act; deducted on commit.
    pub action_cost: i32,
    /// Field-of-view radius in tiles. Also the enemy awareness radius.
    pub fov_radius: i32,
    /// HP/MP regeneration fires every this many turn counts.
    pub regen_interval: u64,
    /// Flat damage dealt by a fired arrow.
    pub arrow_damage: i32,
    /// Maximum arrow shot distance (euclidean).
    pub arrow_range: i32,
    /// How long the arrow trajectory marker stays in the snapshot, in
    /// milliseconds of injected-clock time.
    pub arrow_marker_ms: u64,
    /// Gold yielded by a gold pickup: `gold_base + floor * gold_per_floor`.
    pub gold_base: i32,
    pub gold_per_floor: i32,
    /// Potion heal as a percentage of max HP.
    pub potion_heal_percent: i32,
    /// Oil restore as a percentage of max torch.
    pub oil_restore_percent: i32,
    /// Arrows gained per arrow pickup.
    pub arrow_pickup_count: i32,
    /// Heal granted on level up, as a percentage of max HP.
    pub level_up_heal_percent: i32,
    /// Exp required for the first level up.
    pub initial_next_level_exp: i32,
    /// Maximum entries retained in the event log.
    pub max_log_entries: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous timed effects per entity.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;
    /// Hard cap on equipped skills.
    pub const MAX_SKILL_SLOTS: usize = 9;

    /// Growth factor applied to `next_level_exp` on every level up.
    pub const LEVEL_EXP_GROWTH: f64 = 1.6;

    pub fn new() -> Self {
        Self {
            map_width: 50,
            map_height: 40,
            action_cost: 100,
            fov_radius: 8,
            regen_interval: 100,
            arrow_damage: 15,
            arrow_range: 8,
            arrow_marker_ms: 300,
            gold_base: 10,
            gold_per_floor: 5,
            potion_heal_percent: 20,
            oil_restore_percent: 50,
            arrow_pickup_count: 3,
            level_up_heal_percent: 15,
            initial_next_level_exp: 10,
            max_log_entries: 200,
        }
    }

    /// Shops appear on floor 1 and then every third floor (4, 7, 10, ...).
    pub fn is_shop_floor(floor: i32) -> bool {
        floor == 1 || (floor - 1) % 3 == 0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_floor_schedule() {
        let shops: Vec<i32> = (1..=20).filter(|&f| GameConfig::is_shop_floor(f)).collect();
        assert_eq!(shops, vec![1, 4, 7, 10, 13, 16, 19]);
    }
}
