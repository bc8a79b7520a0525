//! Open-arena floor generator.
//!
//! Floors start as a single open arena ringed by border walls, then get
//! scattered wall segments and pillars as obstacles. Generation retries with
//! progressively fewer obstacles until every floor tile is mutually reachable.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::GameConfig;
use crate::rng::DiceRoller;
use crate::state::{Position, Room, Tile, TileGrid};

/// A carved floor plus the spawn regions placement uses.
///
/// The first room is the player start area, the last holds the portal, and
/// the ones between seed enemies and items.
pub struct GeneratedFloor {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
}

const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// Generate a fully connected floor.
pub fn generate_floor(config: &GameConfig, dice: &mut dyn DiceRoller) -> GeneratedFloor {
    let (w, h) = (config.map_width, config.map_height);
    let mut attempt = 0;
    let grid = loop {
        attempt += 1;
        let mut grid = TileGrid::filled(w, h, Tile::Floor);
        add_border_walls(&mut grid);

        // Later attempts thin out the obstacles to make connectivity likely.
        let segment_count = (15 - attempt as i32).max(8);
        let pillar_count = (40 - attempt as i32 * 2).max(20);
        add_wall_segments(&mut grid, segment_count, dice);
        add_pillars(&mut grid, pillar_count, dice);

        if is_connected(&grid) || attempt >= MAX_GENERATION_ATTEMPTS {
            debug!(attempt, "floor generated");
            break grid;
        }
    };

    GeneratedFloor {
        grid,
        rooms: spawn_regions(w, h),
    }
}

fn add_border_walls(grid: &mut TileGrid) {
    for x in 0..grid.width {
        grid.set(Position::new(x, 0), Tile::Wall);
        grid.set(Position::new(x, grid.height - 1), Tile::Wall);
    }
    for y in 0..grid.height {
        grid.set(Position::new(0, y), Tile::Wall);
        grid.set(Position::new(grid.width - 1, y), Tile::Wall);
    }
}

/// Straight wall runs of 3 to 6 tiles, kept off the border margin.
fn add_wall_segments(grid: &mut TileGrid, count: i32, dice: &mut dyn DiceRoller) {
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = count * 20;

    while placed < count && attempts < max_attempts {
        attempts += 1;

        let horizontal = dice.chance_percent(50);
        let length = dice.range_i32(4) + 3;
        let x = dice.range_i32(grid.width - length - 4) + 2;
        let y = dice.range_i32(grid.height - length - 4) + 2;

        let mut tiles = Vec::with_capacity(length as usize);
        let mut can_place = true;
        for i in 0..length {
            let pos = if horizontal {
                Position::new(x + i, y)
            } else {
                Position::new(x, y + i)
            };
            let in_margin = pos.x < 2
                || pos.x >= grid.width - 2
                || pos.y < 2
                || pos.y >= grid.height - 2;
            if in_margin || grid.get(pos) != Some(Tile::Floor) {
                can_place = false;
                break;
            }
            tiles.push(pos);
        }

        if can_place {
            for pos in tiles {
                grid.set(pos, Tile::Wall);
            }
            placed += 1;
        }
    }
}

/// Single-tile pillars, only where at least 6 of 8 neighbors stay floor so
/// they never pinch a corridor shut.
fn add_pillars(grid: &mut TileGrid, count: i32, dice: &mut dyn DiceRoller) {
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = count * 10;

    while placed < count && attempts < max_attempts {
        attempts += 1;

        let pos = Position::new(
            dice.range_i32(grid.width - 4) + 2,
            dice.range_i32(grid.height - 4) + 2,
        );
        if grid.get(pos) != Some(Tile::Floor) {
            continue;
        }

        let mut floor_neighbors = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if grid.get(pos.offset(dx, dy)) == Some(Tile::Floor) {
                    floor_neighbors += 1;
                }
            }
        }
        if floor_neighbors >= 6 {
            grid.set(pos, Tile::Wall);
            placed += 1;
        }
    }
}

/// Flood fill from the first floor tile; connected iff every floor tile is
/// reached. Movement is 4-directional here so diagonal-only gaps count as
/// disconnected.
fn is_connected(grid: &TileGrid) -> bool {
    let mut start = None;
    let mut floor_total = 0;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.is_walkable(Position::new(x, y)) {
                floor_total += 1;
                if start.is_none() {
                    start = Some(Position::new(x, y));
                }
            }
        }
    }
    let Some(start) = start else {
        return true;
    };

    let mut visited = vec![false; (grid.width * grid.height) as usize];
    let mut queue = VecDeque::from([start]);
    let mut reached = 0;
    while let Some(pos) = queue.pop_front() {
        let idx = (pos.y * grid.width + pos.x) as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        reached += 1;

        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let next = pos.offset(dx, dy);
            if grid.is_walkable(next) && !visited[(next.y * grid.width + next.x) as usize] {
                queue.push_back(next);
            }
        }
    }
    reached == floor_total
}

/// Fixed spawn regions spread across the arena.
fn spawn_regions(w: i32, h: i32) -> Vec<Room> {
    vec![
        Room { x: 3, y: 3, w: 6, h: 6 },
        Room { x: w / 2 - 3, y: h / 2 - 3, w: 6, h: 6 },
        Room { x: w - 15, y: 5, w: 6, h: 6 },
        Room { x: 5, y: h - 12, w: 6, h: 6 },
        Room { x: w / 3, y: h / 3, w: 5, h: 5 },
        Room { x: w * 2 / 3, y: h * 2 / 3, w: 5, h: 5 },
        Room { x: w - 10, y: h - 10, w: 6, h: 6 },
    ]
}
