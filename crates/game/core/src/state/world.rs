use serde::{Deserialize, Serialize};

use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

/// Row-major tile grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// All-wall grid of the given dimensions.
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; (width * height) as usize],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.in_bounds(pos)
            .then(|| self.tiles[(pos.y * self.width + pos.x) as usize])
    }

    pub fn set(&mut self, pos: Position, tile: Tile) {
        if self.in_bounds(pos) {
            self.tiles[(pos.y * self.width + pos.x) as usize] = tile;
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Floor)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Floor).count()
    }
}

/// Per-tile visibility. `visible` is recomputed every player move; `explored`
/// only ever accumulates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FovGrid {
    pub width: i32,
    pub height: i32,
    visible: Vec<bool>,
    explored: Vec<bool>,
}

impl FovGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let n = (width * height) as usize;
        Self {
            width,
            height,
            visible: vec![false; n],
            explored: vec![false; n],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.visible[i])
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.explored[i])
    }

    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    /// Mark a tile visible; visibility implies explored.
    pub fn reveal(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.visible[i] = true;
            self.explored[i] = true;
        }
    }
}

/// Rectangular room carved during generation. Kept around for spawn placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Room {
    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.x + self.w && pos.y >= self.y && pos.y < self.y + self.h
    }
}
