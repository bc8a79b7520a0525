//! Ray-cast field of view.

use crate::state::{FovGrid, Position, Tile, TileGrid};

/// Recompute visibility around `origin` by casting rays every 2 degrees out
/// to `radius`. Walls are visible but stop the ray behind them.
pub fn compute_fov(grid: &TileGrid, fov: &mut FovGrid, origin: Position, radius: i32) {
    fov.clear_visible();

    for angle in (0..360).step_by(2) {
        let rad = (angle as f64).to_radians();
        cast_ray(grid, fov, origin, rad.cos(), rad.sin(), radius);
    }
}

fn cast_ray(
    grid: &TileGrid,
    fov: &mut FovGrid,
    origin: Position,
    dx: f64,
    dy: f64,
    max_distance: i32,
) {
    for d in 0..=max_distance {
        let pos = Position::new(
            (origin.x as f64 + dx * d as f64).round() as i32,
            (origin.y as f64 + dy * d as f64).round() as i32,
        );
        if !grid.in_bounds(pos) {
            return;
        }
        fov.reveal(pos);
        if grid.get(pos) == Some(Tile::Wall) {
            return;
        }
    }
}
