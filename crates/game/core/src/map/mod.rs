//! Floor generation and field of view.

mod fov;
mod generator;

pub use fov::compute_fov;
pub use generator::{generate_floor, GeneratedFloor};

pub use crate::state::{FovGrid, TileGrid};
