//! Stock content tables and data-file loaders.
//!
//! This crate ships the data the simulation runs on:
//! - the built-in monster roster, shop catalog, and default player stat block
//! - difficulty presets (easy/normal/hard/nightmare multipliers)
//! - character-creation stat allocation steps
//! - RON loaders (behind the `loaders` feature) for overriding the monster
//!   catalog from data files
//!
//! Tables use `crawl-core` schema types directly; nothing here mutates state.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{
    default_content, default_stats, monster_catalog, shop_catalog, AllocatableStat, Difficulty,
    STAT_ALLOCATION_POINTS,
};

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, MonsterLoader};
