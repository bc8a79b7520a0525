//! Loaders for overriding built-in tables from RON data files.

use std::path::Path;

use crawl_core::MonsterCatalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for the monster catalog from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a monster catalog from RON source.
    pub fn parse(source: &str) -> LoadResult<MonsterCatalog> {
        ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))
    }
}
