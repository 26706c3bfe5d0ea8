//! Locally persisted favorites.
//!
//! One JSON file holds the favorited recipe ids in insertion order. The file
//! is rewritten whole on every change; there is no incremental log.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

/// Errors that can occur when persisting favorites. Loading never fails;
/// only writes do.
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to write favorites file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

/// User-curated set of recipe identifiers, persisted to a single file.
#[derive(Debug)]
pub struct Favorites {
    path: PathBuf,
    ids: Vec<String>,
}

impl Favorites {
    /// Load favorites from `path`. A missing or malformed file starts the
    /// set empty; neither is surfaced to the caller.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = read_ids(&path);
        Self { path, ids }
    }

    /// Flip membership of `id` and persist the whole set. Returns the new
    /// membership state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, FavoritesError> {
        match self.ids.iter().position(|fav| fav == id) {
            Some(index) => {
                self.ids.remove(index);
            }
            None => self.ids.push(id.to_string()),
        }
        self.save()?;
        Ok(self.contains(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Favorited ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn save(&self) -> Result<(), FavoritesError> {
        let encoded = serde_json::to_string(&self.ids)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

fn read_ids(path: &Path) -> Vec<String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No favorites file at {}: {e}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(ids) => ids,
        Err(e) => {
            debug!(
                "Favorites file {} is malformed, starting empty: {e}",
                path.display()
            );
            Vec::new()
        }
    }
}
