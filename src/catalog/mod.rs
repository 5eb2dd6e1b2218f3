//! Song catalog — the store the recommender queries by mood label.

pub mod song;
pub mod store;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub use song::Song;
pub use store::{InMemoryCatalog, SharedCatalog, OTHER_SAMPLE_LIMIT, TOP_RANKED_LIMIT};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Songs selected for one mood.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SongSelection {
    /// Ranked songs, ascending rank, at most [`TOP_RANKED_LIMIT`].
    pub ranked: Vec<Song>,
    /// Random sample of unranked songs, at most [`OTHER_SAMPLE_LIMIT`].
    pub others: Vec<Song>,
}

impl SongSelection {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty() && self.others.is_empty()
    }
}

/// Anything that can answer "which songs fit this mood".
pub trait CatalogQuery: Send + Sync {
    /// Songs tagged `mood` (case-insensitive), optionally limited to
    /// `language`. An empty selection is a valid answer.
    fn find(&self, mood: &str, language: Option<&str>) -> SongSelection;
}
