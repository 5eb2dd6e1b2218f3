//! Recommender — turns a mood description into songs.
//!
//! Only the primary mood is used for the catalog query and display metadata;
//! the secondary mood is passed through for display.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{CatalogQuery, Song};
use crate::mood::{DisplayMeta, InferenceSource, MoodEngine};

/// A catalog song as it appears in a recommendation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecommendedSong {
    #[serde(flatten)]
    pub song: Song,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<Song> for RecommendedSong {
    fn from(song: Song) -> Self {
        let thumbnail = song.thumbnail_url();
        Self { song, thumbnail }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub mood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_mood: Option<String>,
    pub confidence: u8,
    pub source: InferenceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMeta>,
    pub top_songs: Vec<RecommendedSong>,
    pub other_songs: Vec<RecommendedSong>,
}

#[derive(Clone)]
pub struct Recommender {
    engine: Arc<MoodEngine>,
    catalog: Arc<dyn CatalogQuery>,
}

impl Recommender {
    pub fn new(engine: Arc<MoodEngine>, catalog: Arc<dyn CatalogQuery>) -> Self {
        Self { engine, catalog }
    }

    pub fn engine(&self) -> &MoodEngine {
        &self.engine
    }

    /// Infer the mood of `text` and pick songs for it. A mood with no
    /// matching songs gives empty song lists, not an error.
    pub fn recommend(&self, text: &str, language: Option<&str>) -> Recommendation {
        let inference = self.engine.infer(text);
        let mood = inference.primary();
        let selection = self.catalog.find(mood, language);

        if selection.is_empty() {
            tracing::info!(mood, language = ?language, "No songs for mood");
        }

        Recommendation {
            mood: mood.to_string(),
            secondary_mood: inference.secondary().map(str::to_string),
            confidence: inference.confidence(),
            source: inference.source(),
            display: self.engine.index().display(mood).cloned(),
            top_songs: selection.ranked.into_iter().map(Into::into).collect(),
            other_songs: selection.others.into_iter().map(Into::into).collect(),
        }
    }
}
