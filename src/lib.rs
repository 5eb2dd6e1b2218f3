pub mod catalog;
pub mod config;
pub mod mood;
pub mod recommend;

pub use catalog::{CatalogQuery, InMemoryCatalog, SharedCatalog, Song, SongSelection};
pub use mood::{ConfigurationError, InferenceResult, MoodConfig, MoodEngine};
pub use recommend::{Recommendation, RecommendedSong, Recommender};
