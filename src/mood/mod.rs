//! Mood inference: keyword configuration, the validated keyword index, and
//! the stateless inference engine built on top of it.

pub mod definition;
pub mod engine;
pub mod error;
pub mod index;

#[cfg(test)]
mod tests;

pub use definition::{
    default_moods, label_key, DisplayMeta, EngineSettings, MatchStrategy, MoodConfig,
    MoodDefinition,
};
pub use engine::{InferenceResult, InferenceSource, MoodEngine, MoodScore, NEGATION_WORDS};
pub use error::ConfigurationError;
pub use index::{KeywordMatcher, KeywordMoodIndex};
