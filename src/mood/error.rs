use thiserror::Error;

/// Raised while building the keyword index from a [`MoodConfig`](super::MoodConfig).
///
/// Every variant is fatal: a process must not serve inferences from an index
/// that failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("mood set is empty")]
    EmptyMoodSet,

    #[error("mood #{0} has an empty label")]
    EmptyLabel(usize),

    #[error("mood label '{0}' is declared more than once")]
    DuplicateLabel(String),

    #[error("mood '{mood}' names opposite '{opposite}', which is not a configured mood")]
    UnknownOpposite { mood: String, opposite: String },

    #[error("default mood '{0}' is not a configured mood")]
    UnknownDefaultMood(String),

    #[error("mood '{0}' has an empty keyword")]
    EmptyKeyword(String),

    #[error("engine setting '{name}' has invalid value {value}")]
    InvalidSetting { name: &'static str, value: u32 },
}
