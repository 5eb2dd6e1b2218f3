//! Mood Inference Engine — free text in, ranked mood labels and a confidence out.
//!
//! Inference is a single pure pass over the input:
//!
//! 1. Lowercase the text and split it into word tokens.
//! 2. Negation scan: a negation word followed (within the window) by a token
//!    that is exactly a single-word keyword resolves to that mood's opposite.
//! 3. Otherwise score every mood by how many distinct keywords occur in the
//!    text, rank by score with declaration order breaking ties, and derive a
//!    confidence from the top score.
//! 4. Nothing matched → default mood at the fallback confidence.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::definition::MoodConfig;
use super::error::ConfigurationError;
use super::index::KeywordMoodIndex;

/// Words that flip the meaning of the keyword right after them.
pub const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "didn't", "isn't", "wasn't", "can't", "cannot",
    "won't",
];

/// Letter/digit runs, keeping inner apostrophes so contractions stay whole.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("token pattern is valid")
});

// ── Result Types ───────────────────────────────────────────

/// Which step of the pipeline produced a result.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InferenceSource {
    Negation,
    Keywords,
    Fallback,
}

/// Outcome of one [`MoodEngine::infer`] call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InferenceResult {
    moods: Vec<String>,
    confidence: u8,
    source: InferenceSource,
}

impl InferenceResult {
    fn single(mood: &str, confidence: u32, source: InferenceSource) -> Self {
        Self {
            moods: vec![mood.to_string()],
            confidence: clamp_confidence(confidence),
            source,
        }
    }

    /// One or two labels, primary first.
    pub fn moods(&self) -> &[String] {
        &self.moods
    }

    /// The mood that drives catalog lookup and display.
    pub fn primary(&self) -> &str {
        &self.moods[0]
    }

    /// Runner-up mood, informational only.
    pub fn secondary(&self) -> Option<&str> {
        self.moods.get(1).map(String::as_str)
    }

    /// Integer in `0..=100`. Not a probability.
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn source(&self) -> InferenceSource {
        self.source
    }
}

/// Per-mood keyword score, as returned by [`MoodEngine::scores`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MoodScore {
    pub label: String,
    /// Number of distinct keywords of this mood found in the text.
    pub score: usize,
}

fn clamp_confidence(value: u32) -> u8 {
    value.min(100) as u8
}

// ── Engine ─────────────────────────────────────────────────

/// Stateless classifier over a [`KeywordMoodIndex`].
///
/// Holds no mutable state, so one instance can be shared across threads
/// (`Arc<MoodEngine>`) and called concurrently.
#[derive(Debug, Clone)]
pub struct MoodEngine {
    index: KeywordMoodIndex,
}

impl MoodEngine {
    pub fn new(index: KeywordMoodIndex) -> Self {
        Self { index }
    }

    /// Validate `config` and build an engine over it.
    pub fn from_config(config: &MoodConfig) -> Result<Self, ConfigurationError> {
        KeywordMoodIndex::build(config).map(Self::new)
    }

    pub fn index(&self) -> &KeywordMoodIndex {
        &self.index
    }

    /// Infer the mood(s) expressed by `text`. Never fails; empty or
    /// unrecognised text yields the default mood.
    pub fn infer(&self, text: &str) -> InferenceResult {
        let settings = self.index.settings();
        let lowered = normalize(text);
        let tokens = tokenize(&lowered);

        if let Some(negated) = self.scan_negation(&tokens) {
            let resolved = self.index.opposite_at(negated);
            tracing::debug!(
                negated = self.index.label_at(negated),
                resolved,
                "Mood resolved through negation"
            );
            return InferenceResult::single(
                resolved,
                settings.negation_confidence,
                InferenceSource::Negation,
            );
        }

        let ranked = self.rank(&lowered);
        let (top, top_score) = ranked[0];
        if top_score == 0 {
            tracing::debug!(mood = self.index.default_mood(), "No keyword matched");
            return InferenceResult::single(
                self.index.default_mood(),
                settings.fallback_confidence,
                InferenceSource::Fallback,
            );
        }

        let mut moods = vec![self.index.label_at(top).to_string()];
        if let Some(&(runner_up, _)) = ranked.get(1).filter(|(_, score)| *score > 0) {
            moods.push(self.index.label_at(runner_up).to_string());
        }

        let step_total = settings
            .confidence_step
            .saturating_mul(u32::try_from(top_score).unwrap_or(u32::MAX));
        let mut confidence = settings
            .base_confidence
            .saturating_add(step_total)
            .min(settings.max_confidence);
        if tokens.iter().any(|t| is_negation(t)) {
            confidence = confidence.saturating_sub(settings.negation_penalty);
        }

        tracing::debug!(moods = ?moods, score = top_score, confidence, "Mood scored from keywords");

        InferenceResult {
            moods,
            confidence: clamp_confidence(confidence),
            source: InferenceSource::Keywords,
        }
    }

    /// Every mood's keyword score for `text`, highest first, ties in
    /// declaration order. Negation is not applied.
    pub fn scores(&self, text: &str) -> Vec<MoodScore> {
        let lowered = normalize(text);
        self.rank(&lowered)
            .into_iter()
            .map(|(i, score)| MoodScore {
                label: self.index.label_at(i).to_string(),
                score,
            })
            .collect()
    }

    /// Index of the mood whose keyword was negated, if any.
    ///
    /// Only single-word keywords that equal a whole token are caught; phrase
    /// keywords and negations placed after the keyword are not.
    fn scan_negation(&self, tokens: &[&str]) -> Option<usize> {
        let window = self.index.settings().negation_window;
        tokens.iter().enumerate().find_map(|(i, token)| {
            if !is_negation(token) {
                return None;
            }
            tokens[i + 1..]
                .iter()
                .take(window)
                .find_map(|next| self.index.exact_owner(next))
        })
    }

    /// `(mood index, score)` sorted by score descending. The sort is stable,
    /// so equal scores keep declaration order.
    fn rank(&self, lowered: &str) -> Vec<(usize, usize)> {
        let mut ranked: Vec<(usize, usize)> = (0..self.index.len())
            .map(|i| (i, self.index.score_at(i, lowered)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn tokenize(lowered: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(lowered).map(|m| m.as_str()).collect()
}

fn is_negation(token: &str) -> bool {
    NEGATION_WORDS.contains(&token)
}
