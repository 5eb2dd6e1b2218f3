//! Mood configuration — the canonical schema for mood definitions and engine
//! calibration, plus the built-in default mood set.
//!
//! A [`MoodConfig`] is plain data. It only becomes usable once it has been
//! validated into a [`KeywordMoodIndex`](super::KeywordMoodIndex).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Display Metadata ───────────────────────────────────────

/// Presentation hints shown next to the detected mood.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayMeta {
    /// CSS color, e.g. `"#FFD93D"`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    /// Short line of copy for the result page.
    #[serde(default)]
    pub message: Option<String>,
}

// ── Mood Definition ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodDefinition {
    /// Unique mood label, also used to query the catalog.
    pub label: String,
    /// Trigger words and phrases, matched case-insensitively.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Extra keywords per language (e.g. `"hindi" → ["khush"]`).
    /// Merged into the index regardless of any language filter.
    #[serde(default)]
    pub localized_keywords: BTreeMap<String, Vec<String>>,
    /// Mood returned when one of this mood's keywords is negated.
    #[serde(default)]
    pub opposite: Option<String>,
    #[serde(default)]
    pub display: Option<DisplayMeta>,
}

impl MoodDefinition {
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            localized_keywords: BTreeMap::new(),
            opposite: None,
            display: None,
        }
    }

    pub fn with_opposite(mut self, opposite: impl Into<String>) -> Self {
        self.opposite = Some(opposite.into());
        self
    }

    pub fn with_localized<I, S>(mut self, language: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.localized_keywords
            .entry(language.into())
            .or_default()
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_display(mut self, color: &str, emoji: &str, message: &str) -> Self {
        self.display = Some(DisplayMeta {
            color: Some(color.to_string()),
            emoji: Some(emoji.to_string()),
            message: Some(message.to_string()),
        });
        self
    }

    /// Base keywords followed by every localized variant.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .chain(self.localized_keywords.values().flatten())
            .map(String::as_str)
    }
}

/// Comparison key for mood labels: trimmed, Unicode-lowercased.
pub fn label_key(label: &str) -> String {
    label.trim().to_lowercase()
}

// ── Engine Settings ────────────────────────────────────────

/// How a keyword is tested against the lowercased input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Plain substring containment. `"cry"` matches `"crying"`, but `"ex"`
    /// also matches `"next"`.
    #[default]
    Substring,
    /// The keyword must start and end on a word boundary.
    WordBoundary,
}

/// Calibration constants for the inference engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineSettings {
    #[serde(default = "default_base_confidence")]
    pub base_confidence: u32,
    /// Added per matching keyword of the winning mood.
    #[serde(default = "default_confidence_step")]
    pub confidence_step: u32,
    /// Ceiling for keyword-scored confidence.
    #[serde(default = "default_max_confidence")]
    pub max_confidence: u32,
    /// Confidence when nothing matched.
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: u32,
    /// Confidence of a negation-resolved result.
    #[serde(default = "default_negation_confidence")]
    pub negation_confidence: u32,
    /// Tokens inspected after a negation word.
    #[serde(default = "default_negation_window")]
    pub negation_window: usize,
    /// Deducted from keyword-scored confidence when the text contains a
    /// negation word that did not resolve to a mood.
    #[serde(default)]
    pub negation_penalty: u32,
    #[serde(default)]
    pub matching: MatchStrategy,
}

fn default_base_confidence() -> u32 {
    50
}

fn default_confidence_step() -> u32 {
    15
}

fn default_max_confidence() -> u32 {
    90
}

fn default_fallback_confidence() -> u32 {
    50
}

fn default_negation_confidence() -> u32 {
    75
}

fn default_negation_window() -> usize {
    3
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_confidence: default_base_confidence(),
            confidence_step: default_confidence_step(),
            max_confidence: default_max_confidence(),
            fallback_confidence: default_fallback_confidence(),
            negation_confidence: default_negation_confidence(),
            negation_window: default_negation_window(),
            negation_penalty: 0,
            matching: MatchStrategy::Substring,
        }
    }
}

// ── Mood Config ────────────────────────────────────────────

/// Top-level mood configuration, persisted as `moods.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodConfig {
    /// Declaration order doubles as the tie-break order.
    #[serde(default = "default_moods")]
    pub moods: Vec<MoodDefinition>,
    /// Fallback label. Unset means "Happy" if configured, else the first mood.
    #[serde(default)]
    pub default_mood: Option<String>,
    #[serde(default)]
    pub engine: EngineSettings,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            moods: default_moods(),
            default_mood: None,
            engine: EngineSettings::default(),
        }
    }
}

impl MoodConfig {
    /// A config with the given moods and default engine settings.
    pub fn with_moods(moods: Vec<MoodDefinition>) -> Self {
        Self {
            moods,
            default_mood: None,
            engine: EngineSettings::default(),
        }
    }
}

/// The twelve moods the song catalog is tagged with.
pub fn default_moods() -> Vec<MoodDefinition> {
    vec![
        MoodDefinition::new(
            "Happy",
            [
                "happy", "joy", "fun", "smile", "celebrate", "cheerful", "excited",
                "good mood", "positive", "feel good",
            ],
        )
        .with_localized("hindi", ["khush", "khushi", "anand"])
        .with_opposite("Sad")
        .with_display("#FFD93D", "😊", "Sunshine in your ears. Keep smiling!"),
        MoodDefinition::new(
            "Sad",
            [
                "sad", "cry", "lonely", "depressed", "hurt", "pain", "down", "upset",
                "heartbroken", "low",
            ],
        )
        .with_localized("hindi", ["udaas", "dukhi", "akela"])
        .with_opposite("Happy")
        .with_display("#5B8DEF", "😢", "It's okay to feel this way. These songs get it."),
        MoodDefinition::new(
            "Energetic",
            [
                "energetic", "gym", "workout", "power", "hype", "adrenaline", "active",
                "dance hard", "pump", "intense",
            ],
        )
        .with_localized("hindi", ["joshila", "taakat"])
        .with_opposite("Chill")
        .with_display("#FF6B35", "⚡", "Turn it up and go!"),
        MoodDefinition::new(
            "Chill",
            [
                "chill", "relax", "calm", "peaceful", "lofi", "slow", "cool vibe", "soft",
                "smooth", "easy",
            ],
        )
        .with_localized("hindi", ["sukoon", "aaram"])
        .with_opposite("Energetic")
        .with_display("#6EC6CA", "😌", "Breathe out. Let it flow."),
        MoodDefinition::new(
            "Party",
            [
                "party", "dance", "dj", "club", "celebration", "night", "festival vibe",
                "loud", "crazy", "banger",
            ],
        )
        .with_localized("hindi", ["naach", "dhamaal"])
        .with_opposite("Chill")
        .with_display("#C147E9", "🎉", "The floor is yours."),
        MoodDefinition::new(
            "Motivational",
            [
                "motivation", "inspire", "success", "dream", "goal", "hustle", "grind",
                "confidence", "ambition", "winner",
            ],
        )
        .with_localized("hindi", ["himmat", "sapna", "mehnat"])
        .with_opposite("Sad")
        .with_display("#F2A541", "🔥", "You've got this."),
        MoodDefinition::new(
            "Breakup",
            [
                "breakup", "ex", "separation", "lost love", "goodbye", "betrayal", "move on",
                "heart pain", "alone again", "relationship end",
            ],
        )
        .with_localized("hindi", ["bewafa", "judaai"])
        .with_opposite("Romantic")
        .with_display("#8D8DAA", "💔", "One song at a time. You'll get through it."),
        MoodDefinition::new(
            "Romantic",
            [
                "love", "romantic", "crush", "couple", "date", "proposal", "sweet", "valentine",
                "romance", "relationship",
            ],
        )
        .with_localized("hindi", ["pyaar", "ishq", "mohabbat"])
        .with_opposite("Breakup")
        .with_display("#FF5D8F", "❤️", "Love is in the air."),
        MoodDefinition::new(
            "Devotional",
            [
                "god", "bhakti", "prayer", "spiritual", "temple", "divine", "aarti", "mantra",
                "faith", "devotional",
            ],
        )
        .with_localized("hindi", ["bhajan", "ishwar", "prarthana"])
        .with_display("#F6C28B", "🙏", "Peace and blessings."),
        MoodDefinition::new(
            "Focus",
            [
                "study", "focus", "exam", "concentrate", "deep work", "coding",
                "background music", "revision", "productivity", "work mode",
            ],
        )
        .with_localized("hindi", ["padhai"])
        .with_opposite("Party")
        .with_display("#4A6FA5", "🎧", "Heads down. Distractions off."),
        MoodDefinition::new(
            "Travel",
            [
                "travel", "trip", "journey", "road trip", "drive", "adventure", "wanderlust",
                "vacation", "mountain", "explore",
            ],
        )
        .with_localized("hindi", ["safar", "yatra", "musafir"])
        .with_opposite("Chill")
        .with_display("#3FA34D", "🚗", "Windows down, volume up."),
        MoodDefinition::new(
            "Emotional",
            [
                "emotional", "feelings", "deep", "soul", "touching", "heart", "memories",
                "intense", "sensitive", "inner",
            ],
        )
        .with_localized("hindi", ["jazbaat", "yaadein"])
        .with_opposite("Happy")
        .with_display("#9B5DE5", "🥺", "Feel all of it."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_moods_declared_in_catalog_order() {
        let labels: Vec<_> = default_moods().into_iter().map(|m| m.label).collect();
        assert_eq!(
            labels,
            vec![
                "Happy",
                "Sad",
                "Energetic",
                "Chill",
                "Party",
                "Motivational",
                "Breakup",
                "Romantic",
                "Devotional",
                "Focus",
                "Travel",
                "Emotional",
            ]
        );
    }

    #[test]
    fn every_default_mood_has_ten_base_keywords() {
        for mood in default_moods() {
            assert_eq!(mood.keywords.len(), 10, "mood {}", mood.label);
        }
    }

    #[test]
    fn all_keywords_includes_localized_variants() {
        let mood = MoodDefinition::new("Happy", ["happy"]).with_localized("hindi", ["khush"]);
        let all: Vec<_> = mood.all_keywords().collect();
        assert_eq!(all, vec!["happy", "khush"]);
    }

    #[test]
    fn partial_json_fills_engine_defaults() {
        let json = r#"{
            "moods": [{ "label": "Happy", "keywords": ["happy"] }],
            "engine": { "confidence_step": 30, "matching": "word_boundary" }
        }"#;
        let config: MoodConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.moods.len(), 1);
        assert_eq!(config.engine.confidence_step, 30);
        assert_eq!(config.engine.base_confidence, 50);
        assert_eq!(config.engine.negation_window, 3);
        assert_eq!(config.engine.matching, MatchStrategy::WordBoundary);
    }

    #[test]
    fn label_key_folds_non_ascii_case() {
        assert_eq!(label_key(" Ärger "), label_key("ärger"));
        assert_eq!(label_key("HAPPY"), "happy");
    }

    #[test]
    fn empty_json_object_yields_builtin_moods() {
        let config: MoodConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MoodConfig::default());
    }
}
