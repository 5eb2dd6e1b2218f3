//! Keyword Mood Index — validated, read-only view of the mood configuration.
//!
//! Built once at startup. Keywords are lowercased and de-duplicated per mood,
//! opposites are resolved to indices, and every keyword test goes through
//! [`KeywordMatcher`] so the matching rule can change in one place.

use std::collections::HashMap;

use super::definition::{label_key, DisplayMeta, EngineSettings, MatchStrategy, MoodConfig};
use super::error::ConfigurationError;

// ── Matching Primitive ─────────────────────────────────────

/// The one place that decides whether a keyword occurs in lowercased text.
///
/// With [`MatchStrategy::Substring`] a short keyword also fires inside longer,
/// unrelated words ("ex" in "next", "low" in "follow"). That is the current
/// product behaviour; switch to [`MatchStrategy::WordBoundary`] to avoid it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher {
    strategy: MatchStrategy,
}

impl KeywordMatcher {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Both arguments must already be lowercase.
    pub fn matches(&self, haystack: &str, keyword: &str) -> bool {
        match self.strategy {
            MatchStrategy::Substring => haystack.contains(keyword),
            MatchStrategy::WordBoundary => haystack.match_indices(keyword).any(|(start, _)| {
                let end = start + keyword.len();
                let before = haystack[..start].chars().next_back();
                let after = haystack[end..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

// ── Index ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct IndexedMood {
    label: String,
    keywords: Vec<String>,
    opposite: Option<usize>,
    display: Option<DisplayMeta>,
}

/// Immutable mood → keyword index. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordMoodIndex {
    moods: Vec<IndexedMood>,
    /// Exact keyword → first-declared mood that lists it.
    exact: HashMap<String, usize>,
    default_mood: usize,
    settings: EngineSettings,
    matcher: KeywordMatcher,
}

impl KeywordMoodIndex {
    /// Validate `config` and build the index.
    pub fn build(config: &MoodConfig) -> Result<Self, ConfigurationError> {
        if config.moods.is_empty() {
            return Err(ConfigurationError::EmptyMoodSet);
        }
        validate_settings(&config.engine)?;

        let mut moods: Vec<IndexedMood> = Vec::with_capacity(config.moods.len());
        for (i, def) in config.moods.iter().enumerate() {
            let label = def.label.trim();
            if label.is_empty() {
                return Err(ConfigurationError::EmptyLabel(i));
            }
            if position_of(&moods, label).is_some() {
                return Err(ConfigurationError::DuplicateLabel(label.to_string()));
            }

            let mut keywords: Vec<String> = Vec::new();
            for kw in def.all_keywords() {
                let kw = kw.trim().to_lowercase();
                if kw.is_empty() {
                    return Err(ConfigurationError::EmptyKeyword(label.to_string()));
                }
                if !keywords.contains(&kw) {
                    keywords.push(kw);
                }
            }

            moods.push(IndexedMood {
                label: label.to_string(),
                keywords,
                opposite: None,
                display: def.display.clone(),
            });
        }

        // Opposites can point forward, so resolve them once every label is known.
        for (i, def) in config.moods.iter().enumerate() {
            if let Some(opposite) = &def.opposite {
                let target = position_of(&moods, opposite).ok_or_else(|| {
                    ConfigurationError::UnknownOpposite {
                        mood: moods[i].label.clone(),
                        opposite: opposite.clone(),
                    }
                })?;
                moods[i].opposite = Some(target);
            }
        }

        let default_mood = match &config.default_mood {
            Some(label) => position_of(&moods, label)
                .ok_or_else(|| ConfigurationError::UnknownDefaultMood(label.clone()))?,
            None => position_of(&moods, "Happy").unwrap_or(0),
        };

        let mut exact = HashMap::new();
        for (i, mood) in moods.iter().enumerate() {
            for kw in &mood.keywords {
                exact.entry(kw.clone()).or_insert(i);
            }
        }

        tracing::info!(
            moods = moods.len(),
            keywords = exact.len(),
            default_mood = %moods[default_mood].label,
            matching = ?config.engine.matching,
            "Built keyword mood index"
        );

        Ok(Self {
            moods,
            exact,
            default_mood,
            settings: config.engine.clone(),
            matcher: KeywordMatcher::new(config.engine.matching),
        })
    }

    /// Number of configured moods.
    pub fn len(&self) -> usize {
        self.moods.len()
    }

    /// Always false for a built index.
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.moods.iter().map(|m| m.label.as_str())
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn matcher(&self) -> KeywordMatcher {
        self.matcher
    }

    /// Label used for the zero-match fallback and unmapped negations.
    pub fn default_mood(&self) -> &str {
        &self.moods[self.default_mood].label
    }

    /// Case-insensitive label lookup; returns the declaration position.
    pub fn position(&self, label: &str) -> Option<usize> {
        position_of(&self.moods, label)
    }

    /// Lowercased keyword set for `label`.
    pub fn keywords(&self, label: &str) -> Option<&[String]> {
        self.position(label).map(|i| self.moods[i].keywords.as_slice())
    }

    pub fn display(&self, label: &str) -> Option<&DisplayMeta> {
        self.position(label).and_then(|i| self.moods[i].display.as_ref())
    }

    /// Opposite of `label`, or the default mood when none is mapped.
    pub fn opposite_of(&self, label: &str) -> Option<&str> {
        let i = self.position(label)?;
        Some(self.opposite_at(i))
    }

    /// Keywords of `label` present in `lowered`.
    pub fn matching_keywords<'a>(
        &'a self,
        label: &str,
        lowered: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let keywords = self.keywords(label).unwrap_or(&[]);
        keywords
            .iter()
            .filter(move |kw| self.matcher.matches(lowered, kw))
            .map(String::as_str)
    }

    // ── crate-internal accessors used by the engine ──

    pub(crate) fn label_at(&self, i: usize) -> &str {
        &self.moods[i].label
    }

    pub(crate) fn opposite_at(&self, i: usize) -> &str {
        let target = self.moods[i].opposite.unwrap_or(self.default_mood);
        &self.moods[target].label
    }

    /// Distinct keywords of mood `i` that occur in `lowered`.
    pub(crate) fn score_at(&self, i: usize, lowered: &str) -> usize {
        self.moods[i]
            .keywords
            .iter()
            .filter(|kw| self.matcher.matches(lowered, kw))
            .count()
    }

    /// First-declared mood listing `token` verbatim as a keyword.
    pub(crate) fn exact_owner(&self, token: &str) -> Option<usize> {
        self.exact.get(token).copied()
    }
}

fn position_of(moods: &[IndexedMood], label: &str) -> Option<usize> {
    let key = label_key(label);
    moods.iter().position(|m| label_key(&m.label) == key)
}

fn validate_settings(settings: &EngineSettings) -> Result<(), ConfigurationError> {
    let percentages = [
        ("base_confidence", settings.base_confidence),
        ("confidence_step", settings.confidence_step),
        ("max_confidence", settings.max_confidence),
        ("fallback_confidence", settings.fallback_confidence),
        ("negation_confidence", settings.negation_confidence),
        ("negation_penalty", settings.negation_penalty),
    ];
    for (name, value) in percentages {
        if value > 100 {
            return Err(ConfigurationError::InvalidSetting { name, value });
        }
    }
    if settings.negation_window == 0 {
        return Err(ConfigurationError::InvalidSetting {
            name: "negation_window",
            value: 0,
        });
    }
    Ok(())
}
