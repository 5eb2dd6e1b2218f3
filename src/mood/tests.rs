//! Cross-cutting properties of the inference engine.
//!
//! These tests verify:
//! 1. Confidence always lands in `0..=100`
//! 2. Results carry one or two configured labels
//! 3. Inference ignores letter case and is repeatable
//! 4. One shared engine serves many concurrent callers

use proptest::prelude::*;
use std::sync::{Arc, LazyLock};

use super::{InferenceSource, MoodConfig, MoodEngine};

static ENGINE: LazyLock<MoodEngine> =
    LazyLock::new(|| MoodEngine::from_config(&MoodConfig::default()).unwrap());

/// Free text salted with keywords and negation words so every path gets hit.
fn mood_text() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        "[a-zA-Z']{1,10}",
        Just("not".to_string()),
        Just("don't".to_string()),
        Just("happy".to_string()),
        Just("sad".to_string()),
        Just("gym".to_string()),
        Just("road trip".to_string()),
        Just("intense".to_string()),
    ];
    prop::collection::vec(word, 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn confidence_stays_in_range(text in any::<String>()) {
        let result = ENGINE.infer(&text);
        prop_assert!(result.confidence() <= 100);
    }

    #[test]
    fn moods_are_one_or_two_configured_labels(text in mood_text()) {
        let result = ENGINE.infer(&text);
        prop_assert!((1..=2).contains(&result.moods().len()));
        for mood in result.moods() {
            prop_assert!(ENGINE.index().position(mood).is_some(), "unknown label {}", mood);
        }
        if result.moods().len() == 2 {
            prop_assert_ne!(&result.moods()[0], &result.moods()[1]);
        }
    }

    #[test]
    fn case_insensitive(text in mood_text()) {
        prop_assert_eq!(ENGINE.infer(&text.to_uppercase()), ENGINE.infer(&text.to_lowercase()));
    }

    #[test]
    fn inference_is_idempotent(text in any::<String>()) {
        prop_assert_eq!(ENGINE.infer(&text), ENGINE.infer(&text));
    }

    #[test]
    fn only_keyword_results_carry_a_secondary(text in mood_text()) {
        let result = ENGINE.infer(&text);
        if result.secondary().is_some() {
            prop_assert_eq!(result.source(), InferenceSource::Keywords);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_engine_serves_concurrent_tasks() {
    let engine = Arc::new(MoodEngine::from_config(&MoodConfig::default()).unwrap());
    let inputs = [
        ("I am not happy", "Sad"),
        ("gym workout hype", "Energetic"),
        ("need a calm lofi evening", "Chill"),
        ("", "Happy"),
    ];

    let mut handles = Vec::new();
    for i in 0..200 {
        let engine = Arc::clone(&engine);
        let (text, expected) = inputs[i % inputs.len()];
        handles.push(tokio::spawn(async move {
            (engine.infer(text).primary().to_string(), expected)
        }));
    }

    for handle in handles {
        let (got, expected) = handle.await.unwrap();
        assert_eq!(got, expected);
    }
}
