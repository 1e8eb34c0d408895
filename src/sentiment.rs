use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::Sentiment;

/// Polarity above this is Positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Polarity below this is Negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Factor applied to a sentiment word preceded by a negation
const NEGATION_FACTOR: f64 = -0.5;

/// Source of a raw polarity score in [-1, 1] for a piece of text
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

static POLARITY_LEXICON: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        // positive
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("wonderful", 1.0),
        ("fantastic", 0.4),
        ("brilliant", 0.9),
        ("beautiful", 0.85),
        ("perfect", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("love", 0.5),
        ("loved", 0.7),
        ("lovely", 0.5),
        ("like", 0.2),
        ("liked", 0.3),
        ("enjoy", 0.4),
        ("enjoyed", 0.4),
        ("happy", 0.8),
        ("glad", 0.5),
        ("nice", 0.6),
        ("cool", 0.35),
        ("fun", 0.3),
        ("funny", 0.25),
        ("interesting", 0.5),
        ("helpful", 0.5),
        ("useful", 0.3),
        ("clear", 0.1),
        ("thanks", 0.2),
        ("thank", 0.2),
        ("incredible", 0.9),
        ("impressive", 1.0),
        ("masterpiece", 0.8),
        ("legendary", 0.6),
        ("favorite", 0.5),
        ("favourite", 0.5),
        ("right", 0.29),
        ("easy", 0.43),
        ("well", 0.2),
        ("positive", 0.23),
        ("win", 0.8),
        ("super", 0.33),
        ("satisfying", 0.5),
        // negative
        ("bad", -0.7),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("horrible", -1.0),
        ("worst", -1.0),
        ("worse", -0.4),
        ("poor", -0.4),
        ("hate", -0.8),
        ("hated", -0.9),
        ("sad", -0.5),
        ("angry", -0.5),
        ("boring", -1.0),
        ("stupid", -0.8),
        ("dumb", -0.4),
        ("ugly", -0.7),
        ("annoying", -0.8),
        ("disappointing", -0.6),
        ("disappointed", -0.75),
        ("useless", -0.5),
        ("wrong", -0.5),
        ("fake", -0.5),
        ("scam", -0.6),
        ("trash", -0.6),
        ("garbage", -0.6),
        ("cringe", -0.6),
        ("waste", -0.2),
        ("hard", -0.29),
        ("difficult", -0.5),
        ("broken", -0.4),
        ("sick", -0.71),
        ("negative", -0.3),
        ("fail", -0.5),
        ("failed", -0.5),
        ("lose", -0.4),
        ("lost", -0.3),
        ("pathetic", -1.0),
        ("ridiculous", -0.33),
        ("confusing", -0.3),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("very", 1.3),
        ("really", 1.2),
        ("so", 1.2),
        ("extremely", 1.5),
        ("incredibly", 1.4),
        ("absolutely", 1.4),
        ("totally", 1.3),
        ("super", 1.3),
        ("quite", 1.1),
        ("pretty", 1.1),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "not", "no", "never", "dont", "don't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't", "cant",
        "can't", "wont", "won't", "nothing", "hardly",
    ]
    .into_iter()
    .collect()
});

/// Lexicon-based polarity scorer: averages the polarity of known words,
/// scaling by a preceding intensifier and flipping on a nearby negation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|w| w.trim_matches('\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut scores = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&base) = POLARITY_LEXICON.get(*word) else {
                continue;
            };
            // "super" is both a word and an intensifier; as a modifier it only scales
            if INTENSIFIERS.contains_key(*word) && words.get(i + 1).is_some_and(|n| POLARITY_LEXICON.contains_key(*n)) {
                continue;
            }

            let mut score = base;
            if let Some(factor) = i.checked_sub(1).and_then(|p| INTENSIFIERS.get(words[p])) {
                score *= factor;
            }

            let negated = words[i.saturating_sub(2)..i]
                .iter()
                .any(|w| NEGATIONS.contains(*w));
            if negated {
                score *= NEGATION_FACTOR;
            }

            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

/// Map a polarity onto its category using the fixed thresholds
pub fn categorize(polarity: f64) -> Sentiment {
    if polarity > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Classifies text into a sentiment category plus a rounded polarity
pub struct SentimentClassifier {
    scorer: Box<dyn PolarityScorer>,
}

impl SentimentClassifier {
    pub fn new(scorer: impl PolarityScorer + 'static) -> Self {
        Self {
            scorer: Box::new(scorer),
        }
    }

    /// Returns the category and the polarity rounded to 4 decimals.
    ///
    /// The category is derived from the rounded value so the pair is always
    /// consistent with the thresholds.
    pub fn classify(&self, text: &str) -> (Sentiment, f64) {
        let polarity = round4(self.scorer.polarity(text).clamp(-1.0, 1.0));
        (categorize(polarity), polarity)
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(LexiconScorer)
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(categorize(0.06), Sentiment::Positive);
        assert_eq!(categorize(0.05), Sentiment::Neutral);
        assert_eq!(categorize(0.0), Sentiment::Neutral);
        assert_eq!(categorize(-0.05), Sentiment::Neutral);
        assert_eq!(categorize(-0.06), Sentiment::Negative);
    }

    #[test]
    fn test_classify_rounds_to_four_decimals() {
        let classifier = SentimentClassifier::new(FixedScorer(0.123456));
        assert_eq!(classifier.classify("x"), (Sentiment::Positive, 0.1235));
    }

    #[test]
    fn test_classify_uses_rounded_polarity_for_category() {
        let classifier = SentimentClassifier::new(FixedScorer(0.05004));
        assert_eq!(classifier.classify("x"), (Sentiment::Neutral, 0.05));

        let classifier = SentimentClassifier::new(FixedScorer(-0.06));
        assert_eq!(classifier.classify("x"), (Sentiment::Negative, -0.06));
    }

    #[test]
    fn test_classify_clamps_out_of_range_scores() {
        let classifier = SentimentClassifier::new(FixedScorer(3.0));
        assert_eq!(classifier.classify("x"), (Sentiment::Positive, 1.0));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = SentimentClassifier::default();
        let text = "This is a really great video, but the audio was bad";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_lexicon_positive() {
        let p = LexiconScorer.polarity("This video is great!");
        assert!((p - 0.8).abs() < 1e-9);
        assert_eq!(categorize(p), Sentiment::Positive);
    }

    #[test]
    fn test_lexicon_negative() {
        let p = LexiconScorer.polarity("Worst tutorial ever, terrible audio");
        assert!((p + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lexicon_neutral_without_hits() {
        assert_eq!(LexiconScorer.polarity("first"), 0.0);
        assert_eq!(LexiconScorer.polarity(""), 0.0);
    }

    #[test]
    fn test_lexicon_negation_flips_and_halves() {
        let p = LexiconScorer.polarity("this is not good");
        assert!((p + 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_lexicon_intensifier_scales() {
        let p = LexiconScorer.polarity("very good");
        assert!((p - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_lexicon_intensifier_capped_at_one() {
        assert_eq!(LexiconScorer.polarity("extremely excellent"), 1.0);
    }

    #[test]
    fn test_lexicon_averages_mixed_words() {
        let p = LexiconScorer.polarity("good but bad");
        assert!(p.abs() < 1e-9);
    }

    #[test]
    fn test_lexicon_is_case_insensitive() {
        assert_eq!(LexiconScorer.polarity("GREAT"), LexiconScorer.polarity("great"));
    }
}
