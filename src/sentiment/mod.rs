//! Lexicon-based sentiment scoring for transcripts.

mod lexicon;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Shown alongside the scores.
pub const SCALE_NOTE: &str = "Polarity ranges from -1 (Negative) to +1 (Positive). \
Subjectivity ranges from 0 (Objective) to 1 (Subjective).";

/// Default polarity threshold for a non-neutral tone.
pub const DEFAULT_TONE_THRESHOLD: f32 = 0.3;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("valid regex"));

/// Overall tone of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    /// Classify a polarity; the boundaries themselves are neutral.
    pub fn from_polarity(polarity: f32, threshold: f32) -> Self {
        if polarity > threshold {
            Tone::Positive
        } else if polarity < -threshold {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tone::Positive => "Positive",
            Tone::Negative => "Negative",
            Tone::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentReport {
    pub tone: Tone,
    pub polarity: f32,
    pub subjectivity: f32,
}

/// Score a text with the default tone threshold.
pub fn analyze_sentiment(text: &str) -> SentimentReport {
    analyze_with_threshold(text, DEFAULT_TONE_THRESHOLD)
}

pub fn analyze_with_threshold(text: &str, threshold: f32) -> SentimentReport {
    let (polarity, subjectivity) = score_text(text);
    SentimentReport {
        tone: Tone::from_polarity(polarity, threshold),
        polarity,
        subjectivity,
    }
}

/// Average polarity and subjectivity over every lexicon word in `text`.
///
/// Modifiers only apply to the word that directly follows them (or follows
/// a run of other modifiers, as in "not very good").
fn score_text(text: &str) -> (f32, f32) {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");

    let mut scored: Vec<(f32, f32)> = Vec::new();
    let mut negated = false;
    let mut factor = 1.0_f32;

    for word in WORD.find_iter(&lowered).map(|m| m.as_str()) {
        if lexicon::is_negation(word) {
            negated = true;
            continue;
        }
        if let Some(intensity) = lexicon::intensity(word) {
            factor *= intensity;
            continue;
        }

        if let Some((polarity, subjectivity)) = lexicon::score(word) {
            let mut polarity = (polarity * factor).clamp(-1.0, 1.0);
            if negated {
                polarity *= -0.5;
            }
            let subjectivity = (subjectivity * factor).clamp(0.0, 1.0);
            scored.push((polarity, subjectivity));
        }

        negated = false;
        factor = 1.0;
    }

    if scored.is_empty() {
        return (0.0, 0.0);
    }

    let n = scored.len() as f32;
    let polarity = scored.iter().map(|(p, _)| p).sum::<f32>() / n;
    let subjectivity = scored.iter().map(|(_, s)| s).sum::<f32>() / n;
    (polarity, subjectivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_no_opinion_words_is_neutral_zero() {
        let report = analyze_sentiment("The compiler reads the source file.");
        assert_eq!(report.tone, Tone::Neutral);
        assert_eq!(report.polarity, 0.0);
        assert_eq!(report.subjectivity, 0.0);

        assert_eq!(analyze_sentiment("").tone, Tone::Neutral);
    }

    #[test]
    fn test_positive_and_negative() {
        let positive = analyze_sentiment("This is a great talk with a wonderful demo.");
        assert_eq!(positive.tone, Tone::Positive);
        assert!(close(positive.polarity, 0.9));

        let negative = analyze_sentiment("A boring, terrible and awful lecture.");
        assert_eq!(negative.tone, Tone::Negative);
        assert!(close(negative.polarity, -1.0));
    }

    #[test]
    fn test_intensifier_and_negation() {
        assert!(close(analyze_sentiment("very good").polarity, 0.91));
        assert!(close(analyze_sentiment("really awesome").polarity, 1.0));
        assert!(close(analyze_sentiment("not good").polarity, -0.35));
        assert!(close(analyze_sentiment("It isn't bad").polarity, 0.35));
        assert!(close(analyze_sentiment("not very good").polarity, -0.455));
    }

    #[test]
    fn test_modifier_only_reaches_next_word() {
        // "not" is consumed by "the", so "best" keeps its score.
        assert!(close(analyze_sentiment("not the best").polarity, 1.0));
    }

    #[test]
    fn test_spoken_fillers_are_not_scored() {
        assert_eq!(analyze_sentiment("Right, so that's the kind of thing.").polarity, 0.0);
        // "pretty" intensifies rather than scoring on its own.
        assert!(close(analyze_sentiment("Right, it's pretty good.").polarity, 0.77));
        assert!(close(analyze_sentiment("It is kind of slow").polarity, -0.3));
    }

    #[test]
    fn test_common_review_adjectives() {
        let mixed = analyze_sentiment("The API is elegant but the docs are tedious.");
        assert!(close(mixed.polarity, 0.0));
        assert_eq!(mixed.tone, Tone::Neutral);

        assert_eq!(analyze_sentiment("A buggy, frustrating release.").tone, Tone::Negative);
        assert_eq!(analyze_sentiment("An insightful and inspiring keynote.").tone, Tone::Positive);
    }

    #[test]
    fn test_threshold_boundary_is_neutral() {
        assert_eq!(Tone::from_polarity(0.3, 0.3), Tone::Neutral);
        assert_eq!(Tone::from_polarity(-0.3, 0.3), Tone::Neutral);
        assert_eq!(Tone::from_polarity(0.31, 0.3), Tone::Positive);

        let strict = analyze_with_threshold("good", 0.8);
        assert_eq!(strict.tone, Tone::Neutral);
    }
}
