//! Word lists for the sentiment scorer.
//!
//! Scores follow the pattern-analyzer convention: polarity in [-1, 1],
//! subjectivity in [0, 1].
//!
//! This is a compact list of common English opinion adjectives, not a full
//! lexicon. Words outside it are ignored, so transcripts in other languages
//! or with mostly domain vocabulary score as neutral. Conversational fillers
//! such as "right" are left out because captions use them as discourse markers.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (word, polarity, subjectivity)
const ADJECTIVES: &[(&str, f32, f32)] = &[
    ("abysmal", -1.0, 1.0),
    ("accurate", 0.4, 0.57),
    ("adequate", 0.2, 0.4),
    ("amazing", 0.6, 0.9),
    ("annoying", -0.8, 0.9),
    ("astonishing", 0.7, 0.9),
    ("attractive", 0.55, 0.75),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("bizarre", -0.3, 0.8),
    ("bland", -0.3, 0.6),
    ("boring", -1.0, 1.0),
    ("brave", 0.8, 1.0),
    ("bright", 0.7, 0.75),
    ("brilliant", 0.9, 1.0),
    ("broken", -0.4, 0.4),
    ("buggy", -0.5, 0.6),
    ("calm", 0.3, 0.75),
    ("careful", -0.1, 1.0),
    ("charming", 0.5, 0.8),
    ("cheap", 0.4, 0.7),
    ("clear", 0.1, 0.38),
    ("clever", 0.5, 1.0),
    ("clumsy", -0.4, 0.7),
    ("comfortable", 0.4, 0.8),
    ("complicated", -0.5, 1.0),
    ("confusing", -0.3, 0.7),
    ("convenient", 0.5, 0.7),
    ("cool", 0.35, 0.65),
    ("correct", 0.0, 0.0),
    ("crazy", -0.6, 0.9),
    ("creative", 0.5, 0.5),
    ("cruel", -1.0, 1.0),
    ("cute", 0.5, 1.0),
    ("dangerous", -0.6, 0.9),
    ("delightful", 1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("dreadful", -0.9, 1.0),
    ("dull", -0.3, 0.6),
    ("easy", 0.43, 0.83),
    ("effective", 0.6, 0.8),
    ("efficient", 0.0, 0.0),
    ("elegant", 0.6, 1.0),
    ("embarrassing", -0.6, 0.8),
    ("engaging", 0.5, 0.7),
    ("enjoyable", 0.4, 0.5),
    ("entertaining", 0.5, 0.7),
    ("essential", 0.0, 0.9),
    ("excellent", 1.0, 1.0),
    ("exceptional", 0.67, 1.0),
    ("excited", 0.4, 0.75),
    ("exciting", 0.3, 0.8),
    ("expensive", -0.5, 0.7),
    ("fabulous", 0.4, 0.9),
    ("failed", -0.5, 0.3),
    ("fair", 0.7, 0.9),
    ("fantastic", 0.4, 0.9),
    ("fascinating", 0.7, 0.9),
    ("fast", 0.2, 0.6),
    ("faulty", -0.5, 0.6),
    ("fine", 0.42, 0.5),
    ("flawed", -0.5, 0.6),
    ("flawless", 0.9, 0.9),
    ("fragile", -0.3, 0.6),
    ("frustrating", -0.4, 0.7),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 0.75),
    ("generous", 0.6, 0.8),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.7, 0.9),
    ("grateful", 0.7, 0.9),
    ("great", 0.8, 0.75),
    ("handy", 0.4, 0.5),
    ("happy", 0.8, 1.0),
    ("hard", -0.29, 0.54),
    ("harmful", -0.6, 0.8),
    ("hateful", -0.8, 0.9),
    ("helpful", 0.0, 0.0),
    ("hilarious", 0.5, 0.9),
    ("honest", 0.6, 0.9),
    ("hopeful", 0.5, 0.7),
    ("hopeless", -0.7, 0.9),
    ("horrible", -1.0, 1.0),
    ("ideal", 0.9, 0.9),
    ("important", 0.4, 1.0),
    ("impossible", -0.67, 1.0),
    ("impressive", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("insightful", 0.6, 0.8),
    ("inspiring", 0.6, 0.8),
    ("interesting", 0.5, 0.5),
    ("intuitive", 0.4, 0.6),
    ("irrelevant", -0.4, 0.6),
    ("lame", -0.5, 0.8),
    ("lazy", -0.25, 1.0),
    ("legendary", 0.6, 0.8),
    ("lovely", 0.5, 0.75),
    ("lucky", 0.33, 1.0),
    ("magnificent", 1.0, 1.0),
    ("marvelous", 0.9, 0.9),
    ("mediocre", -0.2, 0.6),
    ("messy", -0.3, 0.5),
    ("miserable", -1.0, 1.0),
    ("nasty", -1.0, 1.0),
    ("neat", 0.5, 0.8),
    ("negative", -0.3, 0.4),
    ("nice", 0.6, 1.0),
    ("outstanding", 0.5, 0.8),
    ("painful", -0.7, 0.9),
    ("pathetic", -1.0, 1.0),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("pointless", -0.6, 0.8),
    ("polished", 0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("positive", 0.23, 0.55),
    ("powerful", 0.3, 1.0),
    ("problematic", -0.5, 0.8),
    ("promising", 0.5, 0.6),
    ("reliable", 0.5, 0.6),
    ("remarkable", 0.75, 0.75),
    ("ridiculous", -0.33, 1.0),
    ("robust", 0.4, 0.6),
    ("rough", -0.2, 0.5),
    ("rude", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("safe", 0.5, 0.5),
    ("satisfying", 0.5, 0.7),
    ("scary", -0.5, 1.0),
    ("shocking", -0.7, 0.9),
    ("silly", -0.5, 0.9),
    ("simple", 0.0, 0.36),
    ("sloppy", -0.6, 0.8),
    ("slow", -0.3, 0.39),
    ("smart", 0.21, 0.64),
    ("smooth", 0.4, 0.6),
    ("solid", 0.4, 0.5),
    ("splendid", 1.0, 1.0),
    ("stable", 0.3, 0.4),
    ("strange", 0.0, 0.15),
    ("strong", 0.43, 0.73),
    ("stunning", 0.75, 0.9),
    ("stupid", -0.8, 1.0),
    ("successful", 0.75, 0.95),
    ("super", 0.33, 0.67),
    ("superb", 1.0, 1.0),
    ("surprising", 0.1, 0.5),
    ("tedious", -0.6, 0.8),
    ("terrible", -1.0, 1.0),
    ("terrific", 1.0, 1.0),
    ("thoughtful", 0.5, 0.8),
    ("tired", -0.4, 0.7),
    ("tough", -0.39, 0.83),
    ("ugly", -0.7, 1.0),
    ("unclear", -0.3, 0.5),
    ("unfortunate", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("unreliable", -0.5, 0.6),
    ("unstable", -0.4, 0.6),
    ("upset", -0.6, 0.9),
    ("useful", 0.3, 0.0),
    ("useless", -0.5, 0.0),
    ("valuable", 0.5, 0.6),
    ("weak", -0.38, 0.5),
    ("weird", -0.5, 1.0),
    ("wonderful", 1.0, 1.0),
    ("worried", -0.5, 0.8),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("worthless", -0.8, 0.9),
    ("worthwhile", 0.5, 0.6),
    ("wrong", -0.5, 0.9),
];

/// (word, polarity multiplier)
const INTENSIFIERS: &[(&str, f32)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("pretty", 1.1),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "nor", "cannot", "hardly", "neither"];

static ADJECTIVE_MAP: LazyLock<HashMap<&'static str, (f32, f32)>> = LazyLock::new(|| {
    ADJECTIVES
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

static INTENSIFIER_MAP: LazyLock<HashMap<&'static str, f32>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Polarity and subjectivity of a lowercase word.
pub(super) fn score(word: &str) -> Option<(f32, f32)> {
    ADJECTIVE_MAP.get(word).copied()
}

pub(super) fn intensity(word: &str) -> Option<f32> {
    INTENSIFIER_MAP.get(word).copied()
}

pub(super) fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}
