/// Lexicon-based polarity scoring for review text
///
/// Each sentiment-bearing word carries a valence in `[-1, 1]`. Intensifiers scale the
/// next scored word, negators flip and dampen it, and the text polarity is the mean of
/// the scored words. Text without any lexicon word is neutral (0).
use std::collections::HashMap;

/// Estimates sentiment valence for a single piece of text
pub trait PolarityAnalyzer: Send + Sync {
    /// Returns a polarity in `[-1, 1]`
    fn polarity(&self, text: &str) -> f64;
}

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("charming", 0.5),
    ("classic", 0.17),
    ("cool", 0.35),
    ("enjoy", 0.4),
    ("enjoyable", 0.4),
    ("enjoyed", 0.4),
    ("epic", 0.1),
    ("excellent", 1.0),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("favorite", 0.5),
    ("fun", 0.3),
    ("gorgeous", 0.7),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("immersive", 0.4),
    ("incredible", 0.9),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("masterpiece", 0.8),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("polished", 0.4),
    ("recommend", 0.3),
    ("smooth", 0.4),
    ("solid", 0.3),
    ("stunning", 0.5),
    ("superb", 1.0),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // negative
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("buggy", -0.5),
    ("clunky", -0.4),
    ("crash", -0.3),
    ("crashes", -0.3),
    ("disappointing", -0.6),
    ("dull", -0.3),
    ("frustrating", -0.4),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("laggy", -0.4),
    ("mediocre", -0.3),
    ("poor", -0.4),
    ("repetitive", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("tedious", -0.4),
    ("trash", -0.7),
    ("ugly", -0.7),
    ("unfinished", -0.3),
    ("unplayable", -0.8),
    ("waste", -0.6),
    ("worse", -0.4),
    ("worst", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.3),
    ("extremely", 1.3),
    ("incredibly", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("super", 1.3),
    ("totally", 1.2),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &[
    "not", "never", "no", "nothing", "cannot", "isn't", "wasn't", "don't", "doesn't",
    "didn't", "can't", "won't", "aren't", "isnt", "wasnt", "dont", "doesnt", "didnt", "cant",
];

/// Factor applied to a word's valence when it follows a negator
const NEGATION_FACTOR: f64 = -0.5;

/// Extra weight per trailing exclamation mark on a scored word
const EXCLAMATION_BOOST: f64 = 0.1;

/// Word-list polarity analyzer
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    valence: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self {
            valence: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut multiplier = 1.0;
        let mut negated = false;

        for raw in lowered.split_whitespace() {
            let exclamations = raw.chars().rev().take_while(|c| *c == '!').count();
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');

            if NEGATORS.iter().any(|negator| *negator == word) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(word) {
                multiplier *= factor;
                continue;
            }

            // pending modifiers carry over neutral words until a scored word uses them
            let Some(valence) = self.valence.get(word) else {
                continue;
            };

            let mut score = valence * multiplier;
            if negated {
                score *= NEGATION_FACTOR;
            }
            score *= 1.0 + EXCLAMATION_BOOST * exclamations as f64;
            scores.push(score.clamp(-1.0, 1.0));

            multiplier = 1.0;
            negated = false;
        }

        if scores.is_empty() {
            return 0.0;
        }

        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }
}
