use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Native-scale sentiment for one text: polarity in [-1, 1], subjectivity
/// in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Rescaled record on the common [0, 5] scale the rest of the system uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSentiment {
    pub sentiment: f64,
    pub polarity: f64,
}

/// Lexicon entries: (word, polarity, subjectivity). Values follow the usual
/// pattern-lexicon conventions; coverage is skewed toward the vocabulary of
/// business reviews.
static LEXICON_ENTRIES: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("broken", -0.4, 0.6),
    ("cheap", 0.4, 0.7),
    ("clean", 0.37, 0.55),
    ("comfortable", 0.45, 0.6),
    ("convenient", 0.4, 0.6),
    ("crowded", -0.4, 0.6),
    ("dirty", -0.6, 0.8),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("excellent", 1.0, 1.0),
    ("expensive", -0.4, 0.7),
    ("fantastic", 0.9, 0.9),
    ("fast", 0.2, 0.3),
    ("favorite", 0.6, 0.9),
    ("filthy", -0.9, 0.9),
    ("fine", 0.2, 0.4),
    ("friendly", 0.47, 0.67),
    ("fresh", 0.3, 0.4),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.35, 0.4),
    ("horrible", -1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("knowledgeable", 0.4, 0.5),
    ("loud", -0.25, 0.5),
    ("lovely", 0.75, 0.9),
    ("mediocre", -0.3, 0.6),
    ("modern", 0.3, 0.4),
    ("new", 0.14, 0.45),
    ("nice", 0.6, 1.0),
    ("old", -0.1, 0.2),
    ("outstanding", 0.9, 0.9),
    ("overpriced", -0.6, 0.8),
    ("patient", 0.4, 0.6),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.6, 0.8),
    ("poor", -0.4, 0.6),
    ("professional", 0.3, 0.35),
    ("quick", 0.3, 0.4),
    ("quiet", 0.15, 0.4),
    ("reliable", 0.4, 0.5),
    ("rude", -0.5, 0.8),
    ("rusty", -0.3, 0.5),
    ("slow", -0.3, 0.4),
    ("spacious", 0.4, 0.5),
    ("spotless", 0.7, 0.8),
    ("terrible", -1.0, 1.0),
    ("unfriendly", -0.5, 0.7),
    ("unhelpful", -0.4, 0.5),
    ("unprofessional", -0.5, 0.6),
    ("welcoming", 0.5, 0.6),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worth", 0.3, 0.3),
];

static NEGATORS: &[&str] = &["not", "no", "never", "nothing", "neither", "nor", "cannot"];

/// Degree modifiers scale the polarity of the word they precede.
static MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("quite", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.8),
    ("fairly", 0.9),
    ("barely", 0.6),
];

fn lexicon() -> &'static HashMap<&'static str, (f64, f64)> {
    static MAP: OnceLock<HashMap<&'static str, (f64, f64)>> = OnceLock::new();
    MAP.get_or_init(|| {
        LEXICON_ENTRIES
            .iter()
            .map(|&(w, p, s)| (w, (p, s)))
            .collect()
    })
}

fn word_scanner() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Keeps contractions together so "isn't" negates like "not".
    RE.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("static pattern"))
}

/// Lexicon polarity/subjectivity over the raw, untokenized review text.
/// Normalized tokens are useless here: negation and degree words live in
/// exactly the parts the normalizer strips.
///
/// Each lexicon hit contributes its polarity, flipped and damped by -0.5
/// under a preceding negator and scaled by a preceding degree modifier.
/// The final score is the mean over hits; no hits (or an empty string)
/// scores neutral (0, 0).
pub fn score_raw(text: &str) -> RawSentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = word_scanner()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let lex = lexicon();
    let mut polarities = Vec::new();
    let mut subjectivities = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let Some(&(base_polarity, subjectivity)) = lex.get(word) else {
            continue;
        };
        let mut polarity = base_polarity;
        // Look back up to two words for a modifier and a negator, so both
        // "not good" and "not very good" behave.
        let window = &words[i.saturating_sub(2)..i];
        if let Some(&(_, factor)) = window
            .iter()
            .rev()
            .find_map(|w| MODIFIERS.iter().find(|(m, _)| m == w))
        {
            polarity *= factor;
        }
        if window
            .iter()
            .any(|w| NEGATORS.contains(w) || w.ends_with("n't"))
        {
            polarity *= -0.5;
        }
        polarities.push(polarity.clamp(-1.0, 1.0));
        subjectivities.push(subjectivity);
    }

    if polarities.is_empty() {
        return RawSentiment {
            polarity: 0.0,
            subjectivity: 0.0,
        };
    }
    RawSentiment {
        polarity: polarities.iter().sum::<f64>() / polarities.len() as f64,
        subjectivity: subjectivities.iter().sum::<f64>() / subjectivities.len() as f64,
    }
}

/// Score and rescale onto [0, 5]: `x * 2.5 + 2.5` for both measures, so a
/// neutral text lands at exactly (2.5, 2.5).
pub fn score(text: &str) -> ScaledSentiment {
    let raw = score_raw(text);
    ScaledSentiment {
        sentiment: (raw.polarity * 2.5 + 2.5).clamp(0.0, 5.0),
        polarity: (raw.subjectivity * 2.5 + 2.5).clamp(0.0, 5.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let s = score("");
        assert_eq!(s.sentiment, 2.5);
        assert_eq!(s.polarity, 2.5);
    }

    #[test]
    fn no_lexicon_hits_is_neutral() {
        let s = score("The treadmill membership card arrived Tuesday.");
        assert_eq!(s.sentiment, 2.5);
    }

    #[test]
    fn positive_review_scores_above_neutral() {
        let s = score("Staff was amazing and helpful");
        assert!(s.sentiment > 3.0, "sentiment={}", s.sentiment);
    }

    #[test]
    fn negative_review_scores_below_neutral() {
        let s = score("Staff was rude and unhelpful");
        assert!(s.sentiment < 2.0, "sentiment={}", s.sentiment);
    }

    #[test]
    fn negation_flips_and_damps() {
        let plain = score_raw("good equipment");
        let negated = score_raw("not good equipment");
        assert!(plain.polarity > 0.0);
        assert!((negated.polarity + plain.polarity * 0.5).abs() < 1e-9);
    }

    #[test]
    fn contraction_negates_too() {
        let s = score_raw("wasn't clean at all");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn modifier_scales_polarity() {
        let plain = score_raw("clean");
        let boosted = score_raw("very clean");
        assert!(boosted.polarity > plain.polarity);
    }

    #[test]
    fn scores_stay_in_range() {
        for text in [
            "extremely awesome perfect wonderful excellent",
            "horrible terrible worst awful disgusting",
            "not not not good",
        ] {
            let s = score(text);
            assert!((0.0..=5.0).contains(&s.sentiment), "{text}");
            assert!((0.0..=5.0).contains(&s.polarity), "{text}");
        }
    }
}
