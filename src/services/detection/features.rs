// Feature Extractor
// Six independent signals computed from a text unit and a language profile.
// Every value is clamped to [0, 100]; empty denominators yield 0.
// Units with fewer than two words carry no signal and get an all-zero vector.

use crate::models::FeatureVector;
use crate::services::config_store::EngineConfig;
use crate::services::language_profiles::LanguageProfile;
use crate::services::text_processor::TextUnit;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn bullet_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*[-*+•][ \t]+\S").expect("bullet regex"))
}

fn numbered_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\d{1,3}[.)][ \t]+\S").expect("numbered regex"))
}

fn inline_markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)\*\*|__|`|^[ \t]*#{1,6}[ \t]").expect("markup regex"))
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct words over total words, as a percentage.
pub fn vocabulary_richness(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    clamp_score(distinct.len() as f64 / words.len() as f64 * 100.0)
}

/// Coefficient of variation of sentence lengths (population std / mean), as a percentage.
pub fn structure(sentences: &[&str]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
    clamp_score(variance.sqrt() / mean * 100.0)
}

/// Density of contractions, informal markers and personal pronouns.
pub fn naturalness(text: &str, word_count: usize, profile: &LanguageProfile, scale: f64) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let markers = profile.contractions.count(text)
        + profile.informal_markers.count(text)
        + profile.pronouns.count(text);
    clamp_score(markers as f64 / word_count as f64 * scale)
}

/// Transition words per sentence, as a percentage.
pub fn coherence(text: &str, sentence_count: usize, profile: &LanguageProfile) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    let transitions = profile.transition_words.count(text);
    clamp_score(transitions as f64 / sentence_count as f64 * 100.0)
}

/// Shannon entropy (bits) of the unit's word-frequency distribution.
pub fn word_entropy(words: &[String]) -> f64 {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for w in words {
        *freq.entry(w.as_str()).or_insert(0) += 1;
    }
    // A single distinct word has zero entropy; negating the zero sum would give -0.0.
    if freq.len() <= 1 {
        return 0.0;
    }
    let total = words.len() as f64;
    -freq
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Entropy rescaled to [0, 100]. Higher means a less predictable word distribution.
pub fn perplexity(words: &[String], scale: f64) -> f64 {
    clamp_score((word_entropy(words) * scale).min(100.0))
}

/// Bullet lines, numbered lines and inline markup per sentence, as a percentage.
pub fn format_consistency(text: &str, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    let markers = bullet_line_re().find_iter(text).count()
        + numbered_line_re().find_iter(text).count()
        + inline_markup_re().find_iter(text).count();
    clamp_score(markers as f64 / sentence_count as f64 * 100.0)
}

pub fn extract_features(
    unit: &TextUnit<'_>,
    profile: &LanguageProfile,
    config: &EngineConfig,
) -> FeatureVector {
    if unit.word_count() < 2 {
        return FeatureVector::default();
    }
    let text = unit.raw();
    FeatureVector {
        vocabulary_richness: round2(vocabulary_richness(unit.words())),
        naturalness: round2(naturalness(text, unit.word_count(), profile, config.naturalness_scale)),
        coherence: round2(coherence(text, unit.sentence_count(), profile)),
        structure: round2(structure(unit.sentences())),
        perplexity: round2(perplexity(unit.words(), config.perplexity_scale)),
        format_consistency: round2(format_consistency(text, unit.sentence_count())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::language_profiles::ProfileRegistry;
    use crate::services::text_processor::split_words;

    fn english() -> LanguageProfile {
        ProfileRegistry::builtin().unwrap().fallback().clone()
    }

    fn in_range(fv: &FeatureVector) -> bool {
        fv.entries().iter().all(|(_, v)| (0.0..=100.0).contains(v))
    }

    #[test]
    fn test_vocabulary_richness() {
        assert_eq!(vocabulary_richness(&split_words("a b c d")), 100.0);
        assert_eq!(vocabulary_richness(&split_words("a a a a")), 25.0);
        assert_eq!(vocabulary_richness(&[]), 0.0);
    }

    #[test]
    fn test_structure_needs_two_sentences() {
        assert_eq!(structure(&["one two three"]), 0.0);
        assert_eq!(structure(&["a b", "c d"]), 0.0);
        // lengths 1 and 3: mean 2, std 1
        assert!((structure(&["a", "b c d"]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_structure_is_clamped() {
        let long = "w ".repeat(200);
        let value = structure(&["a", "b", "c", "d", long.trim()]);
        assert_eq!(value, 100.0);
    }

    #[test]
    fn test_naturalness_of_informal_text() {
        let profile = english();
        let text = "I think, y'know, it's just kinda weird";
        let words = split_words(text);
        assert_eq!(naturalness(text, words.len(), &profile, 200.0), 100.0);
        assert_eq!(naturalness("", 0, &profile, 200.0), 0.0);
    }

    #[test]
    fn test_coherence_counts_transitions_per_sentence() {
        let profile = english();
        let text = "However, it rained. Therefore we stayed. The end.";
        let value = coherence(text, 3, &profile);
        assert!((value - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(coherence(text, 0, &profile), 0.0);
    }

    #[test]
    fn test_entropy_and_perplexity() {
        assert_eq!(word_entropy(&split_words("same same same")), 0.0);
        assert!((word_entropy(&split_words("a b c d")) - 2.0).abs() < 1e-9);
        assert!((perplexity(&split_words("a b c d"), 15.0) - 30.0).abs() < 1e-9);
        let varied = split_words(&(0..500).map(|i| format!("w{} ", i)).collect::<String>());
        assert_eq!(perplexity(&varied, 15.0), 100.0);
    }

    #[test]
    fn test_format_consistency() {
        let text = "Summary:\n- first point\n- second point\n1. numbered\n**bold** and `code`";
        assert!(format_consistency(text, 2) > 0.0);
        assert_eq!(format_consistency("Plain prose without markup.", 1), 0.0);
        assert_eq!(format_consistency(text, 0), 0.0);
    }

    #[test]
    fn test_extract_features_on_degenerate_units() {
        let registry = ProfileRegistry::builtin().unwrap();
        let config = EngineConfig::default();
        for profile in registry.profiles() {
            for text in ["", "word", ".", "!!! ???", "one.", "- a\n- b", "y'know y'know"] {
                let unit = TextUnit::new(text);
                let fv = extract_features(&unit, profile, &config);
                assert!(in_range(&fv), "out of range for {} {:?}: {:?}", profile.code, text, fv);
            }
            let empty = extract_features(&TextUnit::new(""), profile, &config);
            assert_eq!(empty, FeatureVector::default());
        }
    }

    #[test]
    fn test_single_word_has_all_zero_features() {
        let profile = english();
        let config = EngineConfig::default();
        for text in ["word", "  Hello!  ", "one."] {
            let fv = extract_features(&TextUnit::new(text), &profile, &config);
            assert_eq!(fv, FeatureVector::default(), "single word {:?}", text);
        }
        let two = extract_features(&TextUnit::new("two words"), &profile, &config);
        assert_eq!(two.vocabulary_richness, 100.0);
    }

    #[test]
    fn test_zero_entropy_is_positive_zero() {
        for text in ["", "same", "same same same"] {
            let words = split_words(text);
            assert!(word_entropy(&words).is_sign_positive(), "entropy sign for {:?}", text);
            assert!(perplexity(&words, 15.0).is_sign_positive(), "perplexity sign for {:?}", text);
        }
        let profile = english();
        let fv = extract_features(&TextUnit::new("test test test"), &profile, &EngineConfig::default());
        let json = serde_json::to_string(&fv).unwrap();
        assert!(json.contains("\"perplexity\":0.0"), "{}", json);
        assert!(!json.contains("-0.0"), "{}", json);
    }

    #[test]
    fn test_repetitive_text_has_low_diversity() {
        let profile = english();
        let config = EngineConfig::default();
        let text = "test ".repeat(300);
        let fv = extract_features(&TextUnit::new(&text), &profile, &config);
        assert!(fv.vocabulary_richness < 1.0);
        assert_eq!(fv.naturalness, 0.0);
        assert_eq!(fv.perplexity, 0.0);
    }
}
