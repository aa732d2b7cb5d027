// Score Fusion
// Combines a feature vector into one AI-probability with fixed weights and polarities.
//
// Polarity per feature:
//   vocabularyRichness  inverted  (rich vocabulary reads human)
//   naturalness         inverted  (contractions, informal markers, pronouns read human)
//   coherence           direct    (dense transition words read AI)
//   structure           inverted  (varied sentence lengths read human)
//   perplexity          inverted  (unpredictable word distribution reads human)
//   formatConsistency   direct    (lists and markup read AI)

use crate::models::FeatureVector;
use crate::services::config_store::FusionWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Higher value indicates AI.
    Direct,
    /// Higher value indicates a human author.
    Inverted,
}

pub const POLARITIES: [Polarity; 6] = [
    Polarity::Inverted,
    Polarity::Inverted,
    Polarity::Direct,
    Polarity::Inverted,
    Polarity::Inverted,
    Polarity::Direct,
];

/// Feature value re-expressed so that 100 always means "AI-like".
pub fn ai_lean(value: f64, polarity: Polarity) -> f64 {
    match polarity {
        Polarity::Direct => value,
        Polarity::Inverted => 100.0 - value,
    }
}

/// Per-feature weighted AI points, in `FeatureVector::entries` order.
pub fn contributions(features: &FeatureVector, weights: &FusionWeights) -> [(&'static str, f64); 6] {
    let entries = features.entries();
    let weights = weights.as_array();
    let mut out = [("", 0.0); 6];
    for i in 0..6 {
        let (name, value) = entries[i];
        out[i] = (name, ai_lean(value, POLARITIES[i]) * weights[i]);
    }
    out
}

/// Rounded AI-probability in [0, 100].
pub fn fuse(features: &FeatureVector, weights: &FusionWeights) -> u32 {
    let total: f64 = contributions(features, weights).iter().map(|(_, c)| c).sum();
    to_percent(total)
}

pub fn to_percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

pub fn human_probability(ai_probability: u32) -> u32 {
    100 - ai_probability.min(100)
}

fn describe(name: &str, value: f64, ai_leaning: bool) -> String {
    let text = match (name, ai_leaning) {
        ("vocabularyRichness", true) => "low lexical diversity",
        ("vocabularyRichness", false) => "rich, varied vocabulary",
        ("naturalness", true) => "few contractions, informal markers or personal pronouns",
        ("naturalness", false) => "conversational markers and personal voice",
        ("coherence", true) => "heavy use of transition words",
        ("coherence", false) => "few formulaic transitions",
        ("structure", true) => "uniform sentence lengths",
        ("structure", false) => "varied sentence lengths",
        ("perplexity", true) => "predictable word distribution",
        ("perplexity", false) => "unpredictable word choice",
        ("formatConsistency", true) => "list and markup formatting",
        ("formatConsistency", false) => "plain unformatted prose",
        (_, _) => "unremarkable signal",
    };
    let direction = if ai_leaning { "AI" } else { "human" };
    format!("{} ({}={:.1}) suggests {} authorship", text, name, value, direction)
}

/// Up to `limit` explanations for the features that moved the score furthest from neutral.
pub fn explain(features: &FeatureVector, weights: &FusionWeights, limit: usize) -> Vec<String> {
    let entries = features.entries();
    let weights = weights.as_array();
    let mut ranked: Vec<(f64, String)> = Vec::new();
    for i in 0..6 {
        let (name, value) = entries[i];
        let lean = ai_lean(value, POLARITIES[i]);
        if (30.0..=70.0).contains(&lean) || weights[i] <= 0.0 {
            continue;
        }
        let strength = (lean - 50.0).abs() * weights[i];
        ranked.push((strength, describe(name, value, lean > 50.0)));
    }
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().take(limit).map(|(_, s)| s).collect()
}
