// Analyzer
// Entry points: language -> segments -> features -> fusion -> transitions

use super::aggregation::aggregate_segments;
use super::features::extract_features;
use super::language_identifier::identify_language;
use super::scoring::{explain, fuse, human_probability, to_percent};
use super::segment_builder::build_segments;
use super::transitions::transition_details;
use crate::models::AnalysisResult;
use crate::services::config_store::EngineConfig;
use crate::services::errors::DetectionError;
use crate::services::language_profiles::ProfileRegistry;
use crate::services::text_processor::{count_words, TextUnit};
use tracing::info;

const REASONING_LIMIT: usize = 3;

/// Analyze `text`. Total over all strings: empty input yields a "Low" confidence
/// result with zeroed metrics and no segments.
pub fn analyze(text: &str, registry: &ProfileRegistry, config: &EngineConfig) -> AnalysisResult {
    let profile = identify_language(text, registry);
    let segments = build_segments(text, profile, config);

    let unit = TextUnit::new(text);
    let metrics = extract_features(&unit, profile, config);
    let word_count = unit.word_count();

    let ai_probability = aggregate_segments(&segments)
        .map(to_percent)
        .unwrap_or_else(|| fuse(&metrics, &config.weights));

    let scores: Vec<u32> = segments.iter().map(|s| s.ai_probability).collect();
    let transition_details = transition_details(&scores, config.transition_threshold);
    let transitions: Vec<usize> = transition_details.iter().map(|t| t.index).collect();

    let mut reasonings = match word_count {
        0 => vec!["no text to analyze".to_string()],
        1 => vec!["too little text to analyze".to_string()],
        _ => explain(&metrics, &config.weights, REASONING_LIMIT),
    };
    if !transitions.is_empty() {
        reasonings.push(format!(
            "{} abrupt style shift(s) between segments suggest mixed authorship",
            transitions.len()
        ));
    }
    if reasonings.is_empty() {
        reasonings.push("no strong signal in either direction".to_string());
    }

    info!(
        language = profile.code,
        words = word_count,
        segments = segments.len(),
        transitions = transitions.len(),
        ai_probability,
        "analysis.completed"
    );

    AnalysisResult {
        ai_probability,
        human_probability: human_probability(ai_probability),
        confidence: config.confidence.label(word_count),
        detected_language: profile.name.to_string(),
        language_code: profile.code.to_string(),
        word_count,
        segments,
        metrics,
        transitions,
        transition_details,
        reasonings,
    }
}

/// Length-gated entry point for transports: rejects empty, too-short and too-long text.
pub fn analyze_request(
    text: &str,
    registry: &ProfileRegistry,
    config: &EngineConfig,
) -> Result<AnalysisResult, DetectionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DetectionError::InvalidInput {
            reason: "text is empty".to_string(),
        });
    }

    let chars = trimmed.chars().count();
    if chars < config.min_chars {
        return Err(DetectionError::InvalidInput {
            reason: format!("text has {} characters, minimum is {}", chars, config.min_chars),
        });
    }

    let words = count_words(trimmed);
    if words > config.max_words {
        return Err(DetectionError::InvalidInput {
            reason: format!(
                "text exceeds maximum length of {} words (current length: {} words)",
                config.max_words, words
            ),
        });
    }

    Ok(analyze(text, registry, config))
}
