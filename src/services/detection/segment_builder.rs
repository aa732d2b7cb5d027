// Segment Builder
// Scores each segment produced by the splitter

use super::features::extract_features;
use super::scoring::{explain, fuse};
use super::segment_splitter::{segments, SegmentSpan};
use crate::models::{SegmentOffsets, SegmentResult};
use crate::services::config_store::EngineConfig;
use crate::services::language_profiles::LanguageProfile;
use crate::services::text_processor::TextUnit;
use tracing::debug;

const SEGMENT_EXPLANATION_LIMIT: usize = 2;

/// Split `text` and score every segment against `profile`.
pub fn build_segments(text: &str, profile: &LanguageProfile, config: &EngineConfig) -> Vec<SegmentResult> {
    segments(text)
        .map(|span| make_segment(&span, profile, config))
        .collect()
}

pub fn make_segment(span: &SegmentSpan<'_>, profile: &LanguageProfile, config: &EngineConfig) -> SegmentResult {
    let unit = TextUnit::new(span.text);
    let metrics = extract_features(&unit, profile, config);
    let ai_probability = fuse(&metrics, &config.weights);
    let word_count = unit.word_count();

    debug!(
        index = span.index,
        words = word_count,
        ai_probability,
        "segment.scored"
    );

    SegmentResult {
        index: span.index,
        text: span.text.to_string(),
        offsets: SegmentOffsets {
            start: span.start,
            end: span.end,
        },
        word_count,
        ai_probability,
        confidence: config.confidence.label(word_count),
        metrics,
        explanations: explain(&metrics, &config.weights, SEGMENT_EXPLANATION_LIMIT),
    }
}
