// textprobe Data Models
// Value objects produced by a single analysis call

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Feature Vector ============

/// Six independent signals, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub vocabulary_richness: f64,
    pub naturalness: f64,
    pub coherence: f64,
    pub structure: f64,
    pub perplexity: f64,
    pub format_consistency: f64,
}

impl FeatureVector {
    /// (name, value) pairs in a fixed order, used for explanations and checks.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("vocabularyRichness", self.vocabulary_richness),
            ("naturalness", self.naturalness),
            ("coherence", self.coherence),
            ("structure", self.structure),
            ("perplexity", self.perplexity),
            ("formatConsistency", self.format_consistency),
        ]
    }
}

// ============ Confidence ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        };
        f.write_str(label)
    }
}

// ============ Segment ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentOffsets {
    /// UTF-8 byte offset (0-based) into the analyzed text.
    pub start: usize,
    /// UTF-8 byte offset (0-based, end-exclusive) into the analyzed text.
    pub end: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub index: usize,
    pub text: String,
    pub offsets: SegmentOffsets,
    pub word_count: usize,
    pub ai_probability: u32,
    pub confidence: Confidence,
    pub metrics: FeatureVector,
    pub explanations: Vec<String>,
}

// ============ Transitions ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDetail {
    /// Later segment of the flagged pair.
    pub index: usize,
    pub from: u32,
    pub to: u32,
    pub delta: u32,
}

// ============ Analysis Result ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ai_probability: u32,
    pub human_probability: u32,
    pub confidence: Confidence,
    pub detected_language: String,
    pub language_code: String,
    pub word_count: usize,
    pub segments: Vec<SegmentResult>,
    pub metrics: FeatureVector,
    pub transitions: Vec<usize>,
    pub transition_details: Vec<TransitionDetail>,
    pub reasonings: Vec<String>,
}
