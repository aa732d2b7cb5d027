// Detection Module
// Heuristic AI text detection organized into specialized submodules:
// - language_identifier: Picks the best-matching language profile
// - segment_splitter: Partitions text into paragraph/sentence segments
// - features: Computes the six per-unit signals
// - scoring: Fuses signals into an AI-probability and explains it
// - segment_builder: Scores each segment
// - aggregation: Aggregates segment scores into the overall score
// - transitions: Flags abrupt score changes between segments
// - analyzer: The analysis entry points

pub mod language_identifier;
pub mod segment_splitter;
pub mod features;
pub mod scoring;
pub mod segment_builder;
pub mod aggregation;
pub mod transitions;
pub mod analyzer;

// Re-export commonly used functions
pub use language_identifier::{identify_language, profile_score};
pub use segment_splitter::{segments, split_segments, SegmentSpan, SegmentSplitter};
pub use features::extract_features;
pub use scoring::{explain, fuse, human_probability, Polarity, POLARITIES};
pub use segment_builder::{build_segments, make_segment};
pub use aggregation::aggregate_segments;
pub use transitions::{detect_transitions, transition_details};
pub use analyzer::{analyze, analyze_request};
