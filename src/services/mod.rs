// textprobe Core Services

pub mod text_processor;
pub mod language_profiles;
pub mod config_store;
pub mod errors;
pub mod detection;

pub use text_processor::*;
pub use language_profiles::{LanguageProfile, PatternMatcher, ProfileRegistry, ProfileSpec, BUILTIN_PROFILES};
pub use config_store::{ConfidenceThresholds, ConfigStore, EngineConfig, FusionWeights};
pub use errors::{ConfigError, DetectionError, MalformedProfileError};

pub use detection::{
    analyze,
    analyze_request,
    build_segments,
    detect_transitions,
    extract_features,
    identify_language,
    split_segments,
};
