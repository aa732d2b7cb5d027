// Aggregation Logic
// Aggregates segment scores into the overall AI-probability

use crate::models::SegmentResult;

/// Length-weighted mean of segment probabilities, blended with a trimmed mean
/// once there are enough segments for trimming to matter.
/// Returns `None` when there are no segments.
pub fn aggregate_segments(segments: &[SegmentResult]) -> Option<f64> {
    if segments.is_empty() {
        return None;
    }

    // sqrt(words) keeps long segments from dominating; every segment counts at least 1
    let weights: Vec<f64> = segments
        .iter()
        .map(|s| (s.word_count as f64).sqrt().max(1.0))
        .collect();
    let total: f64 = weights.iter().sum();

    let weighted: f64 = segments
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| s.ai_probability as f64 * w)
        .sum::<f64>()
        / total;

    let trimmed = if segments.len() >= 5 {
        let mut probs: Vec<f64> = segments.iter().map(|s| s.ai_probability as f64).collect();
        probs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let trim_count = (probs.len() as f64 * 0.1).ceil() as usize;
        let kept = &probs[trim_count..probs.len() - trim_count];
        if kept.is_empty() {
            weighted
        } else {
            kept.iter().sum::<f64>() / kept.len() as f64
        }
    } else {
        weighted
    };

    Some((0.7 * weighted + 0.3 * trimmed).clamp(0.0, 100.0))
}
