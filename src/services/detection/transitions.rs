// Transition Detector
// Flags abrupt score changes between consecutive segments

use crate::models::TransitionDetail;

/// Consecutive pairs whose absolute delta strictly exceeds `threshold`, in document order.
pub fn transition_details(scores: &[u32], threshold: u32) -> Vec<TransitionDetail> {
    scores
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let delta = pair[0].abs_diff(pair[1]);
            (delta > threshold).then_some(TransitionDetail {
                index: i + 1,
                from: pair[0],
                to: pair[1],
                delta,
            })
        })
        .collect()
}

/// Later index of each flagged pair.
pub fn detect_transitions(scores: &[u32], threshold: u32) -> Vec<usize> {
    transition_details(scores, threshold)
        .into_iter()
        .map(|t| t.index)
        .collect()
}
