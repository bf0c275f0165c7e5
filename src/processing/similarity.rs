//! Vector similarity

use ndarray::ArrayView1;

/// Cosine similarity clamped to `[0, 1]`.
///
/// Zero vectors score 0. Term weights are non-negative so a negative
/// cosine cannot occur, the clamp also absorbs rounding above 1.
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors from different vocabularies");

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    clamp_score(dot_product / (norm_a * norm_b))
}

/// Clamp into `[0, 1]`, mapping NaN to 0
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
