//! Cosine similarity between flat parameter vectors.

use crate::error::GkdeError;

/// Compute the cosine similarity of two flat vectors.
///
/// Accumulation runs in `f64` so that million-element weight vectors do
/// not lose precision to `f32` summation.
///
/// # Errors
///
/// - [`GkdeError::DimensionMismatch`] if the vectors differ in length
///   (the two models do not share an architecture for the selected layers).
/// - [`GkdeError::ZeroMagnitudeVector`] if either vector has zero norm.
///   An all-zero model must surface as an error rather than be coerced to
///   some default similarity.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, GkdeError> {
    if a.len() != b.len() {
        return Err(GkdeError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(GkdeError::ZeroMagnitudeVector);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
