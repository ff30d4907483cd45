//! Anomaly scoring of local models against the round's global model.
//!
//! A model's anomaly score is `1 - cosine_similarity` between its flat
//! whitelisted-parameter vector and the global model's: 0 means identical
//! direction, 1 orthogonal, 2 opposite.
//!
//! Each model travels with its score as a [`ScoredModel`] so that
//! reordering can never break the index correspondence between models and
//! scores.

use rayon::prelude::*;

use crate::error::GkdeError;
use crate::math::{cosine_similarity, flatten_into_vector};
use crate::model::ParameterMap;
use crate::tasks::LearningTask;

/// A local model paired with its anomaly score.
#[derive(Clone, Debug)]
pub struct ScoredModel {
    /// The local model, unmodified.
    pub model: ParameterMap,
    /// Anomaly score in `[0, 2]`.
    pub score: f64,
}

/// Score every local model against the global model for one task.
///
/// Output order matches input order exactly. Scoring runs in parallel
/// across models; the result is deterministic because each score depends
/// only on its own model pair.
///
/// # Errors
///
/// Any per-model failure (missing whitelisted parameter, dimension
/// mismatch, zero-magnitude vector) aborts the whole round. Skipping one
/// bad model and continuing would silently change the candidate set, so
/// the conservative whole-round abort is kept.
pub fn score_models(
    global: &ParameterMap,
    locals: Vec<ParameterMap>,
    task: LearningTask,
) -> Result<Vec<ScoredModel>, GkdeError> {
    let whitelist = task.parameter_whitelist();
    let global_vec = flatten_into_vector(global, whitelist)?;

    let scores = locals
        .par_iter()
        .map(|local| {
            let local_vec = flatten_into_vector(local, whitelist)?;
            let cos = cosine_similarity(&global_vec, &local_vec)?;
            Ok(1.0 - cos)
        })
        .collect::<Result<Vec<f64>, GkdeError>>()?;

    Ok(locals
        .into_iter()
        .zip(scores)
        .map(|(model, score)| ScoredModel { model, score })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    /// MNIST-shaped model whose flat vector is `fill` everywhere except
    /// the first bias element, which is `bias0`.
    fn mnist_model(fill: f32, bias0: f32) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("layer1.0.weight", ArrayD::from_elem(vec![16, 1, 5, 5], fill));
        map.insert("layer1.0.bias", {
            let mut b = ArrayD::from_elem(vec![16], fill);
            b[[0]] = bias0;
            b
        });
        map.insert("fc.weight", ArrayD::from_elem(vec![10, 2304], fill));
        map.insert("fc.bias", ArrayD::from_elem(vec![10], fill));
        map
    }

    #[test]
    fn test_self_score_is_zero() {
        let global = mnist_model(0.1, 0.1);
        let scored = score_models(&global, vec![global.clone()], LearningTask::Mnist).unwrap();
        assert_eq!(scored.len(), 1);
        assert!(scored[0].score.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_model_scores_two() {
        let global = mnist_model(0.1, 0.1);
        let flipped = mnist_model(-0.1, -0.1);
        let scored = score_models(&global, vec![flipped], LearningTask::Mnist).unwrap();
        assert!((scored[0].score - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_bounded_and_order_preserved() {
        let global = mnist_model(0.1, 0.1);
        let locals = vec![
            mnist_model(0.1, 0.1),
            mnist_model(0.1, 5.0),
            mnist_model(-0.1, -0.1),
        ];
        let scored = score_models(&global, locals, LearningTask::Mnist).unwrap();

        for s in &scored {
            assert!(s.score >= 0.0 && s.score <= 2.0, "score {}", s.score);
        }
        // Identical model scores strictly less than perturbed, which
        // scores strictly less than flipped.
        assert!(scored[0].score < scored[1].score);
        assert!(scored[1].score < scored[2].score);
    }

    #[test]
    fn test_missing_parameter_aborts_round() {
        let global = mnist_model(0.1, 0.1);
        let complete = mnist_model(0.1, 0.1);
        let broken: ParameterMap = complete
            .iter()
            .filter(|(name, _)| *name != "fc.bias")
            .map(|(name, t)| (name.to_string(), t.clone()))
            .collect();
        let err = score_models(&global, vec![broken], LearningTask::Mnist).unwrap_err();
        assert!(matches!(err, GkdeError::MissingParameter(_)));
    }

    #[test]
    fn test_scoring_deterministic() {
        let global = mnist_model(0.1, 0.1);
        let locals = vec![mnist_model(0.2, 0.3), mnist_model(0.1, -0.4)];
        let a = score_models(&global, locals.clone(), LearningTask::Mnist).unwrap();
        let b = score_models(&global, locals, LearningTask::Mnist).unwrap();
        let sa: Vec<f64> = a.iter().map(|s| s.score).collect();
        let sb: Vec<f64> = b.iter().map(|s| s.score).collect();
        assert_eq!(sa, sb);
    }
}
