//! # GKDE-FL: Gaussian-KDE Poisoning Defense for Federated Learning
//!
//! Filters a round's client model updates before aggregation: each local
//! model gets an anomaly score against the global model, a Gaussian
//! kernel density estimate splits the score distribution into modes at
//! its local minima, and only the mode closest to "identical to the
//! global model" proceeds to aggregation.
//!
//! ## Pipeline
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | Vectorize whitelisted parameters | [`math::flatten_into_vector`] |
//! | Score `1 - cos(global, local)` | [`scoring::score_models`] |
//! | Density estimate over scores | [`density::GaussianKde`] |
//! | Cut at local minima into modes | [`density::ModePartition`] |
//! | Select the lowest mode as benign | [`ModePartition::benign_indices`](density::ModePartition::benign_indices) |
//! | Orchestrate one `(task, round)` | [`RoundEvaluator`] |
//!
//! ## High-Level API
//!
//! Implement [`ModelStore`] (or use [`MemoryModelStore`]) and hand it to
//! [`RoundEvaluator`]; or call [`filter_round`] / [`filter_scores`]
//! directly on in-memory data.
//!
//! Degenerate rounds (all scores identical, or fewer than two updates)
//! fail open: every update is retained, since a defense must not halt
//! training on a round with no anomaly signal.

#![deny(missing_docs)]

pub mod defense;
pub mod density;
pub mod error;
pub mod math;
pub mod model;
pub mod scoring;
pub mod tasks;

// Re-exports
pub use defense::{filter_round, filter_scores, RoundEvaluator, RoundOutcome, RoundReport};
pub use density::{DensitySample, GaussianKde, ModePartition};
pub use error::GkdeError;
pub use model::{MemoryModelStore, ModelStore, ParameterMap};
pub use scoring::{score_models, ScoredModel};
pub use tasks::LearningTask;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Python bindings via PyO3
#[cfg(feature = "python")]
mod python {
    use numpy::PyReadonlyArray1;
    use pyo3::prelude::*;

    use crate::error::GkdeError;

    fn gkde_err(e: GkdeError) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
    }

    /// Benign indices for a score set, as computed by the mode partition.
    #[pyfunction]
    fn filter_scores(scores: Vec<f64>) -> Vec<usize> {
        crate::filter_scores(&scores)
    }

    /// Anomaly scores `1 - cos(global, local)` for flat vectors.
    #[pyfunction]
    fn anomaly_scores<'py>(
        global: PyReadonlyArray1<'py, f32>,
        locals: Vec<PyReadonlyArray1<'py, f32>>,
    ) -> PyResult<Vec<f64>> {
        let global = global.as_slice()?;
        locals
            .iter()
            .map(|local| {
                let local = local.as_slice()?;
                let cos = crate::math::cosine_similarity(global, local).map_err(gkde_err)?;
                Ok(1.0 - cos)
            })
            .collect()
    }

    /// Sampled density curve `(grid, density)` for a score set, or `None`
    /// when the distribution is degenerate.
    #[pyfunction]
    fn kde_curve(scores: Vec<f64>) -> Option<(Vec<f64>, Vec<f64>)> {
        crate::density::kde::sample_scores(&scores).map(|s| (s.grid, s.density))
    }

    #[pymodule]
    fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(filter_scores, m)?)?;
        m.add_function(wrap_pyfunction!(anomaly_scores, m)?)?;
        m.add_function(wrap_pyfunction!(kde_curve, m)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
