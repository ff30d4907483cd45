//! Round evaluation: the full filtering pipeline for one `(task, round)`.
//!
//! Drives scoring → density estimation → mode partitioning → benign
//! selection and reports which local models survive. Degenerate score
//! distributions (fewer than two scores, or zero variance) fail open: a
//! defense must not halt training on a round that carries no anomaly
//! signal, so every local model is retained and a warning is logged.

use serde::{Deserialize, Serialize};

use crate::density::kde::sample_scores;
use crate::density::partition::ModePartition;
use crate::error::GkdeError;
use crate::model::{ModelStore, ParameterMap};
use crate::scoring::{score_models, ScoredModel};
use crate::tasks::LearningTask;

/// Summary of one evaluated round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundReport {
    /// Canonical task name.
    pub task: String,
    /// Round number.
    pub round: usize,
    /// Number of local models retained as benign.
    pub benign: usize,
    /// Number of local models discarded as likely poisoned.
    pub malicious: usize,
    /// True when the score distribution was degenerate and the round
    /// failed open (no filtering applied).
    pub degenerate: bool,
}

/// Result of one round evaluation: the retained models and the counts.
#[derive(Clone, Debug)]
pub struct RoundOutcome {
    /// Retained local models with their scores, in original input order.
    pub retained: Vec<ScoredModel>,
    /// Counts for observability and audit.
    pub report: RoundReport,
}

/// Indices of the benign group within a score set.
///
/// Runs density estimation and mode partitioning over the scores and
/// returns the lowest mode's indices, ascending. A degenerate score set
/// returns every index (fail open). This is the score-level core of the
/// defense, usable without model objects or a store.
pub fn filter_scores(scores: &[f64]) -> Vec<usize> {
    match sample_scores(scores) {
        Some(sample) => ModePartition::from_sample(&sample, scores)
            .benign_indices()
            .to_vec(),
        None => (0..scores.len()).collect(),
    }
}

/// Evaluates the GKDE defense for `(task, round)` pairs against a model
/// store.
///
/// # Example
///
/// ```rust,no_run
/// use gkde_fl::{LearningTask, MemoryModelStore, RoundEvaluator};
///
/// let store = MemoryModelStore::new();
/// let evaluator = RoundEvaluator::new(store);
/// let outcome = evaluator.evaluate(LearningTask::Mnist, 5).unwrap();
/// println!(
///     "retained {} of {} updates",
///     outcome.report.benign,
///     outcome.report.benign + outcome.report.malicious
/// );
/// ```
pub struct RoundEvaluator<S: ModelStore> {
    store: S,
}

impl<S: ModelStore> RoundEvaluator<S> {
    /// Create an evaluator backed by a model store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Evaluate one round: load models, score, partition, select.
    ///
    /// Deterministic for a fixed store state. No input model is mutated;
    /// retained models are returned as the original objects in their
    /// original relative order.
    ///
    /// # Errors
    ///
    /// Fatal errors ([`GkdeError::UnknownTask`] upstream,
    /// [`GkdeError::MissingParameter`], [`GkdeError::DimensionMismatch`],
    /// [`GkdeError::ZeroMagnitudeVector`], [`GkdeError::Storage`],
    /// [`GkdeError::EmptyRound`]) abort this evaluation only. A round
    /// with zero local models is [`GkdeError::EmptyRound`] rather than a
    /// fail-open degenerate case: "retain all of nothing" would mask a
    /// broken model store, while one or more identical updates still fail
    /// open.
    pub fn evaluate(&self, task: LearningTask, round: usize) -> Result<RoundOutcome, GkdeError> {
        let global = self.store.global_model(task, round)?;
        let locals = self.store.local_models(task, round)?;
        if locals.is_empty() {
            return Err(GkdeError::EmptyRound(round));
        }
        filter_round(&global, locals, task, round)
    }
}

/// Run the filtering pipeline over already-loaded models.
///
/// Exposed separately from [`RoundEvaluator`] for callers that hold the
/// round's models in memory (benchmarks, bindings, embedded pipelines).
pub fn filter_round(
    global: &ParameterMap,
    locals: Vec<ParameterMap>,
    task: LearningTask,
    round: usize,
) -> Result<RoundOutcome, GkdeError> {
    let total = locals.len();
    let scored = score_models(global, locals, task)?;
    let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();

    let (benign, degenerate) = match sample_scores(&scores) {
        Some(sample) => {
            let partition = ModePartition::from_sample(&sample, &scores);
            (partition.benign_indices().to_vec(), false)
        }
        None => {
            log::warn!(
                "[{}] degenerate score distribution in round {}: retaining all {} updates",
                task,
                round,
                total
            );
            ((0..total).collect(), true)
        }
    };

    let report = RoundReport {
        task: task.name().to_string(),
        round,
        benign: benign.len(),
        malicious: total - benign.len(),
        degenerate,
    };

    log::info!("[{}] round {}: benign updates retained: {}", task, round, report.benign);
    log::info!("[{}] round {}: malicious updates discarded: {}", task, round, report.malicious);

    // benign is ascending, so one forward pass picks the retained models
    // while preserving input order.
    let mut keep = benign.into_iter().peekable();
    let retained = scored
        .into_iter()
        .enumerate()
        .filter_map(|(idx, sm)| {
            if keep.peek() == Some(&idx) {
                keep.next();
                Some(sm)
            } else {
                None
            }
        })
        .collect();

    Ok(RoundOutcome { retained, report })
}
