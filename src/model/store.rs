//! Model store collaborator trait and an in-memory implementation.
//!
//! The round evaluator does not own model persistence. A [`ModelStore`]
//! supplies, per `(task, round)` call, the round's global model and every
//! available local model; how those are stored (filesystem, object store,
//! training pipeline handoff) is the collaborator's concern.

use std::collections::HashMap;

use crate::error::GkdeError;
use crate::model::ParameterMap;
use crate::tasks::LearningTask;

/// Source of global and local models for evaluation rounds.
///
/// Implementations must enumerate "all local models for round `r` other
/// than the global model for round `r`" and load each into a
/// [`ParameterMap`]. Loading may block on I/O; the evaluator treats each
/// call as opaque and synchronous.
pub trait ModelStore {
    /// Load the aggregated global model of the given round.
    fn global_model(&self, task: LearningTask, round: usize) -> Result<ParameterMap, GkdeError>;

    /// Load all candidate local models of the given round, in a stable
    /// order. The returned order defines the indices reported by the
    /// evaluator.
    fn local_models(
        &self,
        task: LearningTask,
        round: usize,
    ) -> Result<Vec<ParameterMap>, GkdeError>;
}

/// In-memory model store for tests, demos, and pipelines that already
/// hold models in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryModelStore {
    rounds: HashMap<(LearningTask, usize), (ParameterMap, Vec<ParameterMap>)>,
}

impl MemoryModelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rounds: HashMap::new(),
        }
    }

    /// Register the global model and local models for one round.
    /// Replaces any previously registered round.
    pub fn insert_round(
        &mut self,
        task: LearningTask,
        round: usize,
        global: ParameterMap,
        locals: Vec<ParameterMap>,
    ) {
        self.rounds.insert((task, round), (global, locals));
    }

    /// Number of registered `(task, round)` pairs.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

impl ModelStore for MemoryModelStore {
    fn global_model(&self, task: LearningTask, round: usize) -> Result<ParameterMap, GkdeError> {
        self.rounds
            .get(&(task, round))
            .map(|(global, _)| global.clone())
            .ok_or_else(|| {
                GkdeError::Storage(format!("no global model for {} round {}", task, round))
            })
    }

    fn local_models(
        &self,
        task: LearningTask,
        round: usize,
    ) -> Result<Vec<ParameterMap>, GkdeError> {
        self.rounds
            .get(&(task, round))
            .map(|(_, locals)| locals.clone())
            .ok_or_else(|| {
                GkdeError::Storage(format!("no local models for {} round {}", task, round))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn model(fill: f32) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("fc.weight", ArrayD::from_elem(vec![2, 2], fill));
        map
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryModelStore::new();
        store.insert_round(
            LearningTask::Mnist,
            3,
            model(1.0),
            vec![model(1.1), model(0.9)],
        );

        let global = store.global_model(LearningTask::Mnist, 3).unwrap();
        assert_eq!(global.get("fc.weight").unwrap()[[0, 0]], 1.0);

        let locals = store.local_models(LearningTask::Mnist, 3).unwrap();
        assert_eq!(locals.len(), 2);
    }

    #[test]
    fn test_missing_round_is_storage_error() {
        let store = MemoryModelStore::new();
        let err = store.global_model(LearningTask::Fashion, 0).unwrap_err();
        assert!(matches!(err, GkdeError::Storage(_)));
    }

    #[test]
    fn test_task_rounds_are_independent() {
        let mut store = MemoryModelStore::new();
        store.insert_round(LearningTask::Mnist, 1, model(1.0), vec![model(1.0)]);
        store.insert_round(LearningTask::Fashion, 1, model(2.0), vec![model(2.0)]);

        let mnist = store.global_model(LearningTask::Mnist, 1).unwrap();
        let fashion = store.global_model(LearningTask::Fashion, 1).unwrap();
        assert_ne!(
            mnist.get("fc.weight").unwrap()[[0, 0]],
            fashion.get("fc.weight").unwrap()[[0, 0]]
        );
    }
}
