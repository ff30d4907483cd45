//! Model parameter containers and the model-store collaborator.
//!
//! Provides [`ParameterMap`], the ordered name → tensor mapping that
//! represents one model's trainable state, and the [`ModelStore`] trait
//! through which the round evaluator obtains the global and local models
//! of a round.
//!
//! A `ParameterMap` is read-only once built and iterates in lexicographic
//! name order. Flat-vector construction never relies on that order, only
//! on the task whitelist order, but a documented iteration order keeps
//! debugging output and serialization deterministic.

pub mod store;

pub use store::{MemoryModelStore, ModelStore};

use std::collections::BTreeMap;

use ndarray::ArrayD;

/// An ordered mapping from parameter name to an n-dimensional `f32` tensor.
///
/// Represents one model's full trainable state as produced by the model
/// store. Immutable by convention once handed to the pipeline: no stage
/// mutates a map it receives.
///
/// # Example
///
/// ```rust
/// use gkde_fl::model::ParameterMap;
/// use ndarray::ArrayD;
///
/// let map: ParameterMap = [
///     ("fc.weight".to_string(), ArrayD::from_elem(vec![10, 4], 0.1f32)),
///     ("fc.bias".to_string(), ArrayD::from_elem(vec![10], 0.0f32)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(map.len(), 2);
/// assert!(map.contains("fc.bias"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterMap {
    params: BTreeMap<String, ArrayD<f32>>,
}

impl ParameterMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Insert a named tensor, replacing any previous tensor of that name.
    pub fn insert(&mut self, name: impl Into<String>, tensor: ArrayD<f32>) {
        self.params.insert(name.into(), tensor);
    }

    /// Look up a tensor by parameter name.
    pub fn get(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.params.get(name)
    }

    /// Whether a parameter of this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of named parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over `(name, tensor)` pairs in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArrayD<f32>)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of scalar elements across all tensors.
    pub fn element_count(&self) -> usize {
        self.params.values().map(|t| t.len()).sum()
    }
}

impl FromIterator<(String, ArrayD<f32>)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (String, ArrayD<f32>)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}
