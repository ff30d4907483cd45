//! Learning-task registry.
//!
//! Maps a task identifier to the fixed set of parameter names that
//! contribute to the anomaly signal for that architecture. The whitelists
//! are compile-time constants; lookup by name is case-insensitive.
//!
//! Only the layers named here enter the flat comparison vector. Selecting
//! a stable subset keeps the cosine signal comparable across rounds even
//! when architectures carry buffers (e.g. batch-norm running stats) that
//! are not trainable parameters.

use crate::error::GkdeError;

/// Parameter whitelist for the MNIST CNN (one conv block + linear head).
pub const MNIST_PARAMETERS: &[&str] = &["layer1.0.weight", "layer1.0.bias", "fc.weight", "fc.bias"];

/// Parameter whitelist for the Fashion-MNIST CNN (two conv blocks with
/// batch-norm + linear head).
pub const FASHION_PARAMETERS: &[&str] = &[
    "layer1.0.weight",
    "layer1.0.bias",
    "layer1.1.weight",
    "layer1.1.bias",
    "layer2.0.weight",
    "layer2.0.bias",
    "layer2.1.weight",
    "layer2.1.bias",
    "fc.weight",
    "fc.bias",
];

/// Parameter whitelist for the CIFAR-10 ConvMixer (patch embedding, three
/// mixer layers, linear head).
pub const CIFAR10_PARAMETERS: &[&str] = &[
    "conv1.weight",
    "conv1.bias",
    "layer1.0.fn.0.weight",
    "layer1.0.fn.0.bias",
    "layer1.0.fn.2.weight",
    "layer1.0.fn.2.bias",
    "layer1.1.weight",
    "layer1.1.bias",
    "layer1.3.weight",
    "layer1.3.bias",
    "layer2.0.fn.0.weight",
    "layer2.0.fn.0.bias",
    "layer2.0.fn.2.weight",
    "layer2.0.fn.2.bias",
    "layer2.1.weight",
    "layer2.1.bias",
    "layer2.3.weight",
    "layer2.3.bias",
    "layer3.0.fn.0.weight",
    "layer3.0.fn.0.bias",
    "layer3.0.fn.2.weight",
    "layer3.0.fn.2.bias",
    "layer3.1.weight",
    "layer3.1.bias",
    "layer3.3.weight",
    "layer3.3.bias",
    "fc.weight",
    "fc.bias",
];

/// Supported federated learning tasks.
///
/// Each task implies a model architecture and therefore a fixed
/// parameter whitelist. Flat vectors are only comparable within one task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LearningTask {
    /// MNIST digit classification
    Mnist,
    /// Fashion-MNIST clothing classification
    Fashion,
    /// CIFAR-10 image classification
    Cifar10,
}

impl LearningTask {
    /// Resolve a task from its identifier (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, GkdeError> {
        match name.to_ascii_lowercase().as_str() {
            "mnist" => Ok(LearningTask::Mnist),
            "fashion" => Ok(LearningTask::Fashion),
            "cifar10" => Ok(LearningTask::Cifar10),
            _ => Err(GkdeError::UnknownTask(name.to_string())),
        }
    }

    /// Canonical lowercase task name.
    pub fn name(&self) -> &'static str {
        match self {
            LearningTask::Mnist => "mnist",
            LearningTask::Fashion => "fashion",
            LearningTask::Cifar10 => "cifar10",
        }
    }

    /// The fixed, ordered parameter whitelist for this task.
    ///
    /// Iteration order of the returned slice defines the layout of every
    /// flat vector built for this task, so it must never depend on the
    /// insertion order of a parameter map.
    pub fn parameter_whitelist(&self) -> &'static [&'static str] {
        match self {
            LearningTask::Mnist => MNIST_PARAMETERS,
            LearningTask::Fashion => FASHION_PARAMETERS,
            LearningTask::Cifar10 => CIFAR10_PARAMETERS,
        }
    }
}

impl std::fmt::Display for LearningTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
