//! Mathematical primitives for the GKDE defense.
//!
//! Provides the building blocks of anomaly scoring and density estimation:
//!
//! - [`flatten`] — whitelist-driven parameter vectorization
//! - [`cosine`] — cosine similarity between flat vectors
//! - [`stats`] — mean and standard deviation helpers

pub mod cosine;
pub mod flatten;
pub mod stats;

pub use cosine::cosine_similarity;
pub use flatten::flatten_into_vector;
pub use stats::{mean, sample_std_dev, std_dev};
