//! Density estimation and mode partitioning over anomaly scores.
//!
//! The defense's separation logic lives here:
//!
//! - [`kde`] — Gaussian kernel density estimation sampled on a fixed grid
//! - [`partition`] — cut the sampled curve at its local minima and assign
//!   every score to exactly one mode
//!
//! Both stages operate on the 1-D anomaly-score signal only; the
//! high-dimensional weight tensors never reach this module.

pub mod kde;
pub mod partition;

pub use kde::{DensitySample, GaussianKde, COVARIANCE_FACTOR, GRID_POINTS};
pub use partition::ModePartition;
