//! Gaussian kernel density estimation over a score set.
//!
//! A fitted [`GaussianKde`] places one Gaussian kernel on every score and
//! evaluates their normalized sum on a fine grid. The bandwidth is pinned
//! at [`COVARIANCE_FACTOR`] times the sample standard deviation of the
//! scores — narrower than the Scott rule-of-thumb default, so two nearby
//! modes are not smoothed into one.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::stats::{sample_std_dev, std_dev};

/// Bandwidth as a fraction of the sample (ddof = 1) score standard
/// deviation.
///
/// Tunable design parameter, not derived from the data beyond the default
/// scale estimate.
pub const COVARIANCE_FACTOR: f64 = 0.5;

/// Number of evenly spaced evaluation points on the density grid.
pub const GRID_POINTS: usize = 2000;

/// A sampled probability density function over the score domain.
///
/// `grid` and `density` have equal length; `grid` ascends strictly from
/// `min(scores) - std` to `max(scores) + std`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DensitySample {
    /// Evaluation points, strictly ascending.
    pub grid: Vec<f64>,
    /// Estimated density at each grid point.
    pub density: Vec<f64>,
}

/// Gaussian kernel density estimator fitted to a score set.
#[derive(Clone, Debug)]
pub struct GaussianKde {
    points: Vec<f64>,
    std: f64,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit an estimator to a score set.
    ///
    /// Returns `None` when no density can be estimated: fewer than two
    /// scores, zero variance (all scores identical), or any non-finite
    /// score. Callers treat `None` as "no separation possible".
    pub fn fit(scores: &[f64]) -> Option<Self> {
        if scores.len() < 2 || scores.iter().any(|s| !s.is_finite()) {
            return None;
        }
        let std = std_dev(scores);
        if std == 0.0 {
            return None;
        }
        // Kernel scale follows the sample std (Bessel-corrected), as in
        // covariance-based estimators; grid padding uses the population
        // std, kept separate in `self.std`.
        Some(Self {
            points: scores.to_vec(),
            std,
            bandwidth: COVARIANCE_FACTOR * sample_std_dev(scores),
        })
    }

    /// Bandwidth actually in use (factor times the sample score std).
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Evaluate the estimated density at one point.
    pub fn density_at(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .map(|&p| {
                let z = (x - p) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    /// Sample the density on [`GRID_POINTS`] evenly spaced points spanning
    /// `[min - std, max + std]`.
    ///
    /// The one-std padding keeps the tails of the curve on the grid even
    /// when extreme scores sit at the sample boundary.
    pub fn sample(&self) -> DensitySample {
        let min = self.points.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = min - self.std;
        let hi = max + self.std;
        let step = (hi - lo) / (GRID_POINTS - 1) as f64;

        let grid: Vec<f64> = (0..GRID_POINTS).map(|i| lo + step * i as f64).collect();
        let density: Vec<f64> = grid.par_iter().map(|&x| self.density_at(x)).collect();

        DensitySample { grid, density }
    }
}

/// Fit and sample in one step. `None` under the same degenerate
/// conditions as [`GaussianKde::fit`].
pub fn sample_scores(scores: &[f64]) -> Option<DensitySample> {
    GaussianKde::fit(scores).map(|kde| kde.sample())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rejects_degenerate_inputs() {
        assert!(GaussianKde::fit(&[]).is_none());
        assert!(GaussianKde::fit(&[0.3]).is_none());
        assert!(GaussianKde::fit(&[0.5, 0.5, 0.5]).is_none());
        assert!(GaussianKde::fit(&[0.1, f64::NAN]).is_none());
    }

    #[test]
    fn test_bandwidth_uses_sample_std() {
        let scores = [0.01, 0.02, 0.03, 0.95, 0.97];
        let kde = GaussianKde::fit(&scores).unwrap();

        let expected = COVARIANCE_FACTOR * crate::math::stats::sample_std_dev(&scores);
        assert!((kde.bandwidth() - expected).abs() < 1e-12);
        // Bessel correction widens the kernel relative to the population
        // std used for grid padding.
        assert!(kde.bandwidth() > COVARIANCE_FACTOR * std_dev(&scores));
    }

    #[test]
    fn test_grid_shape_and_coverage() {
        let scores = [0.01, 0.02, 0.03, 0.95, 0.97];
        let sample = sample_scores(&scores).unwrap();
        let std = std_dev(&scores);

        assert_eq!(sample.grid.len(), GRID_POINTS);
        assert_eq!(sample.density.len(), GRID_POINTS);
        assert!(sample.grid[0] <= 0.01 - std + 1e-12);
        assert!(*sample.grid.last().unwrap() >= 0.97 + std - 1e-12);
    }

    #[test]
    fn test_grid_strictly_ascending() {
        let sample = sample_scores(&[0.1, 0.2, 0.9]).unwrap();
        assert!(sample.grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_density_nonnegative_and_peaked_at_cluster() {
        let scores = [0.1, 0.11, 0.12, 0.9];
        let kde = GaussianKde::fit(&scores).unwrap();
        let sample = kde.sample();

        assert!(sample.density.iter().all(|&d| d >= 0.0));
        // Density near the three-score cluster exceeds density at the
        // midpoint between the clusters.
        assert!(kde.density_at(0.11) > kde.density_at(0.5));
    }

    #[test]
    fn test_bimodal_scores_have_interior_dip() {
        let scores = [0.01, 0.02, 0.03, 0.95, 0.97];
        let kde = GaussianKde::fit(&scores).unwrap();
        let mid = kde.density_at(0.5);
        assert!(kde.density_at(0.02) > mid);
        assert!(kde.density_at(0.96) > mid);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let scores = [0.2, 0.4, 0.35, 0.8];
        let a = sample_scores(&scores).unwrap();
        let b = sample_scores(&scores).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.density, b.density);
    }

    #[test]
    fn test_density_integrates_to_one() {
        let scores = [0.1, 0.3, 0.5, 0.7];
        let sample = sample_scores(&scores).unwrap();
        let step = sample.grid[1] - sample.grid[0];
        let integral: f64 = sample.density.iter().sum::<f64>() * step;
        // Grid spans only [min - std, max + std]; a little mass sits in
        // the truncated tails.
        assert!(integral > 0.8 && integral < 1.05, "integral = {}", integral);
    }
}
