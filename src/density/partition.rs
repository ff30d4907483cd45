//! Mode partitioning of a sampled density curve.
//!
//! Strict local minima of the density sequence split the grid into
//! contiguous intervals ("modes"). Every score is assigned to exactly one
//! mode; mode 0 covers the lowest score range and is, by construction,
//! the group closest to "identical to the global model".

use serde::{Deserialize, Serialize};

use crate::density::kde::DensitySample;

/// A partition of score indices into density modes.
///
/// Mode 0 is the lowest-score interval. The union of all modes is exactly
/// the full index range of the score set, each index appearing once.
/// Intermediate modes may be empty (an interval between two minima that
/// captured no score).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModePartition {
    modes: Vec<Vec<usize>>,
}

impl ModePartition {
    /// Partition `scores` according to the local minima of `sample`.
    ///
    /// Cut points are the strict local minima of the density sequence
    /// (value less than both neighbors; grid boundaries never qualify) in
    /// ascending grid order, plus the right grid boundary as terminal
    /// cut. Each score goes to the first interval whose upper grid bound
    /// is at or above it, which realizes inclusive-bound membership with
    /// earliest-interval tie-breaking.
    ///
    /// With zero local minima the result is a single mode holding every
    /// index.
    pub fn from_sample(sample: &DensitySample, scores: &[f64]) -> Self {
        let mut cuts = local_minima(&sample.density);
        cuts.push(sample.grid.len());

        let mut modes: Vec<Vec<usize>> = Vec::with_capacity(cuts.len());
        let mut assigned = vec![false; scores.len()];

        for &cut in &cuts {
            let upper = sample.grid[cut - 1];
            let mut members = Vec::new();
            for (idx, &score) in scores.iter().enumerate() {
                if !assigned[idx] && score <= upper {
                    members.push(idx);
                    assigned[idx] = true;
                }
            }
            modes.push(members);
        }

        // Scores beyond the last grid point can only arise from float
        // round-off at the boundary; they belong to the final interval.
        if let Some(last) = modes.last_mut() {
            for (idx, done) in assigned.iter().enumerate() {
                if !done {
                    last.push(idx);
                }
            }
        }

        Self { modes }
    }

    /// Number of modes (intervals), including empty ones.
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Score indices of mode `i`, ascending.
    pub fn mode(&self, i: usize) -> Option<&[usize]> {
        self.modes.get(i).map(|m| m.as_slice())
    }

    /// All modes in ascending score-range order.
    pub fn modes(&self) -> &[Vec<usize>] {
        &self.modes
    }

    /// Indices of the benign group: the mode with the lowest score range.
    ///
    /// Score 0 means cosine-identical to the global model, so the lowest
    /// mode is the cluster closest to benign behavior. This is a
    /// heuristic with no tie-breaking or minority check; a colluding
    /// majority that lands in the lowest mode defeats it.
    pub fn benign_indices(&self) -> &[usize] {
        self.modes.first().map(|m| m.as_slice()).unwrap_or(&[])
    }
}

/// Indices of strict local minima of `values` (element less than both
/// neighbors). Boundary elements are never minima.
fn local_minima(values: &[f64]) -> Vec<usize> {
    let mut minima = Vec::new();
    for i in 1..values.len().saturating_sub(1) {
        if values[i] < values[i - 1] && values[i] < values[i + 1] {
            minima.push(i);
        }
    }
    minima
}
