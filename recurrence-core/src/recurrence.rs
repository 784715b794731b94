//! Distance and recurrence matrices
//!
//! Given a signal and `(m, τ)` this module embeds the signal, computes the
//! Euclidean distance between every pair of trajectory points and thresholds
//! the result into a binary recurrence matrix.
//!
//! The threshold is explicit about its mode.  [`Threshold::Relative`] is a
//! fraction in `[0, 1]` of the largest pairwise distance in the matrix, which
//! keeps the recurrence density comparable across signals of different
//! amplitude; it is the default used by the interactive pipeline.
//! [`Threshold::Absolute`] compares against a fixed radius.
//!
//! Cost is O(L²·m) time and O(L²) memory for a trajectory of L points.
//! Nothing here caps L: L≈200 is near-instant, L≈5000 allocates two
//! 25-million-cell matrices, so interactive callers should bound the signal
//! first (see [`Signal::prefix`](crate::signal::Signal::prefix)).
//!
//! Degenerate trajectories are defined values: L = 0 gives 0×0 matrices and
//! L = 1 gives a distance matrix `[[0]]` and a recurrence matrix `[[1]]`.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::embedding::{embed_with, EmbeddedTrajectory, EmbeddingParams};
use crate::error::{RecurrenceError, Result};
use crate::signal::Signal;

/// How the recurrence radius is derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// Fraction in `[0, 1]` of the maximum pairwise distance.
    Relative(f64),
    /// Fixed distance, finite and `>= 0`.
    Absolute(f64),
}

impl Threshold {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Threshold::Relative(f) if !(0.0..=1.0).contains(&f) => Err(
                RecurrenceError::invalid_parameter(
                    "threshold",
                    format!("relative threshold must lie in [0, 1], got {f}"),
                ),
            ),
            Threshold::Absolute(r) if !(r.is_finite() && r >= 0.0) => Err(
                RecurrenceError::invalid_parameter(
                    "threshold",
                    format!("absolute radius must be finite and >= 0, got {r}"),
                ),
            ),
            _ => Ok(()),
        }
    }

    /// Effective radius for a matrix whose largest entry is `max_distance`.
    #[inline]
    pub fn radius(&self, max_distance: f64) -> f64 {
        match *self {
            Threshold::Relative(f) => f * max_distance,
            Threshold::Absolute(r) => r,
        }
    }
}

/// Output of [`compute_recurrence_matrix`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecurrenceResult {
    /// Pairwise Euclidean distances, L×L.
    pub distance: Array2<f64>,
    /// 1 where the pair recurs, 0 otherwise, L×L.
    pub binary: Array2<u8>,
    /// Largest entry of `distance` (0 when L ≤ 1).
    pub max_distance: f64,
    /// Absolute cut-off that was applied.
    pub radius: f64,
}

impl RecurrenceResult {
    /// Side length L of both matrices.
    #[inline]
    pub fn side(&self) -> usize {
        self.binary.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.side() == 0
    }

    /// Number of 1-entries, diagonal included.
    pub fn recurrence_count(&self) -> usize {
        self.binary.iter().filter(|&&v| v == 1).count()
    }

    /// Row-major copy of the binary matrix for raster consumers.
    pub fn binary_flat(&self) -> Vec<u8> {
        self.binary.iter().copied().collect()
    }

    pub fn binary_rows(&self) -> Vec<Vec<u8>> {
        self.binary.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

/// Recurrence matrix with a relative threshold (fraction of the largest
/// distance).
pub fn compute_recurrence_matrix(
    signal: &Signal,
    m: usize,
    tau: usize,
    threshold: f64,
) -> Result<RecurrenceResult> {
    compute_recurrence_matrix_with(signal, m, tau, Threshold::Relative(threshold))
}

pub fn compute_recurrence_matrix_with(
    signal: &Signal,
    m: usize,
    tau: usize,
    threshold: Threshold,
) -> Result<RecurrenceResult> {
    threshold.validate()?;
    let trajectory = embed_with(signal, EmbeddingParams::new(m, tau))?;
    recurrence_from_trajectory(&trajectory, threshold)
}

/// Same as [`compute_recurrence_matrix_with`] for callers that already hold
/// the embedded trajectory.
pub fn recurrence_from_trajectory(
    trajectory: &EmbeddedTrajectory,
    threshold: Threshold,
) -> Result<RecurrenceResult> {
    threshold.validate()?;
    let distance = compute_distance_matrix(trajectory);
    let max_distance = max_entry(distance.view());
    let radius = threshold.radius(max_distance);
    let binary = binarize(distance.view(), radius);
    Ok(RecurrenceResult {
        distance,
        binary,
        max_distance,
        radius,
    })
}

/// Symmetric L×L matrix of Euclidean distances between trajectory points.
///
/// Only the upper triangle is computed; the lower one is a mirror, so
/// `D[i][j] == D[j][i]` holds bit for bit and the diagonal is exactly zero.
/// Components are accumulated with `hypot`, so large finite samples do not
/// overflow to infinity.
pub fn compute_distance_matrix(trajectory: &EmbeddedTrajectory) -> Array2<f64> {
    let points = trajectory.as_array();
    let l = points.nrows();
    let mut distance = Array2::<f64>::zeros((l, l));
    for i in 0..l {
        let a = points.row(i);
        for j in (i + 1)..l {
            let b = points.row(j);
            let d = a
                .iter()
                .zip(b.iter())
                .fold(0.0_f64, |acc, (x, y)| acc.hypot(x - y));
            distance[[i, j]] = d;
            distance[[j, i]] = d;
        }
    }
    distance
}

/// Binary recurrence matrix for a precomputed distance matrix.
pub fn threshold_matrix(distance: ArrayView2<'_, f64>, threshold: Threshold) -> Result<Array2<u8>> {
    threshold.validate()?;
    let radius = threshold.radius(max_entry(distance));
    Ok(binarize(distance, radius))
}

fn max_entry(distance: ArrayView2<'_, f64>) -> f64 {
    distance.iter().cloned().fold(0.0, f64::max)
}

fn binarize(distance: ArrayView2<'_, f64>, radius: f64) -> Array2<u8> {
    let mut binary = distance.mapv(|d| u8::from(d <= radius));
    // Self-recurrence holds even if the input carried NaNs.
    for v in binary.diag_mut() {
        *v = 1;
    }
    binary
}
