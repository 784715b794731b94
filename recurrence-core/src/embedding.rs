//! Takens time-delay embedding
//!
//! Vector `i` of the reconstructed trajectory is
//! `(s[i], s[i+τ], …, s[i+(m-1)τ])`.  Vectors stay in time order because the
//! trajectory renderer draws them as a path.  A signal too short for the
//! requested `(m, τ)` yields an empty trajectory, not an error.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, Result};
use crate::signal::Signal;

/// Embedding dimension `m` and delay `tau` (in samples).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbeddingParams {
    pub m: usize,
    pub tau: usize,
}

impl EmbeddingParams {
    pub fn new(m: usize, tau: usize) -> Self {
        Self { m, tau }
    }

    pub fn validate(&self) -> Result<()> {
        if self.m < 1 {
            return Err(RecurrenceError::invalid_parameter(
                "m",
                format!("embedding dimension must be >= 1, got {}", self.m),
            ));
        }
        if self.tau < 1 {
            return Err(RecurrenceError::invalid_parameter(
                "tau",
                format!("delay must be >= 1, got {}", self.tau),
            ));
        }
        Ok(())
    }

    /// Samples spanned by one embedding vector beyond its first, `(m-1)τ`.
    #[inline]
    pub fn span(&self) -> usize {
        self.m.saturating_sub(1).saturating_mul(self.tau)
    }

    /// Trajectory length for a signal of `n` samples, `max(n - (m-1)τ, 0)`.
    #[inline]
    pub fn trajectory_len(&self, n: usize) -> usize {
        n.saturating_sub(self.span())
    }
}

/// Reconstructed phase-space trajectory, one row per point.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddedTrajectory {
    points: Array2<f64>,
}

impl EmbeddedTrajectory {
    fn empty(m: usize) -> Self {
        Self {
            points: Array2::zeros((0, m)),
        }
    }

    /// Number of points `L`.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Dimension `m` of every point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    /// Point `i`, or `None` past the end.
    pub fn point(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.len()).then(|| self.points.row(i))
    }

    /// Points in time order.
    pub fn points(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        self.points.rows().into_iter()
    }

    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Row-major copy, `len() * dimension()` values.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.points.iter().copied().collect()
    }

    pub fn to_nested_vec(&self) -> Vec<Vec<f64>> {
        self.points().map(|p| p.to_vec()).collect()
    }
}

/// Embed `signal` with dimension `m` and delay `tau`.
pub fn embed(signal: &Signal, m: usize, tau: usize) -> Result<EmbeddedTrajectory> {
    embed_with(signal, EmbeddingParams::new(m, tau))
}

pub fn embed_with(signal: &Signal, params: EmbeddingParams) -> Result<EmbeddedTrajectory> {
    params.validate()?;
    let EmbeddingParams { m, tau } = params;
    let len = params.trajectory_len(signal.len());
    if len == 0 {
        return Ok(EmbeddedTrajectory::empty(m));
    }

    let s = signal.as_slice();
    let points = Array2::from_shape_fn((len, m), |(i, k)| s[i + k * tau]);
    Ok(EmbeddedTrajectory { points })
}

/// Sample indices `anchor, anchor+τ, …, anchor+(m-1)τ` that fall inside a
/// signal of `len` samples.  These are the points the time-series chart
/// highlights to show which samples form one embedding vector.
pub fn delay_marker_indices(len: usize, anchor: usize, m: usize, tau: usize) -> Vec<usize> {
    (0..m)
        .filter_map(|k| k.checked_mul(tau).and_then(|d| anchor.checked_add(d)))
        .take_while(|&idx| idx < len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Signal {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn vectors_follow_delay_formula() {
        let traj = embed(&ramp(10), 3, 2).unwrap();
        assert_eq!(traj.len(), 6);
        assert_eq!(traj.dimension(), 3);
        assert_eq!(traj.point(0).unwrap().to_vec(), vec![0.0, 2.0, 4.0]);
        assert_eq!(traj.point(5).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
        assert!(traj.point(6).is_none());
    }

    #[test]
    fn m_one_is_the_signal_itself() {
        let traj = embed(&ramp(4), 1, 7).unwrap();
        assert_eq!(traj.to_flat_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn boundary_length_is_empty() {
        // N == (m-1)τ exactly
        let traj = embed(&ramp(4), 3, 2).unwrap();
        assert!(traj.is_empty());
        assert_eq!(traj.dimension(), 3);
        // one more sample gives exactly one vector
        assert_eq!(embed(&ramp(5), 3, 2).unwrap().len(), 1);
    }

    #[test]
    fn span_does_not_overflow() {
        let p = EmbeddingParams::new(usize::MAX, usize::MAX);
        assert_eq!(p.trajectory_len(10), 0);
    }

    #[test]
    fn markers_stop_at_signal_end() {
        assert_eq!(delay_marker_indices(200, 50, 3, 10), vec![50, 60, 70]);
        assert_eq!(delay_marker_indices(200, 50, 3, 80), vec![50, 130]);
        assert!(delay_marker_indices(40, 50, 3, 10).is_empty());
    }
}
