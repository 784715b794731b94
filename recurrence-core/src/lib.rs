//! Recurrence core
//!
//! This crate holds the numerical kernel behind the recurrence plot
//! explorer.  It is split into three stages that run strictly in order:
//!
//! 1. **Signal** – synthesises a scalar time series from a small catalog
//!    of dynamical systems (Lorenz, Rössler, sine, logistic map).  The
//!    continuous systems use a fixed-step RK4 integrator and discard an
//!    initial transient; noise is seeded so runs are reproducible.
//! 2. **Embedding** – Takens time-delay embedding of the scalar series into
//!    an m-dimensional trajectory.  The trajectory is also handed directly
//!    to the 3D view.
//! 3. **Recurrence** – pairwise Euclidean distances over the trajectory and
//!    a thresholded binary recurrence matrix.  The threshold is relative to
//!    the largest distance unless an absolute radius is asked for.
//!
//! All three are pure functions over in-memory values.  The [`pipeline`]
//! module wraps them in the interactive, single-slot memoized driver the
//! front end uses, and [`analysis`] adds recurrence quantification and a
//! delay suggestion.
//!
//! Bindings are exposed via Python (pyo3) behind the `python` feature; the
//! browser build lives in the `recurrence-wasm` crate.

pub mod error;
pub mod config;
pub mod signal;
pub mod embedding;
pub mod recurrence;
pub mod analysis;
pub mod pipeline;

// Only compile the Python API if the feature flag has been enabled.
#[cfg(feature = "python")]
pub mod pybindings;

pub use embedding::{delay_marker_indices, embed, embed_with, EmbeddedTrajectory, EmbeddingParams};
pub use error::{RecurrenceError, Result};
pub use pipeline::{RecurrencePipeline, RecurrenceSummary};
pub use recurrence::{
    compute_distance_matrix, compute_recurrence_matrix, compute_recurrence_matrix_with,
    recurrence_from_trajectory, threshold_matrix, RecurrenceResult, Threshold,
};
pub use signal::{generate, generate_with_options, GeneratorOptions, Signal, SignalKind};
