//! Python bindings for recurrence-core
//!
//! Exposes the generator, the embedder and the recurrence matrix to the
//! analysis notebooks.  Matrices cross the boundary as nested lists.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::analysis::suggest_delay as rust_suggest_delay;
use crate::config::{
    DEFAULT_DT, DEFAULT_M, DEFAULT_SIGNAL_LENGTH, DEFAULT_SIGNAL_SEED, DEFAULT_TAU,
    DEFAULT_THRESHOLD, DEFAULT_WINDOW, TAU_MAX, TAU_MIN,
};
use crate::embedding::embed as rust_embed;
use crate::error::RecurrenceError;
use crate::recurrence::{compute_recurrence_matrix_with, Threshold};
use crate::signal::{generate_with_options, GeneratorOptions, Signal, SignalKind};

fn to_py_err(e: RecurrenceError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python wrapper for a recurrence result.
#[pyclass]
#[derive(Clone, Debug)]
pub struct RecurrenceMatrix {
    #[pyo3(get)]
    pub distance: Vec<Vec<f64>>,
    #[pyo3(get)]
    pub binary: Vec<Vec<u8>>,
    #[pyo3(get)]
    pub max_distance: f64,
    #[pyo3(get)]
    pub radius: f64,
}

/// Generate a signal from the catalog.  `seed=None` gives unseeded noise.
#[pyfunction]
#[pyo3(signature = (kind, length=DEFAULT_SIGNAL_LENGTH, dt=DEFAULT_DT, noise_level=0.0, seed=Some(DEFAULT_SIGNAL_SEED)))]
fn generate_signal(
    kind: &str,
    length: usize,
    dt: f64,
    noise_level: f64,
    seed: Option<u64>,
) -> PyResult<Vec<f64>> {
    let kind: SignalKind = kind.parse().map_err(to_py_err)?;
    let options = GeneratorOptions {
        seed,
        ..GeneratorOptions::default()
    };
    let signal = generate_with_options(kind, length, dt, noise_level, &options).map_err(to_py_err)?;
    Ok(signal.into_vec())
}

/// Time-delay embedding; one inner list per trajectory point.
#[pyfunction]
#[pyo3(signature = (signal, m=DEFAULT_M, tau=DEFAULT_TAU))]
fn embed(signal: Vec<f64>, m: usize, tau: usize) -> PyResult<Vec<Vec<f64>>> {
    let traj = rust_embed(&Signal::new(signal), m, tau).map_err(to_py_err)?;
    Ok(traj.to_nested_vec())
}

/// Distance and binary recurrence matrices.  `threshold` is relative unless
/// `absolute=True`.
#[pyfunction]
#[pyo3(signature = (signal, m=DEFAULT_M, tau=DEFAULT_TAU, threshold=DEFAULT_THRESHOLD, absolute=false))]
fn recurrence_matrix(
    signal: Vec<f64>,
    m: usize,
    tau: usize,
    threshold: f64,
    absolute: bool,
) -> PyResult<RecurrenceMatrix> {
    let threshold = if absolute {
        Threshold::Absolute(threshold)
    } else {
        Threshold::Relative(threshold)
    };
    log::debug!("[PYBIND] recurrence_matrix: {} samples, m={m}, tau={tau}", signal.len());
    let result = compute_recurrence_matrix_with(&Signal::new(signal), m, tau, threshold)
        .map_err(to_py_err)?;
    Ok(RecurrenceMatrix {
        distance: result.distance.rows().into_iter().map(|r| r.to_vec()).collect(),
        binary: result.binary_rows(),
        max_distance: result.max_distance,
        radius: result.radius,
    })
}

/// First zero crossing of the autocorrelation, or None.
#[pyfunction]
#[pyo3(signature = (signal, max_lag=TAU_MAX))]
fn suggest_delay(signal: Vec<f64>, max_lag: usize) -> Option<usize> {
    rust_suggest_delay(&Signal::new(signal), max_lag)
}

#[pymodule]
fn recurrence_core(_py: Python, m: &PyModule) -> PyResult<()> {
    // Shared constants
    m.add("DEFAULT_SIGNAL_LENGTH", DEFAULT_SIGNAL_LENGTH)?;
    m.add("DEFAULT_DT", DEFAULT_DT)?;
    m.add("DEFAULT_M", DEFAULT_M)?;
    m.add("DEFAULT_TAU", DEFAULT_TAU)?;
    m.add("DEFAULT_THRESHOLD", DEFAULT_THRESHOLD)?;
    m.add("DEFAULT_WINDOW", DEFAULT_WINDOW)?;
    m.add("TAU_MIN", TAU_MIN)?;
    m.add("TAU_MAX", TAU_MAX)?;

    m.add_class::<RecurrenceMatrix>()?;
    m.add_function(wrap_pyfunction!(generate_signal, m)?)?;
    m.add_function(wrap_pyfunction!(embed, m)?)?;
    m.add_function(wrap_pyfunction!(recurrence_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(suggest_delay, m)?)?;
    Ok(())
}
