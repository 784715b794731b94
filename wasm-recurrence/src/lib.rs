//! Recurrence plot explorer
//!
//! WebAssembly bindings to recurrence_core for browser use.

use js_sys::Array;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use recurrence_core::config::{
    PipelineConfig, DEFAULT_DT, DEFAULT_M, DEFAULT_MARKER_ANCHOR, DEFAULT_SIGNAL_LENGTH,
    DEFAULT_SIGNAL_SEED, DEFAULT_TAU, DEFAULT_THRESHOLD, DEFAULT_WINDOW, TAU_MAX, TAU_MIN,
};
use recurrence_core::{
    compute_recurrence_matrix_with, delay_marker_indices, embed as rust_embed,
    generate as rust_generate, RecurrenceError, RecurrencePipeline, Signal, SignalKind,
    Threshold,
};

fn to_js_err(e: RecurrenceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Shared constants exposed to JavaScript
#[wasm_bindgen]
pub fn constants() -> JsValue {
    #[derive(Serialize)]
    struct Constants {
        signal_length: usize,
        dt: f64,
        seed: u64,
        m: usize,
        tau: usize,
        tau_min: usize,
        tau_max: usize,
        threshold: f64,
        window: usize,
        marker_anchor: usize,
    }

    let c = Constants {
        signal_length: DEFAULT_SIGNAL_LENGTH,
        dt: DEFAULT_DT,
        seed: DEFAULT_SIGNAL_SEED,
        m: DEFAULT_M,
        tau: DEFAULT_TAU,
        tau_min: TAU_MIN,
        tau_max: TAU_MAX,
        threshold: DEFAULT_THRESHOLD,
        window: DEFAULT_WINDOW,
        marker_anchor: DEFAULT_MARKER_ANCHOR,
    };

    serde_wasm_bindgen::to_value(&c).unwrap_or_else(|_| JsValue::NULL)
}

/// Generate a signal by catalog name ("lorenz", "rossler", "sine", "logistic").
#[wasm_bindgen(js_name = "generateSignal")]
pub fn generate_signal(kind: &str, length: usize, dt: f64, noise_level: f64) -> Result<Vec<f64>, JsValue> {
    let kind: SignalKind = kind.parse().map_err(to_js_err)?;
    let signal = rust_generate(kind, length, dt, noise_level).map_err(to_js_err)?;
    Ok(signal.into_vec())
}

/// Embed a signal; the result is row-major with `m` values per point.
#[wasm_bindgen(js_name = "embedSignal")]
pub fn embed_signal(signal: Vec<f64>, m: usize, tau: usize) -> Result<Vec<f64>, JsValue> {
    let traj = rust_embed(&Signal::new(signal), m, tau).map_err(to_js_err)?;
    Ok(traj.to_flat_vec())
}

/// Binary recurrence matrix as handed to the raster view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRaster {
    /// Side length L; 0 means nothing to draw.
    pub side: usize,
    /// L×L cells, row-major.
    pub binary: Vec<u8>,
}

/// Recurrence matrix as a `{ side, binary }` object.
#[wasm_bindgen(js_name = "recurrenceMatrix")]
pub fn recurrence_matrix(
    signal: Vec<f64>,
    m: usize,
    tau: usize,
    threshold: f64,
    absolute: Option<bool>,
) -> Result<JsValue, JsValue> {
    let threshold = if absolute.unwrap_or(false) {
        Threshold::Absolute(threshold)
    } else {
        Threshold::Relative(threshold)
    };
    let result = compute_recurrence_matrix_with(&Signal::new(signal), m, tau, threshold)
        .map_err(to_js_err)?;
    let raster = RecurrenceRaster {
        side: result.side(),
        binary: result.binary_flat(),
    };
    serde_wasm_bindgen::to_value(&raster).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Indices the time-series chart marks for one embedding vector.
#[wasm_bindgen(js_name = "delayMarkers")]
pub fn delay_markers(len: usize, anchor: usize, m: usize, tau: usize) -> Vec<usize> {
    delay_marker_indices(len, anchor, m, tau)
}

/// Interactive pipeline wrapper: holds the signal and the current τ, and
/// recomputes the recurrence plot only when τ or the threshold changed.
#[wasm_bindgen]
pub struct RecurrencePlot {
    inner: RecurrencePipeline,
}

#[wasm_bindgen]
impl RecurrencePlot {
    /// Reference setup: Lorenz, 500 samples, dt 0.05, m 3, τ 10, threshold 0.1.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RecurrencePlot, JsValue> {
        let inner = RecurrencePipeline::new(PipelineConfig::default()).map_err(to_js_err)?;
        Ok(RecurrencePlot { inner })
    }

    /// Build from a JSON config; missing fields take their defaults.
    #[wasm_bindgen(js_name = "fromConfig")]
    pub fn from_config(json: &str) -> Result<RecurrencePlot, JsValue> {
        let config = PipelineConfig::from_json_str(json).map_err(to_js_err)?;
        let inner = RecurrencePipeline::new(config).map_err(to_js_err)?;
        Ok(RecurrencePlot { inner })
    }

    /// Get tau
    #[wasm_bindgen(getter)]
    pub fn tau(&self) -> usize {
        self.inner.tau()
    }

    /// Set tau; out-of-range values throw and leave the state unchanged.
    #[wasm_bindgen(js_name = "setTau")]
    pub fn set_tau(&mut self, tau: usize) -> Result<(), JsValue> {
        self.inner.set_tau(tau).map_err(to_js_err)
    }

    #[wasm_bindgen(js_name = "setThreshold")]
    pub fn set_threshold(&mut self, threshold: f64, absolute: Option<bool>) -> Result<(), JsValue> {
        let threshold = if absolute.unwrap_or(false) {
            Threshold::Absolute(threshold)
        } else {
            Threshold::Relative(threshold)
        };
        self.inner.set_threshold(threshold).map_err(to_js_err)
    }

    /// Window of the signal shown in the time-series chart.
    pub fn signal(&self) -> Vec<f64> {
        self.inner.window().as_slice().to_vec()
    }

    pub fn markers(&self) -> Vec<usize> {
        self.inner.markers()
    }

    /// Full-signal trajectory as an array of `[x, y, z]` arrays.
    pub fn trajectory(&self) -> Result<Array, JsValue> {
        let traj = self.inner.trajectory().map_err(to_js_err)?;
        let outer = Array::new();
        for p in traj.points() {
            let inner = Array::new();
            for v in p.iter() {
                inner.push(&JsValue::from_f64(*v));
            }
            outer.push(&inner);
        }
        Ok(outer)
    }

    /// Side length of the current recurrence matrix.
    pub fn side(&mut self) -> Result<usize, JsValue> {
        Ok(self.inner.recurrence().map_err(to_js_err)?.side())
    }

    /// Current binary matrix, row-major.
    pub fn binary(&mut self) -> Result<Vec<u8>, JsValue> {
        Ok(self.inner.recurrence().map_err(to_js_err)?.binary_flat())
    }

    /// Recurrence rate, determinism and friends as a plain object.
    pub fn summary(&mut self) -> Result<JsValue, JsValue> {
        let summary = self.inner.snapshot().map_err(to_js_err)?;
        serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter, js_name = "cacheMisses")]
    pub fn cache_misses(&self) -> u64 {
        self.inner.cache_misses()
    }
}
