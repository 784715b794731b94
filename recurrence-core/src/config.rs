//! Shared defaults and pipeline configuration.
//!
//! The constants are the reference values used by the website's interactive
//! section.  Both bindings re-export them so the front end and the kernel
//! cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingParams;
use crate::error::{RecurrenceError, Result};
use crate::recurrence::Threshold;
use crate::signal::{GeneratorOptions, SignalKind};

pub const DEFAULT_SIGNAL_LENGTH: usize = 500;
pub const DEFAULT_DT: f64 = 0.05;
pub const DEFAULT_NOISE_LEVEL: f64 = 0.0;
pub const DEFAULT_SIGNAL_SEED: u64 = 0x5EED_2024;
pub const DEFAULT_TRANSIENT_STEPS: usize = 300;

pub const DEFAULT_SINE_FREQUENCY: f64 = 0.5;
pub const DEFAULT_LOGISTIC_R: f64 = 3.9;
pub const LOGISTIC_X0: f64 = 0.4;

pub const DEFAULT_M: usize = 3;
pub const DEFAULT_TAU: usize = 10;
pub const TAU_MIN: usize = 1;
pub const TAU_MAX: usize = 50;

/// Relative recurrence threshold (fraction of the largest distance).
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Samples of the signal that go into the recurrence matrix.  L≈200 is
/// effectively instant; the cost grows with L², so L≈5000 is not.
pub const DEFAULT_WINDOW: usize = 200;

/// Sample index the time-series chart anchors its delay markers at.
pub const DEFAULT_MARKER_ANCHOR: usize = 50;

/// Minimum diagonal line length counted by the determinism measure.
pub const DEFAULT_MIN_LINE: usize = 2;

/// Everything the interactive pipeline needs to reproduce a figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub kind: SignalKind,
    pub length: usize,
    pub dt: f64,
    pub noise_level: f64,
    pub generator: GeneratorOptions,
    pub m: usize,
    pub tau: usize,
    pub threshold: Threshold,
    pub window: usize,
    pub marker_anchor: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            kind: SignalKind::Lorenz,
            length: DEFAULT_SIGNAL_LENGTH,
            dt: DEFAULT_DT,
            noise_level: DEFAULT_NOISE_LEVEL,
            generator: GeneratorOptions::default(),
            m: DEFAULT_M,
            tau: DEFAULT_TAU,
            threshold: Threshold::Relative(DEFAULT_THRESHOLD),
            window: DEFAULT_WINDOW,
            marker_anchor: DEFAULT_MARKER_ANCHOR,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON config.  Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn embedding(&self) -> EmbeddingParams {
        EmbeddingParams::new(self.m, self.tau)
    }

    /// Check the values the kernel would otherwise reject later, plus the
    /// interactive tau range.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(RecurrenceError::invalid_parameter(
                "dt",
                format!("must be a positive finite step, got {}", self.dt),
            ));
        }
        if !(self.noise_level.is_finite() && self.noise_level >= 0.0) {
            return Err(RecurrenceError::invalid_parameter(
                "noise_level",
                format!("must be >= 0, got {}", self.noise_level),
            ));
        }
        self.embedding().validate()?;
        validate_tau_range(self.tau)?;
        self.threshold.validate()?;
        Ok(())
    }
}

/// Reject taus outside the slider range `[TAU_MIN, TAU_MAX]`.
pub fn validate_tau_range(tau: usize) -> Result<()> {
    if !(TAU_MIN..=TAU_MAX).contains(&tau) {
        return Err(RecurrenceError::invalid_parameter(
            "tau",
            format!("must lie in [{TAU_MIN}, {TAU_MAX}], got {tau}"),
        ));
    }
    Ok(())
}
