//! Signal generation
//!
//! Synthesises scalar time series from a small fixed catalog of dynamical
//! systems.  The continuous systems (Lorenz, Rössler) are integrated with a
//! fixed-step classical Runge–Kutta scheme at the caller's `dt`; an initial
//! transient of [`DEFAULT_TRANSIENT_STEPS`] steps is thrown away so the
//! output sits on the attractor rather than on the approach to it.  Only the
//! x coordinate is emitted, one sample per integration step.
//!
//! Noise is added after integration and never feeds back into the dynamics.
//! With the default options the noise RNG is seeded with
//! [`DEFAULT_SIGNAL_SEED`], so two calls with the same inputs are
//! bit-identical.  Passing `seed: None` in [`GeneratorOptions`] draws from the
//! thread RNG instead and is NOT reproducible.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_LOGISTIC_R, DEFAULT_SIGNAL_SEED, DEFAULT_SINE_FREQUENCY, DEFAULT_TRANSIENT_STEPS,
    LOGISTIC_X0,
};
use crate::error::{RecurrenceError, Result};

pub const LORENZ_SIGMA: f64 = 10.0;
pub const LORENZ_RHO: f64 = 28.0;
pub const LORENZ_BETA: f64 = 8.0 / 3.0;

pub const ROSSLER_A: f64 = 0.2;
pub const ROSSLER_B: f64 = 0.2;
pub const ROSSLER_C: f64 = 5.7;

/// An immutable, uniformly sampled scalar time series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal {
    samples: Vec<f64>,
}

impl Signal {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    /// A new signal holding the first `min(n, len)` samples.
    ///
    /// Callers use this to bound the length fed into the quadratic
    /// recurrence stage.
    pub fn prefix(&self, n: usize) -> Signal {
        let end = n.min(self.samples.len());
        Signal::new(self.samples[..end].to_vec())
    }

    /// Minimum and maximum sample, or `None` for an empty signal.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let min = self.samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<f64> for Signal {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

/// The generator catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SignalKind {
    /// Lorenz system with σ=10, ρ=28, β=8/3.
    #[default]
    Lorenz,
    /// Rössler system with a=0.2, b=0.2, c=5.7.
    Rossler,
    /// `sin(2π·frequency·t)` sampled at `t = i·dt`.
    Sine { frequency: f64 },
    /// Logistic map `x ← r·x·(1-x)`.  Discrete, so `dt` only gets validated.
    Logistic { r: f64 },
}

impl SignalKind {
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Lorenz => "lorenz",
            SignalKind::Rossler => "rossler",
            SignalKind::Sine { .. } => "sine",
            SignalKind::Logistic { .. } => "logistic",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            SignalKind::Sine { frequency } if !frequency.is_finite() => Err(
                RecurrenceError::invalid_parameter("frequency", format!("must be finite, got {frequency}")),
            ),
            SignalKind::Logistic { r } if !(0.0..=4.0).contains(&r) => Err(
                RecurrenceError::invalid_parameter("r", format!("must lie in [0, 4], got {r}")),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the names used by the bindings.  Parameterised kinds get their
/// default parameters.
impl FromStr for SignalKind {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lorenz" => Ok(SignalKind::Lorenz),
            "rossler" | "rössler" => Ok(SignalKind::Rossler),
            "sine" | "sin" => Ok(SignalKind::Sine {
                frequency: DEFAULT_SINE_FREQUENCY,
            }),
            "logistic" => Ok(SignalKind::Logistic {
                r: DEFAULT_LOGISTIC_R,
            }),
            other => Err(RecurrenceError::UnknownSignalKind(other.to_string())),
        }
    }
}

/// Initial condition, transient length and noise seed for a generator run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Starting `(x, y, z)` for the continuous systems.  The logistic map
    /// always starts at [`LOGISTIC_X0`]; the sine wave has no state.
    pub initial_state: [f64; 3],
    /// Integration steps (or map iterations) discarded before sampling.
    pub transient_steps: usize,
    /// Noise seed.  `None` means thread-RNG noise, which is not reproducible.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            initial_state: [1.0, 1.0, 1.0],
            transient_steps: DEFAULT_TRANSIENT_STEPS,
            seed: Some(DEFAULT_SIGNAL_SEED),
        }
    }
}

/// Generate `length` samples of `kind` with the default options.
pub fn generate(kind: SignalKind, length: usize, dt: f64, noise_level: f64) -> Result<Signal> {
    generate_with_options(kind, length, dt, noise_level, &GeneratorOptions::default())
}

/// Generate `length` samples of `kind`.
///
/// Fails with `InvalidParameter` when `dt` is not a positive finite number
/// or `noise_level` is negative.  `length == 0` yields an empty signal.
pub fn generate_with_options(
    kind: SignalKind,
    length: usize,
    dt: f64,
    noise_level: f64,
    options: &GeneratorOptions,
) -> Result<Signal> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(RecurrenceError::invalid_parameter(
            "dt",
            format!("must be a positive finite step, got {dt}"),
        ));
    }
    if !(noise_level.is_finite() && noise_level >= 0.0) {
        return Err(RecurrenceError::invalid_parameter(
            "noise_level",
            format!("must be >= 0, got {noise_level}"),
        ));
    }
    kind.validate()?;

    if length == 0 {
        return Ok(Signal::empty());
    }

    let mut samples = match kind {
        SignalKind::Lorenz => integrate(lorenz, options.initial_state, dt, options.transient_steps, length),
        SignalKind::Rossler => integrate(rossler, options.initial_state, dt, options.transient_steps, length),
        SignalKind::Sine { frequency } => sine(frequency, dt, length),
        SignalKind::Logistic { r } => logistic(r, options.transient_steps, length),
    };

    if noise_level > 0.0 {
        add_gaussian_noise(&mut samples, noise_level, options.seed)?;
    }

    Ok(Signal::new(samples))
}

fn lorenz(s: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = s;
    [
        LORENZ_SIGMA * (y - x),
        x * (LORENZ_RHO - z) - y,
        x * y - LORENZ_BETA * z,
    ]
}

fn rossler(s: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = s;
    [-y - z, x + ROSSLER_A * y, ROSSLER_B + z * (x - ROSSLER_C)]
}

#[inline]
fn offset(s: [f64; 3], k: [f64; 3], h: f64) -> [f64; 3] {
    [s[0] + h * k[0], s[1] + h * k[1], s[2] + h * k[2]]
}

/// One classical fourth-order Runge–Kutta step.
fn rk4_step<F: Fn([f64; 3]) -> [f64; 3]>(f: &F, s: [f64; 3], dt: f64) -> [f64; 3] {
    let k1 = f(s);
    let k2 = f(offset(s, k1, dt / 2.0));
    let k3 = f(offset(s, k2, dt / 2.0));
    let k4 = f(offset(s, k3, dt));
    let mut out = s;
    for i in 0..3 {
        out[i] += dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
    out
}

fn integrate<F: Fn([f64; 3]) -> [f64; 3]>(
    f: F,
    initial: [f64; 3],
    dt: f64,
    transient: usize,
    length: usize,
) -> Vec<f64> {
    let mut state = initial;
    for _ in 0..transient {
        state = rk4_step(&f, state, dt);
    }
    let mut out = Vec::with_capacity(length);
    for _ in 0..length {
        state = rk4_step(&f, state, dt);
        out.push(state[0]);
    }
    out
}

fn sine(frequency: f64, dt: f64, length: usize) -> Vec<f64> {
    let omega = 2.0 * std::f64::consts::PI * frequency;
    (0..length).map(|i| (omega * i as f64 * dt).sin()).collect()
}

fn logistic(r: f64, transient: usize, length: usize) -> Vec<f64> {
    let mut x = LOGISTIC_X0;
    for _ in 0..transient {
        x = r * x * (1.0 - x);
    }
    let mut out = Vec::with_capacity(length);
    for _ in 0..length {
        x = r * x * (1.0 - x);
        out.push(x);
    }
    out
}

fn add_gaussian_noise(samples: &mut [f64], std_dev: f64, seed: Option<u64>) -> Result<()> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| RecurrenceError::invalid_parameter("noise_level", e.to_string()))?;
    match seed {
        Some(seed) => perturb(samples, &normal, &mut StdRng::seed_from_u64(seed)),
        None => perturb(samples, &normal, &mut rand::thread_rng()),
    }
    Ok(())
}

fn perturb<R: Rng>(samples: &mut [f64], normal: &Normal<f64>, rng: &mut R) {
    for v in samples.iter_mut() {
        *v += normal.sample(rng);
    }
}
