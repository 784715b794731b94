//! Interactive recomputation driver.
//!
//! The website lets a user drag the delay slider and redraws the time series,
//! the reconstructed trajectory and the recurrence plot on every change.
//! [`RecurrencePipeline`] holds the current parameter tuple and the signal,
//! calls the pure kernel synchronously and keeps the most recent recurrence
//! result in a single-slot cache keyed by
//! `(signal generation, m, τ, threshold, window)`.  Asking again with an
//! unchanged tuple is O(1); any change evicts the slot.

use serde::{Deserialize, Serialize};

use crate::analysis::{determinism, recurrence_rate};
use crate::config::{validate_tau_range, PipelineConfig, DEFAULT_MIN_LINE};
use crate::embedding::{delay_marker_indices, embed_with, EmbeddedTrajectory};
use crate::error::Result;
use crate::recurrence::{compute_recurrence_matrix_with, RecurrenceResult, Threshold};
use crate::signal::{generate_with_options, Signal};

#[derive(Clone, Copy, Debug, PartialEq)]
struct CacheKey {
    generation: u64,
    m: usize,
    tau: usize,
    threshold: Threshold,
    window: usize,
}

/// Figures describing the current recurrence plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceSummary {
    pub m: usize,
    pub tau: usize,
    pub threshold: Threshold,
    pub side: usize,
    pub recurrence_rate: f64,
    pub determinism: f64,
    pub max_distance: f64,
    pub radius: f64,
}

pub struct RecurrencePipeline {
    config: PipelineConfig,
    signal: Signal,
    window: Signal,
    generation: u64,
    cache: Option<(CacheKey, RecurrenceResult)>,
    hits: u64,
    misses: u64,
}

impl RecurrencePipeline {
    /// Validate `config` and generate its signal.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let signal = generate_with_options(
            config.kind,
            config.length,
            config.dt,
            config.noise_level,
            &config.generator,
        )?;
        log::debug!(
            "generated {} samples of {} (dt={}, noise={})",
            signal.len(),
            config.kind,
            config.dt,
            config.noise_level
        );
        Ok(Self::from_parts(signal, config))
    }

    /// Use an externally supplied signal; the generator fields of `config`
    /// are ignored.
    pub fn with_signal(signal: Signal, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(signal, config))
    }

    fn from_parts(signal: Signal, config: PipelineConfig) -> Self {
        let window = signal.prefix(config.window);
        Self {
            config,
            signal,
            window,
            generation: 0,
            cache: None,
            hits: 0,
            misses: 0,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The full signal.
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// The bounded prefix used for the recurrence matrix and the chart.
    pub fn window(&self) -> &Signal {
        &self.window
    }

    pub fn tau(&self) -> usize {
        self.config.tau
    }

    pub fn set_tau(&mut self, tau: usize) -> Result<()> {
        validate_tau_range(tau)?;
        self.config.tau = tau;
        Ok(())
    }

    pub fn set_threshold(&mut self, threshold: Threshold) -> Result<()> {
        threshold.validate()?;
        self.config.threshold = threshold;
        Ok(())
    }

    /// Swap in a new signal.  Cached results for the old one are never
    /// served again, even if the samples happen to be equal.
    pub fn replace_signal(&mut self, signal: Signal) {
        self.generation += 1;
        self.window = signal.prefix(self.config.window);
        self.signal = signal;
        self.cache = None;
    }

    /// Phase-space trajectory of the full signal for the 3D view.
    pub fn trajectory(&self) -> Result<EmbeddedTrajectory> {
        embed_with(&self.signal, self.config.embedding())
    }

    /// Delay marker indices for the time-series chart.
    pub fn markers(&self) -> Vec<usize> {
        delay_marker_indices(
            self.window.len(),
            self.config.marker_anchor,
            self.config.m,
            self.config.tau,
        )
    }

    /// Recurrence result for the window, recomputed only if the parameter
    /// tuple changed since the last call.
    pub fn recurrence(&mut self) -> Result<&RecurrenceResult> {
        let key = self.cache_key();
        let entry = match self.cache.take() {
            Some((cached, result)) if cached == key => {
                self.hits += 1;
                log::trace!("recurrence cache hit for tau={}", key.tau);
                (cached, result)
            }
            _ => {
                self.misses += 1;
                let result = compute_recurrence_matrix_with(
                    &self.window,
                    key.m,
                    key.tau,
                    key.threshold,
                )?;
                log::debug!(
                    "recomputed {}x{} recurrence matrix (m={}, tau={}, radius={:.4})",
                    result.side(),
                    result.side(),
                    key.m,
                    key.tau,
                    result.radius
                );
                (key, result)
            }
        };
        let (_, result) = self.cache.insert(entry);
        Ok(&*result)
    }

    pub fn snapshot(&mut self) -> Result<RecurrenceSummary> {
        let (m, tau, threshold) = (self.config.m, self.config.tau, self.config.threshold);
        let result = self.recurrence()?;
        Ok(RecurrenceSummary {
            m,
            tau,
            threshold,
            side: result.side(),
            recurrence_rate: recurrence_rate(result.binary.view()),
            determinism: determinism(result.binary.view(), DEFAULT_MIN_LINE),
            max_distance: result.max_distance,
            radius: result.radius,
        })
    }

    pub fn snapshot_json(&mut self) -> Result<String> {
        let summary = self.snapshot()?;
        Ok(serde_json::to_string(&summary)?)
    }

    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    pub fn cache_misses(&self) -> u64 {
        self.misses
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey {
            generation: self.generation,
            m: self.config.m,
            tau: self.config.tau,
            threshold: self.config.threshold,
            window: self.config.window,
        }
    }
}
