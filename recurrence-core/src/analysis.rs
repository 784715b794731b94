//! Recurrence quantification and delay selection.
//!
//! Small helpers layered on the kernel: the recurrence rate and determinism
//! measures summarise a binary matrix, and [`suggest_delay`] proposes a τ
//! from the first zero crossing of the autocorrelation, the usual starting
//! point before a user starts dragging the delay slider.

use ndarray::ArrayView2;
use rustfft::{num_complex::Complex as FFTComplex, FftPlanner};

use crate::signal::Signal;

/// Fraction of 1-entries in `binary` (0 for an empty matrix).
pub fn recurrence_rate(binary: ArrayView2<'_, u8>) -> f64 {
    let total = binary.len();
    if total == 0 {
        return 0.0;
    }
    let ones = binary.iter().filter(|&&v| v == 1).count();
    ones as f64 / total as f64
}

/// Share of off-diagonal recurrence points that sit on diagonal lines of at
/// least `l_min` points.
///
/// Only the upper triangle is scanned; the matrix is symmetric so the ratio
/// is the same for the full matrix.  Returns 0 when there are no
/// off-diagonal recurrences.
pub fn determinism(binary: ArrayView2<'_, u8>, l_min: usize) -> f64 {
    let l_min = l_min.max(1);
    let n = binary.nrows().min(binary.ncols());
    let mut on_lines = 0usize;
    let mut total = 0usize;

    for offset in 1..n {
        let mut run = 0usize;
        for i in 0..(n - offset) {
            if binary[[i, i + offset]] == 1 {
                run += 1;
                total += 1;
            } else {
                if run >= l_min {
                    on_lines += run;
                }
                run = 0;
            }
        }
        if run >= l_min {
            on_lines += run;
        }
    }

    if total == 0 {
        0.0
    } else {
        on_lines as f64 / total as f64
    }
}

/// Normalised autocorrelation for lags `0..=max_lag` (truncated to the
/// signal length), computed through the FFT.
///
/// The signal is mean-centred and zero-padded to avoid circular wrap-around.
/// Lag 0 is 1 unless the signal is constant, in which case every lag is 0.
/// "Constant" is judged against the signal's own energy, so the result does
/// not depend on amplitude.
pub fn autocorrelation(signal: &Signal, max_lag: usize) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let lags = max_lag.min(n - 1) + 1;

    let mean = signal.iter().sum::<f64>() / n as f64;
    let size = (2 * n).next_power_of_two();
    let mut buf: Vec<FFTComplex<f64>> = signal
        .iter()
        .map(|&v| FFTComplex::new(v - mean, 0.0))
        .chain(std::iter::repeat(FFTComplex::new(0.0, 0.0)))
        .take(size)
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(size).process(&mut buf);
    for c in buf.iter_mut() {
        *c = FFTComplex::new(c.norm_sqr(), 0.0);
    }
    planner.plan_fft_inverse(size).process(&mut buf);

    // Round-off left after centring a constant signal is a few ulps of its
    // magnitude; anything above that (with FFT slack) is real variance.
    let energy: f64 = signal.iter().map(|v| v * v).sum();
    let zero_lag = buf[0].re;
    if zero_lag <= f64::EPSILON * size as f64 * energy {
        return vec![0.0; lags];
    }
    buf[..lags].iter().map(|c| c.re / zero_lag).collect()
}

/// First lag in `1..=max_lag` where the autocorrelation drops to zero or
/// below, or `None` if it stays positive.
pub fn suggest_delay(signal: &Signal, max_lag: usize) -> Option<usize> {
    let acf = autocorrelation(signal, max_lag);
    if acf.first().copied().unwrap_or(0.0) <= 0.0 {
        return None;
    }
    acf.iter().skip(1).position(|&r| r <= 0.0).map(|p| p + 1)
}
