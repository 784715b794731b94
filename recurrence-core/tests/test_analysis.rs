use recurrence_core::analysis::{autocorrelation, determinism, recurrence_rate, suggest_delay};
use recurrence_core::{compute_recurrence_matrix, generate, SignalKind};

#[test]
fn sine_delay_suggestion_is_a_quarter_period() {
    let signal = generate(SignalKind::Sine { frequency: 0.05 }, 200, 1.0, 0.0).unwrap();
    let tau = suggest_delay(&signal, 50).expect("sine autocorrelation crosses zero");
    assert!((5..=6).contains(&tau), "suggested tau = {tau}");

    let acf = autocorrelation(&signal, 50);
    assert_eq!(acf.len(), 51);
    assert!((acf[0] - 1.0).abs() < 1e-12);
    // one full period later the signal lines up with itself again
    assert!(acf[20] > 0.8);
}

#[test]
fn lorenz_delay_suggestion_is_within_slider_range() {
    let signal = generate(SignalKind::Lorenz, 500, 0.05, 0.0).unwrap();
    if let Some(tau) = suggest_delay(&signal, 50) {
        assert!((1..=50).contains(&tau));
    }
}

#[test]
fn periodic_signal_is_fully_deterministic() {
    let signal = generate(SignalKind::Sine { frequency: 0.05 }, 200, 1.0, 0.0).unwrap();
    let rp = compute_recurrence_matrix(&signal, 2, 5, 0.1).unwrap();
    assert!((determinism(rp.binary.view(), 2) - 1.0).abs() < 1e-12);
    let rate = recurrence_rate(rp.binary.view());
    assert!(rate > 0.0 && rate < 0.1, "rate = {rate}");
}

#[test]
fn noise_lowers_determinism() {
    let clean = generate(SignalKind::Sine { frequency: 0.05 }, 200, 1.0, 0.0).unwrap();
    let noisy = generate(SignalKind::Sine { frequency: 0.05 }, 200, 1.0, 0.3).unwrap();
    let det = |s: &recurrence_core::Signal| {
        let rp = compute_recurrence_matrix(s, 2, 5, 0.1).unwrap();
        determinism(rp.binary.view(), 2)
    };
    assert!(det(&noisy) < det(&clean));
}
