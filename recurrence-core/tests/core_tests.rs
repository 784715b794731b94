use recurrence_core::{
    compute_recurrence_matrix, embed, generate, RecurrenceError, Signal, SignalKind,
};

fn assert_symmetric_with_unit_diagonal(binary: &ndarray::Array2<u8>) {
    let n = binary.nrows();
    assert_eq!(binary.ncols(), n);
    for i in 0..n {
        assert_eq!(binary[[i, i]], 1, "diagonal at {i}");
        for j in 0..n {
            assert_eq!(binary[[i, j]], binary[[j, i]], "asymmetric at ({i}, {j})");
        }
    }
}

#[test]
fn lorenz_window_recurrence_plot() {
    let signal = generate(SignalKind::Lorenz, 500, 0.05, 0.0).unwrap();
    assert_eq!(signal.len(), 500);

    let window = signal.prefix(200);
    let rp = compute_recurrence_matrix(&window, 3, 10, 0.1).unwrap();

    // 200 samples, (m-1)τ = 20
    assert_eq!(rp.side(), 180);
    assert_eq!(rp.distance.dim(), (180, 180));
    assert_symmetric_with_unit_diagonal(&rp.binary);

    let ones = rp.recurrence_count();
    assert!(ones > rp.side(), "expected off-diagonal recurrences, got {ones}");
    assert!(ones < rp.side() * rp.side(), "recurrence matrix should not be saturated");
}

#[test]
fn sine_quarter_period_embeds_on_a_circle_with_banding() {
    // period of 20 samples
    let period = 20usize;
    let signal = generate(SignalKind::Sine { frequency: 1.0 / period as f64 }, 200, 1.0, 0.0).unwrap();

    let traj = embed(&signal, 2, period / 4).unwrap();
    assert_eq!(traj.len(), 195);
    for p in traj.points() {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert!((r - 1.0).abs() < 1e-9, "point off the unit circle: r = {r}");
    }

    let rp = compute_recurrence_matrix(&signal, 2, period / 4, 0.1).unwrap();
    assert!((rp.max_distance - 2.0).abs() < 1e-9);
    for i in 0..rp.side() {
        for j in 0..rp.side() {
            let lag = (i as isize - j as isize).rem_euclid(period as isize);
            let expected = u8::from(lag == 0);
            assert_eq!(rp.binary[[i, j]], expected, "cell ({i}, {j})");
        }
    }
}

#[test]
fn constant_signal_recurs_everywhere() {
    let signal: Signal = vec![3.25; 50].into();
    for &(m, tau) in &[(1, 1), (2, 5), (3, 10), (5, 12), (2, 49)] {
        for &threshold in &[0.01, 0.1, 0.5, 1.0] {
            let rp = compute_recurrence_matrix(&signal, m, tau, threshold).unwrap();
            assert_eq!(rp.side(), 50 - (m - 1) * tau);
            assert_eq!(rp.max_distance, 0.0);
            assert!(rp.distance.iter().all(|&d| d == 0.0));
            assert!(rp.binary.iter().all(|&v| v == 1), "m={m} tau={tau} threshold={threshold}");
        }
    }
}

#[test]
fn bad_parameters_surface_as_errors() {
    let signal: Signal = vec![0.0, 1.0, 2.0].into();
    assert!(matches!(
        compute_recurrence_matrix(&signal, 0, 1, 0.1),
        Err(RecurrenceError::InvalidParameter { name: "m", .. })
    ));
    assert!(matches!(
        compute_recurrence_matrix(&signal, 2, 0, 0.1),
        Err(RecurrenceError::InvalidParameter { name: "tau", .. })
    ));
    assert!(matches!(
        generate(SignalKind::Lorenz, 10, 0.0, 0.0),
        Err(RecurrenceError::InvalidParameter { name: "dt", .. })
    ));
}
