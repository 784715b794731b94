use recurrence_core::{delay_marker_indices, embed, generate, EmbeddingParams, RecurrenceError, Signal, SignalKind};

#[test]
fn trajectory_length_matches_formula() {
    let signal = generate(SignalKind::Lorenz, 120, 0.05, 0.0).unwrap();
    let n = signal.len();
    for m in 1..=6 {
        for tau in 1..=30 {
            let traj = embed(&signal, m, tau).unwrap();
            let span = (m - 1) * tau;
            let expected = if n > span { n - span } else { 0 };
            assert_eq!(traj.len(), expected, "m={m} tau={tau}");
            assert_eq!(traj.dimension(), m);
            assert_eq!(EmbeddingParams::new(m, tau).trajectory_len(n), expected);
        }
    }
}

#[test]
fn vectors_are_delayed_copies_in_time_order() {
    let signal = generate(SignalKind::Rossler, 60, 0.05, 0.0).unwrap();
    let s = signal.as_slice();
    let traj = embed(&signal, 3, 7).unwrap();
    for (i, p) in traj.points().enumerate() {
        assert_eq!(p.to_vec(), vec![s[i], s[i + 7], s[i + 14]]);
    }
    let flat = traj.to_flat_vec();
    assert_eq!(flat.len(), traj.len() * 3);
    assert_eq!(&flat[..3], &[s[0], s[7], s[14]]);
}

#[test]
fn zero_m_or_tau_is_an_error() {
    let signal: Signal = vec![1.0; 10].into();
    assert!(matches!(
        embed(&signal, 0, 1),
        Err(RecurrenceError::InvalidParameter { name: "m", .. })
    ));
    assert!(matches!(
        embed(&signal, 2, 0),
        Err(RecurrenceError::InvalidParameter { name: "tau", .. })
    ));
    // validation happens before the length check
    assert!(embed(&Signal::empty(), 0, 0).is_err());
}

#[test]
fn short_signals_give_empty_trajectories() {
    assert!(embed(&Signal::empty(), 3, 1).unwrap().is_empty());
    let signal: Signal = (0..20).map(f64::from).collect();
    assert!(embed(&signal, 3, 10).unwrap().is_empty());
    assert!(embed(&signal, 2, 25).unwrap().is_empty());
    assert_eq!(embed(&signal, 3, 9).unwrap().len(), 2);
}

#[test]
fn input_signal_is_left_untouched() {
    let signal: Signal = (0..20).map(|i| (i as f64).sqrt()).collect();
    let before = signal.clone();
    let _ = embed(&signal, 4, 3).unwrap();
    assert_eq!(signal, before);
}

#[test]
fn delay_markers_match_chart_layout() {
    // the chart anchors at t = 50 over a 200-sample window
    assert_eq!(delay_marker_indices(200, 50, 3, 1), vec![50, 51, 52]);
    assert_eq!(delay_marker_indices(200, 50, 3, 50), vec![50, 100, 150]);
    assert_eq!(delay_marker_indices(200, 50, 3, 75), vec![50, 125]);
    assert!(delay_marker_indices(0, 0, 3, 1).is_empty());
}
