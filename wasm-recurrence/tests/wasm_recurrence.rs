use wasm_bindgen_test::*;

use recurrence_wasm::{
    delay_markers, embed_signal, generate_signal, recurrence_matrix, RecurrencePlot, RecurrenceRaster,
};

#[wasm_bindgen_test]
fn smoke_generate_embed_and_plot() {
    let signal = generate_signal("lorenz", 200, 0.05, 0.0).expect("generate");
    assert_eq!(signal.len(), 200);

    let flat = embed_signal(signal.clone(), 3, 10).expect("embed");
    assert_eq!(flat.len(), 180 * 3);

    let raster: RecurrenceRaster =
        serde_wasm_bindgen::from_value(recurrence_matrix(signal, 3, 10, 0.1, None).expect("recurrence"))
            .expect("raster object");
    assert_eq!(raster.side, 180);
    assert_eq!(raster.binary.len(), 180 * 180);
    assert!(raster.binary.iter().step_by(181).all(|&v| v == 1));
}

#[wasm_bindgen_test]
fn short_signal_gives_empty_raster() {
    let raster: RecurrenceRaster =
        serde_wasm_bindgen::from_value(recurrence_matrix(vec![1.0, 2.0], 3, 10, 0.1, None).expect("recurrence"))
            .expect("raster object");
    assert_eq!(raster.side, 0);
    assert!(raster.binary.is_empty());
}

#[wasm_bindgen_test]
fn unknown_kind_and_bad_dt_throw() {
    assert!(generate_signal("duffing", 10, 0.05, 0.0).is_err());
    assert!(generate_signal("lorenz", 10, 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn plot_follows_the_slider() {
    let mut plot = RecurrencePlot::new().expect("default plot");
    assert_eq!(plot.tau(), 10);
    assert_eq!(plot.side().unwrap(), 180);
    assert_eq!(plot.markers(), vec![50, 60, 70]);

    plot.set_tau(25).expect("tau in range");
    assert_eq!(plot.side().unwrap(), 150);
    assert_eq!(plot.binary().unwrap().len(), 150 * 150);
    assert_eq!(plot.cache_misses(), 2);

    assert!(plot.set_tau(0).is_err());
    assert_eq!(plot.tau(), 25);
    assert_eq!(delay_markers(200, 50, 3, 25), vec![50, 75, 100]);
}

#[wasm_bindgen_test]
fn plot_from_partial_config() {
    let mut plot = RecurrencePlot::from_config(r#"{"kind": {"kind": "rossler"}, "tau": 5}"#).expect("config");
    assert_eq!(plot.side().unwrap(), 200 - 10);
    assert!(RecurrencePlot::from_config(r#"{"tau": 99}"#).is_err());
}
