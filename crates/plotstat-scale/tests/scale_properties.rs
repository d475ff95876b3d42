//! Property tests for scale mapping

use plotstat_scale::{
    clamp_to_floor, map, nice_ticks, BandScale, ContinuousScale, PlotLayout, ScaleError,
    ScaleKind,
};
use proptest::prelude::*;
use rstest::rstest;

proptest! {
    #[test]
    fn test_linear_round_trip(
        lo in -1.0e4..1.0e4f64,
        width in 1.0e-3..1.0e4f64,
        v in -1.0e4..1.0e4f64,
    ) {
        let scale = ContinuousScale::linear((lo, lo + width), (420.0, 0.0)).unwrap();
        let back = scale.invert(scale.map(v).unwrap()).unwrap();
        prop_assert!((back - v).abs() <= 1e-6 * (1.0 + v.abs()));
    }

    #[test]
    fn test_log_map_stays_in_range(v in 0.1..250.0f64) {
        let px = map(v, 0.1, 250.0, 0.0, 600.0, ScaleKind::Log).unwrap();
        prop_assert!((-1e-9..=600.0 + 1e-9).contains(&px));
    }

    #[test]
    fn test_log_accepts_clamped_values(v in -10.0..10.0f64) {
        let clamped = clamp_to_floor(v, 0.1);
        prop_assert!(map(clamped, 0.1, 100.0, 0.0, 1.0, ScaleKind::Log).is_ok());
    }

    #[test]
    fn test_ticks_inside_domain(lo in -1.0e3..1.0e3f64, width in 1.0e-2..1.0e3f64, count in 1usize..20) {
        let hi = lo + width;
        for t in nice_ticks(lo, hi, count) {
            prop_assert!(t >= lo - 1e-9 && t <= hi + 1e-9);
        }
    }

    #[test]
    fn test_band_positions_increase(n in 1usize..30, padding in 0.0..0.9f64) {
        let band = BandScale::new(n, (0.0, 500.0)).unwrap().with_padding(padding);
        let starts: Vec<f64> = (0..n).map(|i| band.position(i).unwrap()).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(starts[0] >= 0.0);
        prop_assert!(starts[n - 1] + band.bandwidth() <= 500.0 + 1e-9);
        for i in 0..n {
            prop_assert_eq!(band.index_at(band.center(i).unwrap()), Some(i));
        }
    }
}

#[rstest]
#[case(ScaleKind::Linear, 3.0, 3.0)]
#[case(ScaleKind::Log, 0.0, 10.0)]
#[case(ScaleKind::Log, -5.0, 10.0)]
#[case(ScaleKind::Linear, f64::NAN, 1.0)]
fn test_invalid_domains(#[case] kind: ScaleKind, #[case] lo: f64, #[case] hi: f64) {
    let err = map(1.0, lo, hi, 0.0, 1.0, kind).unwrap_err();
    match err {
        ScaleError::InvalidDomain { kind: name, .. } => assert_eq!(name, kind.name()),
    }
}

#[test]
fn test_month_bars_fill_plot_width() {
    let layout = PlotLayout::default();
    let band = BandScale::new(12, layout.x_range()).unwrap().with_padding(0.2);
    let last = band.position(11).unwrap() + band.bandwidth();
    let gap = layout.plot_width() - last;
    assert!((gap - band.position(0).unwrap()).abs() < 1e-9);
}

#[test]
fn test_bar_height_on_flipped_axis() {
    let layout = PlotLayout::default();
    let y = ContinuousScale::linear((0.0, 50.0), layout.y_range()).unwrap();
    assert_eq!(y.map(0.0).unwrap(), layout.plot_height());
    assert_eq!(y.map(50.0).unwrap(), 0.0);
}
