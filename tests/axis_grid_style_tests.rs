use smoothline_chart::api::{ChartConfig, ChartController, ContainerRef, GridStyle, SeriesInput};
use smoothline_chart::core::{DataPoint, Domain, Viewport};
use smoothline_chart::render::{NullRenderer, RenderFrame};

fn chart_with_ys(ys: &[f64]) -> ChartController<NullRenderer> {
    let mut chart =
        ChartController::new(NullRenderer::default(), ChartConfig::linear()).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(800, 400)))
        .expect("bind");
    chart
        .load_series(vec![SeriesInput::new(
            "A",
            ys.iter()
                .enumerate()
                .map(|(i, y)| DataPoint::new(i as f64, *y))
                .collect(),
        )])
        .expect("load");
    chart
}

fn last_frame(chart: &ChartController<NullRenderer>) -> &RenderFrame {
    chart.renderer().last_frame.as_ref().expect("frame")
}

#[test]
fn zero_gridline_is_emphasized_and_others_are_regular() {
    let chart = chart_with_ys(&[0.0, 5.0, 10.0]);
    let grid = GridStyle::default();
    let frame = last_frame(&chart);

    for tick in &frame.y_axis.ticks {
        if tick.value == 0.0 {
            assert_eq!(tick.gridline, grid.emphasized);
        } else {
            assert_eq!(tick.gridline, grid.regular);
        }
    }
    assert!(frame.y_axis.ticks.iter().any(|tick| tick.value == 0.0));
    assert_eq!(frame.x_axis.baseline, grid.emphasized);
}

// Known-odd boundary rule: the X baseline loses its emphasis whenever any
// non-zero Y tick equals the requested (un-niced) Y minimum, wherever that
// tick sits on the axis.
#[test]
fn baseline_turns_regular_when_nonzero_tick_hits_requested_minimum() {
    let chart = chart_with_ys(&[1.0, 3.0, 5.0]);
    let frame = last_frame(&chart);

    assert_eq!(chart.scales().raw_y_domain(), Domain::new(1.0, 5.0));
    assert_eq!(frame.y_axis.ticks.first().map(|tick| tick.value), Some(1.0));
    assert_eq!(frame.x_axis.baseline, GridStyle::default().regular);
}

#[test]
fn baseline_rule_does_not_depend_on_tick_position() {
    let mut chart = chart_with_ys(&[1.0, 3.0, 5.0]);
    chart.set_y_domain(Domain::new(-5.0, 5.0)).expect("y domain");
    let frame = last_frame(&chart);
    assert_eq!(frame.x_axis.baseline, GridStyle::default().regular);
}

#[test]
fn baseline_stays_emphasized_when_nice_moves_the_minimum() {
    let mut chart = chart_with_ys(&[1.0, 3.0, 5.0]);
    chart.set_y_domain(Domain::new(0.2, 9.7)).expect("y domain");

    assert_eq!(chart.scales().y_domain(), Domain::new(0.0, 10.0));
    let frame = last_frame(&chart);
    assert_eq!(frame.x_axis.baseline, GridStyle::default().emphasized);
    assert_eq!(
        frame.y_axis.labels(),
        vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
    );
}

#[test]
fn y_labels_carry_configured_affixes() {
    let config = ChartConfig::linear()
        .with_y_affixes("$", "k")
        .with_y_domain(Domain::new(0.0, 100.0));
    let mut chart = ChartController::new(NullRenderer::default(), config).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(800, 400)))
        .expect("bind");

    let labels = chart.y_tick_plan().labels();
    assert_eq!(labels.first().map(String::as_str), Some("$0k"));
    assert_eq!(labels.last().map(String::as_str), Some("$100k"));
}
