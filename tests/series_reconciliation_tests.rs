use smoothline_chart::api::{ChartConfig, ChartController, ContainerRef, SeriesInput, reconcile};
use smoothline_chart::core::{DataPoint, Viewport};
use smoothline_chart::error::ChartError;
use smoothline_chart::render::{CATEGORY10, NullRenderer};

fn series(name: &str) -> SeriesInput {
    SeriesInput::new(name, vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 2.0)])
}

fn bound_chart() -> ChartController<NullRenderer> {
    let mut chart =
        ChartController::new(NullRenderer::default(), ChartConfig::linear()).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(800, 400)))
        .expect("bind");
    chart
}

#[test]
fn replacing_series_reports_enter_update_exit() {
    let mut chart = bound_chart();
    let first = chart
        .load_series(vec![series("A"), series("B")])
        .expect("first load");
    assert_eq!(first.added, vec!["A", "B"]);
    assert!(first.updated.is_empty());

    let second = chart
        .load_series(vec![series("B"), series("C")])
        .expect("second load");
    assert_eq!(second.added, vec!["C"]);
    assert_eq!(second.updated, vec!["B"]);
    assert_eq!(second.removed, vec!["A"]);

    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.reconciliation, second);
    let names: Vec<&str> = frame.series.iter().map(|path| path.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[test]
fn palette_and_legend_follow_load_order() {
    let mut chart = bound_chart();
    chart
        .load_series(vec![series("B"), series("A")])
        .expect("load");

    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.series_path("B").map(|p| p.color), Some(CATEGORY10[0]));
    assert_eq!(frame.series_path("A").map(|p| p.color), Some(CATEGORY10[1]));

    let legend = &frame.legend;
    assert_eq!(legend.title, "Legend");
    assert_eq!(legend.entries[0].text, "B");
    assert_eq!(legend.entries[0].y, 32.0 + 6.0);
    assert_eq!(legend.entries[1].y, 32.0 + 6.0 + 18.0);
    assert_eq!(legend.outline_height, 32.0 + 6.0 + 36.0);
    assert_eq!(legend.x, 536.0 + 24.0);
    assert_eq!(legend.clip_width, 164.0 - 8.0);
    assert_eq!(legend.clip_height, 300.0);
}

#[test]
fn duplicate_names_are_rejected_without_redraw() {
    let mut chart = bound_chart();
    chart.load_series(vec![series("A")]).expect("load");
    let renders = chart.renderer().render_count;

    let result = chart.load_series(vec![series("X"), series("X")]);
    assert!(matches!(result, Err(ChartError::DuplicateSeries(name)) if name == "X"));
    assert_eq!(chart.renderer().render_count, renders);
    assert!(chart.series("A").is_some());
}

#[test]
fn redraw_marks_every_series_updated() {
    let mut chart = bound_chart();
    chart
        .load_series(vec![series("A"), series("B")])
        .expect("load");
    chart.redraw().expect("redraw");

    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.reconciliation.is_unchanged());
    assert_eq!(frame.reconciliation.updated, vec!["A", "B"]);
}

#[test]
fn reconcile_ignores_repeated_keys() {
    let result = reconcile(["a", "a", "b"], ["b", "b"]);
    assert_eq!(result.updated, vec!["b"]);
    assert_eq!(result.removed, vec!["a"]);
    assert!(result.added.is_empty());
}
