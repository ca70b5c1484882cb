use smoothline_chart::api::{ChartConfig, ChartController, ContainerRef, TemporalInput};
use smoothline_chart::core::{Domain, Margins, ScaleKind, Viewport};
use smoothline_chart::render::{NullRenderer, TransitionSpec};

#[test]
fn defaults_match_documented_values() {
    let config = ChartConfig::default();
    assert_eq!(config.margins, Margins::new(50.0, 50.0, 50.0, 50.0));
    assert_eq!(config.smoothing.get(), 1);
    assert_eq!(config.x_axis.kind, ScaleKind::Temporal);
    assert_eq!(config.x_axis.min_ticks, 4);
    assert!(config.x_axis.clamp);
    assert!(config.y_axis.clamp);
    assert_eq!(config.y_axis.max_ticks, 10);
    assert_eq!(config.legend.width, 164.0);
    assert_eq!(config.legend.gap, 24.0);
    assert_eq!(config.interaction.mouse_padding, 12.0);
    assert_eq!(config.transition.duration_ms, 750);
    assert_eq!(config.transition.ease_exponent, 2.5);
    assert_eq!(config.grid.regular.width, 0.7);
    assert_eq!(config.grid.regular.opacity, 0.3);
    assert_eq!(config.grid.regular.color.to_hex_string(), "#a9a9a9");
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let json = r#"{
        "margins": { "top": 10, "right": 20, "bottom": 30, "left": 40 },
        "smoothing": 5,
        "x_axis": { "kind": "Linear", "min_ticks": 6 },
        "y_axis": { "affixes": { "suffix": "%" } },
        "legend": { "width": 120 }
    }"#;
    let config = ChartConfig::from_json_str(json).expect("parse");

    assert_eq!(config.margins, Margins::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(config.smoothing.get(), 5);
    assert_eq!(config.x_axis.kind, ScaleKind::Linear);
    assert_eq!(config.x_axis.min_ticks, 6);
    assert_eq!(config.x_axis.temporal_input, TemporalInput::Year);
    assert_eq!(config.y_axis.affixes.suffix, "%");
    assert_eq!(config.y_axis.affixes.prefix, "");
    assert_eq!(config.legend.width, 120.0);
    assert_eq!(config.legend.title, "Legend");
}

#[test]
fn invalid_json_values_are_rejected() {
    assert!(ChartConfig::from_json_str(r#"{ "x_axis": { "min_ticks": 0 } }"#).is_err());
    assert!(ChartConfig::from_json_str(r#"{ "legend": { "width": -1 } }"#).is_err());
    assert!(ChartConfig::from_json_str("not json").is_err());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = ChartConfig::linear().with_transition(TransitionSpec {
        delay_ms: 0,
        duration_ms: 750,
        ease_exponent: 0.0,
    });
    assert!(ChartController::new(NullRenderer::default(), config).is_err());
}

#[test]
fn configured_domains_apply_on_bind() {
    let config = ChartConfig::linear()
        .with_x_domain(Domain::new(-10.0, 10.0))
        .with_y_domain(Domain::new(-13.0, 87.0))
        .with_legend_width(0.0);
    let mut chart = ChartController::new(NullRenderer::default(), config).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(600, 300)))
        .expect("bind");

    assert_eq!(chart.chart_width(), Some(500.0));
    assert_eq!(chart.scales().x_domain(), Domain::new(-10.0, 10.0));
    assert_eq!(chart.scales().y_domain(), Domain::new(-20.0, 90.0));
}

#[test]
fn linear_default_domain_is_unit_interval() {
    let mut chart =
        ChartController::new(NullRenderer::default(), ChartConfig::linear()).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(800, 400)))
        .expect("bind");
    assert_eq!(chart.scales().x_domain(), Domain::new(0.0, 1.0));
    assert_eq!(chart.scales().y_domain(), Domain::new(0.0, 1.0));
}
