use criterion::{Criterion, criterion_group, criterion_main};
use smoothline_chart::api::{ChartConfig, ChartController, ContainerRef, SeriesInput};
use smoothline_chart::core::{
    DataPoint, Domain, LabelAffixes, SmoothingWindow, Viewport, locate, plan, smooth,
};
use smoothline_chart::interaction::PointerEvent;
use smoothline_chart::render::NullRenderer;
use std::hint::black_box;

fn wave(len: usize) -> Vec<DataPoint> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            DataPoint::new(x, (x * 0.01).sin() * 100.0 + (x * 0.37).cos() * 5.0)
        })
        .collect()
}

fn bench_smooth_10k(c: &mut Criterion) {
    let points = wave(10_000);
    let window = SmoothingWindow::new(12);

    c.bench_function("smooth_10k_window_12", |b| {
        b.iter(|| {
            let _ = smooth(black_box(&points), window);
        })
    });
}

fn bench_locate_100k(c: &mut Criterion) {
    let points = wave(100_000);

    c.bench_function("locate_100k", |b| {
        b.iter(|| {
            let _ = locate(black_box(&points), black_box(54_321.5));
        })
    });
}

fn bench_plan_temporal_decade(c: &mut Criterion) {
    // 2010-01-01 .. 2020-01-01 in Unix seconds.
    let domain = Domain::new(1_262_304_000.0, 1_577_836_800.0);

    c.bench_function("plan_temporal_decade", |b| {
        b.iter(|| {
            let _ = plan(black_box(domain), true, 4, 15, &LabelAffixes::default())
                .expect("plan");
        })
    });
}

fn bench_pointer_move_5x2k(c: &mut Criterion) {
    let mut chart =
        ChartController::new(NullRenderer::default(), ChartConfig::linear()).expect("chart");
    chart
        .bind(ContainerRef::Element(Viewport::new(1920, 1080)))
        .expect("bind");
    let inputs = (0..5)
        .map(|i| SeriesInput::new(format!("series-{i}"), wave(2_000)))
        .collect();
    chart.load_series(inputs).expect("load");

    c.bench_function("pointer_move_5x2k", |b| {
        b.iter(|| {
            chart
                .handle_pointer(PointerEvent::Move {
                    x: black_box(812.0),
                    y: 300.0,
                })
                .expect("move");
        })
    });
}

criterion_group!(
    benches,
    bench_smooth_10k,
    bench_locate_100k,
    bench_plan_temporal_decade,
    bench_pointer_move_5x2k
);
criterion_main!(benches);
