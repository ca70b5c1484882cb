use approx::relative_eq;
use proptest::prelude::*;
use smoothline_chart::core::{DataPoint, SmoothingWindow, smooth};

fn points_from(ys: &[f64]) -> Vec<DataPoint> {
    ys.iter()
        .enumerate()
        .map(|(i, y)| DataPoint::new(i as f64, *y))
        .collect()
}

fn neighbour_energy(points: &[DataPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].y - pair[0].y).powi(2))
        .sum()
}

proptest! {
    #[test]
    fn small_windows_copy_input(
        ys in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 0..64),
        window in 0u32..2
    ) {
        let points = points_from(&ys);
        prop_assert_eq!(smooth(&points, SmoothingWindow::new(window)), points);
    }

    #[test]
    fn each_value_is_mean_of_truncated_window(
        ys in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 1..64),
        window in 2u32..24
    ) {
        let points = points_from(&ys);
        let smoothed = smooth(&points, SmoothingWindow::new(window));
        prop_assert_eq!(smoothed.len(), points.len());

        let half = (window / 2) as usize;
        let last = points.len() - 1;
        for (i, point) in smoothed.iter().enumerate() {
            let low = i.saturating_sub(half);
            let high = (i + half).min(last);
            let mean = ys[low..=high].iter().sum::<f64>() / (high - low + 1) as f64;
            prop_assert!(relative_eq!(point.y, mean, epsilon = 1e-6, max_relative = 1e-9));
            prop_assert_eq!(point.x, points[i].x);
        }
    }

    #[test]
    fn smoothed_values_stay_within_input_range(
        ys in prop::collection::vec(-1_000.0f64..1_000.0, 1..64),
        window in 0u32..24
    ) {
        let points = points_from(&ys);
        let min = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for point in smooth(&points, SmoothingWindow::new(window)) {
            prop_assert!(point.y >= min - 1e-9 && point.y <= max + 1e-9);
        }
    }
}

#[test]
fn repeated_smoothing_keeps_reducing_local_variance() {
    let ys: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 0.0 } else { 10.0 }).collect();
    let once = smooth(&points_from(&ys), SmoothingWindow::new(2));
    let twice = smooth(&once, SmoothingWindow::new(2));

    let raw_energy = neighbour_energy(&points_from(&ys));
    let once_energy = neighbour_energy(&once);
    let twice_energy = neighbour_energy(&twice);
    assert!(once_energy < raw_energy);
    assert!(twice_energy < once_energy);
    assert_ne!(once, twice);
}
