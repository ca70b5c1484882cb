use proptest::prelude::*;
use smoothline_chart::core::tick_plan::{plan_numeric, plan_temporal};
use smoothline_chart::core::{Domain, LabelAffixes, TickInterval};

proptest! {
    #[test]
    fn temporal_ticks_are_ordered_inside_domain_and_bounded(
        start in 0.0f64..2_000_000_000.0,
        span in 60.0f64..1_000_000_000.0,
        min_ticks in 1usize..8
    ) {
        let domain = Domain::new(start.floor(), (start + span).floor());
        let plan = plan_temporal(domain, min_ticks).expect("plan");

        prop_assert!(matches!(plan.interval, TickInterval::Calendar(_)));
        prop_assert!(plan.len() <= 16);
        prop_assert!(plan.ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(plan.ticks.iter().all(|tick| domain.contains(*tick)));
        prop_assert!(plan.stride >= 1);
    }

    #[test]
    fn numeric_labels_are_distinct(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        max_ticks in 2usize..20
    ) {
        let domain = Domain::new(min, min + span);
        let plan = plan_numeric(domain, max_ticks, &LabelAffixes::default());
        let labels = plan.labels();

        prop_assert!(!labels.is_empty());
        for pair in labels.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }
}
