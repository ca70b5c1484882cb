use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::nice::{format_fixed, label_precision, tick_step, ticks};
use crate::core::types::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::{Domain, TimeInterval};
use crate::error::{ChartError, ChartResult};

/// Interval the ticks of a plan are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickInterval {
    Calendar(TimeInterval),
    Numeric { step: f64 },
}

/// Text applied around every numeric label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAffixes {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl LabelAffixes {
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// How one tick value turns into label text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickFormat {
    /// `strftime` pattern applied to the UTC instant.
    Time(String),
    Fixed {
        precision: usize,
        affixes: LabelAffixes,
    },
}

impl TickFormat {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Time(pattern) => {
                let mut text = String::new();
                match unix_seconds_to_datetime(value) {
                    Some(time) if write!(text, "{}", time.format(pattern)).is_ok() => text,
                    _ => format_fixed(value, 0),
                }
            }
            Self::Fixed { precision, affixes } => {
                let body = format_fixed(value, *precision);
                let mut text =
                    String::with_capacity(affixes.prefix.len() + body.len() + affixes.suffix.len());
                text.push_str(&affixes.prefix);
                text.push_str(&body);
                text.push_str(&affixes.suffix);
                text
            }
        }
    }
}

/// Tick positions and label formats for one axis.
///
/// Plans are rebuilt whenever the domain or budget changes, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickPlan {
    pub interval: TickInterval,
    pub stride: usize,
    pub normal_format: TickFormat,
    pub endpoint_format: TickFormat,
    pub ticks: Vec<f64>,
}

impl TickPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[must_use]
    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.ticks.len()
    }

    #[must_use]
    pub fn format_at(&self, index: usize) -> &TickFormat {
        if self.is_endpoint(index) {
            &self.endpoint_format
        } else {
            &self.normal_format
        }
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<String> {
        self.ticks
            .get(index)
            .map(|value| self.format_at(index).format(*value))
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.ticks
            .iter()
            .enumerate()
            .map(|(index, value)| self.format_at(index).format(*value))
            .collect()
    }
}

/// Tick budget and label patterns of one calendar tier.
struct CalendarTier {
    interval: TimeInterval,
    max_ticks: i64,
    normal: &'static str,
    endpoint: &'static str,
}

const CALENDAR_TIERS: [CalendarTier; 8] = [
    CalendarTier {
        interval: TimeInterval::Year,
        max_ticks: 15,
        normal: "%Y",
        endpoint: "%Y",
    },
    CalendarTier {
        interval: TimeInterval::Month,
        max_ticks: 15,
        normal: "%Y-%b",
        endpoint: "%Y-%b",
    },
    CalendarTier {
        interval: TimeInterval::Week,
        max_ticks: 15,
        normal: "%m-%d",
        endpoint: "%Y-%m-%d",
    },
    CalendarTier {
        interval: TimeInterval::Day,
        max_ticks: 15,
        normal: "%m-%d",
        endpoint: "%Y-%m-%d",
    },
    CalendarTier {
        interval: TimeInterval::Hour,
        max_ticks: 12,
        normal: "%m-%d %H",
        endpoint: "%Y-%m-%d %H",
    },
    CalendarTier {
        interval: TimeInterval::Minute,
        max_ticks: 12,
        normal: "%H:%M",
        endpoint: "%Y-%-m-%-d %H:%M",
    },
    CalendarTier {
        interval: TimeInterval::Second,
        max_ticks: 10,
        normal: "%M:%S",
        endpoint: "%Y-%-m-%-d %H:%M:%S",
    },
    CalendarTier {
        interval: TimeInterval::Millisecond,
        max_ticks: 10,
        normal: "%S.%3f",
        endpoint: "%Y-%-m-%-d %H:%M:%S",
    },
];

/// Builds the tick plan for one axis.
///
/// Temporal domains hold Unix seconds and use the budget of the chosen
/// calendar tier; `max_ticks` only applies to numeric domains. `affixes` are
/// applied to numeric labels.
pub fn plan(
    domain: Domain,
    temporal: bool,
    min_ticks: usize,
    max_ticks: usize,
    affixes: &LabelAffixes,
) -> ChartResult<TickPlan> {
    let domain = domain.validate("tick")?;
    let plan = if temporal {
        plan_temporal(domain, min_ticks)?
    } else {
        plan_numeric(domain, max_ticks, affixes)
    };
    trace!(
        interval = ?plan.interval,
        stride = plan.stride,
        tick_count = plan.ticks.len(),
        "tick plan built"
    );
    Ok(plan)
}

/// Coarsest calendar tier with at least `min_ticks` boundaries, subsampled so
/// the tier budget is respected and the last boundary before `max` is kept.
pub fn plan_temporal(domain: Domain, min_ticks: usize) -> ChartResult<TickPlan> {
    let (Some(start), Some(end)) = (
        unix_seconds_to_datetime(domain.min),
        unix_seconds_to_datetime(domain.max),
    ) else {
        return Err(ChartError::InvalidData(
            "temporal domain is out of range".to_owned(),
        ));
    };

    let min_ticks = i64::try_from(min_ticks).unwrap_or(i64::MAX);
    let tier = CALENDAR_TIERS
        .iter()
        .find(|tier| tier.interval.count(start, end) >= min_ticks)
        .unwrap_or(&CALENDAR_TIERS[CALENDAR_TIERS.len() - 1]);

    let interval = tier.interval;
    let spread = interval.count(start, end);
    let stride = if spread > 0 {
        let budget = tier.max_ticks.min(spread);
        (spread + budget - 1) / budget
    } else {
        1
    };

    let ticks = interval
        .stepped_range(start, end, stride)
        .into_iter()
        .map(datetime_to_unix_seconds)
        .collect();

    Ok(TickPlan {
        interval: TickInterval::Calendar(interval),
        stride: usize::try_from(stride).unwrap_or(1),
        normal_format: TickFormat::Time(tier.normal.to_owned()),
        endpoint_format: TickFormat::Time(tier.endpoint.to_owned()),
        ticks,
    })
}

/// Round-number ticks with labels printed at the precision of the tick step.
#[must_use]
pub fn plan_numeric(domain: Domain, max_ticks: usize, affixes: &LabelAffixes) -> TickPlan {
    let values = ticks(domain.min, domain.max, max_ticks);
    let step = tick_step(domain.min, domain.max, max_ticks);
    let precision = if step.is_finite() {
        label_precision(step)
    } else {
        0
    };
    let format = TickFormat::Fixed {
        precision,
        affixes: affixes.clone(),
    };

    TickPlan {
        interval: TickInterval::Numeric { step },
        stride: 1,
        normal_format: format.clone(),
        endpoint_format: format,
        ticks: values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn seconds(y: i32, mo: u32, d: u32, h: u32) -> f64 {
        datetime_to_unix_seconds(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single().expect("time"))
    }

    #[test]
    fn short_span_falls_through_to_finer_units() {
        let domain = Domain::new(seconds(2024, 3, 1, 0), seconds(2024, 4, 10, 0));
        let plan = plan_temporal(domain, 4).expect("plan");
        assert_eq!(plan.interval, TickInterval::Calendar(TimeInterval::Week));

        let domain = Domain::new(seconds(2024, 3, 1, 0), seconds(2024, 3, 6, 0));
        let plan = plan_temporal(domain, 4).expect("plan");
        assert_eq!(plan.interval, TickInterval::Calendar(TimeInterval::Day));
        assert_eq!(plan.stride, 1);
        assert_eq!(plan.ticks.len(), 6);
    }

    #[test]
    fn stride_is_anchored_to_domain_end() {
        // 30 days with a 15 tick budget: every 2nd day counted back from the end.
        let domain = Domain::new(seconds(2024, 4, 1, 0), seconds(2024, 5, 1, 0));
        let plan = plan_temporal(domain, 31).expect("plan");
        assert_eq!(plan.interval, TickInterval::Calendar(TimeInterval::Hour));

        let plan = plan_temporal(domain, 20).expect("plan");
        assert_eq!(plan.interval, TickInterval::Calendar(TimeInterval::Day));
        assert_eq!(plan.stride, 2);
        assert_eq!(plan.ticks.last().copied(), Some(domain.max));
        assert_eq!(plan.ticks.first().copied(), Some(domain.min));
        assert_eq!(plan.ticks.len(), 16);
    }

    #[test]
    fn oversized_min_ticks_only_builds_strided_boundaries() {
        let domain = Domain::new(seconds(2014, 1, 1, 0), seconds(2024, 1, 1, 0));

        let plan = plan_temporal(domain, 2_000_000).expect("plan");
        assert_eq!(plan.interval, TickInterval::Calendar(TimeInterval::Minute));
        assert!(plan.ticks.len() <= 13);
        assert_eq!(plan.ticks.last().copied(), Some(domain.max));

        let plan = plan_temporal(domain, usize::MAX).expect("plan");
        assert_eq!(
            plan.interval,
            TickInterval::Calendar(TimeInterval::Millisecond)
        );
        assert!(plan.ticks.len() <= 11);
        assert!(plan.ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn hour_tier_labels_qualify_endpoints() {
        let domain = Domain::new(seconds(2024, 1, 2, 0), seconds(2024, 1, 2, 6));
        let plan = plan_temporal(domain, 4).expect("plan");
        let labels = plan.labels();
        assert_eq!(labels.first().map(String::as_str), Some("2024-01-02 00"));
        assert_eq!(labels[1], "01-02 01");
        assert_eq!(labels.last().map(String::as_str), Some("2024-01-02 06"));
    }

    #[test]
    fn numeric_labels_carry_affixes() {
        let plan = plan_numeric(Domain::new(0.0, 100.0), 2, &LabelAffixes::new("$", "k"));
        assert_eq!(plan.labels(), vec!["$0k", "$50k", "$100k"]);
    }

    #[test]
    fn non_finite_domain_is_rejected() {
        let result = plan(
            Domain::new(f64::NAN, 1.0),
            false,
            4,
            10,
            &LabelAffixes::default(),
        );
        assert!(result.is_err());
    }
}
