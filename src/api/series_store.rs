use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DataPoint, Domain, SmoothingWindow, smooth, year_start_unix_seconds};
use crate::error::{ChartError, ChartResult};
use crate::render::SeriesReconciliation;

/// One named series as submitted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInput {
    pub name: String,
    #[serde(alias = "rawPoints", alias = "rawdata")]
    pub raw_points: Vec<DataPoint>,
}

impl SeriesInput {
    #[must_use]
    pub fn new(name: impl Into<String>, raw_points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            raw_points,
        }
    }
}

/// Mapping applied to X after smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XEncoding {
    #[default]
    Identity,
    /// Raw X is a calendar year; derived X is its first instant in UTC.
    YearStart,
}

/// Stored series with its smoothed copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    raw_points: Vec<DataPoint>,
    derived_points: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn raw_points(&self) -> &[DataPoint] {
        &self.raw_points
    }

    #[must_use]
    pub fn derived_points(&self) -> &[DataPoint] {
        &self.derived_points
    }

    /// Number of derived points whose X lies inside `domain`.
    #[must_use]
    pub fn count_inside(&self, domain: Domain) -> usize {
        self.derived_points
            .iter()
            .filter(|point| domain.contains(point.x))
            .count()
    }
}

fn derive_points(
    name: &str,
    raw_points: &[DataPoint],
    window: SmoothingWindow,
    encoding: XEncoding,
) -> ChartResult<Vec<DataPoint>> {
    let mut derived = smooth(raw_points, window);
    if encoding == XEncoding::YearStart {
        for point in &mut derived {
            point.x = year_start_unix_seconds(point.x).ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "series `{name}` has x value {} that is not a whole year",
                    point.x
                ))
            })?;
        }
    }
    Ok(derived)
}

/// Splits keys into entering, staying and leaving sets.
///
/// `added` and `updated` follow the order of `next`; `removed` follows the
/// order of `previous`.
#[must_use]
pub fn reconcile<'a>(
    previous: impl IntoIterator<Item = &'a str>,
    next: impl IntoIterator<Item = &'a str>,
) -> SeriesReconciliation {
    let previous: IndexSet<&str> = previous.into_iter().collect();
    let next: IndexSet<&str> = next.into_iter().collect();

    let mut result = SeriesReconciliation::default();
    for key in &next {
        if previous.contains(key) {
            result.updated.push((*key).to_owned());
        } else {
            result.added.push((*key).to_owned());
        }
    }
    result.removed = previous
        .iter()
        .filter(|key| !next.contains(*key))
        .map(|key| (*key).to_owned())
        .collect();
    result
}

/// Owner of every series on the chart, keyed by name.
///
/// Iteration order is load order, which also decides palette colors.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: IndexMap<String, Series>,
    window: SmoothingWindow,
    encoding: XEncoding,
}

impl SeriesStore {
    #[must_use]
    pub fn new(window: SmoothingWindow, encoding: XEncoding) -> Self {
        Self {
            series: IndexMap::new(),
            window,
            encoding,
        }
    }

    #[must_use]
    pub fn smoothing_window(&self) -> SmoothingWindow {
        self.window
    }

    #[must_use]
    pub fn encoding(&self) -> XEncoding {
        self.encoding
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Replaces the whole set, keeping entries whose name survives.
    ///
    /// On error the store is left untouched.
    pub fn replace_all(&mut self, inputs: Vec<SeriesInput>) -> ChartResult<SeriesReconciliation> {
        let mut next: IndexMap<String, Series> = IndexMap::with_capacity(inputs.len());
        for input in inputs {
            if next.contains_key(&input.name) {
                return Err(ChartError::DuplicateSeries(input.name));
            }
            if !input.raw_points.is_sorted_by_key(|point| OrderedFloat(point.x)) {
                // Lookup and tick placement assume ascending x.
                warn!(series = %input.name, "series x values are not ascending");
            }
            let derived_points =
                derive_points(&input.name, &input.raw_points, self.window, self.encoding)?;
            next.insert(
                input.name.clone(),
                Series {
                    name: input.name,
                    raw_points: input.raw_points,
                    derived_points,
                },
            );
        }

        let reconciliation = reconcile(self.names(), next.keys().map(String::as_str));
        self.series = next;

        debug!(
            series_count = self.series.len(),
            added = reconciliation.added.len(),
            updated = reconciliation.updated.len(),
            removed = reconciliation.removed.len(),
            "series replaced"
        );
        Ok(reconciliation)
    }

    /// Changes the window and re-derives every series; raw points are kept.
    pub fn set_smoothing_window(&mut self, window: SmoothingWindow) -> ChartResult<()> {
        let derived = self
            .series
            .values()
            .map(|series| derive_points(&series.name, &series.raw_points, window, self.encoding))
            .collect::<ChartResult<Vec<_>>>()?;
        for (series, points) in self.series.values_mut().zip(derived) {
            series.derived_points = points;
        }
        self.window = window;
        debug!(window = window.get(), "smoothing window changed");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// Largest per-series count of derived points inside `domain`.
    #[must_use]
    pub fn max_points_inside(&self, domain: Domain) -> usize {
        self.series
            .values()
            .map(|series| series.count_inside(domain))
            .max()
            .unwrap_or(0)
    }

    /// Extent of derived X values over all series.
    #[must_use]
    pub fn x_extent(&self) -> Option<Domain> {
        Domain::x_extent(self.series.values().flat_map(|s| s.derived_points.iter()))
    }

    /// Extent of derived Y values over all series.
    #[must_use]
    pub fn y_extent(&self) -> Option<Domain> {
        Domain::y_extent(self.series.values().flat_map(|s| s.derived_points.iter()))
    }
}
