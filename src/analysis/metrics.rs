//! Basic per-run statistics grouped by product type and completeness.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::region::{Region, RunResult};

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Dimension by which regions can be grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    ProductType,
    Completeness,
}

impl GroupingKey {
    pub const ALL: [GroupingKey; 2] = [Self::ProductType, Self::Completeness];

    /// Group value of a region along this dimension
    pub fn value_of(self, region: &Region) -> String {
        match self {
            Self::ProductType => region.product_group().to_string(),
            Self::Completeness => region.completeness.to_string(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ProductType => "product_type",
            Self::Completeness => "completeness",
        }
    }
}

/// Statistic computed over a group of regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalCount,
    MeanLength,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Self::TotalCount, Self::MeanLength];

    pub fn compute(self, regions: &[&Region]) -> f64 {
        match self {
            Self::TotalCount => count_to_f64(regions.len()),
            Self::MeanLength => mean_length(regions),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TotalCount => "total_bgc_count",
            Self::MeanLength => "mean_bgc_length",
        }
    }
}

/// Mean of `end - start` over regions with `end > start`; 0.0 if there are none
fn mean_length(regions: &[&Region]) -> f64 {
    let lengths: Vec<i64> = regions
        .iter()
        .filter(|r| r.end > r.start)
        .map(|r| r.end - r.start)
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let sum = lengths.iter().sum::<i64>() as f64;
    sum / count_to_f64(lengths.len())
}

/// Metric values keyed first by the tuple of group values, then by metric
pub type GroupedMetrics = BTreeMap<Vec<String>, BTreeMap<Metric, f64>>;

/// Group `regions` by the given keys and compute every metric per group.
///
/// With no keys there is a single group keyed by the empty tuple, present even
/// when `regions` is empty.
#[must_use]
pub fn compute_metrics(regions: &[Region], group_by: &[GroupingKey]) -> GroupedMetrics {
    let mut groups: BTreeMap<Vec<String>, Vec<&Region>> = BTreeMap::new();
    if group_by.is_empty() {
        groups.insert(Vec::new(), regions.iter().collect());
    } else {
        for region in regions {
            let key = group_by.iter().map(|k| k.value_of(region)).collect();
            groups.entry(key).or_default().push(region);
        }
    }

    groups
        .into_iter()
        .map(|(key, group)| {
            let values = Metric::ALL
                .iter()
                .map(|metric| (*metric, metric.compute(&group)))
                .collect();
            (key, values)
        })
        .collect()
}

/// One group of a [`GroupedMetrics`] table, keyed by names rather than tuples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Grouping key name -> group value
    pub group: BTreeMap<&'static str, String>,
    /// Metric name -> value
    pub metrics: BTreeMap<&'static str, f64>,
}

/// Flatten a grouped table computed with `group_by` into named rows
#[must_use]
pub fn group_rows(group_by: &[GroupingKey], grouped: &GroupedMetrics) -> Vec<GroupRow> {
    grouped
        .iter()
        .map(|(values, metrics)| GroupRow {
            group: group_by
                .iter()
                .map(|k| k.name())
                .zip(values.iter().cloned())
                .collect(),
            metrics: metrics.iter().map(|(m, v)| (m.name(), *v)).collect(),
        })
        .collect()
}

/// Metrics for one run under each standard grouping
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub run_label: String,
    pub total: GroupedMetrics,
    pub by_type: GroupedMetrics,
    pub by_completeness: GroupedMetrics,
    pub by_type_completeness: GroupedMetrics,
}

impl RunMetrics {
    /// Each table with its name and the keys it was grouped by
    #[must_use]
    pub fn tables(&self) -> [(&'static str, &'static [GroupingKey], &GroupedMetrics); 4] {
        [
            ("total", &[], &self.total),
            ("by_type", &[GroupingKey::ProductType], &self.by_type),
            ("by_completeness", &[GroupingKey::Completeness], &self.by_completeness),
            (
                "by_type_completeness",
                &GroupingKey::ALL,
                &self.by_type_completeness,
            ),
        ]
    }
}

/// Compute the standard groupings for one run: overall, by product type,
/// by completeness, and by both.
#[must_use]
pub fn basic_metrics(run: &RunResult) -> RunMetrics {
    RunMetrics {
        run_label: run.run_label(),
        total: compute_metrics(&run.regions, &[]),
        by_type: compute_metrics(&run.regions, &[GroupingKey::ProductType]),
        by_completeness: compute_metrics(&run.regions, &[GroupingKey::Completeness]),
        by_type_completeness: compute_metrics(&run.regions, &GroupingKey::ALL),
    }
}
