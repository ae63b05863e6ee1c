use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::core::types::Completeness;

/// A predicted or reference genomic interval (a BGC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region identifier as reported by the mining tool
    pub id: String,

    /// Contig/chromosome the region lies on
    pub sequence_id: String,

    /// Start position (0-based)
    pub start: i64,

    /// End position; `end >= start`
    pub end: i64,

    #[serde(default)]
    pub completeness: Completeness,

    /// Product categories, in the order reported by the tool, without repeats
    #[serde(
        default,
        deserialize_with = "deserialize_product_types",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub product_types: Vec<String>,

    /// Tool-specific annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Read product types as an ordered set, keeping the first occurrence of each label
fn deserialize_product_types<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Vec::<String>::deserialize(deserializer)?;
    let mut product_types = Vec::with_capacity(labels.len());
    for label in labels {
        if !product_types.contains(&label) {
            product_types.push(label);
        }
    }
    Ok(product_types)
}

impl Region {
    pub fn new(
        id: impl Into<String>,
        sequence_id: impl Into<String>,
        start: i64,
        end: i64,
    ) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            start,
            end,
            completeness: Completeness::Unknown,
            product_types: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_completeness(mut self, completeness: Completeness) -> Self {
        self.completeness = completeness;
        self
    }

    /// Add product types, keeping the first occurrence of each label
    #[must_use]
    pub fn with_product_types<I, S>(mut self, product_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for product in product_types {
            let product = product.into();
            if !self.product_types.contains(&product) {
                self.product_types.push(product);
            }
        }
        self
    }

    /// Region length as `end - start`, never negative
    pub fn length(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Product type used when grouping: the single label, `Hybrid` or `Unknown`
    pub fn product_group(&self) -> &str {
        match self.product_types.as_slice() {
            [] => "Unknown",
            [single] => single.as_str(),
            _ => "Hybrid",
        }
    }
}

/// One tool run's output set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Identifier of the file the run was read from
    pub source_id: String,

    /// Human-readable label (usually derived from the file name)
    pub display_label: String,

    /// Name of the mining tool that produced the regions
    pub tool_name: String,

    pub regions: Vec<Region>,
}

impl RunResult {
    pub fn new(
        source_id: impl Into<String>,
        display_label: impl Into<String>,
        tool_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            display_label: display_label.into(),
            tool_name: tool_name.into(),
            regions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    /// Label identifying this run in reports: `"{display_label} [{tool_name}]"`
    pub fn run_label(&self) -> String {
        format!("{} [{}]", self.display_label, self.tool_name)
    }
}

/// Make display labels unique by suffixing repeats with ` (2)`, ` (3)`, ...
///
/// Runs are compared by their full run label, so two runs from different tools
/// may share a display label.
pub fn deduplicate_labels(runs: &mut [RunResult]) {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    for run in runs.iter_mut() {
        let count = seen.entry(run.run_label()).or_insert(0);
        *count += 1;
        if *count > 1 {
            run.display_label = format!("{} ({})", run.display_label, count);
        }
    }
}
