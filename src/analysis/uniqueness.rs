use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::geometry::coverage_of_a_by_b;
use crate::analysis::AnalysisError;
use crate::core::region::{Region, RunResult};

/// Per-run totals of globally unique and non-unique regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UniquenessTotals {
    pub unique: usize,
    pub non_unique: usize,
    pub total: usize,
}

/// Directional counts for the regions of one run against another run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairwiseCounts {
    pub unique: usize,
    pub non_unique: usize,
}

/// Regions of one run split by global uniqueness
#[derive(Debug, Clone, Serialize)]
pub struct RunUniqueness {
    pub run_label: String,
    pub unique: Vec<Region>,
    pub non_unique: Vec<Region>,
}

/// Aggregate counts keyed by run label
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateCounts {
    pub totals_by_run: BTreeMap<String, UniquenessTotals>,

    /// `pairwise_by_run[a][b]`: regions of run `a` checked against run `b`.
    /// Not symmetric.
    pub pairwise_by_run: BTreeMap<String, BTreeMap<String, PairwiseCounts>>,
}

/// Result of comparing several runs with each other
#[derive(Debug, Clone, Default, Serialize)]
pub struct UniquenessReport {
    /// One entry per input run, in input order
    pub per_run: Vec<RunUniqueness>,
    pub aggregate: AggregateCounts,
}

/// Whether `candidate` covers `region` by at least `threshold`.
///
/// Coverage must be strictly positive, so a zero threshold never matches
/// regions that do not touch.
fn is_covered_by(region: &Region, candidate: &Region, threshold: f64) -> bool {
    let coverage = coverage_of_a_by_b(region, candidate);
    coverage > 0.0 && coverage >= threshold
}

/// Check that an overlap threshold lies in `[0, 1]`
///
/// # Errors
///
/// Returns `AnalysisError::InvalidThreshold` for values outside the range or NaN.
pub fn validate_threshold(threshold: f64) -> Result<(), AnalysisError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidThreshold(threshold))
    }
}

/// Determine unique and overlapping regions across tool runs.
///
/// A region is globally unique when no region from a different tool on the
/// same sequence covers it by at least `overlap_threshold`. Pairwise counts are
/// directional: for every ordered pair of runs that were not read from the same
/// source, each region of the first run is checked against all regions of the
/// second.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidThreshold` if `overlap_threshold` is outside `[0, 1]`.
pub fn compute_uniqueness(
    runs: &[RunResult],
    overlap_threshold: f64,
) -> Result<UniquenessReport, AnalysisError> {
    validate_threshold(overlap_threshold)?;

    if runs.is_empty() {
        return Ok(UniquenessReport::default());
    }

    // Index: sequence id -> run index -> regions
    let mut by_seq: HashMap<&str, BTreeMap<usize, Vec<&Region>>> = HashMap::new();
    for (run_idx, run) in runs.iter().enumerate() {
        for region in &run.regions {
            by_seq
                .entry(region.sequence_id.as_str())
                .or_default()
                .entry(run_idx)
                .or_default()
                .push(region);
        }
    }

    let run_labels: Vec<String> = runs.iter().map(RunResult::run_label).collect();

    // Ordered pairs of runs that may be compared with each other
    let comparable: Vec<Vec<usize>> = runs
        .iter()
        .enumerate()
        .map(|(i, run)| {
            runs.iter()
                .enumerate()
                .filter(|(j, other)| *j != i && other.source_id != run.source_id)
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut aggregate = AggregateCounts::default();
    for (i, label) in run_labels.iter().enumerate() {
        aggregate
            .totals_by_run
            .insert(label.clone(), UniquenessTotals::default());
        let row = aggregate.pairwise_by_run.entry(label.clone()).or_default();
        for &j in &comparable[i] {
            row.insert(run_labels[j].clone(), PairwiseCounts::default());
        }
    }

    let mut per_run = Vec::with_capacity(runs.len());

    for (i, run) in runs.iter().enumerate() {
        let label = &run_labels[i];
        let mut unique = Vec::new();
        let mut non_unique = Vec::new();
        let mut totals = UniquenessTotals::default();
        let mut pairwise: BTreeMap<usize, PairwiseCounts> = BTreeMap::new();

        for region in &run.regions {
            let on_sequence = by_seq.get(region.sequence_id.as_str());

            let covered_globally = on_sequence.is_some_and(|by_run| {
                by_run
                    .iter()
                    .filter(|(k, _)| runs[**k].tool_name != run.tool_name)
                    .flat_map(|(_, regions)| regions.iter())
                    .any(|candidate| is_covered_by(region, candidate, overlap_threshold))
            });

            if covered_globally {
                non_unique.push(region.clone());
                totals.non_unique += 1;
            } else {
                unique.push(region.clone());
                totals.unique += 1;
            }
            totals.total += 1;

            for &j in &comparable[i] {
                let covered_by_other = on_sequence
                    .and_then(|by_run| by_run.get(&j))
                    .is_some_and(|regions| {
                        regions
                            .iter()
                            .any(|candidate| is_covered_by(region, candidate, overlap_threshold))
                    });
                let counts = pairwise.entry(j).or_default();
                if covered_by_other {
                    counts.non_unique += 1;
                } else {
                    counts.unique += 1;
                }
            }
        }

        info!(
            "{}: {} unique, {} non-unique of {} regions",
            label, totals.unique, totals.non_unique, totals.total
        );

        aggregate.totals_by_run.insert(label.clone(), totals);
        if let Some(row) = aggregate.pairwise_by_run.get_mut(label) {
            for (j, counts) in pairwise {
                debug!(
                    "{} against {}: {} unique, {} non-unique",
                    label, run_labels[j], counts.unique, counts.non_unique
                );
                row.insert(run_labels[j].clone(), counts);
            }
        }

        per_run.push(RunUniqueness {
            run_label: label.clone(),
            unique,
            non_unique,
        });
    }

    Ok(UniquenessReport { per_run, aggregate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, label: &str, tool: &str, regions: Vec<Region>) -> RunResult {
        RunResult::new(source, label, tool).with_regions(regions)
    }

    #[test]
    fn test_invalid_threshold() {
        for threshold in [-0.1, 1.5, f64::NAN] {
            let err = compute_uniqueness(&[], threshold).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidThreshold(_)));
        }
        assert!(compute_uniqueness(&[], 0.0).is_ok());
        assert!(compute_uniqueness(&[], 1.0).is_ok());
    }

    #[test]
    fn test_empty_runs() {
        let report = compute_uniqueness(&[], 0.5).unwrap();
        assert!(report.per_run.is_empty());
        assert!(report.aggregate.totals_by_run.is_empty());
        assert!(report.aggregate.pairwise_by_run.is_empty());
    }

    #[test]
    fn test_two_tools_global_uniqueness() {
        let a = run(
            "a.tsv",
            "sample",
            "antismash",
            vec![
                Region::new("a1", "chr1", 100, 199),
                Region::new("a2", "chr1", 1000, 1099),
                Region::new("a3", "chr2", 100, 199),
            ],
        );
        let b = run(
            "b.tsv",
            "sample",
            "gecco",
            vec![
                Region::new("b1", "chr1", 90, 210),
                Region::new("b2", "chr1", 1050, 1500),
            ],
        );

        let report = compute_uniqueness(&[a, b], 0.9).unwrap();

        let a_result = &report.per_run[0];
        assert_eq!(a_result.run_label, "sample [antismash]");
        let unique_ids: Vec<&str> = a_result.unique.iter().map(|r| r.id.as_str()).collect();
        let non_unique_ids: Vec<&str> = a_result.non_unique.iter().map(|r| r.id.as_str()).collect();
        // a2 is only half covered, a3 is on a sequence gecco has nothing on
        assert_eq!(unique_ids, vec!["a2", "a3"]);
        assert_eq!(non_unique_ids, vec!["a1"]);

        let totals = report.aggregate.totals_by_run["sample [antismash]"];
        assert_eq!(
            totals,
            UniquenessTotals {
                unique: 2,
                non_unique: 1,
                total: 3
            }
        );

        // b1 is covered only 100/121 by a1, below 0.9
        let totals = report.aggregate.totals_by_run["sample [gecco]"];
        assert_eq!(totals.unique, 2);
        assert_eq!(totals.non_unique, 0);
    }

    #[test]
    fn test_pairwise_is_directional() {
        let small = run("a.tsv", "s", "tool_a", vec![Region::new("a1", "chr1", 100, 199)]);
        let large = run("b.tsv", "s", "tool_b", vec![Region::new("b1", "chr1", 0, 999)]);

        let report = compute_uniqueness(&[small, large], 0.9).unwrap();
        let pairwise = &report.aggregate.pairwise_by_run;

        assert_eq!(
            pairwise["s [tool_a]"]["s [tool_b]"],
            PairwiseCounts {
                unique: 0,
                non_unique: 1
            }
        );
        assert_eq!(
            pairwise["s [tool_b]"]["s [tool_a]"],
            PairwiseCounts {
                unique: 1,
                non_unique: 0
            }
        );
    }

    #[test]
    fn test_same_tool_overlap_is_not_global() {
        // Two runs of the same tool plus one run of a different tool
        let run1 = run("r1.tsv", "s1", "gecco", vec![Region::new("x", "chr1", 100, 199)]);
        let run2 = run("r2.tsv", "s2", "gecco", vec![Region::new("y", "chr1", 95, 194)]);
        let run3 = run("r3.tsv", "s1", "antismash", vec![Region::new("z", "chr1", 5000, 6000)]);

        let report = compute_uniqueness(&[run1, run2, run3], 0.9).unwrap();

        // x is 95% covered by y: non-unique against run2
        let pairwise = &report.aggregate.pairwise_by_run["s1 [gecco]"];
        assert_eq!(pairwise["s2 [gecco]"].non_unique, 1);
        assert_eq!(pairwise["s1 [antismash]"].unique, 1);

        // but no other tool covers it, so it stays globally unique
        assert_eq!(report.per_run[0].unique.len(), 1);
        assert!(report.per_run[0].non_unique.is_empty());
    }

    #[test]
    fn test_same_source_runs_not_compared() {
        let run1 = run("same.json", "s", "tool_a", vec![Region::new("a", "chr1", 0, 99)]);
        let run2 = run("same.json", "s", "tool_b", vec![Region::new("b", "chr1", 0, 99)]);
        let run3 = run("other.json", "o", "tool_c", vec![Region::new("c", "chr1", 500, 599)]);

        let report = compute_uniqueness(&[run1, run2, run3], 0.5).unwrap();
        let pairwise = &report.aggregate.pairwise_by_run;

        assert!(!pairwise["s [tool_a]"].contains_key("s [tool_b]"));
        assert!(!pairwise["s [tool_b]"].contains_key("s [tool_a]"));
        assert!(pairwise["s [tool_a]"].contains_key("o [tool_c]"));
        assert_eq!(pairwise["o [tool_c]"].len(), 2);

        // Global uniqueness still considers the other tool from the same file
        assert_eq!(report.aggregate.totals_by_run["s [tool_a]"].non_unique, 1);
    }

    #[test]
    fn test_zero_threshold_requires_contact() {
        let a = run("a.tsv", "a", "t1", vec![Region::new("a", "chr1", 0, 99)]);
        let b = run("b.tsv", "b", "t2", vec![Region::new("b", "chr1", 200, 299)]);

        let report = compute_uniqueness(&[a, b], 0.0).unwrap();
        assert_eq!(report.aggregate.totals_by_run["a [t1]"].unique, 1);
        assert_eq!(report.aggregate.pairwise_by_run["a [t1]"]["b [t2]"].unique, 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Exactly 50 of 100 bases covered
        let a = run("a.tsv", "a", "t1", vec![Region::new("a", "chr1", 0, 99)]);
        let b = run("b.tsv", "b", "t2", vec![Region::new("b", "chr1", 50, 149)]);

        let report = compute_uniqueness(&[a, b], 0.5).unwrap();
        assert_eq!(report.aggregate.totals_by_run["a [t1]"].non_unique, 1);
    }
}
