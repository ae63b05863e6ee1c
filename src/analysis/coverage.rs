use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::classifier::classify;
use crate::analysis::geometry::intervals_overlap;
use crate::analysis::mapper::map_to_reference;
use crate::analysis::AnalysisError;
use crate::core::alignment::{AlignmentRecord, AlignmentSet};
use crate::core::reference::{Intersection, ReferenceRegion};
use crate::core::region::{Region, RunResult};
use crate::core::types::RecoveryStatus;

/// Reference regions classified against one assembly run
#[derive(Debug, Clone, Serialize)]
pub struct RunCoverage {
    pub run: RunResult,
    pub reference_regions: Vec<ReferenceRegion>,
}

impl RunCoverage {
    /// Number of reference regions per recovery status, including zero counts
    pub fn status_counts(&self) -> BTreeMap<RecoveryStatus, usize> {
        let mut counts: BTreeMap<RecoveryStatus, usize> =
            RecoveryStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for reference in &self.reference_regions {
            *counts.entry(reference.status).or_default() += 1;
        }
        counts
    }
}

/// Classify every region of `reference_run` against the assembly runs.
///
/// Each assembly run is matched to the alignment set carrying its display
/// label. Results are returned in the order of `assembly_runs`.
///
/// # Errors
///
/// Returns `AnalysisError::UnmatchedAlignment` if an assembly run has no
/// corresponding alignment set.
pub fn compute_coverage(
    assembly_runs: &[RunResult],
    reference_run: &RunResult,
    alignment_sets: &[AlignmentSet],
    allowed_gap: i64,
) -> Result<Vec<RunCoverage>, AnalysisError> {
    let mut results = Vec::with_capacity(assembly_runs.len());

    for run in assembly_runs {
        let alignments = alignment_sets
            .iter()
            .find(|set| set.run_label == run.display_label)
            .ok_or_else(|| AnalysisError::UnmatchedAlignment {
                run_label: run.display_label.clone(),
            })?;

        info!(
            "Computing reference coverage for {} ({} regions, {} alignments)",
            run.run_label(),
            run.regions.len(),
            alignments.len()
        );

        let reference_regions = compute_reference_coverage(
            &run.regions,
            alignments,
            &reference_run.regions,
            allowed_gap,
        );

        results.push(RunCoverage {
            run: run.clone(),
            reference_regions,
        });
    }

    Ok(results)
}

/// Classify each reference region by the assembly regions projected onto it.
///
/// The output has one entry per reference region, in input order.
#[must_use]
pub fn compute_reference_coverage(
    assembly_regions: &[Region],
    alignments: &AlignmentSet,
    reference_regions: &[Region],
    allowed_gap: i64,
) -> Vec<ReferenceRegion> {
    let mut assembly_by_seq: HashMap<&str, Vec<&Region>> = HashMap::new();
    for region in assembly_regions {
        assembly_by_seq
            .entry(region.sequence_id.as_str())
            .or_default()
            .push(region);
    }

    reference_regions
        .iter()
        .map(|reference| {
            let mut intersections = Vec::new();
            for alignment in alignments.for_reference_seq(&reference.sequence_id) {
                let candidates = assembly_by_seq
                    .get(alignment.assembly_seq_id.as_str())
                    .map_or(&[][..], Vec::as_slice);
                intersections.extend(intersections_from_alignment(
                    reference, alignment, candidates,
                ));
            }

            let reference_region =
                ReferenceRegion::new(reference.clone()).with_intersections(intersections);
            let status = classify(
                &reference_region.region,
                &reference_region.intersecting_assembly_regions,
                allowed_gap,
            );
            let reference_region = reference_region.with_status(status);

            debug!(
                "{} {}:{}-{}: {} ({} intersections)",
                reference.id,
                reference.sequence_id,
                reference.start,
                reference.end,
                status,
                reference_region.intersecting_assembly_regions.len()
            );
            reference_region
        })
        .collect()
}

/// Project the candidates that overlap the alignment block and keep those
/// landing on `reference`. Any overlap counts.
fn intersections_from_alignment(
    reference: &Region,
    alignment: &AlignmentRecord,
    candidates: &[&Region],
) -> Vec<Intersection> {
    let (lo, hi) = alignment.assembly_bounds();

    candidates
        .iter()
        .filter(|region| intervals_overlap(region.start, region.end, lo, hi))
        .filter_map(|region| {
            let mapped = map_to_reference(region.start, region.end, alignment);
            if mapped.start <= reference.end && mapped.end >= reference.start {
                Some(Intersection {
                    assembly_region: (*region).clone(),
                    start_in_ref: mapped.start,
                    end_in_ref: mapped.end,
                    reversed: mapped.reversed,
                })
            } else {
                None
            }
        })
        .collect()
}
