use crate::core::reference::Intersection;
use crate::core::region::Region;
use crate::core::types::RecoveryStatus;

/// Classify how well `reference` is recovered by its projected intersections.
///
/// `intersections` must be sorted by `start_in_ref`. Consecutive intersections
/// separated by at most `allowed_gap` bases are merged into one running range;
/// only the last running range is checked against the reference bounds, so a
/// fragmented recovery needs one contiguous (after gap merging) run of fragments.
#[must_use]
pub fn classify(
    reference: &Region,
    intersections: &[Intersection],
    allowed_gap: i64,
) -> RecoveryStatus {
    let Some(first) = intersections.first() else {
        return RecoveryStatus::Missed;
    };

    let mut min_start = first.start_in_ref;
    let mut max_end = first.end_in_ref;
    for intersection in intersections {
        if intersection.start_in_ref <= reference.start
            && intersection.end_in_ref >= reference.end
        {
            return RecoveryStatus::FullyRecovered;
        }

        if intersection.start_in_ref <= max_end + allowed_gap {
            max_end = max_end.max(intersection.end_in_ref);
        } else {
            min_start = intersection.start_in_ref;
            max_end = intersection.end_in_ref;
        }
    }

    if min_start <= reference.start && max_end >= reference.end {
        RecoveryStatus::FragmentedRecovery
    } else {
        RecoveryStatus::PartiallyRecovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(start: i64, end: i64) -> Region {
        Region::new("ref_bgc", "chr1", start, end)
    }

    fn intersection(start_in_ref: i64, end_in_ref: i64) -> Intersection {
        let len = end_in_ref - start_in_ref;
        Intersection::new(Region::new("asm_bgc", "ctg1", 0, len), start_in_ref, end_in_ref)
    }

    #[test]
    fn test_missed() {
        assert_eq!(classify(&reference(100, 200), &[], 100), RecoveryStatus::Missed);
    }

    #[test]
    fn test_fully_recovered() {
        let status = classify(&reference(100, 200), &[intersection(50, 250)], 100);
        assert_eq!(status, RecoveryStatus::FullyRecovered);
    }

    #[test]
    fn test_exact_bounds_fully_recovered() {
        let status = classify(&reference(100, 200), &[intersection(100, 200)], 0);
        assert_eq!(status, RecoveryStatus::FullyRecovered);
    }

    #[test]
    fn test_partially_recovered() {
        let status = classify(&reference(100, 200), &[intersection(120, 180)], 100);
        assert_eq!(status, RecoveryStatus::PartiallyRecovered);
    }

    #[test]
    fn test_fragmented_recovery() {
        let fragments = [intersection(50, 150), intersection(151, 252)];
        let status = classify(&reference(100, 200), &fragments, 100);
        assert_eq!(status, RecoveryStatus::FragmentedRecovery);
    }

    #[test]
    fn test_gap_exceeding_allowance() {
        // Gap of two bases between 150 and 152 with an allowance of one
        let fragments = [intersection(50, 150), intersection(152, 250)];
        let status = classify(&reference(100, 200), &fragments, 1);
        assert_eq!(status, RecoveryStatus::PartiallyRecovered);
    }

    #[test]
    fn test_gap_exactly_at_allowance_is_bridged() {
        let fragments = [intersection(50, 150), intersection(152, 250)];
        let status = classify(&reference(100, 200), &fragments, 2);
        assert_eq!(status, RecoveryStatus::FragmentedRecovery);
    }

    #[test]
    fn test_disjoint_runs_do_not_combine() {
        // First run covers the start, a later disjoint run covers the end:
        // only the last running range counts.
        let fragments = [
            intersection(50, 120),
            intersection(500, 600),
            intersection(130, 250),
        ];
        let mut sorted = fragments.to_vec();
        sorted.sort_by_key(|i| i.start_in_ref);
        let status = classify(&reference(100, 200), &sorted, 5);
        assert_eq!(status, RecoveryStatus::PartiallyRecovered);
    }

    #[test]
    fn test_resorting_is_idempotent() {
        let mut fragments = vec![
            intersection(20, 90),
            intersection(95, 160),
            intersection(170, 230),
        ];
        let before = classify(&reference(50, 220), &fragments, 10);
        fragments.sort_by_key(|i| i.start_in_ref);
        let after = classify(&reference(50, 220), &fragments, 10);
        assert_eq!(before, after);
        assert_eq!(after, RecoveryStatus::FragmentedRecovery);
    }

    #[test]
    fn test_monotonic_in_allowed_gap() {
        let fragments = [
            intersection(40, 110),
            intersection(125, 170),
            intersection(190, 260),
        ];
        let rank = |status: RecoveryStatus| match status {
            RecoveryStatus::Missed => 0,
            RecoveryStatus::PartiallyRecovered => 1,
            RecoveryStatus::FragmentedRecovery | RecoveryStatus::FullyRecovered => 2,
        };

        let mut previous = 0;
        for gap in 0..40 {
            let current = rank(classify(&reference(100, 200), &fragments, gap));
            assert!(current >= previous, "classification regressed at gap {gap}");
            previous = current;
        }
        assert_eq!(
            classify(&reference(100, 200), &fragments, 19),
            RecoveryStatus::PartiallyRecovered
        );
        assert_eq!(
            classify(&reference(100, 200), &fragments, 20),
            RecoveryStatus::FragmentedRecovery
        );
    }
}
