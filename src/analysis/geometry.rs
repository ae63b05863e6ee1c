use crate::core::region::Region;

/// Safely convert an interval length to f64 for coverage fractions
#[inline]
fn length_to_f64(length: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        length as f64
    }
}

/// Overlap length of the closed intervals `[a_start, a_end]` and `[b_start, b_end]`.
///
/// Each pair is normalized so that start <= end first. Touching intervals share
/// one base: `[10, 20]` and `[20, 30]` overlap by 1.
#[must_use]
pub fn overlap_length(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    let (a_start, a_end) = (a_start.min(a_end), a_start.max(a_end));
    let (b_start, b_end) = (b_start.min(b_end), b_start.max(b_end));

    let left = a_start.max(b_start);
    let right = a_end.min(b_end);
    if right < left {
        0
    } else {
        right - left + 1
    }
}

/// Whether two closed intervals share at least one base
#[must_use]
pub fn intervals_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    overlap_length(a_start, a_end, b_start, b_end) > 0
}

/// Directional coverage of `a` by `b`: `|a ∩ b| / |a|` over closed intervals.
///
/// Returns 0.0 for a zero-length `a`. The result is always within `[0, 1]`.
#[must_use]
pub fn coverage_of_a_by_b(a: &Region, b: &Region) -> f64 {
    let a_len = (a.end - a.start + 1).max(0);
    if a_len == 0 {
        return 0.0;
    }
    let overlap = overlap_length(a.start, a.end, b.start, b.end);
    length_to_f64(overlap) / length_to_f64(a_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: i64, end: i64) -> Region {
        Region::new("r", "chr1", start, end)
    }

    #[test]
    fn test_overlap_length_basic() {
        assert_eq!(overlap_length(10, 20, 20, 30), 1);
        assert_eq!(overlap_length(10, 20, 15, 25), 6);
        assert_eq!(overlap_length(10, 20, 21, 30), 0);
        assert_eq!(overlap_length(10, 20, 0, 100), 11);
    }

    #[test]
    fn test_overlap_length_normalizes_reversed_intervals() {
        assert_eq!(overlap_length(20, 10, 30, 15), 6);
    }

    #[test]
    fn test_overlap_length_symmetric() {
        let intervals = [(0, 10), (5, 15), (10, 10), (20, 40), (-5, 3), (12, 8)];
        for &(a_start, a_end) in &intervals {
            for &(b_start, b_end) in &intervals {
                assert_eq!(
                    overlap_length(a_start, a_end, b_start, b_end),
                    overlap_length(b_start, b_end, a_start, a_end),
                    "asymmetric for [{a_start},{a_end}] vs [{b_start},{b_end}]"
                );
            }
        }
    }

    #[test]
    fn test_coverage_bounds() {
        let a = region(100, 199);
        for b in [region(0, 50), region(150, 160), region(50, 150), region(0, 1000)] {
            let cov = coverage_of_a_by_b(&a, &b);
            assert!((0.0..=1.0).contains(&cov), "coverage {cov} out of bounds");
        }
    }

    #[test]
    fn test_coverage_full_containment() {
        let a = region(100, 199);
        let b = region(50, 250);
        assert!((coverage_of_a_by_b(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_directional() {
        let a = region(0, 99);
        let b = region(50, 349);
        // 50 of a's 100 bases are covered
        assert!((coverage_of_a_by_b(&a, &b) - 0.5).abs() < 1e-9);
        // 50 of b's 300 bases are covered
        assert!((coverage_of_a_by_b(&b, &a) - 50.0 / 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_degenerate_region() {
        // end < start gives a non-positive length
        let a = region(10, 5);
        assert!(coverage_of_a_by_b(&a, &region(0, 100)).abs() < 1e-9);
    }
}
