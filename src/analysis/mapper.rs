use crate::core::alignment::AlignmentRecord;

/// A region's extent after projection into reference coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedInterval {
    pub start: i64,
    pub end: i64,
    /// Projected through a reverse-strand alignment
    pub reversed: bool,
}

/// Safely convert a coordinate delta to f64 for proportional scaling
#[inline]
fn coord_to_f64(value: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f64
    }
}

/// Truncate a scaled coordinate toward zero
#[inline]
fn truncate(value: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        value as i64
    }
}

/// Linear scale between the aligned reference segment and the aligned assembly segment.
///
/// Absorbs any indels accumulated over the whole alignment block.
fn diff_factor(alignment: &AlignmentRecord) -> f64 {
    let ref_len = alignment.ref_end - alignment.ref_start + 1;
    let assembly_len = (alignment.assembly_end - alignment.assembly_start).abs() + 1;
    coord_to_f64(ref_len) / coord_to_f64(assembly_len)
}

/// Project the assembly interval `[query_start, query_end]` onto the reference
/// through one alignment block.
///
/// The query is first clipped to the aligned part of the assembly sequence:
/// unaligned flanks are not projected. For a reverse-strand alignment a
/// decreasing assembly coordinate maps to an increasing reference coordinate.
///
/// # Example
///
/// An assembly region 61-80 projected through an alignment of assembly 51-110
/// (60 bp) onto reference 11-76 (66 bp) lands on 22-43: the 10% length
/// difference of the block stretches the mapped region accordingly.
#[must_use]
pub fn map_to_reference(
    query_start: i64,
    query_end: i64,
    alignment: &AlignmentRecord,
) -> MappedInterval {
    let factor = diff_factor(alignment);
    let reversed = alignment.is_reversed();
    let (lo, hi) = alignment.assembly_bounds();
    let clipped_start = query_start.max(lo);
    let clipped_end = query_end.min(hi);

    let (start, end) = if reversed {
        (
            coord_to_f64(alignment.ref_start)
                + coord_to_f64(alignment.assembly_start - clipped_end) * factor,
            coord_to_f64(alignment.ref_end)
                - coord_to_f64(clipped_start - alignment.assembly_end) * factor,
        )
    } else {
        (
            coord_to_f64(alignment.ref_start)
                + coord_to_f64(clipped_start - alignment.assembly_start) * factor,
            coord_to_f64(alignment.ref_end)
                - coord_to_f64(alignment.assembly_end - clipped_end) * factor,
        )
    };

    MappedInterval {
        start: truncate(start),
        end: truncate(end),
        reversed,
    }
}
