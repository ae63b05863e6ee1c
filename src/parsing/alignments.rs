use std::path::Path;

use tracing::{info, warn};

use crate::core::alignment::{AlignmentRecord, AlignmentSet};
use crate::parsing::{file_label_from_path, read_text, ParseError, MAX_REGIONS};

/// File name prefix the aligner report uses for per-assembly alignment tables
const ALIGNMENT_FILE_PREFIX: &str = "all_alignments_";

/// Parse an alignment coordinate table file.
///
/// The run label is the file label with any `all_alignments_` prefix removed,
/// so `all_alignments_sample.tsv` belongs to the run labelled `sample`.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_alignment_file(path: &Path) -> Result<AlignmentSet, ParseError> {
    let label = file_label_from_path(path);
    let run_label = label
        .strip_prefix(ALIGNMENT_FILE_PREFIX)
        .unwrap_or(&label)
        .to_string();

    let content = read_text(path)?;
    let set = parse_alignment_text(&content, run_label)?;
    info!(
        "Loaded {} alignments for '{}' from {}",
        set.len(),
        set.run_label,
        path.display()
    );
    Ok(set)
}

/// Parse alignment coordinate table text.
///
/// Columns are tab-separated: `S1 E1 S2 E2 Reference Contig [...]`, where
/// `S1..E1` is the reference span and `S2..E2` the assembly span (descending
/// on the reverse strand). Header lines starting with `S1` and per-contig
/// summary lines starting with `CONTIG` are skipped.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for rows with fewer than 6 fields,
/// non-numeric coordinates, or a reference span running backwards, or
/// `ParseError::TooManyRegions` if the limit is exceeded.
pub fn parse_alignment_text(
    text: &str,
    run_label: impl Into<String>,
) -> Result<AlignmentSet, ParseError> {
    let mut set = AlignmentSet::new(run_label);
    let mut count = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("S1") {
            continue;
        }
        if line.starts_with("CONTIG") {
            continue;
        }

        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 6 {
            return Err(ParseError::InvalidFormat(format!(
                "Alignment line {line_num} has fewer than 6 fields"
            )));
        }

        let coord = |idx: usize| -> Result<i64, ParseError> {
            fields[idx].parse().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid coordinate on alignment line {line_num}: '{}'",
                    fields[idx]
                ))
            })
        };
        let (ref_start, ref_end) = (coord(0)?, coord(1)?);
        let (assembly_start, assembly_end) = (coord(2)?, coord(3)?);

        if ref_start > ref_end {
            return Err(ParseError::InvalidFormat(format!(
                "Reference span runs backwards on alignment line {line_num}: \
                 {ref_start} > {ref_end}"
            )));
        }

        if count >= MAX_REGIONS {
            return Err(ParseError::TooManyRegions(count));
        }
        count += 1;

        set.add(AlignmentRecord::new(
            fields[5],
            fields[4],
            (ref_start, ref_end),
            (assembly_start, assembly_end),
        ));
    }

    if set.is_empty() {
        warn!("No alignments found for '{}'", set.run_label);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const TABLE: &str = "S1\tE1\tS2\tE2\tReference\tContig\tIDY\tAmbiguous\tBest_group
1001\t6001\t1\t5000\tchr1\tcontig_1\t99.9\tFalse\tTrue
7000\t9000\t2001\t1\tchr1\tcontig_2\t99.5\tFalse\tTrue
CONTIG\tcontig_2\t2001\tcorrect
10\t500\t20\t510\tplasmid\tcontig_3\t100.0\tFalse\tTrue
";

    #[test]
    fn test_parse_alignment_text() {
        let set = parse_alignment_text(TABLE, "sample").unwrap();
        assert_eq!(set.run_label, "sample");
        assert_eq!(set.len(), 3);

        let chr1 = set.for_reference_seq("chr1");
        assert_eq!(chr1.len(), 2);
        assert_eq!(chr1[0].assembly_seq_id, "contig_1");
        assert_eq!(chr1[0].len_diff, 1);
        assert!(!chr1[0].is_reversed());
        assert!(chr1[1].is_reversed());
        assert_eq!(chr1[1].len_diff, 0);

        assert_eq!(set.by_assembly_seq["contig_3"][0].ref_seq_id, "plasmid");
    }

    #[test]
    fn test_invalid_alignment_rows() {
        assert!(parse_alignment_text("1\t2\t3\tchr1\tc1\n", "x").is_err());
        assert!(parse_alignment_text("a\t2\t3\t4\tchr1\tc1\n", "x").is_err());
        assert!(parse_alignment_text("10\t2\t3\t4\tchr1\tc1\n", "x").is_err());
    }

    #[test]
    fn test_empty_table_is_empty_set() {
        let set = parse_alignment_text("S1\tE1\tS2\tE2\tReference\tContig\n", "x").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_run_label_from_file_name() {
        let mut file = Builder::new()
            .prefix("all_alignments_")
            .suffix(".tsv")
            .tempfile()
            .unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let set = parse_alignment_file(file.path()).unwrap();
        let expected = file_label_from_path(file.path())
            .trim_start_matches(ALIGNMENT_FILE_PREFIX)
            .to_string();
        assert_eq!(set.run_label, expected);
        assert!(!set.run_label.starts_with(ALIGNMENT_FILE_PREFIX));
        assert_eq!(set.len(), 3);
    }
}
