use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One block of an assembly-to-reference whole-sequence alignment.
///
/// Coordinates are inclusive on both sides. `assembly_start > assembly_end`
/// marks a reverse-strand alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub assembly_seq_id: String,
    pub ref_seq_id: String,
    pub ref_start: i64,
    pub ref_end: i64,
    pub assembly_start: i64,
    pub assembly_end: i64,
    /// Absolute difference between the aligned segment lengths on each side
    pub len_diff: i64,
}

impl AlignmentRecord {
    pub fn new(
        assembly_seq_id: impl Into<String>,
        ref_seq_id: impl Into<String>,
        (ref_start, ref_end): (i64, i64),
        (assembly_start, assembly_end): (i64, i64),
    ) -> Self {
        let ref_len = ref_end - ref_start;
        let assembly_len = (assembly_end - assembly_start).abs();
        Self {
            assembly_seq_id: assembly_seq_id.into(),
            ref_seq_id: ref_seq_id.into(),
            ref_start,
            ref_end,
            assembly_start,
            assembly_end,
            len_diff: (ref_len - assembly_len).abs(),
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.assembly_start > self.assembly_end
    }

    /// Assembly-space bounds in ascending order
    pub fn assembly_bounds(&self) -> (i64, i64) {
        if self.is_reversed() {
            (self.assembly_end, self.assembly_start)
        } else {
            (self.assembly_start, self.assembly_end)
        }
    }
}

/// All alignment records computed for one assembly run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentSet {
    /// Label shared with the assembly run these alignments belong to
    pub run_label: String,

    /// Records grouped by reference sequence id
    pub by_reference_seq: HashMap<String, Vec<AlignmentRecord>>,

    /// Records grouped by assembly sequence id
    pub by_assembly_seq: HashMap<String, Vec<AlignmentRecord>>,
}

impl AlignmentSet {
    pub fn new(run_label: impl Into<String>) -> Self {
        Self {
            run_label: run_label.into(),
            by_reference_seq: HashMap::new(),
            by_assembly_seq: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_records(mut self, records: impl IntoIterator<Item = AlignmentRecord>) -> Self {
        for record in records {
            self.add(record);
        }
        self
    }

    pub fn add(&mut self, record: AlignmentRecord) {
        self.by_assembly_seq
            .entry(record.assembly_seq_id.clone())
            .or_default()
            .push(record.clone());
        self.by_reference_seq
            .entry(record.ref_seq_id.clone())
            .or_default()
            .push(record);
    }

    /// Alignments landing on the given reference sequence
    pub fn for_reference_seq(&self, ref_seq_id: &str) -> &[AlignmentRecord] {
        self.by_reference_seq
            .get(ref_seq_id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_reference_seq.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
