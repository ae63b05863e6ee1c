use serde::{Deserialize, Serialize};

/// Whether a region touches a sequence edge within the configured margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Completeness {
    Complete,
    Incomplete,
    #[default]
    Unknown,
}

impl Completeness {
    /// Parse a completeness label, falling back to `Unknown` for anything unrecognized
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "complete" | "true" | "yes" => Self::Complete,
            "incomplete" | "false" | "no" | "partial" => Self::Incomplete,
            _ => Self::Unknown,
        }
    }

    /// Derive completeness from the region's distance to both sequence edges.
    ///
    /// Without a known sequence length the answer is `Unknown`.
    #[must_use]
    pub fn from_edges(start: i64, end: i64, sequence_length: Option<i64>, margin: i64) -> Self {
        match sequence_length {
            None => Self::Unknown,
            Some(length) => {
                if start < margin || end > length - margin {
                    Self::Incomplete
                } else {
                    Self::Complete
                }
            }
        }
    }
}

impl std::fmt::Display for Completeness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "Complete"),
            Self::Incomplete => write!(f, "Incomplete"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// How completely a reference region is reconstructed by assembly predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    /// No assembly region projects onto the reference region
    Missed,
    /// Some of the reference region is covered, but not all of it
    PartiallyRecovered,
    /// A single assembly region covers the whole reference region
    FullyRecovered,
    /// Several gap-merged assembly regions together cover the reference region
    FragmentedRecovery,
}

impl RecoveryStatus {
    pub const ALL: [RecoveryStatus; 4] = [
        Self::Missed,
        Self::PartiallyRecovered,
        Self::FullyRecovered,
        Self::FragmentedRecovery,
    ];

    /// Short label used in TSV headers
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Missed => "missed",
            Self::PartiallyRecovered => "partially_recovered",
            Self::FullyRecovered => "fully_recovered",
            Self::FragmentedRecovery => "fragmented_recovery",
        }
    }
}

impl std::fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missed => write!(f, "Missed"),
            Self::PartiallyRecovered => write!(f, "Partially recovered"),
            Self::FullyRecovered => write!(f, "Fully recovered"),
            Self::FragmentedRecovery => write!(f, "Fragmented recovery"),
        }
    }
}

/// The kind of comparison implied by the provided inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMode {
    /// Assembly predictions are compared to predictions on a reference genome
    CompareToReference,
    /// Several tools were run on the same input
    CompareTools,
    /// The same tool was run on different inputs
    CompareSamples,
    /// Inputs differ in both tool and sample
    Unknown,
}

impl std::fmt::Display for RunningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompareToReference => write!(f, "compare to reference"),
            Self::CompareTools => write!(f, "compare tools"),
            Self::CompareSamples => write!(f, "compare samples"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
