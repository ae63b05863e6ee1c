//! Comparative interval analysis of BGC predictions.
//!
//! This module provides the analysis engines:
//!
//! - [`geometry`]: Closed-interval overlap and directional coverage
//! - [`mapper`]: Projection of assembly coordinates onto the reference
//! - [`classifier`]: Recovery status of a reference region
//! - [`coverage`]: Reference coverage across all regions, alignments and runs
//! - [`uniqueness`]: Global and pairwise uniqueness across tool runs
//! - [`metrics`]: Basic per-run statistics
//!
//! ## Recovery Status
//!
//! | Status | Meaning |
//! |--------|---------|
//! | Missed | No assembly region projects onto the reference region |
//! | PartiallyRecovered | Projections cover only part of it |
//! | FullyRecovered | One projection covers all of it |
//! | FragmentedRecovery | Gap-merged projections together cover all of it |
//!
//! ## Example
//!
//! ```rust
//! use bgc_assess::analysis::uniqueness::compute_uniqueness;
//! use bgc_assess::{Region, RunResult};
//!
//! let a = RunResult::new("a.tsv", "sample", "antismash")
//!     .with_regions(vec![Region::new("a1", "chr1", 100, 199)]);
//! let b = RunResult::new("b.tsv", "sample", "gecco")
//!     .with_regions(vec![Region::new("b1", "chr1", 50, 250)]);
//!
//! let report = compute_uniqueness(&[a, b], 0.9).unwrap();
//! assert_eq!(report.aggregate.totals_by_run["sample [antismash]"].non_unique, 1);
//! ```

use thiserror::Error;

pub mod classifier;
pub mod coverage;
pub mod geometry;
pub mod mapper;
pub mod metrics;
pub mod mode;
pub mod products;
pub mod uniqueness;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Overlap threshold must be in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("No alignments found for run '{run_label}'")]
    UnmatchedAlignment { run_label: String },
}
