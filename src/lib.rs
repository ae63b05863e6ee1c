//! # bgc-assess
//!
//! A library for assessing biosynthetic gene cluster (BGC) predictions.
//!
//! Genome mining tools report BGCs as regions on contigs. Different tools, and
//! the same tool run on different assemblies of one genome, rarely agree on
//! where those regions start and end. `bgc-assess` quantifies the agreement.
//!
//! ## Features
//!
//! - **Tool comparison**: Finds regions predicted by one tool only, globally
//!   and for every ordered pair of runs
//! - **Reference recovery**: Projects assembly predictions onto a reference
//!   through alignment blocks and classifies each reference region as missed,
//!   partially, fully or fragmentedly recovered
//! - **Summaries**: Region counts and mean lengths per product type and
//!   completeness
//! - **Flexible input**: Region JSON or TSV/CSV tables, optionally gzipped
//!
//! ## Example
//!
//! ```rust
//! use bgc_assess::analysis::uniqueness::compute_uniqueness;
//! use bgc_assess::{Region, RunResult};
//!
//! let antismash = RunResult::new("s.antismash.json", "s", "antismash")
//!     .with_regions(vec![Region::new("a1", "contig_1", 100, 5_000)]);
//! let gecco = RunResult::new("s.gecco.tsv", "s", "gecco")
//!     .with_regions(vec![Region::new("g1", "contig_1", 90, 5_010)]);
//!
//! let report = compute_uniqueness(&[antismash, gecco], 0.9).unwrap();
//! assert_eq!(report.aggregate.totals_by_run["s [antismash]"].non_unique, 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Regions, runs, alignments and status types
//! - [`analysis`]: Geometry, coordinate mapping and the comparison engines
//! - [`parsing`]: Parsers for region files and alignment tables
//! - [`config`]: Analysis configuration
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod parsing;

// Re-export commonly used types for convenience
pub use analysis::AnalysisError;
pub use config::AnalysisConfig;
pub use crate::core::alignment::{AlignmentRecord, AlignmentSet};
pub use crate::core::reference::{Intersection, ReferenceRegion};
pub use crate::core::region::{Region, RunResult};
pub use crate::core::types::*;
