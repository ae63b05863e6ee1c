//! Command-line interface for bgc-assess.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **summary**: Basic statistics for each run
//! - **compare-tools**: Unique and shared regions across tool runs
//! - **compare-ref**: Recovery of reference regions by assembly predictions
//!
//! ## Usage
//!
//! ```text
//! # Region counts and mean lengths per product type
//! bgc-assess summary sample.antismash.json sample.gecco.tsv
//!
//! # Which tools found which regions
//! bgc-assess compare-tools sample.antismash.json sample.gecco.tsv --overlap-threshold 0.8
//!
//! # How well assemblies recover reference regions
//! bgc-assess compare-ref --reference ref.json \
//!     --alignments all_alignments_asm1.tsv --alignments all_alignments_asm2.tsv \
//!     asm1.json asm2.json
//!
//! # JSON output for scripting
//! bgc-assess --format json summary sample.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::analysis::mode::determine_running_mode;
use crate::config::AnalysisConfig;
use crate::core::region::{deduplicate_labels, RunResult};
use crate::core::types::RunningMode;
use crate::parsing::{parse_run_file, RunOptions};

pub mod compare_ref;
pub mod compare_tools;
pub mod summary;

#[derive(Parser)]
#[command(name = "bgc-assess")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Assess biosynthetic gene cluster predictions across tools and assemblies")]
#[command(
    long_about = "bgc-assess compares the BGC regions predicted by genome mining tools.\n\nIt can:\n- Summarize region counts and lengths per product type and completeness\n- Find regions predicted by only one tool\n- Measure how well predictions on assemblies recover regions predicted on a reference genome"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// JSON configuration file; command-line options take precedence
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize region counts and lengths per run
    Summary(summary::SummaryArgs),

    /// Compare predictions of several tools on the same input
    CompareTools(compare_tools::CompareToolsArgs),

    /// Compare assembly predictions against reference predictions
    CompareRef(compare_ref::CompareRefArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by every command that reads region files
#[derive(clap::Args, Debug, Default)]
pub struct RunInputArgs {
    /// Region files (JSON, TSV or CSV; optionally gzipped)
    #[arg(required = true)]
    pub runs: Vec<PathBuf>,

    /// Display label for each run, in input order (default: file name)
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Tool name for each run, in input order (default: recorded in the file)
    #[arg(long = "tool")]
    pub tools: Vec<String>,

    /// Drop regions shorter than this many bases
    #[arg(long)]
    pub min_region_length: Option<i64>,

    /// Regions within this many bases of a sequence edge are incomplete
    #[arg(long)]
    pub completeness_margin: Option<i64>,
}

impl RunInputArgs {
    /// Apply command-line overrides on top of the file configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(length) = self.min_region_length {
            config.min_region_length = length;
        }
        if let Some(margin) = self.completeness_margin {
            config.completeness_margin = margin;
        }
    }

    /// Parse every run file with its label and tool overrides.
    ///
    /// Product labels are mapped to their classes when the configuration
    /// carries a product mapping, and repeated run labels are disambiguated.
    ///
    /// # Errors
    ///
    /// Returns an error if `--label` or `--tool` was given a different number
    /// of times than there are runs, or if a file cannot be parsed.
    pub fn load_runs(&self, config: &AnalysisConfig) -> anyhow::Result<Vec<RunResult>> {
        check_override_count("--label", &self.labels, self.runs.len())?;
        check_override_count("--tool", &self.tools, self.runs.len())?;

        let mapping = config.product_mapping();
        let mut runs = Vec::with_capacity(self.runs.len());
        for (i, path) in self.runs.iter().enumerate() {
            let options = RunOptions {
                display_label: self.labels.get(i).cloned(),
                tool_name: self.tools.get(i).cloned(),
                min_region_length: config.min_region_length,
                completeness_margin: config.completeness_margin,
            };
            let mut run = load_run(path, &options)?;
            mapping.apply(&mut run);
            runs.push(run);
        }

        deduplicate_labels(&mut runs);
        Ok(runs)
    }
}

fn check_override_count(flag: &str, values: &[String], runs: usize) -> anyhow::Result<()> {
    if !values.is_empty() && values.len() != runs {
        bail!(
            "{flag} was given {} time(s) but there are {runs} run file(s)",
            values.len()
        );
    }
    Ok(())
}

/// Parse one region file, naming the file in any error
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_run(path: &Path, options: &RunOptions) -> anyhow::Result<RunResult> {
    parse_run_file(path, options).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load the configuration file, or the defaults when none is given
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds invalid values.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Log the comparison implied by the inputs.
///
/// With an `expected` mode, a different detected mode is logged as a warning.
pub fn report_running_mode(
    reference: Option<&RunResult>,
    runs: &[RunResult],
    expected: Option<RunningMode>,
) -> RunningMode {
    let mode = determine_running_mode(reference, runs);
    match expected {
        Some(expected) if expected != mode => {
            warn!("Inputs look like '{mode}' rather than '{expected}'");
        }
        _ => info!("Running mode: {mode}"),
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn region_file(tool: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"tool": "{tool}", "regions": [
                {{"id": "a", "sequence_id": "c1", "start": 1, "end": 900,
                  "product_types": ["NRPS-like"]}},
                {{"id": "b", "sequence_id": "c1", "start": 2000, "end": 2050}}
            ]}}"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_runs_with_overrides() {
        let first = region_file("antismash");
        let second = region_file("antismash");
        let args = RunInputArgs {
            runs: vec![first.path().to_path_buf(), second.path().to_path_buf()],
            labels: vec!["sample".to_string(), "sample".to_string()],
            min_region_length: Some(100),
            ..RunInputArgs::default()
        };

        let mut config = AnalysisConfig::default();
        config
            .product_mapping
            .insert("NRP".to_string(), vec!["NRPS-like".to_string()]);
        args.apply_overrides(&mut config);
        assert_eq!(config.min_region_length, 100);

        let runs = args.load_runs(&config).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].display_label, "sample");
        assert_eq!(runs[1].display_label, "sample (2)");
        assert_eq!(runs[0].tool_name, "antismash");
        assert_eq!(runs[0].regions.len(), 1);
        assert_eq!(runs[0].regions[0].product_types, vec!["NRP"]);
    }

    #[test]
    fn test_override_count_mismatch() {
        let file = region_file("gecco");
        let args = RunInputArgs {
            runs: vec![file.path().to_path_buf()],
            tools: vec!["a".to_string(), "b".to_string()],
            ..RunInputArgs::default()
        };
        let err = args.load_runs(&AnalysisConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--tool"));
    }

    #[test]
    fn test_report_running_mode_returns_detected_mode() {
        let runs = vec![
            RunResult::new("s.antismash.json", "s", "antismash"),
            RunResult::new("s.gecco.tsv", "s", "gecco"),
        ];
        assert_eq!(report_running_mode(None, &runs, None), RunningMode::CompareTools);
        assert_eq!(
            report_running_mode(None, &runs, Some(RunningMode::CompareSamples)),
            RunningMode::CompareTools
        );
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.allowed_gap_for_fragmented_recovery, 100);
    }
}
