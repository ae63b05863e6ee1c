//! Compare-ref command - recovery of reference regions by assembly predictions.
//!
//! Each assembly run needs an alignment table whose file label (without any
//! `all_alignments_` prefix) equals the run's display label. Runs whose file
//! labels repeat are renamed `label (2)`, ... and need `--label` to match.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::analysis::coverage::{compute_coverage, RunCoverage};
use crate::cli::{load_run, report_running_mode, OutputFormat, RunInputArgs};
use crate::config::AnalysisConfig;
use crate::core::alignment::AlignmentSet;
use crate::core::types::{RecoveryStatus, RunningMode};
use crate::parsing::alignments::parse_alignment_file;
use crate::parsing::RunOptions;

/// Arguments for the compare-ref command
#[derive(Args)]
pub struct CompareRefArgs {
    /// Region file with predictions on the reference genome
    #[arg(long, required = true)]
    pub reference: PathBuf,

    /// Alignment coordinate tables, one per assembly run
    #[arg(long = "alignments", required = true)]
    pub alignments: Vec<PathBuf>,

    #[command(flatten)]
    pub input: RunInputArgs,

    /// Largest gap (bp) between assembly fragments that still counts as
    /// contiguous recovery (default 100)
    #[arg(long)]
    pub allowed_gap: Option<i64>,
}

/// Execute the compare-ref command
///
/// # Errors
///
/// Returns an error if inputs cannot be parsed or a run has no alignment table.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: CompareRefArgs,
    mut config: AnalysisConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    args.input.apply_overrides(&mut config);
    if let Some(gap) = args.allowed_gap {
        config.allowed_gap_for_fragmented_recovery = gap;
    }
    config.validate()?;

    let mut reference = load_run(
        &args.reference,
        &RunOptions {
            min_region_length: config.min_region_length,
            completeness_margin: config.completeness_margin,
            ..RunOptions::default()
        },
    )?;
    config.product_mapping().apply(&mut reference);

    let runs = args.input.load_runs(&config)?;
    report_running_mode(
        Some(&reference),
        &runs,
        Some(RunningMode::CompareToReference),
    );

    let alignment_sets: Vec<AlignmentSet> = args
        .alignments
        .iter()
        .map(|path| {
            parse_alignment_file(path)
                .with_context(|| format!("Failed to load alignments {}", path.display()))
        })
        .collect::<anyhow::Result<_>>()?;

    let coverage = compute_coverage(
        &runs,
        &reference,
        &alignment_sets,
        config.allowed_gap_for_fragmented_recovery,
    )
    .context(
        "Alignment tables are matched to runs by display label (the run file name, or \
         --label); repeated labels are suffixed ' (2)', ' (3)', so give such runs distinct \
         --label values",
    )?;

    match format {
        OutputFormat::Text => print_text_report(&reference.run_label(), &coverage),
        OutputFormat::Json => print_json_report(&reference.run_label(), &coverage, &config)?,
        OutputFormat::Tsv => print_tsv_report(&coverage),
    }

    Ok(())
}

fn print_text_report(reference_label: &str, coverage: &[RunCoverage]) {
    println!("Reference Recovery: {reference_label}");
    println!("{}", "=".repeat(60));

    for run in coverage {
        println!(
            "\n{} ({} reference regions)",
            run.run.run_label(),
            run.reference_regions.len()
        );
        for (status, count) in run.status_counts() {
            println!("  {:<22} {count}", format!("{status}:"));
        }

        let not_full: Vec<_> = run
            .reference_regions
            .iter()
            .filter(|r| r.status != RecoveryStatus::FullyRecovered)
            .collect();
        if !not_full.is_empty() {
            println!("  Not fully recovered:");
            for reference in not_full {
                let region = &reference.region;
                println!(
                    "    {} {}:{}-{} {} ({} assembly regions)",
                    region.id,
                    region.sequence_id,
                    region.start,
                    region.end,
                    reference.status,
                    reference.intersecting_assembly_regions.len()
                );
            }
        }
    }
}

fn print_json_report(
    reference_label: &str,
    coverage: &[RunCoverage],
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let runs: Vec<serde_json::Value> = coverage
        .iter()
        .map(|run| {
            let counts: serde_json::Map<String, serde_json::Value> = run
                .status_counts()
                .into_iter()
                .map(|(status, count)| (status.label().to_string(), count.into()))
                .collect();
            serde_json::json!({
                "run": run.run.run_label(),
                "status_counts": counts,
                "reference_regions": run.reference_regions,
            })
        })
        .collect();

    let output = serde_json::json!({
        "reference": reference_label,
        "allowed_gap": config.allowed_gap_for_fragmented_recovery,
        "runs": runs,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(coverage: &[RunCoverage]) {
    println!("run\treference_region\tsequence_id\tstart\tend\tstatus\tassembly_regions");
    for run in coverage {
        let label = run.run.run_label();
        for reference in &run.reference_regions {
            let region = &reference.region;
            let assembly_ids: Vec<&str> = reference
                .intersecting_assembly_regions
                .iter()
                .map(|i| i.assembly_region.id.as_str())
                .collect();
            println!(
                "{label}\t{}\t{}\t{}\t{}\t{}\t{}",
                region.id,
                region.sequence_id,
                region.start,
                region.end,
                reference.status.label(),
                if assembly_ids.is_empty() {
                    "-".to_string()
                } else {
                    assembly_ids.join(",")
                }
            );
        }
    }
}
