//! Compare-tools command - regions found by one tool only versus shared ones.

use clap::Args;

use crate::analysis::uniqueness::{compute_uniqueness, UniquenessReport};
use crate::cli::{report_running_mode, OutputFormat, RunInputArgs};
use crate::config::AnalysisConfig;
use crate::core::types::RunningMode;

/// Arguments for the compare-tools command
#[derive(Args)]
pub struct CompareToolsArgs {
    #[command(flatten)]
    pub input: RunInputArgs,

    /// Minimum fraction of a region that must be covered by another tool's
    /// region for the two to be considered the same (0-1, default 0.9)
    #[arg(long)]
    pub overlap_threshold: Option<f64>,
}

/// Execute the compare-tools command
///
/// # Errors
///
/// Returns an error if inputs cannot be parsed or the threshold is invalid.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: CompareToolsArgs,
    mut config: AnalysisConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    args.input.apply_overrides(&mut config);
    if let Some(threshold) = args.overlap_threshold {
        config.overlap_threshold = threshold;
    }
    config.validate()?;

    let runs = args.input.load_runs(&config)?;
    report_running_mode(None, &runs, Some(RunningMode::CompareTools));

    let report = compute_uniqueness(&runs, config.overlap_threshold)?;

    match format {
        OutputFormat::Text => print_text_report(&report, config.overlap_threshold),
        OutputFormat::Json => print_json_report(&report, config.overlap_threshold)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &UniquenessReport, threshold: f64) {
    println!("Tool Comparison (overlap threshold {:.0}%)", threshold * 100.0);
    println!("{}", "=".repeat(60));

    for (label, totals) in &report.aggregate.totals_by_run {
        println!(
            "\n{label}\n  {} regions: {} unique, {} shared with another tool",
            totals.total, totals.unique, totals.non_unique
        );

        if let Some(row) = report.aggregate.pairwise_by_run.get(label) {
            for (other, counts) in row {
                println!(
                    "  vs {other}: {} not found, {} found",
                    counts.unique, counts.non_unique
                );
            }
        }
    }

    let unique_regions: Vec<_> = report
        .per_run
        .iter()
        .flat_map(|run| run.unique.iter().map(move |r| (&run.run_label, r)))
        .collect();
    if !unique_regions.is_empty() {
        println!("\nUnique regions:");
        for (label, region) in unique_regions {
            println!(
                "  {label}\t{}\t{}:{}-{}\t{}",
                region.id,
                region.sequence_id,
                region.start,
                region.end,
                region.product_group()
            );
        }
    }
}

fn print_json_report(report: &UniquenessReport, threshold: f64) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "overlap_threshold": threshold,
        "totals": report.aggregate.totals_by_run,
        "pairwise": report.aggregate.pairwise_by_run,
        "runs": report.per_run,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(report: &UniquenessReport) {
    println!("run\tcompared_to\tunique\tnon_unique\ttotal");
    for (label, totals) in &report.aggregate.totals_by_run {
        println!(
            "{label}\tall\t{}\t{}\t{}",
            totals.unique, totals.non_unique, totals.total
        );
        if let Some(row) = report.aggregate.pairwise_by_run.get(label) {
            for (other, counts) in row {
                println!(
                    "{label}\t{other}\t{}\t{}\t{}",
                    counts.unique,
                    counts.non_unique,
                    counts.unique + counts.non_unique
                );
            }
        }
    }
}
