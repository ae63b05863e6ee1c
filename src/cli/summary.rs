//! Summary command - basic statistics for each run.

use clap::Args;

use crate::analysis::metrics::{basic_metrics, group_rows, Metric, RunMetrics};
use crate::cli::{report_running_mode, OutputFormat, RunInputArgs};
use crate::config::AnalysisConfig;

/// Arguments for the summary command
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: RunInputArgs,
}

/// Execute the summary command
///
/// # Errors
///
/// Returns an error if inputs cannot be parsed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: SummaryArgs,
    mut config: AnalysisConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    args.input.apply_overrides(&mut config);
    config.validate()?;

    let runs = args.input.load_runs(&config)?;
    report_running_mode(None, &runs, None);

    let metrics: Vec<RunMetrics> = runs.iter().map(basic_metrics).collect();

    match format {
        OutputFormat::Text => print_text_summary(&metrics),
        OutputFormat::Json => print_json_summary(&metrics)?,
        OutputFormat::Tsv => print_tsv_summary(&metrics),
    }

    Ok(())
}

fn group_label(values: &[String]) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values.join(" / ")
    }
}

fn print_text_summary(metrics: &[RunMetrics]) {
    println!("BGC Summary");
    println!("{}", "=".repeat(60));

    for run in metrics {
        println!("\n{}", run.run_label);
        for (name, _, table) in run.tables() {
            println!("  {name}:");
            if table.is_empty() {
                println!("    (no regions)");
            }
            for (values, row) in table {
                println!(
                    "    {:<32} {:>6.0} regions, mean length {:.1} bp",
                    group_label(values),
                    row.get(&Metric::TotalCount).copied().unwrap_or_default(),
                    row.get(&Metric::MeanLength).copied().unwrap_or_default(),
                );
            }
        }
    }
}

fn print_json_summary(metrics: &[RunMetrics]) -> anyhow::Result<()> {
    let runs: Vec<serde_json::Value> = metrics
        .iter()
        .map(|run| -> Result<serde_json::Value, serde_json::Error> {
            let mut tables = serde_json::Map::new();
            for (name, keys, table) in run.tables() {
                tables.insert(name.to_string(), serde_json::to_value(group_rows(keys, table))?);
            }
            Ok(serde_json::json!({
                "run": run.run_label,
                "metrics": tables,
            }))
        })
        .collect::<Result<_, _>>()?;

    let output = serde_json::json!({ "runs": runs });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(metrics: &[RunMetrics]) {
    let metric_names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
    println!("run\tgrouping\tgroup\t{}", metric_names.join("\t"));

    for run in metrics {
        for (name, _, table) in run.tables() {
            for (values, row) in table {
                let cells: Vec<String> = Metric::ALL
                    .iter()
                    .map(|m| format!("{:.4}", row.get(m).copied().unwrap_or_default()))
                    .collect();
                println!(
                    "{}\t{}\t{}\t{}",
                    run.run_label,
                    name,
                    group_label(values),
                    cells.join("\t")
                );
            }
        }
    }
}
