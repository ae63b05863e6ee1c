//! Parsers turning tool outputs into runs and alignment sets.
//!
//! This module provides parsers for:
//!
//! - **Region tables** (TSV/CSV): one predicted region per line
//! - **Region JSON**: a tool name, optional sequence lengths and a list of regions
//! - **Alignment tables**: the aligner's coordinate table linking assembly
//!   contigs to reference sequences
//!
//! Gzip-compressed inputs (`.gz`) are decompressed transparently.
//!
//! ## Format detection
//!
//! [`parse_run_file`] does not trust file extensions: every region format is
//! tried in turn and the first one that parses wins. If none does, the error
//! lists why each format was rejected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgc_assess::parsing::{parse_run_file, RunOptions};
//! use std::path::Path;
//!
//! let run = parse_run_file(Path::new("sample.gecco.tsv"), &RunOptions::default()).unwrap();
//! println!("{}: {} regions", run.run_label(), run.regions.len());
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::region::{Region, RunResult};
use crate::core::types::Completeness;

pub mod alignments;
pub mod json;
pub mod regions;

/// Maximum number of regions or alignment rows accepted from a single file
pub const MAX_REGIONS: usize = 1_000_000;

/// Tool name used when neither the file nor the caller names one
pub const UNKNOWN_TOOL: &str = "unknown";

/// Suffixes stripped before deriving a file label
const COMPRESSION_SUFFIXES: [&str; 7] = [".gz", ".bz2", ".bgz", ".zst", ".xz", ".zip", ".bgzf"];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not parse {path} with any supported format ({attempts})")]
    UnrecognizedFormat { path: String, attempts: String },

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_REGIONS})")]
    TooManyRegions(usize),
}

/// Region file formats, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunFormat {
    Json,
    RegionTable,
}

impl RunFormat {
    pub const ALL: [RunFormat; 2] = [Self::Json, Self::RegionTable];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Json => "region JSON",
            Self::RegionTable => "region table",
        }
    }

    fn parse(self, text: &str) -> Result<ParsedRegions, ParseError> {
        match self {
            Self::Json => json::parse_json_text(text),
            Self::RegionTable => {
                let delimiter = if text.lines().any(|l| l.contains('\t')) {
                    '\t'
                } else {
                    ','
                };
                regions::parse_region_table_text(text, delimiter)
            }
        }
    }
}

/// Regions as read from one file, before run-level processing
#[derive(Debug, Clone, Default)]
pub struct ParsedRegions {
    /// Tool name recorded in the file, if any
    pub tool_name: Option<String>,
    pub regions: Vec<Region>,
    /// Known sequence lengths, used to derive completeness
    pub sequence_lengths: HashMap<String, i64>,
}

/// Run-level processing applied after parsing
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the label derived from the file name
    pub display_label: Option<String>,
    /// Overrides the tool name recorded in the file
    pub tool_name: Option<String>,
    /// Regions shorter than this are dropped
    pub min_region_length: i64,
    /// Edge distance under which a region is incomplete
    pub completeness_margin: i64,
}

/// Read a text file, decompressing it when the name ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut content = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_string(&mut content)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut content)?;
    }
    Ok(content)
}

/// File name without compression suffix and without one extension.
///
/// `sample.json.gz` -> `sample`, `best.sample.tsv` -> `best.sample`.
#[must_use]
pub fn file_label_from_path(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Some(stripped) = COMPRESSION_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
    {
        name = stripped.to_string();
    }

    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name,
    }
}

/// Try every region format in turn and return the first success.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` listing each format's failure.
pub fn parse_regions_text(
    text: &str,
    source: &str,
) -> Result<(RunFormat, ParsedRegions), ParseError> {
    let mut attempts = Vec::new();
    for format in RunFormat::ALL {
        match format.parse(text) {
            Ok(parsed) => return Ok((format, parsed)),
            Err(e) => {
                debug!("{source} is not {}: {e}", format.display_name());
                attempts.push(format!("{}: {e}", format.display_name()));
            }
        }
    }
    Err(ParseError::UnrecognizedFormat {
        path: source.to_string(),
        attempts: attempts.join("; "),
    })
}

/// Parse a region file of any supported format into a run
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::UnrecognizedFormat` if no format matches.
pub fn parse_run_file(path: &Path, options: &RunOptions) -> Result<RunResult, ParseError> {
    let source = path.display().to_string();
    let text = read_text(path)?;
    let (format, parsed) = parse_regions_text(&text, &source)?;

    let display_label = options
        .display_label
        .clone()
        .unwrap_or_else(|| file_label_from_path(path));
    let run = build_run(&source, display_label, parsed, options);

    info!(
        "Loaded {} regions from {} ({})",
        run.regions.len(),
        source,
        format.display_name()
    );
    Ok(run)
}

/// Apply run-level processing: tool naming, completeness and length filtering
#[must_use]
pub fn build_run(
    source_id: &str,
    display_label: String,
    parsed: ParsedRegions,
    options: &RunOptions,
) -> RunResult {
    let tool_name = options
        .tool_name
        .clone()
        .or(parsed.tool_name)
        .unwrap_or_else(|| UNKNOWN_TOOL.to_string());

    let total = parsed.regions.len();
    let regions: Vec<Region> = parsed
        .regions
        .into_iter()
        .filter(|r| r.length() >= options.min_region_length)
        .map(|mut r| {
            if r.completeness == Completeness::Unknown {
                let length = parsed.sequence_lengths.get(&r.sequence_id).copied();
                r.completeness =
                    Completeness::from_edges(r.start, r.end, length, options.completeness_margin);
            }
            r
        })
        .collect();

    if regions.len() < total {
        debug!(
            "{source_id}: dropped {} regions shorter than {} bp",
            total - regions.len(),
            options.min_region_length
        );
    }

    RunResult::new(source_id, display_label, tool_name).with_regions(regions)
}
