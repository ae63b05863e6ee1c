use std::collections::HashMap;

use crate::core::region::Region;
use crate::core::types::Completeness;
use crate::parsing::{ParseError, ParsedRegions, MAX_REGIONS};

/// First-column names that mark a header line
const HEADER_NAMES: [&str; 5] = ["sequence_id", "seq_id", "sequence", "contig", "chrom"];

/// Parse region table text.
///
/// Product types are separated by `;`; an empty field or `-` means none.
/// Lines starting with `#` are comments. A table consisting of a header
/// only is valid and yields no regions.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 3 fields,
/// contain invalid coordinates, or no header or regions are found, or
/// `ParseError::TooManyRegions` if the limit is exceeded.
pub fn parse_region_table_text(text: &str, delimiter: char) -> Result<ParsedRegions, ParseError> {
    let mut regions = Vec::new();
    let mut first_data_line = true;
    let mut saw_header = false;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if HEADER_NAMES.contains(&first.as_str()) {
                saw_header = true;
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let sequence_id = fields[0].to_string();
        let start = parse_coordinate(fields[1], "start", line_num)?;
        let end = parse_coordinate(fields[2], "end", line_num)?;
        if end < start {
            return Err(ParseError::InvalidFormat(format!(
                "End before start on line {line_num}: {start} > {end}"
            )));
        }

        let id = match fields.get(3) {
            Some(id) if !id.is_empty() => (*id).to_string(),
            _ => format!("{sequence_id}:{start}-{end}"),
        };

        let completeness = fields
            .get(4)
            .map_or(Completeness::Unknown, |c| Completeness::parse(c));

        let product_types: Vec<&str> = match fields.get(5) {
            Some(&"-") | None => Vec::new(),
            Some(products) => products
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect(),
        };

        if regions.len() >= MAX_REGIONS {
            return Err(ParseError::TooManyRegions(regions.len()));
        }

        regions.push(
            Region::new(id, sequence_id, start, end)
                .with_completeness(completeness)
                .with_product_types(product_types),
        );
    }

    if regions.is_empty() && !saw_header {
        return Err(ParseError::InvalidFormat(
            "No regions found in file".to_string(),
        ));
    }

    Ok(ParsedRegions {
        tool_name: None,
        regions,
        sequence_lengths: HashMap::new(),
    })
}

fn parse_coordinate(field: &str, name: &str, line_num: usize) -> Result<i64, ParseError> {
    field.parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid {name} on line {line_num}: '{field}'"))
    })
}
