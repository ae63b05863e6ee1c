use serde::Deserialize;
use std::collections::HashMap;

use crate::core::region::Region;
use crate::parsing::{ParseError, ParsedRegions, MAX_REGIONS};

/// Serialized region file
#[derive(Debug, Deserialize)]
struct RegionFile {
    #[serde(default)]
    tool: Option<String>,

    #[serde(default)]
    sequence_lengths: HashMap<String, i64>,

    regions: Vec<Region>,
}

/// Parse region JSON:
///
/// ```json
/// {
///   "tool": "antismash",
///   "sequence_lengths": {"NZ_CP1": 8000000},
///   "regions": [
///     {"id": "r1", "sequence_id": "NZ_CP1", "start": 1000, "end": 25000,
///      "completeness": "Complete", "product_types": ["NRPS"]}
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, `ParseError::InvalidFormat`
/// for a region ending before it starts, or `ParseError::TooManyRegions`.
pub fn parse_json_text(text: &str) -> Result<ParsedRegions, ParseError> {
    let file: RegionFile = serde_json::from_str(text)?;

    if file.regions.len() > MAX_REGIONS {
        return Err(ParseError::TooManyRegions(file.regions.len()));
    }
    if let Some(bad) = file.regions.iter().find(|r| r.end < r.start) {
        return Err(ParseError::InvalidFormat(format!(
            "Region '{}' ends before it starts ({} > {})",
            bad.id, bad.start, bad.end
        )));
    }

    Ok(ParsedRegions {
        tool_name: file.tool,
        regions: file.regions,
        sequence_lengths: file.sequence_lengths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Completeness;

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "tool": "antismash",
            "sequence_lengths": {"NZ_CP1": 8000000},
            "regions": [
                {"id": "r1", "sequence_id": "NZ_CP1", "start": 1000, "end": 25000,
                 "completeness": "Complete", "product_types": ["NRPS"],
                 "metadata": {"score": 0.97}},
                {"id": "r2", "sequence_id": "NZ_CP1", "start": 30000, "end": 41000}
            ]
        }"#;
        let parsed = parse_json_text(json).unwrap();
        assert_eq!(parsed.tool_name.as_deref(), Some("antismash"));
        assert_eq!(parsed.sequence_lengths["NZ_CP1"], 8_000_000);
        assert_eq!(parsed.regions.len(), 2);
        assert_eq!(parsed.regions[0].completeness, Completeness::Complete);
        assert_eq!(parsed.regions[0].metadata["score"], serde_json::json!(0.97));
        assert_eq!(parsed.regions[1].completeness, Completeness::Unknown);
    }

    #[test]
    fn test_missing_regions_key() {
        assert!(matches!(
            parse_json_text(r#"{"tool": "gecco"}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_inverted_region_rejected() {
        let json = r#"{"regions": [{"id": "x", "sequence_id": "c", "start": 10, "end": 5}]}"#;
        assert!(matches!(
            parse_json_text(json),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_repeated_product_types_collapse() {
        let json = r#"{"regions": [
            {"id": "x", "sequence_id": "c", "start": 1, "end": 50,
             "product_types": ["NRPS", "NRPS"]},
            {"id": "y", "sequence_id": "c", "start": 60, "end": 90,
             "product_types": ["terpene", "NRPS", "terpene"]}
        ]}"#;
        let parsed = parse_json_text(json).unwrap();
        assert_eq!(parsed.regions[0].product_types, vec!["NRPS"]);
        assert_eq!(parsed.regions[0].product_group(), "NRPS");
        assert_eq!(parsed.regions[1].product_types, vec!["terpene", "NRPS"]);
        assert_eq!(parsed.regions[1].product_group(), "Hybrid");
    }
}
