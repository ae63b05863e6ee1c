use serde::{Deserialize, Serialize};

use crate::core::region::Region;
use crate::core::types::RecoveryStatus;

/// An assembly region's footprint after projection into reference coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub assembly_region: Region,
    pub start_in_ref: i64,
    pub end_in_ref: i64,
    /// The assembly region was projected through a reverse-strand alignment
    #[serde(default)]
    pub reversed: bool,
}

impl Intersection {
    pub fn new(assembly_region: Region, start_in_ref: i64, end_in_ref: i64) -> Self {
        Self {
            assembly_region,
            start_in_ref,
            end_in_ref,
            reversed: false,
        }
    }
}

/// A reference-genome region annotated with how well an assembly recovered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRegion {
    pub region: Region,

    pub status: RecoveryStatus,

    /// Sorted by `start_in_ref`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intersecting_assembly_regions: Vec<Intersection>,
}

impl ReferenceRegion {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            status: RecoveryStatus::Missed,
            intersecting_assembly_regions: Vec::new(),
        }
    }

    /// Attach intersections, sorting them by their reference start
    #[must_use]
    pub fn with_intersections(mut self, mut intersections: Vec<Intersection>) -> Self {
        intersections.sort_by_key(|i| i.start_in_ref);
        self.intersecting_assembly_regions = intersections;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: RecoveryStatus) -> Self {
        self.status = status;
        self
    }
}
