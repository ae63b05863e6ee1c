//! Core data types for BGC assessment.
//!
//! This module provides the value objects shared by the analysis engines:
//!
//! - [`region::Region`]: A predicted or reference genomic interval (a BGC)
//! - [`region::RunResult`]: The regions produced by one run of one mining tool
//! - [`alignment::AlignmentRecord`], [`alignment::AlignmentSet`]: Assembly-to-reference
//!   alignment blocks
//! - [`reference::ReferenceRegion`], [`reference::Intersection`]: Reference regions annotated with
//!   their projected assembly counterparts
//! - [`types::Completeness`], [`types::RecoveryStatus`], [`types::RunningMode`]:
//!   Classification types
//!
//! ## Coordinates
//!
//! | Type | Convention |
//! |------|------------|
//! | Region | `start..end`, `length = end - start` |
//! | AlignmentRecord | inclusive on both sides, assembly side may be descending |
//! | Intersection | reference-space, inclusive |
//!
//! All entities are constructed once from parsed input and never mutated by
//! the engines.

pub mod alignment;
pub mod reference;
pub mod region;
pub mod types;
