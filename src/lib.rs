//! Sonar Sizer - First-Opinion Storage Capacity Sizing
//!
//! Reads a YAML description of a storage deployment's requirements
//! (capacity, drive types, protection scheme, chassis layout) and computes
//! a bill-of-materials estimate: drive count, chassis count, memory, CPU,
//! NVMe WAL devices, and expected throughput.
//!
//! # Pipeline
//!
//! ```text
//! YAML document → Validator → SizingConfig → compute() → SizingOutcome → Report
//! ```
//!
//! The calculation itself is a single deterministic pass over a fixed
//! fourteen-field schema; infeasible configurations (EC profile wider than
//! the chassis count, too many co-located chassis) are surfaced through a
//! zeroed BOM chassis count rather than an abort.
//!
//! # Modules
//!
//! - [`config`] - input record, field validation, strict/lenient modes
//! - [`sizing`] - the formula sequence and its derived records
//! - [`report`] - text and JSON report rendering
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod report;
pub mod sizing;

// Re-export commonly used types
pub use config::{validate, SizingConfig, ValidationMode, ValidationReport};
pub use error::{Error, Result};
pub use sizing::{compute, BillOfMaterials, SizingOutcome, SizingResults};
