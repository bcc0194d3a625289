//! Sizing Calculator Components
//!
//! - [`calculator`] - the worksheet formula sequence and domain constants
//! - [`results`] - derived results, BOM, and feasibility records

pub mod calculator;
pub mod results;

mod proptest;

pub use calculator::compute;
pub use results::{BillOfMaterials, Infeasibility, SizingOutcome, SizingResults};
