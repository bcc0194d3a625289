//! Derived Sizing Results
//!
//! Output records of the calculator: the per-formula derived figures, the
//! procurement-facing bill of materials, and the feasibility verdict.
//! All of it is computed in one pass and immutable afterwards.

use serde::Serialize;

/// Placeholder for figures the worksheet has not defined yet
pub const NOT_IMPLEMENTED: &str = "Not Implemented";

// =============================================================================
// Infeasibility
// =============================================================================

/// A feasibility check that failed during calculation.
///
/// Infeasibility does not abort the run; every other derived figure is
/// still populated and reported. The BOM chassis count is zeroed as the
/// sentinel the caller inspects.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "check")]
pub enum Infeasibility {
    /// The EC shard width does not fit across the estimated chassis count
    NodesTooLowForEcProfile { ec_profile: u32, chassis_estimate: u64 },
    /// Co-located services cap the cluster at a maximum chassis count
    TooManyChassisForColocation { chassis_needed: u64, max: u64 },
}

impl std::fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Infeasibility::NodesTooLowForEcProfile { ec_profile, chassis_estimate } => write!(
                f,
                "number of nodes ({}) too low for EC profile ({})",
                chassis_estimate, ec_profile
            ),
            Infeasibility::TooManyChassisForColocation { chassis_needed, max } => write!(
                f,
                "number of nodes ({}) is too high for co-location (max {})",
                chassis_needed, max
            ),
        }
    }
}

// =============================================================================
// SizingResults
// =============================================================================

/// Derived sizing figures, in calculation order
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingResults {
    /// Raw capacity required, TB
    pub raw_capacity_tb: f64,
    /// Total capacity after protection overhead, TB
    pub total_capacity_tb: f64,
    /// Drive count to hold the total capacity
    pub drives_needed: u64,
    /// Chassis count before feasibility checks
    pub chassis_estimate: u64,
    /// Chassis count, zero when the EC profile cannot be laid out
    pub chassis_needed: u64,
    /// Memory overhead for co-located services, GB
    pub colo_memory_gb: u32,
    /// Minimum memory per chassis, GB
    pub minimum_memory_gb: u32,
    /// CPU thread overhead for co-located services
    pub colo_cpu_threads: u32,
    /// 2GHz CPU threads per chassis for the data path
    pub data_cpu_threads: u32,
    /// Suggested CPU model label
    pub suggested_cpu_model: &'static str,
    /// NVMe WAL/cache devices per chassis
    pub nvme_needed: u64,
    /// Minimum size of each NVMe device, GB
    pub minimum_nvme_size_gb: u64,
    /// Expected aggregate throughput, GB/s
    pub expected_perf_gbs: f64,
    /// Network card selection, not yet sized
    pub network_cards: &'static str,
}

// =============================================================================
// BillOfMaterials
// =============================================================================

/// Procurement-facing summary of the sizing result.
///
/// A chassis count of zero signals an infeasible configuration; the rest of
/// the BOM is advisory in that case.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterials {
    pub chassis_count: u64,
    pub drives_per_chassis: u32,
    pub drive_size_tb: f64,
    pub memory_per_chassis_gb: u32,
    pub cpu_model: &'static str,
    pub nvme_count: u64,
    pub nvme_size_gb: u64,
    pub os_disk: &'static str,
    pub metadata_nvme: &'static str,
    pub network_cards: &'static str,
}

// =============================================================================
// SizingOutcome
// =============================================================================

/// Everything one calculation pass produces
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingOutcome {
    pub results: SizingResults,
    pub bom: BillOfMaterials,
    /// False iff any feasibility check failed
    pub feasible: bool,
    /// The failed checks, in calculation order
    pub infeasibilities: Vec<Infeasibility>,
}

impl SizingOutcome {
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }
}
