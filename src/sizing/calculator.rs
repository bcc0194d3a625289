//! Sizing Calculator
//!
//! Maps a validated [`SizingConfig`] to derived sizing figures and a bill
//! of materials through a fixed sequence of worksheet formulas. Ordering
//! matters: later formulas consume earlier results.
//!
//! The calculation is a deterministic pure function of its input, aside
//! from logging a diagnostic for each failed feasibility check.

use tracing::error;

use crate::config::{ProtectionScheme, SizingConfig};
use crate::sizing::results::{
    BillOfMaterials, Infeasibility, SizingOutcome, SizingResults, NOT_IMPLEMENTED,
};

// =============================================================================
// Domain Constants
// =============================================================================
// Fixed engineering parameters from the reference architecture. These are
// deliberately not configurable.

/// Memory overhead when gateway/MDS/MON roles share the chassis, GB
pub const COLO_MEMORY_GB: u32 = 32;
/// Memory budget per drive, GB
pub const MEMORY_PER_DRIVE_GB: u32 = 5;
/// Memory baseline on top of the per-drive budget, GB
pub const MEMORY_BASELINE_GB: u32 = 16;
/// CPU thread overhead for co-located services
pub const COLO_CPU_THREADS: u32 = 8;
/// Co-located clusters are capped at this chassis count
pub const MAX_COLOCATED_CHASSIS: u64 = 15;
/// SSDs need twice the CPU threads of spinning drives
pub const SSD_THREAD_MULTIPLIER: u32 = 2;
/// Below this thread count the lower-power CPU model suffices
pub const MIN_THREAD_THRESHOLD: u32 = 32;
/// Lower-power CPU model label
pub const CPU_MODEL_LOW: &str = "Xeon 4215r";
/// Higher-power CPU model label
pub const CPU_MODEL_HIGH: &str = "Xeon 6248r";
/// WAL sizing factor, GB of NVMe per drive served
pub const NVME_GB_PER_DRIVE: u64 = 300;
/// Throughput factor for SSD drives, drive-units to GB/s scaling
pub const SSD_THROUGHPUT_FACTOR: f64 = 120.0;
/// Throughput factor for HDD drives
pub const HDD_THROUGHPUT_FACTOR: f64 = 35.0;
/// Throughput normalization divisor
pub const GBS_DIVISOR: f64 = 1000.0;

// =============================================================================
// compute
// =============================================================================

/// Runs the full formula sequence over one configuration.
///
/// Infeasible configurations do not abort: every derived figure is still
/// populated, the failed checks are logged and collected, and the BOM
/// chassis count is zeroed as the sentinel.
pub fn compute(config: &SizingConfig) -> SizingOutcome {
    let mut infeasibilities = Vec::new();

    // Raw capacity comes first; total capacity depends on it. The double
    // percentage scale (percent * 100) is how the worksheet defines the
    // fill target and is kept as-is.
    let raw_capacity_tb =
        config.storage_capacity_tb / (config.max_fill_capacity_percent * 100.0);

    let total_capacity_tb = match config.protection {
        ProtectionScheme::ErasureCoded => {
            (raw_capacity_tb / f64::from(config.ec_data)) * f64::from(config.ec_profile())
        }
        ProtectionScheme::Replicated(factor) => raw_capacity_tb * f64::from(factor),
    };

    let drives_needed = (total_capacity_tb / config.drive_capacity_tb).ceil() as u64;

    let chassis_estimate = drives_needed.div_ceil(u64::from(config.populated_slots_per_chassis));

    // An EC stripe spans ec_data + ec_parity chassis; the estimate must
    // exceed that width or the profile cannot be laid out.
    let chassis_needed = if config.protection.is_erasure_coded()
        && u64::from(config.ec_profile()) >= chassis_estimate
    {
        let failure = Infeasibility::NodesTooLowForEcProfile {
            ec_profile: config.ec_profile(),
            chassis_estimate,
        };
        error!("{}", failure);
        infeasibilities.push(failure);
        0
    } else {
        chassis_estimate
    };

    let colo_memory_gb = if config.colocation { COLO_MEMORY_GB } else { 0 };

    let minimum_memory_gb =
        config.drives_per_chassis * MEMORY_PER_DRIVE_GB + MEMORY_BASELINE_GB + colo_memory_gb;

    let colo_cpu_threads = if config.colocation { COLO_CPU_THREADS } else { 0 };

    let data_cpu_threads = if config.drive_type.is_ssd() {
        config.drives_per_chassis * SSD_THREAD_MULTIPLIER
    } else {
        config.drives_per_chassis
    };

    let suggested_cpu_model = if colo_cpu_threads + data_cpu_threads < MIN_THREAD_THRESHOLD {
        CPU_MODEL_LOW
    } else {
        CPU_MODEL_HIGH
    };

    let nvme_needed =
        u64::from(config.drives_per_chassis).div_ceil(u64::from(config.nvme_ratio));

    let minimum_nvme_size_gb =
        (u64::from(config.drives_per_chassis) * NVME_GB_PER_DRIVE).div_ceil(nvme_needed);

    let throughput_factor = if config.drive_type.is_ssd() {
        SSD_THROUGHPUT_FACTOR
    } else {
        HDD_THROUGHPUT_FACTOR
    };
    let expected_perf_gbs = (drives_needed as f64 * throughput_factor) / GBS_DIVISOR;

    let results = SizingResults {
        raw_capacity_tb,
        total_capacity_tb,
        drives_needed,
        chassis_estimate,
        chassis_needed,
        colo_memory_gb,
        minimum_memory_gb,
        colo_cpu_threads,
        data_cpu_threads,
        suggested_cpu_model,
        nvme_needed,
        minimum_nvme_size_gb,
        expected_perf_gbs,
        network_cards: NOT_IMPLEMENTED,
    };

    // BOM feasibility: co-located services cap the cluster size. Checked
    // independently of the EC result above.
    let bom_chassis_count = if config.colocation && chassis_needed > MAX_COLOCATED_CHASSIS {
        let failure = Infeasibility::TooManyChassisForColocation {
            chassis_needed,
            max: MAX_COLOCATED_CHASSIS,
        };
        error!("{}", failure);
        infeasibilities.push(failure);
        0
    } else {
        chassis_needed
    };

    let bom = BillOfMaterials {
        chassis_count: bom_chassis_count,
        drives_per_chassis: config.drives_per_chassis,
        drive_size_tb: config.drive_capacity_tb,
        memory_per_chassis_gb: minimum_memory_gb,
        cpu_model: suggested_cpu_model,
        nvme_count: nvme_needed,
        nvme_size_gb: minimum_nvme_size_gb,
        os_disk: NOT_IMPLEMENTED,
        metadata_nvme: NOT_IMPLEMENTED,
        network_cards: NOT_IMPLEMENTED,
    };

    let feasible = infeasibilities.is_empty();

    SizingOutcome { results, bom, feasible, infeasibilities }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DriveType, UseCase};
    use assert_matches::assert_matches;

    /// The worksheet's reference inputs: 2000 TB usable, EC 8+3, 16 TB
    /// drives, 24 populated slots, 80% fill.
    fn reference_config() -> SizingConfig {
        SizingConfig::default()
    }

    /// A larger deployment that passes the EC layout check
    fn large_ec_config() -> SizingConfig {
        SizingConfig {
            storage_capacity_tb: 2_000_000.0,
            ..SizingConfig::default()
        }
    }

    // =========================================================================
    // Formula Tests
    // =========================================================================

    #[test]
    fn test_raw_capacity_formula() {
        let outcome = compute(&reference_config());
        // 2000 / (80 * 100), exactly
        assert_eq!(outcome.results.raw_capacity_tb, 0.25);
    }

    #[test]
    fn test_ec_total_capacity() {
        let outcome = compute(&reference_config());
        // (0.25 / 8) * 11
        assert_eq!(outcome.results.total_capacity_tb, 0.34375);
    }

    #[test]
    fn test_replicated_total_capacity() {
        let config = SizingConfig {
            protection: ProtectionScheme::Replicated(3),
            ..reference_config()
        };
        let outcome = compute(&config);
        assert_eq!(outcome.results.total_capacity_tb, 0.75);
    }

    #[test]
    fn test_reference_drive_and_chassis_counts() {
        let outcome = compute(&reference_config());
        assert_eq!(outcome.results.drives_needed, 1);
        assert_eq!(outcome.results.chassis_estimate, 1);
    }

    #[test]
    fn test_ec_profile_too_wide_for_chassis_is_infeasible() {
        // One estimated chassis cannot host an 11-wide EC stripe
        let outcome = compute(&reference_config());
        assert!(!outcome.feasible);
        assert_eq!(outcome.results.chassis_needed, 0);
        assert_eq!(outcome.bom.chassis_count, 0);
        assert_matches!(
            outcome.infeasibilities[0],
            Infeasibility::NodesTooLowForEcProfile { ec_profile: 11, chassis_estimate: 1 }
        );
    }

    #[test]
    fn test_ec_profile_narrower_than_estimate_is_feasible() {
        // 2M TB: raw 250, total (250/8)*11 = 343.75, drives 22; one drive
        // per chassis gives an estimate of 22, wider than the 11-shard
        // profile
        let config = SizingConfig {
            populated_slots_per_chassis: 1,
            colocation: false,
            ..large_ec_config()
        };
        let outcome = compute(&config);
        assert_eq!(outcome.results.chassis_estimate, 22);
        assert!(outcome.feasible);
        assert_eq!(outcome.results.chassis_needed, 22);
        assert_eq!(outcome.bom.chassis_count, 22);
    }

    #[test]
    fn test_replication_skips_ec_check() {
        // Same narrow chassis estimate, but replicated protection never
        // trips the EC layout check
        let config = SizingConfig {
            protection: ProtectionScheme::Replicated(2),
            colocation: false,
            ..reference_config()
        };
        let outcome = compute(&config);
        assert!(outcome.feasible);
        assert_eq!(outcome.results.chassis_needed, outcome.results.chassis_estimate);
    }

    // =========================================================================
    // Memory / CPU Tests
    // =========================================================================

    #[test]
    fn test_memory_with_colocation() {
        let outcome = compute(&reference_config());
        assert_eq!(outcome.results.colo_memory_gb, 32);
        // 24 * 5 + 16 + 32
        assert_eq!(outcome.results.minimum_memory_gb, 168);
        assert_eq!(outcome.bom.memory_per_chassis_gb, 168);
    }

    #[test]
    fn test_memory_without_colocation() {
        let config = SizingConfig { colocation: false, ..reference_config() };
        let outcome = compute(&config);
        assert_eq!(outcome.results.colo_memory_gb, 0);
        assert_eq!(outcome.results.minimum_memory_gb, 136);
    }

    #[test]
    fn test_ssd_doubles_data_threads() {
        let hdd = compute(&reference_config());
        let config = SizingConfig { drive_type: DriveType::Ssd, ..reference_config() };
        let ssd = compute(&config);
        assert_eq!(hdd.results.data_cpu_threads, 24);
        assert_eq!(ssd.results.data_cpu_threads, 48);
    }

    #[test]
    fn test_cpu_model_switches_exactly_at_threshold() {
        // colocation off: total threads == drives_per_chassis (HDD)
        let low = SizingConfig {
            colocation: false,
            drives_per_chassis: 31,
            ..reference_config()
        };
        assert_eq!(compute(&low).results.suggested_cpu_model, CPU_MODEL_LOW);

        let high = SizingConfig {
            colocation: false,
            drives_per_chassis: 32,
            ..reference_config()
        };
        assert_eq!(compute(&high).results.suggested_cpu_model, CPU_MODEL_HIGH);
    }

    #[test]
    fn test_colo_threads_count_toward_cpu_choice() {
        // 8 colo threads + 24 data threads = 32, exactly the threshold
        let outcome = compute(&reference_config());
        assert_eq!(outcome.results.colo_cpu_threads, 8);
        assert_eq!(outcome.results.suggested_cpu_model, CPU_MODEL_HIGH);
        assert_eq!(outcome.bom.cpu_model, CPU_MODEL_HIGH);
    }

    // =========================================================================
    // NVMe / Throughput Tests
    // =========================================================================

    #[test]
    fn test_nvme_device_count_and_size() {
        let outcome = compute(&reference_config());
        // ceil(24 / 12) = 2 devices; ceil(24 * 300 / 2) = 3600 GB each
        assert_eq!(outcome.results.nvme_needed, 2);
        assert_eq!(outcome.results.minimum_nvme_size_gb, 3600);
        assert_eq!(outcome.bom.nvme_count, 2);
        assert_eq!(outcome.bom.nvme_size_gb, 3600);
    }

    #[test]
    fn test_nvme_count_rounds_up() {
        let config = SizingConfig { nvme_ratio: 10, ..reference_config() };
        let outcome = compute(&config);
        // ceil(24 / 10) = 3
        assert_eq!(outcome.results.nvme_needed, 3);
        assert_eq!(outcome.results.minimum_nvme_size_gb, 2400);
    }

    #[test]
    fn test_throughput_factor_tracks_drive_type() {
        let hdd = compute(&reference_config());
        assert_eq!(hdd.results.expected_perf_gbs, 1.0 * 35.0 / 1000.0);

        let config = SizingConfig { drive_type: DriveType::Ssd, ..reference_config() };
        let ssd = compute(&config);
        assert_eq!(ssd.results.expected_perf_gbs, 1.0 * 120.0 / 1000.0);
    }

    // =========================================================================
    // BOM Feasibility Tests
    // =========================================================================

    #[test]
    fn test_colocation_chassis_cap() {
        // Drive the chassis count past 15 with colocation on
        let config = SizingConfig {
            storage_capacity_tb: 40_000_000.0,
            populated_slots_per_chassis: 24,
            ..reference_config()
        };
        let outcome = compute(&config);
        // raw 5000, total 6875, drives 430, chassis 18 > 15
        assert_eq!(outcome.results.chassis_needed, 18);
        assert!(!outcome.feasible);
        assert_eq!(outcome.bom.chassis_count, 0);
        assert_matches!(
            outcome.infeasibilities[0],
            Infeasibility::TooManyChassisForColocation { chassis_needed: 18, max: 15 }
        );
    }

    #[test]
    fn test_no_colocation_lifts_chassis_cap() {
        let config = SizingConfig {
            storage_capacity_tb: 40_000_000.0,
            colocation: false,
            ..reference_config()
        };
        let outcome = compute(&config);
        assert_eq!(outcome.results.chassis_needed, 18);
        assert!(outcome.feasible);
        assert_eq!(outcome.bom.chassis_count, 18);
    }

    #[test]
    fn test_bom_echoes_input_figures() {
        let outcome = compute(&reference_config());
        assert_eq!(outcome.bom.drives_per_chassis, 24);
        assert_eq!(outcome.bom.drive_size_tb, 16.0);
        assert_eq!(outcome.bom.os_disk, NOT_IMPLEMENTED);
        assert_eq!(outcome.bom.metadata_nvme, NOT_IMPLEMENTED);
        assert_eq!(outcome.bom.network_cards, NOT_IMPLEMENTED);
    }

    #[test]
    fn test_use_case_does_not_change_figures() {
        // Parsed and reported, but no formula consumes it yet
        let archive = compute(&reference_config());
        let config = SizingConfig { use_case: UseCase::Mixed, ..reference_config() };
        let mixed = compute(&config);
        assert_eq!(archive, mixed);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let config = reference_config();
        assert_eq!(compute(&config), compute(&config));
    }
}
