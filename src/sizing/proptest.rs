//! Property-Based Tests for the Sizing Calculator
//!
//! Uses proptest to verify the formula invariants across the whole input
//! space rather than hand-picked worksheets.
//!
//! # Test Properties
//!
//! 1. **Determinism**: same config always produces the same outcome
//! 2. **Raw capacity**: exactly storage / (fill * 100) for every config
//! 3. **Feasibility sentinel**: infeasible iff BOM chassis count is zero
//! 4. **Throughput factor**: tracks the drive type, divisor fixed at 1000

#![cfg(test)]

use proptest::prelude::*;

use super::calculator::{
    compute, CPU_MODEL_HIGH, CPU_MODEL_LOW, HDD_THROUGHPUT_FACTOR, MAX_COLOCATED_CHASSIS,
    SSD_THROUGHPUT_FACTOR,
};
use crate::config::{DriveType, ProtectionScheme, SizingConfig, UseCase};

// =============================================================================
// Strategies
// =============================================================================

fn drive_type_strategy() -> impl Strategy<Value = DriveType> {
    prop_oneof![Just(DriveType::Hdd), Just(DriveType::Ssd)]
}

fn protection_strategy() -> impl Strategy<Value = ProtectionScheme> {
    (1u32..=6).prop_map(ProtectionScheme::from_wire)
}

/// Configurations drawn from realistic deployment ranges
fn config_strategy() -> impl Strategy<Value = SizingConfig> {
    let capacity = (
        any::<bool>(),
        prop_oneof![Just(UseCase::Archive), Just(UseCase::Mixed)],
        1.0f64..1e7,
        1.0f64..32.0,
        1.0f64..=100.0,
    );
    let layout = (
        1u32..=90,
        1u32..=90,
        drive_type_strategy(),
        1u32..=24,
        protection_strategy(),
        2u32..=16,
        1u32..=6,
    );
    (capacity, layout).prop_map(
        |(
            (colocation, use_case, storage_capacity_tb, drive_capacity_tb, max_fill_capacity_percent),
            (
                drives_per_chassis,
                populated_slots_per_chassis,
                drive_type,
                nvme_ratio,
                protection,
                ec_data,
                ec_parity,
            ),
        )| SizingConfig {
            colocation,
            use_case,
            storage_capacity_tb,
            metadata_capacity_tb: 0.0,
            drive_capacity_tb,
            drives_per_chassis,
            populated_slots_per_chassis,
            nvme_slots_per_chassis: 6,
            drive_type,
            max_fill_capacity_percent,
            nvme_ratio,
            protection,
            ec_data,
            ec_parity,
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_compute_is_deterministic(config in config_strategy()) {
        prop_assert_eq!(compute(&config), compute(&config));
    }

    #[test]
    fn prop_raw_capacity_formula_is_exact(config in config_strategy()) {
        let outcome = compute(&config);
        prop_assert_eq!(
            outcome.results.raw_capacity_tb,
            config.storage_capacity_tb / (config.max_fill_capacity_percent * 100.0)
        );
    }

    #[test]
    fn prop_infeasible_iff_bom_chassis_zero(config in config_strategy()) {
        let outcome = compute(&config);
        prop_assert_eq!(outcome.feasible, outcome.infeasibilities.is_empty());
        if !outcome.feasible {
            prop_assert_eq!(outcome.bom.chassis_count, 0);
        } else {
            prop_assert_eq!(outcome.bom.chassis_count, outcome.results.chassis_needed);
        }
    }

    #[test]
    fn prop_ec_layout_check_only_applies_to_ec(config in config_strategy()) {
        let outcome = compute(&config);
        match config.protection {
            ProtectionScheme::ErasureCoded => {
                let too_narrow =
                    u64::from(config.ec_data + config.ec_parity) >= outcome.results.chassis_estimate;
                prop_assert_eq!(outcome.results.chassis_needed == 0, too_narrow);
            }
            ProtectionScheme::Replicated(_) => {
                prop_assert_eq!(
                    outcome.results.chassis_needed,
                    outcome.results.chassis_estimate
                );
            }
        }
    }

    #[test]
    fn prop_colocation_cap(config in config_strategy()) {
        let outcome = compute(&config);
        if config.colocation && outcome.results.chassis_needed > MAX_COLOCATED_CHASSIS {
            prop_assert!(!outcome.feasible);
            prop_assert_eq!(outcome.bom.chassis_count, 0);
        }
    }

    #[test]
    fn prop_throughput_factor_tracks_drive_type(config in config_strategy()) {
        let outcome = compute(&config);
        let factor = match config.drive_type {
            DriveType::Ssd => SSD_THROUGHPUT_FACTOR,
            DriveType::Hdd => HDD_THROUGHPUT_FACTOR,
        };
        prop_assert_eq!(
            outcome.results.expected_perf_gbs,
            outcome.results.drives_needed as f64 * factor / 1000.0
        );
    }

    #[test]
    fn prop_cpu_model_threshold(config in config_strategy()) {
        let outcome = compute(&config);
        let threads = outcome.results.colo_cpu_threads + outcome.results.data_cpu_threads;
        let expected = if threads < 32 { CPU_MODEL_LOW } else { CPU_MODEL_HIGH };
        prop_assert_eq!(outcome.results.suggested_cpu_model, expected);
    }

    #[test]
    fn prop_nvme_size_covers_wal_budget(config in config_strategy()) {
        let outcome = compute(&config);
        // Devices together must cover 300 GB per drive
        prop_assert!(
            outcome.results.nvme_needed * outcome.results.minimum_nvme_size_gb
                >= u64::from(config.drives_per_chassis) * 300
        );
    }
}
