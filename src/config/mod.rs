//! Sizing Configuration
//!
//! The validated input record consumed by the calculator: required usable
//! capacity, chassis layout, drive characteristics, and the data protection
//! scheme. Field defaults mirror the reference worksheet and are fictitious;
//! real deployments must supply every field explicitly.

pub mod validator;

use serde::{Deserialize, Serialize};

pub use validator::{validate, Field, ValidationMode, ValidationProblem, ValidationReport};

// =============================================================================
// Enums
// =============================================================================

/// Workload profile for the deployment.
///
/// Inferred from a free-text field by case-insensitive match against
/// "archive". Anything else collapses to `Mixed` - an acknowledged
/// approximation: absence of "archive" does not necessarily mean mixed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UseCase {
    #[default]
    Archive,
    Mixed,
}

impl UseCase {
    /// Parses the free-text use-case field
    pub fn from_input(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("archive") {
            UseCase::Archive
        } else {
            UseCase::Mixed
        }
    }
}

impl std::fmt::Display for UseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UseCase::Archive => write!(f, "Archive"),
            UseCase::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Primary drive technology in the storage chassis
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriveType {
    #[default]
    Hdd,
    Ssd,
}

impl DriveType {
    /// Parses the free-text drive-type field, case-insensitive match
    /// against "ssd"; anything else is treated as HDD
    pub fn from_input(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("ssd") {
            DriveType::Ssd
        } else {
            DriveType::Hdd
        }
    }

    pub fn is_ssd(self) -> bool {
        matches!(self, DriveType::Ssd)
    }
}

impl std::fmt::Display for DriveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveType::Hdd => write!(f, "HDD"),
            DriveType::Ssd => write!(f, "SSD"),
        }
    }
}

/// Data protection scheme.
///
/// Wire value 1 means erasure coding (with the `ec_data`/`ec_parity`
/// profile); any other value is carried through as an N-way replication
/// factor, 2-6 in practice, unchecked by the worksheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProtectionScheme {
    ErasureCoded,
    Replicated(u32),
}

impl ProtectionScheme {
    pub fn from_wire(value: u32) -> Self {
        if value == 1 {
            ProtectionScheme::ErasureCoded
        } else {
            ProtectionScheme::Replicated(value)
        }
    }

    pub fn is_erasure_coded(self) -> bool {
        matches!(self, ProtectionScheme::ErasureCoded)
    }
}

impl Default for ProtectionScheme {
    fn default() -> Self {
        ProtectionScheme::ErasureCoded
    }
}

impl std::fmt::Display for ProtectionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtectionScheme::ErasureCoded => write!(f, "EC"),
            ProtectionScheme::Replicated(n) => write!(f, "{}x replication", n),
        }
    }
}

// =============================================================================
// SizingConfig
// =============================================================================

/// Validated sizing input, one record per report.
///
/// Populated once from the input document, then read-only: the calculator
/// never mutates it and both are consumed in a single pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingConfig {
    /// Whether gateway/metadata/monitor roles share chassis with storage
    #[serde(default = "default_colocation")]
    pub colocation: bool,

    /// Workload profile
    #[serde(default)]
    pub use_case: UseCase,

    /// Required usable capacity in TB
    #[serde(default = "default_storage_capacity")]
    pub storage_capacity_tb: f64,

    /// Dedicated metadata capacity in TB. Parsed and reported but not yet
    /// part of any formula.
    #[serde(default)]
    pub metadata_capacity_tb: f64,

    /// Capacity of a single drive in TB
    #[serde(default = "default_drive_capacity")]
    pub drive_capacity_tb: f64,

    /// Physical drive slots per chassis
    #[serde(default = "default_drives_per_chassis")]
    pub drives_per_chassis: u32,

    /// Drive slots actually filled per chassis
    #[serde(default = "default_drives_per_chassis")]
    pub populated_slots_per_chassis: u32,

    /// NVMe slots per chassis. Parsed and reported but not yet part of any
    /// formula.
    #[serde(default = "default_nvme_slots")]
    pub nvme_slots_per_chassis: u32,

    /// Primary drive technology
    #[serde(default)]
    pub drive_type: DriveType,

    /// Target fill ratio in percent, (0, 100]
    #[serde(default = "default_max_fill")]
    pub max_fill_capacity_percent: f64,

    /// Drives served per NVMe WAL/cache device (the "1:N" ratio)
    #[serde(default = "default_nvme_ratio")]
    pub nvme_ratio: u32,

    /// Data protection scheme
    #[serde(default)]
    pub protection: ProtectionScheme,

    /// Erasure-coding data shard count, meaningful only for EC protection
    #[serde(default = "default_ec_data")]
    pub ec_data: u32,

    /// Erasure-coding parity shard count, meaningful only for EC protection
    #[serde(default = "default_ec_parity")]
    pub ec_parity: u32,
}

impl SizingConfig {
    /// Total EC shard width (data + parity)
    pub fn ec_profile(&self) -> u32 {
        self.ec_data + self.ec_parity
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            colocation: default_colocation(),
            use_case: UseCase::default(),
            storage_capacity_tb: default_storage_capacity(),
            metadata_capacity_tb: 0.0,
            drive_capacity_tb: default_drive_capacity(),
            drives_per_chassis: default_drives_per_chassis(),
            populated_slots_per_chassis: default_drives_per_chassis(),
            nvme_slots_per_chassis: default_nvme_slots(),
            drive_type: DriveType::default(),
            max_fill_capacity_percent: default_max_fill(),
            nvme_ratio: default_nvme_ratio(),
            protection: ProtectionScheme::default(),
            ec_data: default_ec_data(),
            ec_parity: default_ec_parity(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_colocation() -> bool {
    true
}

fn default_storage_capacity() -> f64 {
    2000.0
}

fn default_drive_capacity() -> f64 {
    16.0
}

fn default_drives_per_chassis() -> u32 {
    24
}

fn default_nvme_slots() -> u32 {
    6
}

fn default_max_fill() -> f64 {
    80.0
}

fn default_nvme_ratio() -> u32 {
    12
}

fn default_ec_data() -> u32 {
    8
}

fn default_ec_parity() -> u32 {
    3
}

// =============================================================================
// Tests
// =============================================================================
