//! Input Validation
//!
//! Maps the raw key/value input document onto a [`SizingConfig`] by
//! case-insensitive lookup against the fourteen recognized field names.
//! The per-field dispatch is a static [`Field`] table rather than dynamic
//! method lookup.
//!
//! Historically validation problems were recorded but never blocked the
//! calculation; [`ValidationMode::Lenient`] preserves that behavior and
//! [`ValidationMode::Strict`] turns problems into a hard error.

use serde_yaml::Value;
use tracing::{error, info};

use crate::config::{DriveType, ProtectionScheme, SizingConfig, UseCase};
use crate::error::{Error, Result};

// =============================================================================
// Field Table
// =============================================================================

/// One recognized input field, tagged with its coercion rule.
///
/// The wire names are the lowercase forms matched against incoming keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Colocation,
    UseCase,
    StorageCapacity,
    MetadataCapacity,
    DriveCapacity,
    DrivesPerChassis,
    PopulatedSlotsPerChassis,
    NvmeSlotsPerChassis,
    DriveType,
    MaxFillCapacity,
    NvmeRatio,
    ProtectionType,
    EcProfileData,
    EcProfileParity,
}

impl Field {
    /// Resolves an input key, case-insensitively
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key.to_ascii_lowercase().as_str() {
            "colocation" => Field::Colocation,
            "usecase" => Field::UseCase,
            "storagecapacity" => Field::StorageCapacity,
            "metadatacapacity" => Field::MetadataCapacity,
            "drivecapacity" => Field::DriveCapacity,
            "drivesperchassis" => Field::DrivesPerChassis,
            "populatedslotsperchassis" => Field::PopulatedSlotsPerChassis,
            "nvmeslotsperchassis" => Field::NvmeSlotsPerChassis,
            "drivetype" => Field::DriveType,
            "maxfillcapacity" => Field::MaxFillCapacity,
            "nvmeratio" => Field::NvmeRatio,
            "protectiontype" => Field::ProtectionType,
            "ecprofiledata" => Field::EcProfileData,
            "ecprofileparity" => Field::EcProfileParity,
            _ => return None,
        };
        Some(field)
    }

    /// Canonical wire name of the field
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Colocation => "colocation",
            Field::UseCase => "useCase",
            Field::StorageCapacity => "storageCapacity",
            Field::MetadataCapacity => "metaDataCapacity",
            Field::DriveCapacity => "driveCapacity",
            Field::DrivesPerChassis => "drivesPerChassis",
            Field::PopulatedSlotsPerChassis => "populatedSlotsPerChassis",
            Field::NvmeSlotsPerChassis => "nvmeSlotsPerChassis",
            Field::DriveType => "driveType",
            Field::MaxFillCapacity => "maxFillCapacity",
            Field::NvmeRatio => "nvmeRatio",
            Field::ProtectionType => "protectionType",
            Field::EcProfileData => "ecProfileData",
            Field::EcProfileParity => "ecProfileParity",
        }
    }

    /// Coerces and stores one raw value into the config.
    ///
    /// Returns a human-readable reason when the value cannot be understood.
    pub fn apply(self, config: &mut SizingConfig, value: &Value) -> std::result::Result<(), String> {
        match self {
            Field::Colocation => {
                config.colocation = as_bool(value)?;
            }
            Field::UseCase => {
                config.use_case = UseCase::from_input(as_str(value)?);
            }
            Field::StorageCapacity => {
                config.storage_capacity_tb = as_f64(value)?;
            }
            Field::MetadataCapacity => {
                config.metadata_capacity_tb = as_f64(value)?;
            }
            Field::DriveCapacity => {
                config.drive_capacity_tb = as_f64(value)?;
            }
            Field::DrivesPerChassis => {
                config.drives_per_chassis = as_u32(value)?;
            }
            Field::PopulatedSlotsPerChassis => {
                config.populated_slots_per_chassis = as_u32(value)?;
            }
            Field::NvmeSlotsPerChassis => {
                config.nvme_slots_per_chassis = as_u32(value)?;
            }
            Field::DriveType => {
                config.drive_type = DriveType::from_input(as_str(value)?);
            }
            Field::MaxFillCapacity => {
                config.max_fill_capacity_percent = as_f64(value)?;
            }
            Field::NvmeRatio => {
                config.nvme_ratio = as_u32(value)?;
            }
            Field::ProtectionType => {
                config.protection = ProtectionScheme::from_wire(as_u32(value)?);
            }
            Field::EcProfileData => {
                config.ec_data = as_u32(value)?;
            }
            Field::EcProfileParity => {
                config.ec_parity = as_u32(value)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Value Coercions
// =============================================================================

fn as_bool(value: &Value) -> std::result::Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean, got {}", value_kind(value)))
}

fn as_str(value: &Value) -> std::result::Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, got {}", value_kind(value)))
}

fn as_f64(value: &Value) -> std::result::Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected a number, got {}", value_kind(value)))
}

fn as_u32(value: &Value) -> std::result::Result<u32, String> {
    let n = value
        .as_u64()
        .ok_or_else(|| format!("expected a non-negative integer, got {}", value_kind(value)))?;
    u32::try_from(n).map_err(|_| format!("value {} is out of range", n))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// How validation problems are surfaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Problems are logged; validation still reports success
    #[default]
    Lenient,
    /// Problems fail the run
    Strict,
}

/// One problem found while mapping the input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    /// Key did not match any recognized field name
    UnknownField { key: String },
    /// Key matched but the value could not be coerced
    BadValue { field: Field, reason: String },
}

impl std::fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationProblem::UnknownField { key } => {
                write!(f, "input option not found: {}", key)
            }
            ValidationProblem::BadValue { field, reason } => {
                write!(f, "input value not understood: {}: {}", field.wire_name(), reason)
            }
        }
    }
}

/// Outcome of mapping an input document onto a config
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Fields that were present and stored
    pub fields_seen: Vec<Field>,
    /// Problems encountered, in input order
    pub problems: Vec<ValidationProblem>,
}

impl ValidationReport {
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Recognized fields the document did not supply (defaults were used)
    pub fn missing_fields(&self) -> Vec<Field> {
        ALL_FIELDS
            .iter()
            .copied()
            .filter(|f| !self.fields_seen.contains(f))
            .collect()
    }
}

const ALL_FIELDS: [Field; 14] = [
    Field::Colocation,
    Field::UseCase,
    Field::StorageCapacity,
    Field::MetadataCapacity,
    Field::DriveCapacity,
    Field::DrivesPerChassis,
    Field::PopulatedSlotsPerChassis,
    Field::NvmeSlotsPerChassis,
    Field::DriveType,
    Field::MaxFillCapacity,
    Field::NvmeRatio,
    Field::ProtectionType,
    Field::EcProfileData,
    Field::EcProfileParity,
];

// =============================================================================
// Validation Entry Point
// =============================================================================

/// Maps a raw input document onto a [`SizingConfig`].
///
/// Every entry of the mapping is resolved against the field table; unknown
/// keys and uncoercible values become [`ValidationProblem`]s. In lenient
/// mode the populated config is returned even when problems were found,
/// matching the historical behavior. In strict mode any problem fails the
/// run.
pub fn validate(document: &Value, mode: ValidationMode) -> Result<(SizingConfig, ValidationReport)> {
    let mapping = document
        .as_mapping()
        .ok_or(Error::InputNotMapping { kind: value_kind(document) })?;

    let mut config = SizingConfig::default();
    let mut report = ValidationReport::default();

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            let problem = ValidationProblem::UnknownField { key: format!("{:?}", key) };
            error!("{}", problem);
            report.problems.push(problem);
            continue;
        };
        info!(key, "validating input field");
        match Field::from_key(key) {
            Some(field) => match field.apply(&mut config, value) {
                Ok(()) => report.fields_seen.push(field),
                Err(reason) => {
                    let problem = ValidationProblem::BadValue { field, reason };
                    error!("{}", problem);
                    report.problems.push(problem);
                }
            },
            None => {
                let problem = ValidationProblem::UnknownField { key: key.to_string() };
                error!("{}", problem);
                report.problems.push(problem);
            }
        }
    }

    if mode == ValidationMode::Strict && report.has_problems() {
        return Err(Error::Validation { problems: report.problems.len() });
    }

    Ok((config, report))
}

// =============================================================================
// Tests
// =============================================================================
