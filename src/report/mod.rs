//! Report Rendering
//!
//! Turns a [`SizingOutcome`] into the two-section "first-opinion" report:
//! derived sizing figures first, then the procurement-facing BOM, one
//! `Label = value` line per field. A JSON rendering is available for
//! machine consumers.

use std::fmt::Write as _;

use chrono::{SecondsFormat, Utc};

use crate::error::Result;
use crate::sizing::SizingOutcome;

/// Renders the human-readable report.
///
/// A BOM chassis count of zero marks the configuration infeasible; the
/// remaining figures are advisory in that case.
pub fn render_text(outcome: &SizingOutcome) -> String {
    let mut out = String::new();
    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    // Writing to a String cannot fail
    let _ = writeln!(out, "Generated: {}", generated);

    let r = &outcome.results;
    let _ = writeln!(out);
    let _ = writeln!(out, "Sizing First-Opinion:");
    let _ = writeln!(out, "Raw Capacity = {}", r.raw_capacity_tb);
    let _ = writeln!(out, "Total Capacity = {}", r.total_capacity_tb);
    let _ = writeln!(out, "Number of Drives = {}", r.drives_needed);
    let _ = writeln!(out, "Number of Chassis = {}", r.chassis_needed);
    let _ = writeln!(out, "Colocated Memory Needed = {}", r.colo_memory_gb);
    let _ = writeln!(out, "Minimum Memory Needed = {}", r.minimum_memory_gb);
    let _ = writeln!(out, "Colocated CPU Needed = {}", r.colo_cpu_threads);
    let _ = writeln!(out, "Number of 2Ghz CPU Threads Needed = {}", r.data_cpu_threads);
    let _ = writeln!(out, "Suggested CPU Model = {}", r.suggested_cpu_model);
    let _ = writeln!(
        out,
        "Number of NVMe Devices Needed for RocksDB/WAL = {}",
        r.nvme_needed
    );
    let _ = writeln!(out, "Minimum Size of NVMe Devices = {}", r.minimum_nvme_size_gb);
    let _ = writeln!(out, "Expected Performance (GB/s) = {}", r.expected_perf_gbs);
    let _ = writeln!(out, "Network Cards = {}", r.network_cards);

    let b = &outcome.bom;
    let _ = writeln!(out);
    let _ = writeln!(out, "BOM First-Opinion:");
    let _ = writeln!(out, "Number of Chassis = {}", b.chassis_count);
    let _ = writeln!(out, "Number of Drives Per Chassis = {}", b.drives_per_chassis);
    let _ = writeln!(out, "Drive Size = {}", b.drive_size_tb);
    let _ = writeln!(out, "Memory Per Chassis = {}", b.memory_per_chassis_gb);
    let _ = writeln!(out, "CPU Per Chassis = {}", b.cpu_model);
    let _ = writeln!(out, "RocksDB/WAL Number of NVMe Drives = {}", b.nvme_count);
    let _ = writeln!(out, "RocksDB/WAL NVMe Capacity = {}", b.nvme_size_gb);
    let _ = writeln!(out, "OS Disk Capacity = {}", b.os_disk);
    let _ = writeln!(out, "NVMe Metadata Capacity = {}", b.metadata_nvme);
    let _ = writeln!(out, "Network Cards = {}", b.network_cards);

    if !outcome.feasible {
        let _ = writeln!(out);
        let _ = writeln!(out, "Feasibility problems:");
        for failure in &outcome.infeasibilities {
            let _ = writeln!(out, "  - {}", failure);
        }
    }

    out
}

/// Renders the outcome as pretty-printed JSON
pub fn render_json(outcome: &SizingOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

// =============================================================================
// Tests
// =============================================================================
