//! Sonar Sizer
//!
//! Command-line front end for the sizing calculator: loads the YAML input
//! document, validates it onto a [`SizingConfig`], runs the formula pass,
//! and renders the first-opinion report.
//!
//! ```text
//! sonar-sizer -i cluster.yaml
//! sonar-sizer -i cluster.yaml --strict --format json -o sizing.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sonar_sizer::config::{validate, ValidationMode};
use sonar_sizer::error::Error;
use sonar_sizer::report;
use sonar_sizer::sizing::compute;

// =============================================================================
// CLI Arguments
// =============================================================================

/// First-opinion capacity sizing for software-defined storage clusters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML input document describing the deployment
    #[arg(short, long, env = "SIZER_INPUT", default_value = "sizing-input.yaml")]
    input: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long, env = "SIZER_OUTPUT")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Fail the run on validation problems instead of logging them
    #[arg(long, env = "SIZER_STRICT")]
    strict: bool,

    /// Log each validated input field and the file names
    #[arg(long)]
    verbose: bool,

    /// Dump the populated configuration before calculating
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

/// Output rendering for the report
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    if args.verbose {
        info!("input file: {}", args.input.display());
        if let Some(output) = &args.output {
            info!("output file: {}", output.display());
        }
    }

    let document = load_input(&args.input)?;

    let mode = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };
    let (config, validation) = validate(&document, mode)
        .with_context(|| format!("validating {}", args.input.display()))?;

    if validation.has_problems() {
        // Lenient mode: recorded but not blocking
        tracing::warn!(
            problems = validation.problems.len(),
            "input had validation problems; continuing with defaults where needed"
        );
    }
    if args.debug {
        debug!(?config, "populated sizing configuration");
        for field in validation.missing_fields() {
            debug!("field {} not supplied, default in effect", field.wire_name());
        }
    }

    let outcome = compute(&config);

    let rendered = match args.format {
        ReportFormat::Text => report::render_text(&outcome),
        ReportFormat::Json => report::render_json(&outcome)?,
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    // Infeasibility is surfaced in the report, not the exit status
    if !outcome.feasible {
        info!("configuration is infeasible; BOM chassis count zeroed");
    }

    Ok(())
}

// =============================================================================
// Input Loading
// =============================================================================

fn load_input(path: &Path) -> anyhow::Result<serde_yaml::Value> {
    if !path.is_file() {
        // Missing input is fatal: there is nothing to size
        return Err(Error::InputNotFound { path: path.display().to_string() }.into());
    }

    info!("reading input document: {}", path.display());

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    // --verbose and --debug widen the level the way the flags always did
    let level = match (args.debug, args.verbose) {
        (true, _) => Level::DEBUG,
        (false, true) => Level::INFO,
        (false, false) => level,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
