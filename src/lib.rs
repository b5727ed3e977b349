//! Regionmap: groups country boundaries into macro-region map data.
//!
//! Regionmap reads a GeoJSON collection with one feature per country and
//! writes a JavaScript data asset with one `MultiPolygon` feature per
//! macro-region, ready for a map front end to load.
//!
//! # Modules
//!
//! - [`table`]: The classification table (country → region → metadata)
//! - [`geo`]: GeoJSON input/output types and file formats
//! - [`aggregate`]: The region aggregation pipeline and its report
//! - [`validation`]: Checks on an emitted region asset
//! - [`error`]: Error types for regionmap operations

pub mod aggregate;
pub mod error;
pub mod geo;
pub mod table;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use aggregate::{AggregateOptions, Aggregation, UnsupportedGeometryPolicy};
pub use error::RegionMapError;
use table::ClassificationTable;

/// The regionmap CLI application.
#[derive(Parser)]
#[command(name = "regionmap")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    build: BuildArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands. Without one, regionmap builds the region asset.
#[derive(Subcommand)]
enum Commands {
    /// Validate an emitted region asset.
    Validate(ValidateArgs),

    /// Print the built-in classification table as YAML.
    Table,
}

/// Arguments for building the region asset.
#[derive(clap::Args)]
struct BuildArgs {
    /// Country boundaries (GeoJSON FeatureCollection).
    #[arg(long, env = "REGIONMAP_INPUT", default_value = "countries.geo.json")]
    input: PathBuf,

    /// Destination for the region data script.
    #[arg(long, env = "REGIONMAP_OUTPUT", default_value = "js/regions-data.js")]
    output: PathBuf,

    /// YAML classification table to use instead of the built-in one.
    #[arg(long, env = "REGIONMAP_TABLE")]
    table: Option<PathBuf>,

    /// What to do when a classified country has a geometry other than
    /// Polygon or MultiPolygon.
    #[arg(long, value_enum, default_value_t = UnsupportedArg::Fail)]
    on_unsupported: UnsupportedArg,

    /// Also print the aggregation report ('text' or 'json').
    #[arg(long)]
    report: Option<String>,
}

/// CLI spelling of [`UnsupportedGeometryPolicy`].
#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnsupportedArg {
    Fail,
    Skip,
}

impl From<UnsupportedArg> for UnsupportedGeometryPolicy {
    fn from(arg: UnsupportedArg) -> Self {
        match arg {
            UnsupportedArg::Fail => UnsupportedGeometryPolicy::Fail,
            UnsupportedArg::Skip => UnsupportedGeometryPolicy::Skip,
        }
    }
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Region data script to validate.
    #[arg(default_value = "js/regions-data.js")]
    asset: PathBuf,

    /// YAML classification table to check region ids against.
    #[arg(long, env = "REGIONMAP_TABLE")]
    table: Option<PathBuf>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the regionmap CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RegionMapError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Table) => run_table(),
        None => run_build(cli.build),
    }
}

/// Installs a stderr `tracing` subscriber at a level chosen by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_table(path: Option<&Path>) -> Result<ClassificationTable, RegionMapError> {
    match path {
        Some(path) => {
            let table = table::io_yaml::read_table_yaml(path)?;
            tracing::info!(
                path = %path.display(),
                regions = table.len(),
                countries = table.country_count(),
                "loaded classification table"
            );
            Ok(table)
        }
        None => Ok(ClassificationTable::builtin()),
    }
}

fn check_report_format(format: &str) -> Result<(), RegionMapError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(RegionMapError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// Execute the default build: aggregate countries and write the asset.
fn run_build(args: BuildArgs) -> Result<(), RegionMapError> {
    if let Some(format) = args.report.as_deref() {
        check_report_format(format)?;
    }

    let table = load_table(args.table.as_deref())?;
    let opts = AggregateOptions {
        unsupported_geometry: args.on_unsupported.into(),
        ..Default::default()
    };

    let countries = geo::io_geojson::read_countries(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        features = countries.features.len(),
        "read country boundaries"
    );

    let Aggregation { collection, report } = aggregate::aggregate(&countries, &table, &opts)?;

    // Nothing is written unless aggregation succeeded in full
    geo::io_asset::write_asset(&args.output, &collection)?;

    println!(
        "Successfully generated {} with {} regions.",
        args.output.display(),
        collection.features.len()
    );

    match args.report.as_deref() {
        Some("json") => {
            let json =
                serde_json::to_string_pretty(&report).map_err(RegionMapError::ReportSerialize)?;
            println!("{}", json);
        }
        Some(_) => print!("{}", report),
        None => {}
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), RegionMapError> {
    check_report_format(&args.report)?;

    let table = load_table(args.table.as_deref())?;
    let collection = geo::io_asset::read_asset(&args.asset)?;
    let report = validation::validate_collection(&collection, &table);

    match args.report.as_str() {
        "json" => {
            let json =
                serde_json::to_string_pretty(&report).map_err(RegionMapError::ReportSerialize)?;
            println!("{}", json);
        }
        _ => print!("{}", report),
    }

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };

    if report.passes(&opts) {
        Ok(())
    } else {
        Err(RegionMapError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    }
}

/// Execute the table subcommand.
fn run_table() -> Result<(), RegionMapError> {
    let yaml = table::io_yaml::to_table_yaml_string(&ClassificationTable::builtin())?;
    print!("{}", yaml);
    Ok(())
}
