use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use crate::miner::{mine_route_types, MinerOptions};
use crate::route::ReferenceTable;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

/// Mine route shapes from a TypeScript application and emit them as a
/// reference table
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// The .ts or .tsx file declaring the application instance
    #[arg(value_name = "TARGET_FILE")]
    pub target_file: PathBuf,

    /// Exported binding to look for in the emitted declarations
    #[arg(short = 'n', long = "instance-name")]
    pub instance_name: Option<String>,

    /// Generic type name the application instance is declared with
    #[arg(short = 't', long = "instance-type", default_value = "App")]
    pub instance_type: String,

    /// Project root for resolving the emitted declaration path
    #[arg(short = 'p', long = "project-root", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Existing tsconfig.json to extend (default: <project-root>/tsconfig.json)
    #[arg(long = "tsconfig", value_name = "FILE")]
    pub tsconfig_path: Option<PathBuf>,

    /// Read this declaration file instead of searching the emitted output
    #[arg(long = "declaration", value_name = "FILE")]
    pub declaration_path: Option<PathBuf>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Keep the scratch workspace and show type-checker output
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.target_file.exists() {
        anyhow::bail!(
            "Target file does not exist: {}",
            args.target_file.display()
        );
    }

    info!("Target file: {}", args.target_file.display());
    info!("Instance type: {}", args.instance_type);
    if let Some(ref name) = args.instance_name {
        info!("Instance name: {}", name);
    }
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting type mining...");

    let mut options = MinerOptions::new(args.target_file.clone());
    options.instance_name = args.instance_name.clone();
    options.instance_type = args.instance_type.clone();
    options.project_root = args.project_root.clone();
    options.tsconfig_path = args.tsconfig_path.clone();
    options.output_override = args.declaration_path.clone();
    options.debug = args.debug;

    // Mining degrades to an empty table rather than failing the run; the
    // warnings logged by the miner explain what went wrong.
    let table = mine_route_types(&options).unwrap_or_else(|| {
        log::warn!("No route types recovered; emitting an empty reference table");
        ReferenceTable::new()
    });

    info!("Recovered {} path(s)", table.len());

    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&table)?,
        OutputFormat::Json => serialize_json(&table)?,
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!(
            "Successfully wrote reference table to {}",
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    Ok(())
}
