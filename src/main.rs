//! openapi-from-routes - Command-line type miner for OpenAPI generation.
//!
//! This binary runs the type-declaration mining pipeline against a TypeScript
//! application: it invokes the external type-checker in declaration-only mode,
//! parses the emitted `.d.ts` text, and prints the recovered reference table
//! as YAML or JSON.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-routes [OPTIONS] <TARGET_FILE>
//! ```
//!
//! # Examples
//!
//! Mine a server entry point and print YAML:
//! ```bash
//! openapi-from-routes ./src/index.ts
//! ```
//!
//! Write the table as JSON for later use as a reference source:
//! ```bash
//! openapi-from-routes ./src/index.ts -f json -o routes.json
//! ```
//!
//! Keep the scratch workspace and show type-checker output:
//! ```bash
//! openapi-from-routes ./src/index.ts -d -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;

use openapi_from_routes::cli;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("openapi-from-routes starting...");

    // Now do the full parse with validation
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("Type mining completed successfully");

    Ok(())
}
