//! openapi-from-routes - Command-line tool for generating OpenAPI documentation.
//!
//! Reads a service manifest (a JSON or YAML snapshot of a service's apps,
//! routers, validation schemas and error types) and prints the OpenAPI 3.0
//! specifications of every API version of every app.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-routes get:swagger -f <MANIFEST> [-a <APP>]... [--format json|yaml] [-o <FILE>]
//! ```
//!
//! # Examples
//!
//! Generate specs of all apps:
//! ```bash
//! openapi-from-routes get:swagger -f service.json
//! ```
//!
//! Generate YAML specs of a single app into a file:
//! ```bash
//! openapi-from-routes get:swagger -f service.yaml -a public --format yaml -o openapi.yaml
//! ```
//!
//! # Exit codes
//!
//! * `0` - success
//! * `66` - the manifest file does not exist
//! * `65` - the manifest does not describe a service with `apps`
//! * `1` - any other failure

use clap::Parser;
use log::info;
use openapi_from_routes::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logger based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("openapi-from-routes starting...");

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
