use crate::doc::DocApp;
use crate::error::Error;
use crate::manifest::ServiceManifest;
use crate::openapi_builder::SpecMap;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Exit code when the manifest file does not exist
pub const EXIT_NOT_FOUND: u8 = 66;
/// Exit code when the manifest does not describe a service
pub const EXIT_INVALID_INPUT: u8 = 65;
/// Exit code of any other failure
pub const EXIT_FAILURE: u8 = 1;

/// OpenAPI documentation generator for service route registries
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate OpenAPI specifications of the apps of a service
    #[command(name = "get:swagger")]
    GetSwagger(GetSwaggerArgs),
}

#[derive(Args, Debug)]
pub struct GetSwaggerArgs {
    /// Service manifest (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short = 'f', long = "file", value_name = "MANIFEST")]
    pub file: PathBuf,

    /// Only generate specs of the listed apps
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub apps: Vec<String>,

    /// Output format (json or yaml)
    #[arg(long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Run the parsed command
pub fn run(cli: Cli) -> Result<()> {
    debug!("Parsed arguments: {:?}", cli);

    match cli.command {
        Command::GetSwagger(args) => get_swagger(args),
    }
}

/// Generate the specs of the selected apps, keyed by app name
fn get_swagger(args: GetSwaggerArgs) -> Result<()> {
    info!("Manifest: {}", args.file.display());
    info!("Output format: {:?}", args.output_format);

    let manifest = ServiceManifest::load(&args.file)?;
    let registry = manifest.registry();
    let errors = manifest.error_catalog();
    let root = manifest.project_root();

    let mut specs: IndexMap<String, SpecMap> = IndexMap::new();
    for app in manifest.select_apps(&args.apps) {
        let mut doc = DocApp::new(app, &registry, &errors, &root);
        let app_specs = doc
            .initialize()
            .with_context(|| format!("Failed to generate specs of app {}", app.name))?
            .clone();

        for event in doc.events() {
            warn!("{}: {:?}", app.name, event);
        }

        info!("Generated {} specs for app {}", app_specs.len(), app.name);
        specs.insert(app.name.clone(), app_specs);
    }

    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&specs)?,
        OutputFormat::Yaml => serialize_yaml(&specs)?,
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    Ok(())
}

/// Process exit code of a failed run
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::ManifestNotFound(_)) => EXIT_NOT_FOUND,
        Some(Error::InvalidManifest { .. }) => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
