//! CLI entry point for bqschema-codegen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bqschema_codegen::config::CodegenConfig;

#[derive(Parser)]
#[command(name = "bqschema-codegen")]
#[command(about = "Generate Rust structs from the table schemas of a BigQuery dataset")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Google Cloud project ID (overrides config)
    #[arg(short, long, env = "GCLOUD_PROJECT_ID")]
    project: Option<String>,

    /// BigQuery dataset (overrides config)
    #[arg(short, long, env = "BIGQUERY_DATASET")]
    dataset: Option<String>,

    /// Path to output the generated code (overrides config)
    #[arg(short, long, env = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Read table schemas from a JSON file instead of the BigQuery API
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// OAuth2 access token (takes precedence over --keyfile)
    #[arg(long, env = "BQSCHEMA_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Service-account key file (defaults to Application Default Credentials)
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    keyfile: Option<PathBuf>,

    /// Module name declared in the generated file header
    #[arg(long)]
    module_name: Option<String>,

    /// Tables to include (comma-separated)
    #[arg(long)]
    include: Option<String>,

    /// Tables to exclude (comma-separated)
    #[arg(long)]
    exclude: Option<String>,

    /// Dry run - print the generated code instead of writing it
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the struct file (default)
    Generate,
    /// Inspect the dataset (show tables and columns for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(project) = cli.project {
        config.project_id = project;
    }
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(schema_file) = cli.schema_file {
        config.schema_file = Some(schema_file);
    }
    if let Some(access_token) = cli.access_token {
        config.access_token = Some(access_token);
    }
    if let Some(keyfile) = cli.keyfile {
        config.keyfile = Some(keyfile);
    }
    if let Some(module_name) = cli.module_name {
        config.module_name = module_name;
    }
    if let Some(include) = cli.include {
        config.include_tables = include;
    }
    if let Some(exclude) = cli.exclude {
        config.exclude_tables = exclude;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_dataset(&config);
    }

    info!("Generating structs for dataset {}", config.dataset);
    let report = bqschema_codegen::generate(&config)?;

    if config.dry_run {
        print!("{}", report.document);
    }

    for skipped in &report.skipped {
        eprintln!("skipped table {}: {}", skipped.table_id, skipped.reason);
    }

    info!(
        "Code generation completed: {} structs, {} skipped",
        report.generated.len(),
        report.skipped.len()
    );
    Ok(())
}

fn inspect_dataset(config: &CodegenConfig) -> Result<()> {
    let catalog = bqschema_codegen::build_catalog(config)?;
    let tables = catalog.list_tables(&config.dataset)?;

    println!("Found {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {} ({})", table.table_id, table.full_id);
        if !table.description.is_empty() {
            println!("  Description: {}", table.description);
        }
        println!("  Columns:");
        for col in &table.columns {
            print!("    - {} {} {}", col.name, col.field_type, col.mode);
            if let Some(description) = &col.description {
                print!(" -- {}", description);
            }
            println!();
        }
        println!();
    }

    Ok(())
}
