//! yuag - YUAG collection catalog search
//!
//! A CLI tool for searching a read-only museum catalog by label, date,
//! agent and classification, and for showing the full record of a
//! single object.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (database, config, missing search terms, etc.)
//!   2 - No object with the requested id exists

mod cli;
mod config;
mod error;
mod models;
mod query;
mod report;
mod store;

use anyhow::{bail, Context, Result};
use cli::{Args, Command, OutputFormat};
use config::{Config, CONFIG_FILE};
use error::CatalogError;
use models::SearchCriteria;
use std::path::Path;
use store::{run_blocking, Catalog};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("yuag v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Request failed: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .yuag.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` wins when set.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(args.log_level().into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the requested command. Returns the process exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let catalog = Catalog::new(config.database_path());
    info!("Using catalog: {}", catalog.path().display());

    // Liveness check before serving anything
    if let Err(e) = catalog.check_connection() {
        eprintln!("There was a problem with the database file: {}", e);
        return Ok(1);
    }

    let Some(command) = args.command.clone() else {
        bail!("No command given");
    };

    match command {
        Command::Search(search) => {
            let criteria = SearchCriteria::from(&search);
            run_search(&args, &config, catalog, criteria).await
        }
        Command::Show { id } => run_show(&args, &config, catalog, id).await,
    }
}

/// Run a search and render the results.
async fn run_search(
    args: &Args,
    config: &Config,
    catalog: Catalog,
    criteria: SearchCriteria,
) -> Result<i32> {
    if criteria.is_empty() {
        eprintln!("{}", CatalogError::NoCriteriaProvided);
        return Ok(1);
    }

    let limit = config.search.limit;
    let request = criteria.clone();
    let results = run_blocking(config.database.query_timeout_seconds, move || {
        catalog.search(&request, limit)
    })
    .await?;

    let output = match config.output.format {
        OutputFormat::Json => report::generate_search_json(&criteria, &results)?,
        OutputFormat::Markdown => report::generate_search_markdown(&criteria, &results),
    };
    write_output(args.output.as_deref(), &output)?;

    Ok(0)
}

/// Show the detail view of one object.
async fn run_show(args: &Args, config: &Config, catalog: Catalog, id: i64) -> Result<i32> {
    let bundle = run_blocking(config.database.query_timeout_seconds, move || {
        catalog.detail(id)
    })
    .await?;

    if bundle.is_empty() {
        eprintln!("Error: no object with id {} exists", id);
        return Ok(2);
    }

    let thumbnails = config.output.thumbnails;
    let output = match config.output.format {
        OutputFormat::Json => report::generate_detail_json(&bundle, thumbnails)?,
        OutputFormat::Markdown => report::generate_detail_markdown(&bundle, thumbnails),
    };
    write_output(args.output.as_deref(), &output)?;

    Ok(0)
}

/// Write rendered output to a file, or stdout when no file was given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output saved to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
