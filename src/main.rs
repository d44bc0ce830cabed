//! Navigation route console.
//!
//! # Data Flow
//! ```text
//! routes.toml ──► config::loader ──► config::validation ──► RouteTable ─┐
//!                                                                       ├─► Router ─► resolve(path)
//! [[handlers]] ──► HandlerRegistry ─────────────────────────────────────┘
//!
//! watch mode: config::watcher ──► validated RoutesConfig ──► Router::swap
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use nav_router::config::loader::{load_config, ConfigError};
use nav_router::config::schema::RoutesConfig;
use nav_router::config::validation::ValidationError;
use nav_router::config::watcher::ConfigWatcher;
use nav_router::observability::{logging, metrics};
use nav_router::routing::router::Router;

#[derive(Parser)]
#[command(name = "nav-router")]
#[command(about = "Console for the navigation route table", long_about = None)]
struct Cli {
    /// Path to a TOML route configuration; built-in defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route configuration and report every violation
    Check,
    /// Resolve a navigation path against the table
    Resolve {
        /// Navigation path, e.g. "all" or "/create"
        path: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run with hot reload, swapping the table on config changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check => run_check(cli.config.as_deref()),
        Commands::Resolve { path, json } => {
            let config = load_or_default(cli.config.as_deref())?;
            logging::init(&config.observability.log_level);
            run_resolve(&config, path, *json)
        }
        Commands::Watch => {
            let Some(path) = cli.config.as_deref() else {
                eprintln!("Error: watch requires --config");
                std::process::exit(2);
            };
            let config = load_config(path)?;
            logging::init(&config.observability.log_level);
            run_watch(path, config).await
        }
    }
}

fn load_or_default(path: Option<&Path>) -> Result<RoutesConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RoutesConfig::default()),
    }
}

fn run_check(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        println!("built-in configuration: OK");
        return Ok(());
    };

    match load_config(path) {
        Ok(config) => {
            println!(
                "{}: OK ({} routes, {} handlers)",
                path.display(),
                config.routes.len(),
                config.handlers.len()
            );
            Ok(())
        }
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{}: {} violation(s)", path.display(), errors.len());
            for error in &errors {
                eprintln!("  - {error}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn run_resolve(
    config: &RoutesConfig,
    path: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.build_table().map_err(table_error)?;
    let registry = config.build_registry();
    let router = Router::register(table, registry)?;

    match router.resolve(path) {
        Ok(resolved) => {
            if json {
                let out = serde_json::json!({
                    "path": path,
                    "handler": resolved.handler_id.as_str(),
                    "matched": resolved.matched.as_str(),
                    "redirected_from": resolved.redirected_from.as_ref().map(|p| p.as_str()),
                    "fallback": resolved.fallback,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} -> {}", path, resolved.handler_id);
                if let Some(from) = &resolved.redirected_from {
                    println!("  redirected from {:?}", from.as_str());
                }
                if resolved.fallback {
                    println!("  (wildcard fallback)");
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_watch(
    path: &Path,
    config: RoutesConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.build_table().map_err(table_error)?;
    let registry = config.build_registry();
    let router = Router::register(table, registry)?;

    if config.observability.metrics_enabled {
        metrics::install_exporter(config.observability.metrics_address.parse()?)?;
    }

    let (watcher, mut update_rx) = ConfigWatcher::new(path);
    // Dropping the handle stops the watch; keep it for the process lifetime.
    let _watcher_handle = watcher.run()?;

    tracing::info!("Watching for route config changes; Ctrl-C to exit");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            update = update_rx.recv() => {
                let Some(new_config) = update else { break };
                apply_update(&router, new_config);
            }
        }
    }

    Ok(())
}

fn apply_update(router: &Router, config: RoutesConfig) {
    // The watcher only forwards validated configs, but handler
    // declarations are fixed at startup: a table referencing a handler
    // added after startup is rejected here.
    match config.build_table() {
        Ok(table) => {
            if let Err(e) = router.swap(table) {
                tracing::error!("Rejected new route table: {e}");
            }
        }
        Err(errors) => {
            tracing::error!(
                "Rejected new route table: {}",
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
}

fn table_error(errors: Vec<ValidationError>) -> Box<dyn std::error::Error> {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
        .into()
}
