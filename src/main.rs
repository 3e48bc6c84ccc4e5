//! Lanai - Main entrypoint.
//!
//! Command-line front end for the registry: builds a tree from routes given
//! on the command line, runs a query against it and prints the matches. Also
//! validates and generates configuration files.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lanai_lib::config::{self, LanaiConfig, LogConfig};
use lanai_lib::data_structures::{LanaiGlobTree, LanaiGlobTreeConfig, QueryOptions};
use lanai_lib::error::{
    report_error, set_error_reporter, ErrorContext, LanaiError, LanaiResult, TracingErrorReporter,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run a query against a registry built from the given routes
    Query {
        /// Glob pattern or concrete key; empty lists every route
        pattern: String,

        /// Route to register, as PATTERN=VALUE (repeatable)
        #[clap(short, long = "route", value_parser = parse_route)]
        routes: Vec<(String, String)>,

        /// Do not return stored patterns matching the key
        #[clap(long, conflicts_with = "only_matchers")]
        no_matchers: bool,

        /// Only return stored patterns matching the key
        #[clap(long)]
        only_matchers: bool,

        /// Print matches as a JSON array
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One match as printed by `lanai query --json`.
#[derive(Serialize, Debug)]
struct Match<'a> {
    path: &'a str,
    value: &'a str,
}

/// Splits a `PATTERN=VALUE` route argument.
fn parse_route(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((pattern, value)) => Ok((pattern.to_string(), value.to_string())),
        None => Err(format!("expected PATTERN=VALUE, got '{raw}'")),
    }
}

/// Initialize the logging system from the log configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so query output on stdout stays machine readable.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };
    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn run_query(
    config: &LanaiConfig,
    pattern: &str,
    routes: Vec<(String, String)>,
    no_matchers: bool,
    only_matchers: bool,
    json: bool,
) -> LanaiResult<()> {
    let mut tree = LanaiGlobTree::with_config(LanaiGlobTreeConfig::from(&config.tree));
    for (route, value) in routes {
        if let Some(previous) = tree.insert(&route, value)? {
            debug!(route = %route, previous = %previous, "Route replaced");
        }
    }
    info!(routes = tree.len(), pattern, "Registry built");

    let mut options = QueryOptions::default_for(&tree);
    if no_matchers {
        options = options.with_matchers(false);
    }
    if only_matchers {
        options = options.with_only_matchers(true);
    }

    let matches: Vec<Match<'_>> = tree
        .query(pattern, options)
        .iter(&tree)
        .filter_map(|node| {
            node.value().map(|value| Match {
                path: node.path(),
                value: value.as_str(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for m in &matches {
            println!("{} = {}", m.path, m.value);
        }
    }
    Ok(())
}

fn run(args: Args) -> LanaiResult<()> {
    let loader = config::ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command {
        Command::Query {
            pattern,
            routes,
            no_matchers,
            only_matchers,
            json,
        } => {
            let config = loader.load()?;
            init_logging(&config.log)?;
            set_error_reporter(Arc::new(TracingErrorReporter));
            config::init_global_config(config.clone());
            run_query(&config, &pattern, routes, no_matchers, only_matchers, json)
        }
        Command::Validate => {
            let config = loader.load()?;
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            let default_config = LanaiConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            println!("Default configuration written to {}", output.display());
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let command = match &args.command {
        Command::Query { .. } => "query",
        Command::Validate => "validate",
        Command::GenConfig { .. } => "gen-config",
    };
    if let Err(error) = run(args) {
        report_error(
            &ErrorContext::new(error, "cli").with_details(format!("while running `lanai {command}`")),
        );
        process::exit(1);
    }
}
