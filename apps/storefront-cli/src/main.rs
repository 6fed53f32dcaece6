//! # Storefront CLI Entry Point
//!
//! A terminal view layer over `storefront-client`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize tracing (RUST_LOG, default info,storefront=debug)        │
//! │  3. Load ClientConfig (file ──► env ──► --api-url)                      │
//! │  4. Build Storefront (reqwest transport, local storage, console toasts) │
//! │  5. Run one command, exit non-zero unless the flow was applied          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod console;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storefront_client::{ClientConfig, FlowOutcome, Storefront};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{cart::CartCommand, catalog::CollectionCommand, catalog::ProductCommand};
use commands::{config::ConfigCommand, users::UsersCommand};
use console::ConsoleNotifier;

/// Storefront command-line client
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Command-line client for the storefront backend")]
struct Cli {
    /// Config file (default: platform config dir/storefront.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Admin user table
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },

    /// Seller collections
    Collections {
        #[command(subcommand)]
        command: CollectionCommand,
    },

    /// Seller products
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },

    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing();

    if let Commands::Config { command } = &cli.command {
        commands::config::run(command, cli.config.clone())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = ClientConfig::load(cli.config.clone()).context("loading client config")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate().context("validating --api-url")?;
    }
    debug!(base_url = %config.base_url(), "Configuration loaded");

    let storefront = Storefront::from_config(&config, Arc::new(ConsoleNotifier))
        .context("building storefront client")?;

    let outcome = match cli.command {
        Commands::Signup {
            username,
            email,
            password,
        } => commands::signup::run(&storefront, username, email, password).await,
        Commands::Cart { command } => commands::cart::run(&storefront, command).await,
        Commands::Users { command } => commands::users::run(&storefront, command).await,
        Commands::Collections { command } => {
            commands::catalog::run_collections(&storefront, command).await
        }
        Commands::Product { command } => {
            commands::catalog::run_product(&storefront, command).await?
        }
        Commands::Config { .. } => FlowOutcome::Applied,
    };

    Ok(exit_code(&outcome))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: INFO, DEBUG for storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(outcome: &FlowOutcome) -> ExitCode {
    match outcome {
        FlowOutcome::Applied => ExitCode::SUCCESS,
        FlowOutcome::Invalid(errors) => {
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field(), error);
            }
            ExitCode::from(2)
        }
        FlowOutcome::Blocked(reason) => {
            eprintln!("{}", reason);
            ExitCode::FAILURE
        }
        FlowOutcome::Unconfirmed | FlowOutcome::Failed(_) => ExitCode::FAILURE,
    }
}
