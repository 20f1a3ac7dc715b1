//! Command-line interface for lspgen.
//!
//! Checks the shipped method catalog, lists its methods, or generates the
//! descriptor document consumed by binding templates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use analysis::ResolutionStats;
use catalog::lsp_type_registry;
use clap::{Parser, Subcommand};
use codegen::utils::canonical_identifier;
use config::Config;
use pipeline::PipelineError;

/// Command-line interface configuration for lspgen.
#[derive(Parser, Debug)]
#[command(name = "lspgen", about = "LSP method binding generator", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Available lspgen commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the catalog and report every error
    Check,
    /// Resolve the catalog and write the descriptor document
    Generate {
        /// Output path, overriding `codegen.output_path`
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print every method with its identifier and kind
    List,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("lspgen failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = pipeline::load_config(cli.config.as_deref())?;
    logging::init(&config.logging.level, config.logging.file.as_deref())?;

    match cli.cmd {
        Commands::Check => {
            let catalog = pipeline::select_catalog(&config)?;
            let descriptors = pipeline::resolve(&catalog, &lsp_type_registry()?)?;
            print_summary(&config, &ResolutionStats::from_descriptors(&descriptors));
        }
        Commands::Generate { output } => {
            if let Some(output) = output {
                config.codegen.output_path = output;
            }
            let count = pipeline::run(&config)?;
            println!("Wrote {} method descriptors to {}", count, config.codegen.output_path.display());
        }
        Commands::List => {
            let catalog = pipeline::select_catalog(&config)?;
            for method in catalog.methods() {
                let kind = if method.is_notification { "notification" } else { "request" };
                println!("{}  {}  ({})", canonical_identifier(&method.name), method.name, kind);
            }
        }
    }
    Ok(())
}

fn print_summary(config: &Config, stats: &ResolutionStats) {
    let scope = match &config.codegen.categories {
        Some(categories) => categories.join(", "),
        None => "all categories".to_string(),
    };
    println!(
        "{} methods resolved ({}): {} requests, {} notifications, {} multi-shape, {} conversions",
        stats.methods, scope, stats.requests, stats.notifications, stats.multi_shape, stats.conversions
    );
}
