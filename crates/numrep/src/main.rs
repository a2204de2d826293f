//! CLI for converting numbers between decimal and binary representations.
//!
//! # Examples
//!
//! ```bash
//! # Decimal to 8-bit two's complement
//! numrep convert -5 --from decimal --to twos
//!
//! # IEEE-754 single precision to decimal
//! numrep convert 00111111110000000000000000000000 --from ieee754 --to decimal
//!
//! # Menu-driven session
//! numrep interactive
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use miette::{Result, WrapErr};

use numrep::commands::{self, convert::ConvertArgs, EncodingArgs};
use numrep::Config;

#[derive(Parser, Debug)]
#[command(name = "numrep")]
#[command(author, version, about = "Convert numbers between decimal and binary representations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one value between number systems
    Convert(ConvertArgs),

    /// Run the interactive menu
    Interactive {
        #[command(flatten)]
        encoding: EncodingArgs,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        encoding: EncodingArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results only.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let load_config = || Config::load(config_path.as_deref()).wrap_err("Failed to load configuration");

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "numrep", &mut std::io::stdout());
            Ok(())
        }
        Commands::Convert(args) => commands::convert::run(load_config()?, args),
        Commands::Interactive { encoding } => {
            let mut config = load_config()?;
            encoding.apply(&mut config);
            commands::interactive::run(&config)
        }
        Commands::Config { encoding } => commands::config::run(load_config()?, encoding),
    }
}
