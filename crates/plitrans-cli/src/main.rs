//! CLI for the PL/I subset transpiler.
//!
//! # Examples
//!
//! ```bash
//! # Transpile to C# on stdout
//! plitrans transpile payroll.pli
//!
//! # Transpile to JavaScript into a file
//! plitrans transpile payroll.pli -t js -o payroll.js
//!
//! # Report recovery diagnostics
//! plitrans check payroll.pli
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use miette::Result;
use plitrans::Target;

mod commands;
mod config;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "plitrans")]
#[command(author, version, about = "PL/I subset to C# and JavaScript transpiler", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file to use instead of ./plitrans.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transpile a PL/I source file
    Transpile {
        /// Input PL/I source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target language (csharp, javascript)
        #[arg(short, long)]
        target: Option<Target>,

        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show tokens (for debugging)
    Lex {
        /// Input PL/I source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the parsed program structure
    Parse {
        /// Input PL/I source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report characters and tokens skipped during recovery
    Check {
        /// Input PL/I source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the effective configuration
    Config {
        /// Write a default plitrans.toml in the current directory
        #[arg(long)]
        init: bool,
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

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Transpile {
            input,
            target,
            output,
        } => commands::transpile::run(input, target, output, config_path),
        Commands::Lex { input, format } => commands::lex::run(input, format),
        Commands::Parse { input, format } => commands::parse::run(input, format),
        Commands::Check { input, format } => commands::check::run(input, format),
        Commands::Config { init } => commands::config::run(init, config_path),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "plitrans", &mut std::io::stdout());
            Ok(())
        }
    }
}
