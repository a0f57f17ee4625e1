//! Command-line interface for the trellis UI compiler.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a trellis project in the current directory
    Init,

    /// Build the bridge IR for a source document
    #[command(visible_alias = "b")]
    Build {
        /// Source document (defaults to the project's source)
        source: Option<PathBuf>,

        /// Where to write the bridge JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the bridge IR of a source or bridge document as a tree
    #[command(visible_alias = "i")]
    Inspect {
        /// Source or bridge document (defaults to the project's source)
        input: Option<PathBuf>,

        /// Print JSON instead of the tree view
        #[arg(long)]
        json: bool,
    },

    /// Generate code through one or more backends
    #[command(visible_alias = "e")]
    Emit {
        /// Backend ids (defaults to the project's configured backends)
        backends: Vec<String>,

        /// Source or bridge document (defaults to the project's source)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (defaults to the project's out_dir)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print generated code instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Leave comments out of the generated code
        #[arg(long)]
        no_comments: bool,
    },

    /// List the available backends
    Backends,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Build { source, output } => {
            commands::build::execute(source.as_deref(), output.as_deref(), verbose)
        }
        Commands::Inspect { input, json } => {
            commands::inspect::execute(input.as_deref(), json, verbose)
        }
        Commands::Emit {
            backends,
            input,
            out_dir,
            stdout,
            no_comments,
        } => commands::emit::execute(&commands::emit::EmitArgs {
            backends,
            input,
            out_dir,
            stdout,
            no_comments,
            verbose,
        }),
        Commands::Backends => commands::backends::execute(),
    }
}
