//! Command-line frontend for the mudmap layout engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::SourceArgs;

#[derive(Parser)]
#[command(
    name = "mudmap",
    about = "mudmap — grid layouts for MUD area maps",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out an area and write the node/edge JSON document
    Layout {
        /// Area identifier
        area: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if two rooms of one level land on the same cell
        #[arg(long)]
        strict: bool,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Do not nudge unconnected levels apart
        #[arg(long)]
        no_stagger: bool,

        /// Fail on exits that lead to rooms outside the area
        #[arg(long)]
        reject_orphans: bool,
    },

    /// List the areas in the data source
    Areas {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Report collisions and unresolved exits for an area
    Check {
        /// Area identifier
        area: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Exit with an error if any collision is found
        #[arg(long)]
        strict: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Layout {
            area,
            source,
            output,
            strict,
            compact,
            no_stagger,
            reject_orphans,
        } => {
            let options = commands::layout::Options {
                strict,
                pretty: !compact,
                stagger: !no_stagger,
                reject_orphans,
            };
            commands::layout::run(&source, &area, output.as_deref(), &options)
        }
        Commands::Areas { source } => commands::areas::run(&source),
        Commands::Check {
            area,
            source,
            strict,
        } => commands::check::run(&source, &area, strict),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
