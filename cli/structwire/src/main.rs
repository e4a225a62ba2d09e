//! structwire CLI: native and wire layout generator for C structures.

mod commands;
mod manifest;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest::{GenerateOverrides, GeneratePaths, StructwireManifest};

#[derive(Parser)]
#[command(
    name = "structwire",
    version,
    about = "Generate padded C struct layouts and packed wire tables from a schema"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new structwire project
    Init {
        /// Project name
        name: String,
    },
    /// Generate struct declarations and layout tables
    Generate {
        /// Schema JSON file (default: config.json)
        #[arg(long)]
        schema: Option<String>,
        /// Directory for generated headers (default: include)
        #[arg(long)]
        include_dir: Option<String>,
        /// Directory for generated sources (default: src)
        #[arg(long)]
        src_dir: Option<String>,
        /// Stem of generated file names (default: structs)
        #[arg(long)]
        basename: Option<String>,
    },
    /// Print computed host and net layouts
    Inspect {
        /// Schema JSON file (default: config.json)
        #[arg(long)]
        schema: Option<String>,
        /// Only show this type
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
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

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Generate {
            schema,
            include_dir,
            src_dir,
            basename,
        } => {
            let loaded = StructwireManifest::find_and_load(&cwd)?;
            let overrides = GenerateOverrides {
                schema,
                include_dir,
                src_dir,
                basename,
            };
            let paths = GeneratePaths::resolve(
                &cwd,
                loaded.as_ref().map(|(m, dir)| (m, dir.as_path())),
                &overrides,
            );
            commands::generate::run(&paths)
        }

        Commands::Inspect {
            schema,
            type_name,
            format,
        } => {
            let loaded = StructwireManifest::find_and_load(&cwd)?;
            let overrides = GenerateOverrides {
                schema,
                ..Default::default()
            };
            let paths = GeneratePaths::resolve(
                &cwd,
                loaded.as_ref().map(|(m, dir)| (m, dir.as_path())),
                &overrides,
            );
            commands::inspect::run(&paths.schema, type_name.as_deref(), &format)
        }
    }
}
