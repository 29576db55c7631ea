//! arlimit CLI
//!
//! Command-line interface for reconciling Active Response limits

use arlimit_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "arlimit")]
#[command(about = "arlimit - Active Response limit reconciler", long_about = None)]
struct Cli {
    #[command(flatten)]
    files: commands::FileArgs,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable
    Pretty,
    /// JSON lines
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed missing registry commands and print the merged limits
    Sync,
    /// Show custom limits
    Show(commands::limits::ShowArgs),
    /// Update limits of existing commands
    Set(commands::limits::SetArgs),
    /// Show or update the global limit
    Global(commands::global::GlobalArgs),
    /// Print custom and global limits as a JSON bundle
    Export,
    /// Apply a JSON bundle of custom and global limits
    Import(commands::bundle::ImportArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let mut reconciler = cli.files.reconciler();

    let result = match cli.command {
        Commands::Sync => commands::sync::execute(&reconciler),
        Commands::Show(args) => commands::limits::execute_show(args, &reconciler),
        Commands::Set(args) => commands::limits::execute_set(args, &mut reconciler),
        Commands::Global(args) => commands::global::execute(args, &mut reconciler),
        Commands::Export => commands::bundle::execute_export(&reconciler),
        Commands::Import(args) => commands::bundle::execute_import(args, &mut reconciler),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
