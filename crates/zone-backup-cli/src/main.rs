use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zone_backup_core::Error;

mod commands;

#[derive(Parser)]
#[command(name = "zone-backup")]
#[command(about = "DNS hosted zone backup and restore tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore a hosted zone from a snapshot
    Restore {
        /// Storage key of the snapshot document
        #[arg(short, long)]
        snapshot: String,

        /// Path to the configuration file
        #[arg(short, long)]
        config: String,

        /// Target zone id (defaults to the id embedded in the snapshot)
        #[arg(short, long)]
        zone_id: Option<String>,

        /// Compute and print the plan without writing anything
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Apply the plan without further confirmation
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },

    /// Compute the restore plan for a snapshot without applying it
    Preflight {
        /// Storage key of the snapshot document
        #[arg(short, long)]
        snapshot: String,

        /// Path to the configuration file
        #[arg(short, long)]
        config: String,

        /// Target zone id (defaults to the id embedded in the snapshot)
        #[arg(short, long)]
        zone_id: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List snapshot documents in storage
    List {
        /// Path to the configuration file
        #[arg(short, long)]
        config: String,

        /// Key prefix to list under
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Show the contents of a snapshot document
    Describe {
        /// Storage key of the snapshot document
        #[arg(short, long)]
        snapshot: String,

        /// Path to the configuration file
        #[arg(short, long)]
        config: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Exit status: 2 for validation failures caught before any write, 3 for
/// a batch failure mid-apply, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_validation() => 2,
        Some(Error::BatchApply { .. }) => 3,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Restore {
            snapshot,
            config,
            zone_id,
            dry_run,
            yes,
        } => commands::restore::run(&config, &snapshot, zone_id.as_deref(), dry_run, yes).await,
        Commands::Preflight {
            snapshot,
            config,
            zone_id,
            format,
        } => {
            commands::preflight::run(
                &config,
                &snapshot,
                zone_id.as_deref(),
                commands::OutputFormat::from_str(&format),
            )
            .await
        }
        Commands::List { config, prefix } => commands::list::run(&config, &prefix).await,
        Commands::Describe {
            snapshot,
            config,
            format,
        } => {
            commands::describe::run(
                &config,
                &snapshot,
                commands::OutputFormat::from_str(&format),
            )
            .await
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}
