//! Arbor CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Component relationship and bundle-impact intelligence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest analysis output and persist a snapshot
    Snapshot {
        /// Analysis JSON produced by the extraction layer
        #[arg(short, long)]
        input: PathBuf,

        /// Commit SHA the analysis ran against
        #[arg(short, long)]
        commit: String,

        /// Branch name
        #[arg(short, long, default_value = "main")]
        branch: String,
    },
    /// Compare two stored snapshots and print a markdown report
    Diff {
        /// Base snapshot file
        #[arg(long)]
        base: PathBuf,

        /// Head snapshot file
        #[arg(long)]
        head: PathBuf,

        /// Gzip self-size delta (bytes) considered significant
        #[arg(long)]
        gzip_threshold: Option<i64>,

        /// Health score delta (points) considered significant
        #[arg(long)]
        health_threshold: Option<f64>,
    },
    /// Report circular imports in the analysis output
    Cycles {
        /// Analysis JSON produced by the extraction layer
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List modules impacted by a change to one module
    Impact {
        /// Analysis JSON produced by the extraction layer
        #[arg(short, long)]
        input: PathBuf,

        /// Module identifier (file path or package specifier)
        #[arg(short, long)]
        module: String,
    },
    /// List components no consumer chain connects to a root
    Unused {
        /// Analysis JSON produced by the extraction layer
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Remove stored snapshots
    Clear,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("arbor={}", log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Arbor v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Snapshot { input, commit, branch } => {
            commands::snapshot(cli.root, input, commit, branch)
        }
        Commands::Diff {
            base,
            head,
            gzip_threshold,
            health_threshold,
        } => commands::diff(base, head, gzip_threshold, health_threshold),
        Commands::Cycles { input } => commands::cycles(input),
        Commands::Impact { input, module } => commands::impact(input, module),
        Commands::Unused { input } => commands::unused(input),
        Commands::Clear => commands::clear(cli.root),
        Commands::Version => {
            println!("Arbor v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
