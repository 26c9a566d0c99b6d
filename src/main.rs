//! agora CLI
//!
//! Batch entry point for the two crawl phases: category tree discovery
//! and topic scraping. The job is designed to be re-run until the
//! ledgers show full completion; Ctrl-C stops it cleanly with all
//! finished work persisted.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use agora::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::Fetcher,
    storage::LocalStorage,
};

/// agora - Forum Topic Archiver
#[derive(Parser, Debug)]
#[command(name = "agora", version, about = "Forum category tree crawler and topic archiver")]
struct Cli {
    /// Path to the data directory (config, tree snapshot, scraped output)
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover the category tree and save the snapshot
    Tree {
        /// Force regenerate even if a snapshot exists
        #[arg(long)]
        force: bool,
    },

    /// Scrape topics and posts for every topic-bearing category
    Scrape,

    /// Run full pipeline: Tree → Scrape
    Pipeline {
        /// Skip tree discovery, use the existing snapshot
        #[arg(long)]
        skip_tree: bool,
    },

    /// Show snapshot and ledger summary
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("agora starting...");

    let config = Config::load_or_default(cli.data_dir.join("config.toml"));
    config.validate()?;

    let config = Arc::new(config);
    let storage = LocalStorage::new(&cli.data_dir);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received; stopping after in-flight work");
                shutdown.cancel();
            }
        });
    }

    let fetcher = Fetcher::new(Arc::clone(&config), shutdown)?;

    let outcome = match cli.command {
        Command::Tree { force } => pipeline::run_tree(&config, &fetcher, &storage, force).await,
        Command::Scrape => pipeline::run_scrape(&config, &fetcher, &storage).await,
        Command::Pipeline { skip_tree } => {
            pipeline::run_pipeline(&config, &fetcher, &storage, skip_tree).await
        }
        Command::Info => run_info(&storage).await,
    };

    match outcome {
        Ok(()) => {
            log::info!("Done!");
            Ok(())
        }
        Err(AppError::Cancelled) => {
            log::warn!("Interrupted; completed work is saved. Re-run to resume.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Print snapshot and ledger counters.
async fn run_info(storage: &LocalStorage) -> Result<()> {
    match storage.load_tree().await? {
        Some(tree) => {
            log::info!("The tree has {} nodes in total", tree.node_count());
            log::info!("{} nodes carry topics", tree.topic_bearing().len());
        }
        None => log::info!("No tree snapshot found yet."),
    }

    let categories = storage.load_category_ledger().await?;
    log::info!("Categories scraped: {}", categories.len());
    let posts: usize = categories.values().map(|r| r.post_count).sum();
    log::info!("Posts archived: {posts}");

    Ok(())
}
