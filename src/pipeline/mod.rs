//! Pipeline entry points for archiver operations.
//!
//! - `run_tree`: Discover the category tree and save the snapshot
//! - `run_scrape`: Scrape topics and posts for every topic-bearing category
//! - `run_pipeline`: Tree discovery followed by scraping

pub mod scrape;
pub mod tree;

pub use scrape::run_scrape;
pub use tree::run_tree;

use crate::error::Result;
use crate::models::Config;
use crate::services::Fetcher;
use crate::storage::LocalStorage;

/// Run the full pipeline: tree discovery, then scraping.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &Fetcher,
    storage: &LocalStorage,
    skip_tree: bool,
) -> Result<()> {
    if skip_tree {
        log::info!("Skipping tree discovery, using existing snapshot...");
    } else {
        log::info!("Step 1/2: Discovering category tree...");
        run_tree(config, fetcher, storage, false).await?;
    }

    log::info!("Step 2/2: Scraping topics...");
    run_scrape(config, fetcher, storage).await
}
