// src/pipeline/scrape.rs

//! Topic scraping pipeline.

use crate::error::{AppError, Result};
use crate::models::{CategoryRef, Config};
use crate::services::{Fetcher, SiteSelectors, TopicLister};
use crate::storage::LocalStorage;

/// Walk the persisted tree and scrape every topic-bearing category.
///
/// Categories are processed one at a time; topic extraction within a
/// category is concurrent. Completed categories are skipped via the
/// ledger, so interrupted runs resume where they left off.
pub async fn run_scrape(config: &Config, fetcher: &Fetcher, storage: &LocalStorage) -> Result<()> {
    let Some(tree) = storage.load_tree().await? else {
        log::error!(
            "Tree snapshot not found at {}. Run 'tree' first.",
            storage.tree_path().display()
        );
        return Err(AppError::config("tree snapshot not found"));
    };

    let targets = tree.topic_bearing();
    log::info!("The tree has {} nodes in total", tree.node_count());
    log::info!("We have {} categories with topics to scrape", targets.len());

    let selectors = SiteSelectors::from_config(&config.site)?;
    let lister = TopicLister::new(config, fetcher, storage, &selectors);

    let mut total_posts = 0usize;
    for (index, node) in targets.iter().enumerate() {
        log::info!(
            "Category {}/{}: {}",
            index + 1,
            targets.len(),
            node.title
        );
        total_posts += lister.scrape_category(CategoryRef::from(*node)).await?;
    }

    log::info!("Total posts scraped: {total_posts}");
    Ok(())
}
