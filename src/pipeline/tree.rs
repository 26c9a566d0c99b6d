// src/pipeline/tree.rs

//! Tree discovery pipeline.

use crate::error::Result;
use crate::models::Config;
use crate::services::{Fetcher, SiteSelectors, TreeBuilder};
use crate::storage::LocalStorage;

/// Discover the category tree and persist the snapshot.
pub async fn run_tree(
    config: &Config,
    fetcher: &Fetcher,
    storage: &LocalStorage,
    force: bool,
) -> Result<()> {
    let tree_path = storage.tree_path();
    if tree_path.exists() && !force {
        log::warn!(
            "Tree snapshot already exists at {}. Use --force to rebuild.",
            tree_path.display()
        );
        return Ok(());
    }

    let selectors = SiteSelectors::from_config(&config.site)?;
    let builder = TreeBuilder::new(config, fetcher, &selectors);

    log::info!("Discovering category tree from {}", config.site.base_url);
    let tree = builder.build().await?;
    storage.save_tree(&tree).await?;

    log::info!(
        "Tree saved to {}: {} nodes, {} with topics",
        tree_path.display(),
        tree.node_count(),
        tree.topic_bearing().len()
    );
    Ok(())
}
