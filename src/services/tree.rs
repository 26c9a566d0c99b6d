// src/services/tree.rs

//! Category tree discovery service.
//!
//! Walks the forum's category hierarchy depth-first from the configured
//! root, marking each node as topic-bearing when its listing page holds
//! a topic link. The site's link graph is finite, so the walk needs no
//! cycle detection.

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::error::Result;
use crate::models::{CategoryNode, Config};
use crate::services::{Fetcher, SiteSelectors};
use crate::utils::resolve;

/// Builds the category tree from the configured root URL.
pub struct TreeBuilder<'a> {
    config: &'a Config,
    fetcher: &'a Fetcher,
    selectors: &'a SiteSelectors,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a Config, fetcher: &'a Fetcher, selectors: &'a SiteSelectors) -> Self {
        Self {
            config,
            fetcher,
            selectors,
        }
    }

    /// Discover the whole tree starting at the root category.
    pub async fn build(&self) -> Result<CategoryNode> {
        self.build_node(self.config.site.base_url.clone(), "Root".to_string())
            .await
    }

    fn build_node(&self, url: String, title: String) -> LocalBoxFuture<'_, Result<CategoryNode>> {
        async move {
            let (has_topics, subcategories) = {
                let document = self.fetcher.fetch(&url).await?;
                let has_topics = document.select(&self.selectors.topic_link).next().is_some();
                let subcategories: Vec<(String, String)> = document
                    .select(&self.selectors.category_link)
                    .filter_map(|anchor| {
                        let href = anchor.value().attr("href")?;
                        let title = anchor.text().collect::<String>().trim().to_string();
                        // Subcategory links resolve against the fixed base URL.
                        Some((title, resolve(&self.config.site.base_url, href)?))
                    })
                    .collect();
                (has_topics, subcategories)
            };

            let mut node = CategoryNode::new(title, url);
            node.has_topics = has_topics;

            for (sub_title, sub_url) in subcategories {
                log::info!("Visiting subcategory: {sub_title} -> {sub_url}");
                let child = self.build_node(sub_url, sub_title).await?;
                node.children.push(child);
            }

            Ok(node)
        }
        .boxed_local()
    }
}
