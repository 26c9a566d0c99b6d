// src/services/topics.rs

//! Topic listing and dispatch service.
//!
//! Paginates through a category's listing pages to enumerate each topic
//! exactly once, then runs the post extractor over all topics as a
//! bounded concurrent stream.

use std::collections::HashSet;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{CategoryRef, Config, TopicRef};
use crate::services::{Fetcher, PostExtractor, SiteSelectors};
use crate::storage::{CategoryRecord, LocalStorage, TopicRecord};
use crate::utils::{paginate, resolve};

/// Lists and scrapes all topics of topic-bearing categories.
pub struct TopicLister<'a> {
    config: &'a Config,
    fetcher: &'a Fetcher,
    storage: &'a LocalStorage,
    selectors: &'a SiteSelectors,
}

impl<'a> TopicLister<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a Fetcher,
        storage: &'a LocalStorage,
        selectors: &'a SiteSelectors,
    ) -> Self {
        Self {
            config,
            fetcher,
            storage,
            selectors,
        }
    }

    /// Scrape one category: list its topics, extract them concurrently,
    /// and record completion. Returns the category's total post count.
    ///
    /// A ledgered category is skipped without any fetches, returning the
    /// recorded count. The category record is written once every topic
    /// has completed or failed; failed topics are logged and carry no
    /// topic record, cancellation aborts without a category record.
    pub async fn scrape_category(&self, category: CategoryRef<'_>) -> Result<usize> {
        let mut categories = self.storage.load_category_ledger().await?;
        if let Some(record) = categories.get(category.url) {
            log::info!(
                "Already scraped category {} at {}, skipping",
                category.title,
                record.scraped_at
            );
            return Ok(record.post_count);
        }

        log::info!("Scraping {} topics: url = {}", category.title, category.url);
        let topics = self.list_topics(&category).await?;
        log::info!("Found {} topics to scrape from {}", topics.len(), category.title);

        let mut topic_ledger = self.storage.load_topic_ledger(&category).await?;
        let extractor = PostExtractor::new(
            self.config,
            self.fetcher,
            self.storage,
            self.selectors,
            category,
            topic_ledger.clone(),
        );

        let width = self.config.crawler.max_concurrent.max(1);
        log::info!(
            "Starting concurrent scraping of {} topics with width {width}",
            topics.len()
        );

        let extractor_ref = &extractor;
        let mut results = stream::iter(&topics)
            .map(|topic| async move { (topic, extractor_ref.extract(topic).await) })
            .buffer_unordered(width);

        let mut completed = 0usize;
        let mut failed = 0usize;
        let mut total_posts = 0usize;
        while let Some((topic, result)) = results.next().await {
            match result {
                Ok(scraped) => {
                    total_posts += scraped.posts.len();
                    completed += 1;
                    topic_ledger
                        .entry(topic.url.clone())
                        .or_insert_with(|| TopicRecord {
                            title: topic.title.clone(),
                            scraped_at: Utc::now(),
                        });
                    self.storage
                        .save_topic_ledger(&category, &topic_ledger)
                        .await?;
                    if completed % 10 == 0 || completed == topics.len() {
                        log::info!(
                            "Scraped {completed}/{} topics from {}",
                            topics.len(),
                            category.title
                        );
                    }
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    failed += 1;
                    log::error!("Error scraping topic {}: {e}", topic.title);
                }
            }
        }

        log::info!(
            "Completed scraping {completed} topics from {} with {total_posts} posts",
            category.title
        );
        if failed > 0 {
            log::warn!("{failed} topics failed in {}", category.title);
        }

        categories.insert(
            category.url.to_string(),
            CategoryRecord {
                title: category.title.to_string(),
                post_count: total_posts,
                scraped_at: Utc::now(),
            },
        );
        self.storage.save_category_ledger(&categories).await?;

        Ok(total_posts)
    }

    /// Enumerate all topics of a category, deduplicated by URL.
    ///
    /// Pagination ends at the first page with no listing container, an
    /// empty listing, or a listing of only already-seen topics.
    async fn list_topics(&self, category: &CategoryRef<'_>) -> Result<Vec<TopicRef>> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();
        let mut offset = 0;
        loop {
            let page_url = paginate(category.url, &self.config.site.forum_page_marker, offset);
            log::info!(
                "Fetching listing with offset={offset}: {} , {page_url}",
                category.title
            );

            let links = {
                let document = self.fetcher.fetch(&page_url).await?;
                self.collect_listing(&document, category.url)
            };

            let Some(links) = links else {
                log::info!("No topic list found at offset={offset}");
                break;
            };
            if links.is_empty() {
                log::info!("Reached the last page at offset={offset}, it has no topics");
                break;
            }

            let mut new_topics_found = false;
            for (title, url) in links {
                if seen.insert(url.clone()) {
                    topics.push(TopicRef { title, url });
                    new_topics_found = true;
                }
            }
            if !new_topics_found {
                log::info!("No new topics at offset={offset}, ending loop to avoid repetition");
                break;
            }

            offset += self.config.site.forum_page_size;
        }
        Ok(topics)
    }

    /// Topic links inside the listing container, resolved to absolute
    /// URLs. None when the page has no listing container at all.
    fn collect_listing(&self, document: &Html, base_url: &str) -> Option<Vec<(String, String)>> {
        let container = document.select(&self.selectors.topic_list).next()?;
        Some(
            container
                .select(&self.selectors.topic_link)
                .filter_map(|anchor| {
                    let href = anchor.value().attr("href")?;
                    let title = anchor.text().collect::<String>().trim().to_string();
                    Some((title, resolve(base_url, href)?))
                })
                .collect(),
        )
    }
}
