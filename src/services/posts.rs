// src/services/posts.rs

//! Post extraction service.
//!
//! Paginates through one topic's pages, parses each post's author line
//! and body, and persists the full post sequence once the topic's last
//! page is reached.

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::models::{CategoryRef, Config, Post, TopicRef, TopicResult};
use crate::services::content::content_to_text;
use crate::services::{Fetcher, SiteSelectors};
use crate::storage::{LocalStorage, TopicLedger};
use crate::utils::{normalize_line, paginate};

/// Extracts all posts of a topic within one category.
pub struct PostExtractor<'a> {
    config: &'a Config,
    fetcher: &'a Fetcher,
    storage: &'a LocalStorage,
    selectors: &'a SiteSelectors,
    category: CategoryRef<'a>,
    /// Snapshot of the category's topic ledger, for skip decisions.
    done: TopicLedger,
}

impl<'a> PostExtractor<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a Fetcher,
        storage: &'a LocalStorage,
        selectors: &'a SiteSelectors,
        category: CategoryRef<'a>,
        done: TopicLedger,
    ) -> Self {
        Self {
            config,
            fetcher,
            storage,
            selectors,
            category,
            done,
        }
    }

    /// Extract every post of one topic.
    ///
    /// A ledgered topic is returned from its stored artifact without any
    /// fetches. Otherwise pages are walked from offset 0 until a page
    /// with no post containers signals the end; only then is the result
    /// persisted. An interrupted topic restarts from offset 0 next run.
    pub async fn extract(&self, topic: &TopicRef) -> Result<TopicResult> {
        if self.done.contains_key(&topic.url) {
            if let Some(stored) = self.storage.read_topic(&self.category, topic).await? {
                log::debug!("Already scraped topic {}, skipping", topic.title);
                return Ok(stored);
            }
            log::warn!(
                "Ledger entry without artifact for {}; re-scraping",
                topic.url
            );
        }

        let page_size = self.config.site.topic_page_size;
        let mut posts = Vec::new();
        let mut offset = 0;
        loop {
            let page_url = paginate(&topic.url, &self.config.site.topic_page_marker, offset);
            log::debug!("Fetching page {}: {}", offset / page_size + 1, topic.title);

            let (containers, page_posts) = {
                let document = self.fetcher.fetch(&page_url).await?;
                self.collect_posts(&document)
            };

            if containers == 0 {
                log::info!("Completed scraping {} at offset {offset}", topic.title);
                break;
            }

            log::debug!(
                "Found {containers} posts on page {} of {}",
                offset / page_size + 1,
                topic.title
            );
            posts.extend(page_posts);
            offset += page_size;
        }

        let result = TopicResult {
            title: topic.title.clone(),
            url: topic.url.clone(),
            posts,
        };
        self.storage.write_topic(&self.category, &result).await?;
        Ok(result)
    }

    /// Parse all post containers on one page.
    ///
    /// Returns the container count alongside the extracted posts; the
    /// count drives pagination, since sponsored or malformed posts are
    /// dropped without ending the page walk.
    fn collect_posts(&self, document: &Html) -> (usize, Vec<Post>) {
        let mut containers = 0;
        let mut posts = Vec::new();

        for post_el in document.select(&self.selectors.post) {
            containers += 1;

            let Some(author_el) = post_el.select(&self.selectors.author).next() else {
                log::error!("Post without an author line; skipping");
                continue;
            };
            let line = normalize_line(&author_el.text().collect::<String>());
            let Some((username, post_time)) = parse_author_line(&self.selectors.author_re, &line)
            else {
                log::error!("No match found for time and username in '{line}'; skipping post");
                continue;
            };

            if username == self.config.site.sponsored_author {
                log::debug!("Skipping sponsored post");
                continue;
            }

            let Some(content_el) = post_el.select(&self.selectors.content).next() else {
                log::error!("Post by {username} has no content node; skipping");
                continue;
            };

            posts.push(Post {
                username,
                post_time,
                content: content_to_text(content_el),
            });
        }

        (containers, posts)
    }
}

/// Split a normalized author line into (username, post time).
fn parse_author_line(re: &Regex, line: &str) -> Option<(String, String)> {
    let caps = re.captures(line)?;
    let username = caps.get(1)?.as_str().to_string();
    let post_time = caps.get(2)?.as_str().to_string();
    Some((username, post_time))
}
