// src/services/selectors.rs

//! Parsed site grammar: the CSS selectors and the author-line pattern
//! configured in [`SiteConfig`], compiled once per run.

use regex::Regex;
use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::SiteConfig;

pub struct SiteSelectors {
    pub category_link: Selector,
    pub topic_link: Selector,
    pub topic_list: Selector,
    pub post: Selector,
    pub author: Selector,
    pub content: Selector,
    pub author_re: Regex,
}

impl SiteSelectors {
    pub fn from_config(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            category_link: parse_selector(&site.category_link_selector)?,
            topic_link: parse_selector(&site.topic_link_selector)?,
            topic_list: parse_selector(&site.topic_list_selector)?,
            post: parse_selector(&site.post_selector)?,
            author: parse_selector(&site.author_selector)?,
            content: parse_selector(&site.content_selector)?,
            author_re: Regex::new(&site.author_pattern).map_err(|e| {
                AppError::config(format!(
                    "invalid author_pattern '{}': {e}",
                    site.author_pattern
                ))
            })?,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
