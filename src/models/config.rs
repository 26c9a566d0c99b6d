//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Forum template markers and selectors
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.site.forum_page_size == 0 || self.site.topic_page_size == 0 {
            return Err(AppError::config("site page sizes must be > 0"));
        }
        if self.site.forum_page_marker.is_empty() || self.site.topic_page_marker.is_empty() {
            return Err(AppError::config("site pagination markers must be non-empty"));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::config(format!("site.base_url is invalid: {e}")))?;
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between fetch retries in seconds
    #[serde(default = "defaults::retry_interval")]
    pub retry_interval_secs: u64,

    /// Maximum concurrent topic extractions
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Host probed to decide whether the network is reachable
    #[serde(default = "defaults::probe_host")]
    pub probe_host: String,

    /// Port probed on `probe_host`
    #[serde(default = "defaults::probe_port")]
    pub probe_port: u16,

    /// Connect timeout for the reachability probe in seconds
    #[serde(default = "defaults::probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retry_interval_secs: defaults::retry_interval(),
            max_concurrent: defaults::max_concurrent(),
            probe_host: defaults::probe_host(),
            probe_port: defaults::probe_port(),
            probe_timeout_secs: defaults::probe_timeout(),
        }
    }
}

/// Markers and selectors describing the forum template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root category URL; subcategory links are resolved against it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Anchor selector for subcategory links
    #[serde(default = "defaults::category_link_selector")]
    pub category_link_selector: String,

    /// Anchor selector for topic links
    #[serde(default = "defaults::topic_link_selector")]
    pub topic_link_selector: String,

    /// Container holding the topic listing on a category page
    #[serde(default = "defaults::topic_list_selector")]
    pub topic_list_selector: String,

    /// Container for a single post
    #[serde(default = "defaults::post_selector")]
    pub post_selector: String,

    /// Author/time line inside a post container
    #[serde(default = "defaults::author_selector")]
    pub author_selector: String,

    /// Rich-content body inside a post container
    #[serde(default = "defaults::content_selector")]
    pub content_selector: String,

    /// Pattern extracting (username, post time) from an author line
    #[serde(default = "defaults::author_pattern")]
    pub author_pattern: String,

    /// Username marking a synthetic sponsored post
    #[serde(default = "defaults::sponsored_author")]
    pub sponsored_author: String,

    /// URL segment at which the listing page offset is substituted
    #[serde(default = "defaults::forum_page_marker")]
    pub forum_page_marker: String,

    /// URL segment at which the topic page offset is substituted
    #[serde(default = "defaults::topic_page_marker")]
    pub topic_page_marker: String,

    /// Topics per listing page
    #[serde(default = "defaults::forum_page_size")]
    pub forum_page_size: usize,

    /// Posts per topic page
    #[serde(default = "defaults::topic_page_size")]
    pub topic_page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            category_link_selector: defaults::category_link_selector(),
            topic_link_selector: defaults::topic_link_selector(),
            topic_list_selector: defaults::topic_list_selector(),
            post_selector: defaults::post_selector(),
            author_selector: defaults::author_selector(),
            content_selector: defaults::content_selector(),
            author_pattern: defaults::author_pattern(),
            sponsored_author: defaults::sponsored_author(),
            forum_page_marker: defaults::forum_page_marker(),
            topic_page_marker: defaults::topic_page_marker(),
            forum_page_size: defaults::forum_page_size(),
            topic_page_size: defaults::topic_page_size(),
        }
    }
}

mod defaults {
    pub(super) fn user_agent() -> String {
        "Mozilla/5.0".to_string()
    }

    pub(super) fn timeout() -> u64 {
        30
    }

    pub(super) fn retry_interval() -> u64 {
        3
    }

    pub(super) fn max_concurrent() -> usize {
        30
    }

    pub(super) fn probe_host() -> String {
        "8.8.8.8".to_string()
    }

    pub(super) fn probe_port() -> u16 {
        53
    }

    pub(super) fn probe_timeout() -> u64 {
        3
    }

    pub(super) fn base_url() -> String {
        "https://greekgamerz.forumgreek.com/forum".to_string()
    }

    pub(super) fn category_link_selector() -> String {
        "a.forumtitle".to_string()
    }

    pub(super) fn topic_link_selector() -> String {
        "a.topictitle".to_string()
    }

    pub(super) fn topic_list_selector() -> String {
        "ul.topiclist.topics.bg_none".to_string()
    }

    pub(super) fn post_selector() -> String {
        "div.postbody".to_string()
    }

    pub(super) fn author_selector() -> String {
        "p.author".to_string()
    }

    pub(super) fn content_selector() -> String {
        "div.content.clearfix".to_string()
    }

    pub(super) fn author_pattern() -> String {
        r"από\s+(\S+)\s+(.+)$".to_string()
    }

    pub(super) fn sponsored_author() -> String {
        "Χορηγούμενο".to_string()
    }

    pub(super) fn forum_page_marker() -> String {
        "-forum".to_string()
    }

    pub(super) fn topic_page_marker() -> String {
        "-topic".to_string()
    }

    pub(super) fn forum_page_size() -> usize {
        50
    }

    pub(super) fn topic_page_size() -> usize {
        25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            max_concurrent = 4

            [site]
            base_url = "https://example.com/forum"
            "#,
        )
        .unwrap();
        assert_eq!(config.crawler.max_concurrent, 4);
        assert_eq!(config.crawler.user_agent, "Mozilla/5.0");
        assert_eq!(config.site.base_url, "https://example.com/forum");
        assert_eq!(config.site.forum_page_size, 50);
        assert_eq!(config.site.topic_page_size, 25);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
