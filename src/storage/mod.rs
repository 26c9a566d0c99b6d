//! Persistence layer for the archiver.
//!
//! Completion ledgers and scraped artifacts are plain JSON files under a
//! single data directory; see [`LocalStorage`] for the layout.

mod local;

pub use local::LocalStorage;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion marker for one fully scraped category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Display title at scrape time
    pub title: String,

    /// Posts gathered across the category's topics
    pub post_count: usize,

    /// When the category finished
    pub scraped_at: DateTime<Utc>,
}

/// Completion marker for one fully scraped topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRecord {
    /// Display title at scrape time
    pub title: String,

    /// When the topic finished
    pub scraped_at: DateTime<Utc>,
}

/// Ledgers are keyed by canonical URL; titles are display data only.
pub type CategoryLedger = BTreeMap<String, CategoryRecord>;
pub type TopicLedger = BTreeMap<String, TopicRecord>;
