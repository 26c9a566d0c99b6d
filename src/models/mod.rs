// src/models/mod.rs

//! Domain models for the archiver application.

mod category;
mod config;
mod topic;

// Re-export all public types
pub use category::{CategoryNode, CategoryRef};
pub use config::{Config, CrawlerConfig, SiteConfig};
pub use topic::{Post, TopicRef, TopicResult};
