//! Service layer for the archiver application.
//!
//! This module contains the business logic for:
//! - Retrying page fetches (`Fetcher`)
//! - Category tree discovery (`TreeBuilder`)
//! - Topic listing and dispatch (`TopicLister`)
//! - Post extraction (`PostExtractor`)
//! - Rich-content flattening (`content_to_text`)

mod content;
mod fetch;
mod posts;
mod selectors;
mod topics;
mod tree;

pub use content::content_to_text;
pub use fetch::Fetcher;
pub use posts::PostExtractor;
pub use selectors::SiteSelectors;
pub use topics::TopicLister;
pub use tree::TreeBuilder;
