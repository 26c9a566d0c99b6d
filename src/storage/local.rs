//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml                  # Optional archiver configuration
//! ├── tree.json                    # Category tree snapshot
//! ├── categories.json              # Category completion ledger
//! └── {cat-slug}-{hash8}/          # One directory per scraped category
//!     ├── topics.json              # Topic completion ledger
//!     └── {topic-slug}-{hash8}/
//!         └── topic.json           # Scraped posts for one topic
//! ```
//!
//! Directory names combine a title slug with a short hash of the unit's
//! URL, so categories or topics sharing a display title never collide.
//! All writes go through a temp-file-then-rename step, so readers never
//! observe a partially written ledger or artifact.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CategoryNode, CategoryRef, TopicRef, TopicResult};
use crate::storage::{CategoryLedger, TopicLedger};
use crate::utils::dir_key;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Path of the category tree snapshot.
    pub fn tree_path(&self) -> PathBuf {
        self.root_dir.join("tree.json")
    }

    fn categories_path(&self) -> PathBuf {
        self.root_dir.join("categories.json")
    }

    /// Directory holding one category's ledger and topic directories.
    pub fn category_dir(&self, category: &CategoryRef<'_>) -> PathBuf {
        self.root_dir.join(dir_key(category.title, category.url))
    }

    fn topic_ledger_path(&self, category: &CategoryRef<'_>) -> PathBuf {
        self.category_dir(category).join("topics.json")
    }

    fn topic_artifact_path(&self, category: &CategoryRef<'_>, topic_title: &str, topic_url: &str) -> PathBuf {
        self.category_dir(category)
            .join(dir_key(topic_title, topic_url))
            .join("topic.json")
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &bytes).await
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match self.read_bytes(path).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Persist the category tree snapshot.
    pub async fn save_tree(&self, tree: &CategoryNode) -> Result<()> {
        self.write_json(&self.tree_path(), tree).await
    }

    /// Load the category tree snapshot, if one has been built.
    pub async fn load_tree(&self) -> Result<Option<CategoryNode>> {
        self.read_json(&self.tree_path()).await
    }

    /// Load the category completion ledger (empty when absent).
    pub async fn load_category_ledger(&self) -> Result<CategoryLedger> {
        Ok(self
            .read_json(&self.categories_path())
            .await?
            .unwrap_or_default())
    }

    /// Persist the category completion ledger.
    pub async fn save_category_ledger(&self, ledger: &CategoryLedger) -> Result<()> {
        self.write_json(&self.categories_path(), ledger).await
    }

    /// Load one category's topic ledger (empty when absent).
    pub async fn load_topic_ledger(&self, category: &CategoryRef<'_>) -> Result<TopicLedger> {
        Ok(self
            .read_json(&self.topic_ledger_path(category))
            .await?
            .unwrap_or_default())
    }

    /// Persist one category's topic ledger.
    pub async fn save_topic_ledger(
        &self,
        category: &CategoryRef<'_>,
        ledger: &TopicLedger,
    ) -> Result<()> {
        self.write_json(&self.topic_ledger_path(category), ledger)
            .await
    }

    /// Persist the artifact for a fully scraped topic.
    pub async fn write_topic(
        &self,
        category: &CategoryRef<'_>,
        result: &TopicResult,
    ) -> Result<()> {
        let path = self.topic_artifact_path(category, &result.title, &result.url);
        self.write_json(&path, result).await
    }

    /// Load a previously scraped topic's artifact.
    pub async fn read_topic(
        &self,
        category: &CategoryRef<'_>,
        topic: &TopicRef,
    ) -> Result<Option<TopicResult>> {
        let path = self.topic_artifact_path(category, &topic.title, &topic.url);
        self.read_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use crate::storage::CategoryRecord;
    use chrono::Utc;
    use tempfile::TempDir;

    fn category() -> CategoryRef<'static> {
        CategoryRef {
            title: "General",
            url: "https://example.com/f1-general",
        }
    }

    #[tokio::test]
    async fn test_tree_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_tree().await.unwrap().is_none());

        let mut tree = CategoryNode::new("Root", "https://example.com/forum");
        tree.has_topics = true;
        storage.save_tree(&tree).await.unwrap();

        let loaded = storage.load_tree().await.unwrap().unwrap();
        assert_eq!(loaded, tree);
    }

    #[tokio::test]
    async fn test_category_ledger_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let mut ledger = storage.load_category_ledger().await.unwrap();
        assert!(ledger.is_empty());

        ledger.insert(
            "https://example.com/f1-general".to_string(),
            CategoryRecord {
                title: "General".to_string(),
                post_count: 7,
                scraped_at: Utc::now(),
            },
        );
        storage.save_category_ledger(&ledger).await.unwrap();

        let loaded = storage.load_category_ledger().await.unwrap();
        assert_eq!(loaded, ledger);
    }

    #[tokio::test]
    async fn test_topic_artifact_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let cat = category();

        let topic = TopicRef {
            title: "Hello thread".to_string(),
            url: "https://example.com/t1-hello".to_string(),
        };
        assert!(storage.read_topic(&cat, &topic).await.unwrap().is_none());

        let result = TopicResult {
            title: topic.title.clone(),
            url: topic.url.clone(),
            posts: vec![Post {
                username: "user1".to_string(),
                post_time: "Δευ Ιαν 01, 2024".to_string(),
                content: "Hello \n".to_string(),
            }],
        };
        storage.write_topic(&cat, &result).await.unwrap();

        let loaded = storage.read_topic(&cat, &topic).await.unwrap().unwrap();
        assert_eq!(loaded, result);
    }

    #[tokio::test]
    async fn test_duplicate_topic_titles_do_not_collide() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let cat = category();

        let first = TopicResult {
            title: "Same title".to_string(),
            url: "https://example.com/t1-same".to_string(),
            posts: vec![],
        };
        let second = TopicResult {
            title: "Same title".to_string(),
            url: "https://example.com/t2-same".to_string(),
            posts: vec![Post {
                username: "user2".to_string(),
                post_time: "Τρι Ιαν 02, 2024".to_string(),
                content: "second ".to_string(),
            }],
        };
        storage.write_topic(&cat, &first).await.unwrap();
        storage.write_topic(&cat, &second).await.unwrap();

        let first_ref = TopicRef {
            title: first.title.clone(),
            url: first.url.clone(),
        };
        let second_ref = TopicRef {
            title: second.title.clone(),
            url: second.url.clone(),
        };
        let loaded_first = storage.read_topic(&cat, &first_ref).await.unwrap().unwrap();
        let loaded_second = storage.read_topic(&cat, &second_ref).await.unwrap().unwrap();
        assert!(loaded_first.posts.is_empty());
        assert_eq!(loaded_second.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let cat = category();

        let mut ledger = TopicLedger::new();
        ledger.insert(
            "https://example.com/t1".to_string(),
            crate::storage::TopicRecord {
                title: "t1".to_string(),
                scraped_at: Utc::now(),
            },
        );
        storage.save_topic_ledger(&cat, &ledger).await.unwrap();

        ledger.insert(
            "https://example.com/t2".to_string(),
            crate::storage::TopicRecord {
                title: "t2".to_string(),
                scraped_at: Utc::now(),
            },
        );
        storage.save_topic_ledger(&cat, &ledger).await.unwrap();

        let loaded = storage.load_topic_ledger(&cat).await.unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
