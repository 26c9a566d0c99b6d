// src/models/topic.rs

//! Topic and post data structures.

use serde::{Deserialize, Serialize};

/// A topic discovered on a category listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRef {
    pub title: String,
    pub url: String,
}

/// One user-authored message within a topic.
///
/// `post_time` stays in the site's native free-text format; it is not
/// parsed into a structured timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub username: String,
    pub post_time: String,
    pub content: String,
}

/// The persisted artifact for a fully scraped topic.
///
/// Posts are in page order, ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicResult {
    pub title: String,
    pub url: String,
    pub posts: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_shape() {
        let result = TopicResult {
            title: "Topic".to_string(),
            url: "https://example.com/t1-topic".to_string(),
            posts: vec![Post {
                username: "user1".to_string(),
                post_time: "Δευ Ιαν 01, 2024".to_string(),
                content: "Hello \n".to_string(),
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["posts"][0]["username"], "user1");
        assert_eq!(json["posts"][0]["post_time"], "Δευ Ιαν 01, 2024");

        let restored: TopicResult = serde_json::from_value(json).unwrap();
        assert_eq!(restored, result);
    }
}
