use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A blog post row. `author_id` is set from the authenticated caller on insert and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Fields an owner may change on an existing post
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let post = Post {
            id: Uuid::nil(),
            title: "A".to_string(),
            content: "B".to_string(),
            author_id: "u1".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["authorId"], json!("u1"));
        assert_eq!(value["id"], json!("00000000-0000-0000-0000-000000000000"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("author_id").is_none());
    }
}
