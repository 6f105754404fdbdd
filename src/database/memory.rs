// database/memory.rs - In-process post store
//
// Backs the `--in-memory` server mode and the test suites. Semantics match the
// Postgres store: ids are v4 UUIDs, updates are ownership-scoped, and listing is
// in creation order. Posts are only ever appended, so the Vec itself is that order;
// `created_at` is informational and never used for sorting.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostChanges};
use super::store::{PostStore, StoreClient, StoreProvider, UpdateOutcome};

#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let created = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: Utc::now(),
        };

        self.posts.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        // Check and write under one lock, like the single conditional UPDATE
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if post.author_id != author_id {
            return Ok(UpdateOutcome::NotOwned);
        }

        post.title = changes.title;
        post.content = changes.content;
        Ok(UpdateOutcome::Updated(post.clone()))
    }

    async fn find_first(&self, id: &str) -> Result<Option<Post>, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self) -> Result<Vec<Post>, DatabaseError> {
        Ok(self.posts.read().await.clone())
    }
}

/// Hands every request a client over the same shared in-memory store
#[derive(Default, Clone)]
pub struct MemoryStoreProvider {
    store: Arc<MemoryPostStore>,
}

impl MemoryStoreProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn provision(&self, locator: &str) -> Result<StoreClient, DatabaseError> {
        Ok(StoreClient::new(self.store.clone(), locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(author: &str, title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "body".to_string(),
            author_id: author.to_string(),
        }
    }

    fn changes(title: &str) -> PostChanges {
        PostChanges {
            title: title.to_string(),
            content: "edited".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryPostStore::new();
        let created = store.create(new_post("u1", "A")).await.unwrap();

        let found = store.find_first(&created.id.to_string()).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn find_missing_or_malformed_id_is_none() {
        let store = MemoryPostStore::new();
        store.create(new_post("u1", "A")).await.unwrap();

        assert!(store.find_first(&Uuid::new_v4().to_string()).await.unwrap().is_none());
        assert!(store.find_first("not-a-uuid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owner_update_changes_content_only() {
        let store = MemoryPostStore::new();
        let created = store.create(new_post("u1", "A")).await.unwrap();

        let outcome = store
            .update_owned(&created.id.to_string(), "u1", changes("A2"))
            .await
            .unwrap();

        let post = match outcome {
            UpdateOutcome::Updated(post) => post,
            other => panic!("expected update, got {:?}", other),
        };
        assert_eq!(post.id, created.id);
        assert_eq!(post.author_id, "u1");
        assert_eq!(post.title, "A2");
        assert_eq!(post.content, "edited");
        assert_eq!(post.created_at, created.created_at);
    }

    #[tokio::test]
    async fn non_owner_update_is_refused_and_leaves_post_untouched() {
        let store = MemoryPostStore::new();
        let created = store.create(new_post("u1", "A")).await.unwrap();
        let id = created.id.to_string();

        let outcome = store.update_owned(&id, "u2", changes("hijack")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::NotOwned);

        let stored = store.find_first(&id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = MemoryPostStore::new();
        let outcome = store
            .update_owned(&Uuid::new_v4().to_string(), "u1", changes("x"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);

        let outcome = store.update_owned("42", "u1", changes("x")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
    }

    #[tokio::test]
    async fn find_many_returns_everything_in_creation_order() {
        let store = MemoryPostStore::new();
        let a = store.create(new_post("u1", "A")).await.unwrap();
        let b = store.create(new_post("u2", "B")).await.unwrap();

        let all = store.find_many().await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn find_many_keeps_insertion_order_when_clock_steps_back() {
        let store = MemoryPostStore::new();
        let first = store.create(new_post("u1", "first")).await.unwrap();

        // A later insert stamped before the earlier one, as after a wall-clock step back
        let mut second = store.create(new_post("u1", "second")).await.unwrap();
        second.created_at = first.created_at - chrono::Duration::minutes(5);
        store.posts.write().await[1] = second;

        let all = store.find_many().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn provider_shares_one_store_across_requests() {
        let provider = MemoryStoreProvider::new();
        let first = provider.provision("memory://").await.unwrap();
        let created = first.posts().create(new_post("u1", "A")).await.unwrap();

        let second = provider.provision("memory://").await.unwrap();
        let found = second.posts().find_first(&created.id.to_string()).await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(created.id));
    }
}
