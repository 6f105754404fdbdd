use async_trait::async_trait;
use std::sync::Arc;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostChanges};

/// Result of an ownership-scoped update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(Post),
    /// No post has this id
    NotFound,
    /// The post exists but belongs to another author
    NotOwned,
}

/// Data-access operations over the post collection.
///
/// Ids arrive as raw strings from the request; an id that cannot name a post
/// (e.g. not a UUID) behaves like an absent one.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError>;

    /// Update the post matching both `id` and `author_id` in one conditional step.
    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, DatabaseError>;

    async fn find_first(&self, id: &str) -> Result<Option<Post>, DatabaseError>;

    /// Every post, in creation order
    async fn find_many(&self) -> Result<Vec<Post>, DatabaseError>;
}

/// Per-request handle to the data store, injected by the provisioning middleware
#[derive(Clone)]
pub struct StoreClient {
    store: Arc<dyn PostStore>,
    locator: Arc<str>,
}

impl StoreClient {
    pub fn new(store: Arc<dyn PostStore>, locator: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            locator: locator.into(),
        }
    }

    pub fn posts(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    /// Datasource locator this handle was provisioned from
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("locator", &super::manager::redact_locator(&self.locator))
            .finish()
    }
}

/// Builds a [`StoreClient`] from a datasource locator, once per request
#[async_trait]
pub trait StoreProvider: Send + Sync {
    async fn provision(&self, locator: &str) -> Result<StoreClient, DatabaseError>;
}
