/// Storage layer for blog-service
///
/// Handlers depend on the `PostStore` and `UserStore` traits only. The binary
/// and the tests run on [`MemoryStore`].
pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Post, PostContent, User, UserProfileUpdate};
use async_trait::async_trait;
use uuid::Uuid;

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub skip: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 100;

    /// Normalise wire values: non-positive limit uses the default, limit is
    /// capped, negative skip counts as zero
    pub fn new(limit: i64, skip: i64) -> Self {
        let limit = if limit <= 0 {
            Self::DEFAULT_LIMIT
        } else {
            (limit as u64).min(Self::MAX_LIMIT as u64) as usize
        };
        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);

        Self { limit, skip }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// One page of results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: Post) -> Result<()>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>>;

    /// Newest first; `filter` is a case-insensitive text match
    async fn list_posts(&self, filter: Option<&str>, page: Page) -> Result<Listing<Post>>;

    async fn list_posts_by_user(&self, user_id: Uuid, page: Page) -> Result<Listing<Post>>;

    /// Update only if `owner` owns the post; `false` when no row matched
    async fn update_post_content(&self, id: Uuid, owner: Uuid, body: PostContent)
        -> Result<bool>;

    async fn increment_likes(&self, id: Uuid) -> Result<bool>;

    async fn increment_views(&self, id: Uuid) -> Result<bool>;

    /// Delete only if `owner` owns the post; `false` when no row matched
    async fn delete_post(&self, id: Uuid, owner: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AccountAlreadyExists` when the account name is taken
    async fn insert_user(&self, user: User) -> Result<()>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_user_by_account(&self, account: &str) -> Result<Option<User>>;

    /// Oldest first
    async fn list_users(&self, page: Page) -> Result<Listing<User>>;

    async fn update_user_profile(&self, id: Uuid, update: UserProfileUpdate) -> Result<bool>;

    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}
