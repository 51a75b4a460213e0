//! In-process store backed by `tokio::sync::RwLock`-guarded maps

use super::{Listing, Page, PostStore, UserStore};
use crate::error::{BlogError, Result};
use crate::models::{Post, PostContent, User, UserProfileUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<Uuid, Post>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    posts
}

fn listing<T>(items: Vec<T>, page: Page) -> Listing<T> {
    let total = items.len();
    Listing {
        items: page.apply(items),
        total,
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: Post) -> Result<()> {
        self.posts.write().await.insert(post.id, post);
        Ok(())
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list_posts(&self, filter: Option<&str>, page: Page) -> Result<Listing<Post>> {
        let needle = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        let posts = self.posts.read().await;
        let matched = posts
            .values()
            .filter(|post| needle.as_deref().map_or(true, |n| post.matches(n)))
            .cloned()
            .collect();

        Ok(listing(newest_first(matched), page))
    }

    async fn list_posts_by_user(&self, user_id: Uuid, page: Page) -> Result<Listing<Post>> {
        let posts = self.posts.read().await;
        let matched = posts
            .values()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect();

        Ok(listing(newest_first(matched), page))
    }

    async fn update_post_content(
        &self,
        id: Uuid,
        owner: Uuid,
        body: PostContent,
    ) -> Result<bool> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&id) {
            Some(post) if post.user_id == owner => {
                post.apply_content(body);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_likes(&self, id: Uuid) -> Result<bool> {
        let mut posts = self.posts.write().await;
        Ok(posts
            .get_mut(&id)
            .map(|post| post.likes = post.likes.saturating_add(1))
            .is_some())
    }

    async fn increment_views(&self, id: Uuid) -> Result<bool> {
        let mut posts = self.posts.write().await;
        Ok(posts
            .get_mut(&id)
            .map(|post| post.views = post.views.saturating_add(1))
            .is_some())
    }

    async fn delete_post(&self, id: Uuid, owner: Uuid) -> Result<bool> {
        let mut posts = self.posts.write().await;
        if posts.get(&id).is_some_and(|post| post.user_id == owner) {
            posts.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.user_account == user.user_account)
        {
            return Err(BlogError::AccountAlreadyExists);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_account(&self, account: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.user_account == account)
            .cloned())
    }

    async fn list_users(&self, page: Page) -> Result<Listing<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(listing(users, page))
    }

    async fn update_user_profile(&self, id: Uuid, update: UserProfileUpdate) -> Result<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                update.apply(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
