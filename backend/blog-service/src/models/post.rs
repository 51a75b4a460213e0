use super::to_timestamp;
use crate::pb::PostInfo;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Blog post; `user_id` is the owner and never changes after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub views: u32,
    pub likes: u32,
    pub tags: Vec<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable part of a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostContent {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image: String,
}

impl Post {
    pub fn new(owner: Uuid, body: PostContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: owner,
            title: body.title,
            content: body.content,
            views: 0,
            likes: 0,
            tags: body.tags,
            image: body.image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_content(&mut self, body: PostContent) {
        self.title = body.title;
        self.content = body.content;
        self.tags = body.tags;
        self.image = body.image;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive match over title, content and tags
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Wire form, decorated with the author's display name
    pub fn to_proto(&self, user_name: &str) -> PostInfo {
        PostInfo {
            id: self.id.to_string(),
            user_id: self.user_id.to_string(),
            user_name: user_name.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            views: self.views,
            likes: self.likes,
            tags: self.tags.clone(),
            image: self.image.clone(),
            created_at: Some(to_timestamp(self.created_at)),
            updated_at: Some(to_timestamp(self.updated_at)),
        }
    }
}
