/// Post RPCs
///
/// Reads are public. Every mutation is scoped to the verified caller: the
/// owner predicate comes from the gate's identity, never from the payload,
/// and a post owned by someone else is reported as not found.
use super::{caller_id, AppState};
use crate::db::{Listing, Page, PostStore, UserStore};
use crate::error::BlogError;
use crate::models::{parse_id, Post, PostContent};
use crate::pb::post_server::Post as PostService;
use crate::pb::*;
use std::collections::HashMap;
use tonic::{Request, Response, Status};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostHandler {
    state: AppState,
}

impl PostHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Wire form of each post with its author's display name
    async fn decorate(&self, posts: Vec<Post>) -> crate::Result<Vec<PostInfo>> {
        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut infos = Vec::with_capacity(posts.len());

        for post in posts {
            if !names.contains_key(&post.user_id) {
                let name = self
                    .state
                    .users
                    .find_user(post.user_id)
                    .await?
                    .map(|user| user.user_name)
                    .unwrap_or_default();
                names.insert(post.user_id, name);
            }
            let name = names.get(&post.user_id).map(String::as_str).unwrap_or("");
            infos.push(post.to_proto(name));
        }

        Ok(infos)
    }

    async fn page_of(&self, listing: Listing<Post>) -> crate::Result<(Vec<PostInfo>, i64)> {
        let total = listing.total as i64;
        Ok((self.decorate(listing.items).await?, total))
    }
}

#[tonic::async_trait]
impl PostService for PostHandler {
    async fn get_post(
        &self,
        request: Request<GetPostRequest>,
    ) -> std::result::Result<Response<GetPostResponse>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id, "id")?;

        let post = self
            .state
            .posts
            .find_post(id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let mut infos = self.decorate(vec![post]).await?;
        Ok(Response::new(GetPostResponse { post: infos.pop() }))
    }

    async fn list_post(
        &self,
        request: Request<ListPostRequest>,
    ) -> std::result::Result<Response<ListPostResponse>, Status> {
        let req = request.into_inner();
        let page = Page::new(req.limit, req.skip);

        let listing = self
            .state
            .posts
            .list_posts(req.filter.as_deref(), page)
            .await?;
        let (posts, total) = self.page_of(listing).await?;

        Ok(Response::new(ListPostResponse { posts, total }))
    }

    async fn list_post_by_user_id(
        &self,
        request: Request<ListPostByUserIdRequest>,
    ) -> std::result::Result<Response<ListPostByUserIdResponse>, Status> {
        let req = request.into_inner();
        let user_id = parse_id(&req.user_id, "user_id")?;
        let page = Page::new(req.limit, req.skip);

        let listing = self.state.posts.list_posts_by_user(user_id, page).await?;
        let (posts, total) = self.page_of(listing).await?;

        Ok(Response::new(ListPostByUserIdResponse { posts, total }))
    }

    async fn create_post(
        &self,
        request: Request<CreatePostRequest>,
    ) -> std::result::Result<Response<CreatePostResponse>, Status> {
        let owner = caller_id(&request)?;
        let req = request.into_inner();

        if req.title.trim().is_empty() {
            return Err(BlogError::InvalidArgument("title must not be empty".to_string()).into());
        }

        let post = Post::new(
            owner,
            PostContent {
                title: req.title,
                content: req.content,
                tags: req.tags,
                image: req.image,
            },
        );
        let id = post.id;
        self.state.posts.insert_post(post).await?;

        info!(post_id = %id, user_id = %owner, "post created");
        Ok(Response::new(CreatePostResponse { id: id.to_string() }))
    }

    async fn update_post_content(
        &self,
        request: Request<UpdatePostContentRequest>,
    ) -> std::result::Result<Response<UpdatePostContentResponse>, Status> {
        let owner = caller_id(&request)?;
        let req = request.into_inner();
        let id = parse_id(&req.id, "id")?;

        if req.title.trim().is_empty() {
            return Err(BlogError::InvalidArgument("title must not be empty".to_string()).into());
        }

        let body = PostContent {
            title: req.title,
            content: req.content,
            tags: req.tags,
            image: req.image,
        };
        if !self.state.posts.update_post_content(id, owner, body).await? {
            return Err(BlogError::PostNotFound.into());
        }

        info!(post_id = %id, user_id = %owner, "post content updated");
        Ok(Response::new(UpdatePostContentResponse {}))
    }

    async fn update_post_likes(
        &self,
        request: Request<UpdatePostLikesRequest>,
    ) -> std::result::Result<Response<UpdatePostLikesResponse>, Status> {
        let caller = caller_id(&request)?;
        let id = parse_id(&request.get_ref().id, "id")?;

        if !self.state.posts.increment_likes(id).await? {
            return Err(BlogError::PostNotFound.into());
        }

        debug!(post_id = %id, user_id = %caller, "post liked");
        Ok(Response::new(UpdatePostLikesResponse {}))
    }

    async fn update_post_views(
        &self,
        request: Request<UpdatePostViewsRequest>,
    ) -> std::result::Result<Response<UpdatePostViewsResponse>, Status> {
        let caller = caller_id(&request)?;
        let id = parse_id(&request.get_ref().id, "id")?;

        if !self.state.posts.increment_views(id).await? {
            return Err(BlogError::PostNotFound.into());
        }

        debug!(post_id = %id, user_id = %caller, "post viewed");
        Ok(Response::new(UpdatePostViewsResponse {}))
    }

    async fn delete_post(
        &self,
        request: Request<DeletePostRequest>,
    ) -> std::result::Result<Response<DeletePostResponse>, Status> {
        let owner = caller_id(&request)?;
        let id = parse_id(&request.get_ref().id, "id")?;

        if !self.state.posts.delete_post(id, owner).await? {
            return Err(BlogError::PostNotFound.into());
        }

        info!(post_id = %id, user_id = %owner, "post deleted");
        Ok(Response::new(DeletePostResponse {}))
    }
}
