/// User RPCs
use super::{caller_id, AppState};
use crate::db::{Page, UserStore};
use crate::error::BlogError;
use crate::models::{normalize_account, parse_id, User, UserProfileUpdate};
use crate::pb::user_server::User as UserService;
use crate::pb::*;
use crypto_core::hash_password;
use tonic::{Request, Response, Status};
use tracing::info;

#[derive(Clone)]
pub struct UserHandler {
    state: AppState,
}

impl UserHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl UserService for UserHandler {
    /// Register an account; the password is stored only as an Argon2id hash
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> std::result::Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();

        let account = normalize_account(&req.user_account).to_string();
        if account.is_empty() {
            return Err(BlogError::InvalidArgument("user_account must not be empty".into()).into());
        }

        let password_hash = hash_password(&req.password).map_err(BlogError::from)?;
        let user_name = match req.user_name.trim() {
            "" => account.clone(),
            name => name.to_string(),
        };

        let user = User::new(user_name, account, password_hash, req.email);
        let id = user.id;
        self.state.users.insert_user(user).await?;

        info!(user_id = %id, "user created");
        Ok(Response::new(CreateUserResponse {
            user_id: id.to_string(),
        }))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> std::result::Result<Response<GetUserResponse>, Status> {
        let id = parse_id(&request.get_ref().id, "id")?;

        let user = self
            .state
            .users
            .find_user(id)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        Ok(Response::new(GetUserResponse {
            user: Some(user.to_proto()),
        }))
    }

    async fn list_user(
        &self,
        request: Request<ListUserRequest>,
    ) -> std::result::Result<Response<ListUserResponse>, Status> {
        let req = request.into_inner();
        let listing = self
            .state
            .users
            .list_users(Page::new(req.limit, req.skip))
            .await?;

        Ok(Response::new(ListUserResponse {
            users: listing.items.iter().map(User::to_proto).collect(),
            total: listing.total as i64,
        }))
    }

    /// Update the caller's own profile
    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> std::result::Result<Response<UpdateUserResponse>, Status> {
        let caller = caller_id(&request)?;
        let update = UserProfileUpdate::from(request.into_inner());

        if !self.state.users.update_user_profile(caller, update).await? {
            return Err(BlogError::UserNotFound.into());
        }

        info!(user_id = %caller, "user profile updated");
        Ok(Response::new(UpdateUserResponse {}))
    }

    /// Delete an account; callers may only delete their own
    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> std::result::Result<Response<DeleteUserResponse>, Status> {
        let caller = caller_id(&request)?;
        let id = parse_id(&request.get_ref().id, "id")?;

        if id != caller {
            return Err(
                BlogError::PermissionDenied("cannot delete another account".into()).into(),
            );
        }

        if !self.state.users.delete_user(id).await? {
            return Err(BlogError::UserNotFound.into());
        }

        info!(user_id = %id, "user deleted");
        Ok(Response::new(DeleteUserResponse {}))
    }
}
