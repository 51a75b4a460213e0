/// Session RPCs
use super::AppState;
use crate::pb::session_server::Session as SessionService;
use crate::pb::{LoginRequest, LoginResponse};
use tonic::{Request, Response, Status};

#[derive(Clone)]
pub struct SessionHandler {
    state: AppState,
}

impl SessionHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl SessionService for SessionHandler {
    /// Exchange account credentials for a bearer token
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> std::result::Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let session = self
            .state
            .sessions
            .login(&req.user_account, &req.user_password)
            .await?;

        Ok(Response::new(LoginResponse {
            token: session.token,
            user_id: session.subject_id,
        }))
    }
}
