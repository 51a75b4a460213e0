/// gRPC server module for blog-service
///
/// Exports:
/// - `PostHandler`, `UserHandler`, `SessionHandler`: RPC implementations
/// - `PUBLIC_METHODS` / `access_policy`: methods reachable without a credential
/// - `router`: all services behind the authentication gate, plus health
pub mod post;
pub mod session;
pub mod user;

pub use post::PostHandler;
pub use session::SessionHandler;
pub use user::UserHandler;

use crate::db::{PostStore, UserStore};
use crate::error::{BlogError, Result};
use crate::pb::post_server::PostServer;
use crate::pb::session_server::SessionServer;
use crate::pb::user_server::UserServer;
use crate::services::SessionIssuer;
use crypto_core::{CredentialError, JwtCodec};
use grpc_jwt_propagation::{AccessPolicy, AuthError, AuthGate, AuthLayer, IdentityExt};
use std::sync::Arc;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tonic::Request;
use tower::layer::util::{Identity, Stack};
use tracing::info;
use uuid::Uuid;

/// Fully-qualified methods anonymous callers may reach
///
/// Everything else requires `authorization: Bearer <token>`. Matching is
/// exact, so a method added to a service is protected until listed here.
pub const PUBLIC_METHODS: &[&str] = &[
    "/pb.Post/GetPost",
    "/pb.Post/ListPost",
    "/pb.Post/ListPostByUserID",
    "/pb.User/CreateUser",
    "/pb.User/GetUser",
    "/pb.User/ListUser",
    "/pb.Session/Login",
    "/grpc.health.v1.Health/Check",
    "/grpc.health.v1.Health/Watch",
];

pub fn access_policy() -> AccessPolicy {
    AccessPolicy::new(PUBLIC_METHODS.iter().copied())
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
    pub sessions: SessionIssuer,
    pub codec: Arc<JwtCodec>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, codec: Arc<JwtCodec>) -> Self
    where
        S: PostStore + UserStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        Self {
            posts: store,
            sessions: SessionIssuer::new(Arc::clone(&users), Arc::clone(&codec)),
            users,
            codec,
        }
    }
}

pub type AuthenticatedRouter = Router<Stack<AuthLayer, Identity>>;

/// Assemble the Post, User, Session and health services behind the gate
pub async fn router(state: AppState) -> AuthenticatedRouter {
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter.set_serving::<PostServer<PostHandler>>().await;
    health_reporter.set_serving::<UserServer<UserHandler>>().await;
    health_reporter.set_serving::<SessionServer<SessionHandler>>().await;

    let policy = access_policy();
    info!(public_methods = policy.len(), "authentication gate installed");
    let gate = AuthGate::new(Arc::clone(&state.codec), policy);

    Server::builder()
        .layer(AuthLayer::new(gate))
        .add_service(health_service)
        .add_service(PostServer::new(PostHandler::new(state.clone())))
        .add_service(UserServer::new(UserHandler::new(state.clone())))
        .add_service(SessionServer::new(SessionHandler::new(state)))
}

/// Account id of the verified caller
pub(crate) fn caller_id<T>(request: &Request<T>) -> Result<Uuid> {
    let subject = request.current_subject()?;
    Uuid::parse_str(subject).map_err(|_| {
        BlogError::Auth(AuthError::CredentialInvalid(CredentialError::Malformed(
            "subject is not an account id".to_string(),
        )))
    })
}
