//! End-to-end tests: real tonic server behind the gate, generated clients
//!
//! Covers:
//! - public reads and login without a credential
//! - protected calls rejected before any handler runs
//! - owner-scoped mutations keyed on the verified caller
//! - login failures indistinguishable on the wire

use blog_service::db::MemoryStore;
use blog_service::pb::post_client::PostClient;
use blog_service::pb::session_client::SessionClient;
use blog_service::pb::user_client::UserClient;
use blog_service::pb::*;
use blog_service::{router, AppState};
use chrono::Duration;
use crypto_core::JwtCodec;
use grpc_jwt_propagation::{JwtClientInterceptor, UNAUTHENTICATED_MESSAGE};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{Code, Request};

const SECRET: &[u8] = b"end-to-end-test-secret-0123456789abcdef";

type AuthedPostClient = PostClient<InterceptedService<Channel, JwtClientInterceptor>>;

struct TestServer {
    channel: Channel,
    codec: Arc<JwtCodec>,
}

impl TestServer {
    async fn start() -> Self {
        let codec = Arc::new(JwtCodec::new(SECRET, Duration::hours(1)).expect("codec"));
        let state = AppState::new(Arc::new(MemoryStore::new()), Arc::clone(&codec));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind gRPC port");
        let addr: SocketAddr = listener.local_addr().unwrap();
        let incoming = TcpListenerStream::new(listener);
        let router = router(state).await;

        tokio::spawn(async move {
            router
                .serve_with_incoming(incoming)
                .await
                .expect("start blog-service");
        });

        let channel = Channel::from_shared(format!("http://{addr}"))
            .unwrap()
            .connect()
            .await
            .expect("connect to blog-service");

        Self { channel, codec }
    }

    fn posts(&self) -> PostClient<Channel> {
        PostClient::new(self.channel.clone())
    }

    fn posts_as(&self, token: &str) -> AuthedPostClient {
        PostClient::with_interceptor(
            self.channel.clone(),
            JwtClientInterceptor::new(token).unwrap(),
        )
    }

    fn users(&self) -> UserClient<Channel> {
        UserClient::new(self.channel.clone())
    }

    fn sessions(&self) -> SessionClient<Channel> {
        SessionClient::new(self.channel.clone())
    }

    /// Register an account and log in; returns (user_id, token)
    async fn sign_up(&self, account: &str, password: &str) -> (String, String) {
        let user_id = self
            .users()
            .create_user(CreateUserRequest {
                user_name: account.to_uppercase(),
                user_account: account.to_string(),
                password: password.to_string(),
                email: format!("{account}@example.com"),
            })
            .await
            .expect("create user")
            .into_inner()
            .user_id;

        let login = self
            .sessions()
            .login(LoginRequest {
                user_account: account.to_string(),
                user_password: password.to_string(),
            })
            .await
            .expect("login")
            .into_inner();

        assert_eq!(login.user_id, user_id);
        (user_id, login.token)
    }
}

async fn create_post(client: &mut AuthedPostClient, title: &str) -> String {
    client
        .create_post(CreatePostRequest {
            title: title.to_string(),
            content: format!("{title} content"),
            tags: vec!["rust".to_string()],
            image: String::new(),
        })
        .await
        .expect("create post")
        .into_inner()
        .id
}

#[tokio::test]
async fn test_public_reads_need_no_credential() {
    let server = TestServer::start().await;
    let (alice_id, token) = server.sign_up("alice", "alice-password").await;
    let post_id = create_post(&mut server.posts_as(&token), "First post").await;

    let listing = server
        .posts()
        .list_post(ListPostRequest::default())
        .await
        .expect("anonymous ListPost")
        .into_inner();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.posts[0].id, post_id);
    assert_eq!(listing.posts[0].user_id, alice_id);
    assert_eq!(listing.posts[0].user_name, "ALICE");

    let post = server
        .posts()
        .get_post(GetPostRequest { id: post_id })
        .await
        .expect("anonymous GetPost")
        .into_inner()
        .post
        .unwrap();
    assert_eq!(post.title, "First post");

    let by_user = server
        .posts()
        .list_post_by_user_id(ListPostByUserIdRequest {
            user_id: alice_id.clone(),
            ..Default::default()
        })
        .await
        .expect("anonymous ListPostByUserID")
        .into_inner();
    assert_eq!(by_user.total, 1);

    let user = server
        .users()
        .get_user(GetUserRequest { id: alice_id })
        .await
        .expect("anonymous GetUser")
        .into_inner()
        .user
        .unwrap();
    assert_eq!(user.user_account, "alice");
}

#[tokio::test]
async fn test_protected_calls_without_credential_rejected() {
    let server = TestServer::start().await;
    let (_, token) = server.sign_up("alice", "alice-password").await;
    let post_id = create_post(&mut server.posts_as(&token), "Keep me").await;

    let status = server
        .posts()
        .create_post(CreatePostRequest {
            title: "anonymous".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), UNAUTHENTICATED_MESSAGE);

    let status = server
        .posts()
        .delete_post(DeletePostRequest {
            id: post_id.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);

    let status = server
        .users()
        .update_user(UpdateUserRequest {
            description: "anonymous".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);

    // Nothing reached the store
    let listing = server
        .posts()
        .list_post(ListPostRequest::default())
        .await
        .unwrap()
        .into_inner();
    assert_eq!(listing.total, 1);
}

#[tokio::test]
async fn test_bad_credentials_rejected_with_one_message() {
    let server = TestServer::start().await;
    let (alice_id, token) = server.sign_up("alice", "alice-password").await;

    let expired = server
        .codec
        .issue_at(&alice_id, chrono::Utc::now() - Duration::hours(2))
        .unwrap();
    let foreign = JwtCodec::new(b"a-completely-different-secret-0123456789", Duration::hours(1))
        .unwrap()
        .issue(&alice_id)
        .unwrap();
    let tampered = {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[2] = parts[2].chars().rev().collect();
        parts.join(".")
    };

    for bad in [expired, foreign, tampered, "not.a.jwt".to_string()] {
        let status = server
            .posts_as(&bad)
            .create_post(CreatePostRequest {
                title: "should not exist".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated, "{bad}");
        assert_eq!(status.message(), UNAUTHENTICATED_MESSAGE);
    }

    let mut request = Request::new(CreatePostRequest {
        title: "basic auth".to_string(),
        ..Default::default()
    });
    request
        .metadata_mut()
        .insert("authorization", format!("Basic {token}").parse().unwrap());
    let status = server.posts().create_post(request).await.unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_owner_scoped_mutations() {
    let server = TestServer::start().await;
    let (_, alice) = server.sign_up("alice", "alice-password").await;
    let (_, bob) = server.sign_up("bob", "bob-password").await;
    let post_id = create_post(&mut server.posts_as(&alice), "Alice's post").await;

    let status = server
        .posts_as(&bob)
        .update_post_content(UpdatePostContentRequest {
            id: post_id.clone(),
            title: "Bob was here".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = server
        .posts_as(&bob)
        .delete_post(DeletePostRequest {
            id: post_id.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    // Anyone signed in may like a post
    server
        .posts_as(&bob)
        .update_post_likes(UpdatePostLikesRequest {
            id: post_id.clone(),
        })
        .await
        .expect("bob likes alice's post");

    server
        .posts_as(&alice)
        .update_post_content(UpdatePostContentRequest {
            id: post_id.clone(),
            title: "Edited by Alice".to_string(),
            ..Default::default()
        })
        .await
        .expect("owner update");

    let post = server
        .posts()
        .get_post(GetPostRequest {
            id: post_id.clone(),
        })
        .await
        .unwrap()
        .into_inner()
        .post
        .unwrap();
    assert_eq!(post.title, "Edited by Alice");
    assert_eq!(post.likes, 1);

    server
        .posts_as(&alice)
        .delete_post(DeletePostRequest { id: post_id })
        .await
        .expect("owner delete");
}

#[tokio::test]
async fn test_delete_user_only_self() {
    let server = TestServer::start().await;
    let (alice_id, alice) = server.sign_up("alice", "alice-password").await;
    let (bob_id, _) = server.sign_up("bob", "bob-password").await;

    let mut users = UserClient::with_interceptor(
        server.channel.clone(),
        JwtClientInterceptor::new(&alice).unwrap(),
    );

    let status = users
        .delete_user(DeleteUserRequest { id: bob_id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::PermissionDenied);

    users
        .delete_user(DeleteUserRequest {
            id: alice_id.clone(),
        })
        .await
        .expect("delete own account");

    let status = server
        .users()
        .get_user(GetUserRequest { id: alice_id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_login_failures_indistinguishable() {
    let server = TestServer::start().await;
    server.sign_up("alice", "alice-password").await;

    let wrong_password = server
        .sessions()
        .login(LoginRequest {
            user_account: "alice".to_string(),
            user_password: "wrong-pwd".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_account = server
        .sessions()
        .login(LoginRequest {
            user_account: "ghost".to_string(),
            user_password: "wrong-pwd".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code(), Code::Unauthenticated);
    assert_eq!(wrong_password.code(), unknown_account.code());
    assert_eq!(wrong_password.message(), unknown_account.message());
}

#[tokio::test]
async fn test_health_check_is_public() {
    use tonic_health::pb::health_check_response::ServingStatus;
    use tonic_health::pb::health_client::HealthClient;
    use tonic_health::pb::HealthCheckRequest;

    let server = TestServer::start().await;
    let mut health = HealthClient::new(server.channel.clone());

    for service in ["pb.Post", "pb.User", "pb.Session"] {
        let response = health
            .check(HealthCheckRequest {
                service: service.to_string(),
            })
            .await
            .expect("anonymous health check")
            .into_inner();
        assert_eq!(response.status(), ServingStatus::Serving, "{service}");
    }
}
