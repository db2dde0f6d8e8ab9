//! Shared helpers for integration tests

#![allow(dead_code)]

use admindash::api::{serve, AppState, SharedState};
use admindash::config::{Config, SeedUser};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-pw";
pub const USER_EMAIL: &str = "a@x.com";
pub const USER_PASSWORD: &str = "pw";

/// Config with a fast bcrypt cost and two seeded accounts
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.bcrypt_cost = 4;
    config.users = vec![
        SeedUser {
            email: ADMIN_EMAIL.to_string(),
            fullname: "Admin".to_string(),
            password_hash: bcrypt::hash(ADMIN_PASSWORD, 4).expect("hash"),
            roles: vec!["admin".to_string()],
        },
        SeedUser {
            email: USER_EMAIL.to_string(),
            fullname: "Alice".to_string(),
            password_hash: bcrypt::hash(USER_PASSWORD, 4).expect("hash"),
            roles: vec!["editor".to_string()],
        },
    ];
    config
}

/// A server running on an ephemeral port
pub struct TestServer {
    pub base_url: String,
    pub state: SharedState,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn start_server(config: Config) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = Arc::new(AppState::from_config(config).await.expect("state"));

    let served = state.clone();
    let handle = tokio::spawn(async move {
        let _ = serve(listener, served).await;
    });

    TestServer {
        base_url: format!("http://{}", addr),
        state,
        handle,
    }
}
