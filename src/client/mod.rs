//! Headless dashboard client: token storage, session state and the API pipeline

pub mod auth;
pub mod guard;
pub mod http;
pub mod interceptor;
pub mod session;
pub mod token_store;

pub use auth::AuthSession;
pub use guard::{LogNavigator, Navigator, RecordingNavigator, RouteGuard, LOGIN_ROUTE};
pub use http::{ApiClient, ApiRequest, ApiResponse};
pub use interceptor::{AuthHeader, Interceptors, SignOutOnUnauthorized};
pub use session::{SessionState, SessionUpdate, Subscription};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::auth::models::User;
use crate::config::ClientConfig;
use crate::error::Result;
use std::sync::Arc;

/// All client components, wired together once at startup
#[derive(Clone)]
pub struct Dashboard {
    pub tokens: Arc<dyn TokenStore>,
    pub session: SessionState,
    pub api: ApiClient,
    pub auth: AuthSession,
    pub guard: RouteGuard,
}

impl Dashboard {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        let session = SessionState::new();

        let interceptors = Interceptors::new()
            .with_request(Arc::new(AuthHeader::new(tokens.clone())))
            .with_response(Arc::new(SignOutOnUnauthorized::new(
                tokens.clone(),
                session.clone(),
            )));
        let api = ApiClient::new(base_url, interceptors);

        let auth = AuthSession::new(api.clone(), tokens.clone(), session.clone());
        let guard = RouteGuard::new(session.clone(), navigator);

        Self {
            tokens,
            session,
            api,
            auth,
            guard,
        }
    }

    /// Client persisting its token on disk as configured
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Self {
        let tokens = Arc::new(FileTokenStore::new(&config.token_dir));
        Self::new(&config.base_url, tokens, navigator)
    }

    /// Restore the session from a stored token, if there is one.
    ///
    /// A rejected token is not an error here; the session simply stays empty.
    pub async fn start(&self) -> Result<Option<User>> {
        match self.auth.me().await {
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token was rejected: {}", e);
                Ok(None)
            }
            other => other,
        }
    }
}
