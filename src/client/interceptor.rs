//! Request and response interceptors applied around every API call

use crate::client::auth::end_session;
use crate::client::http::{ApiRequest, ApiResponse};
use crate::client::session::SessionState;
use crate::client::token_store::TokenStore;
use crate::error::Result;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use std::sync::Arc;

/// Paths where a 401 means rejected credentials rather than a rejected token
pub const CREDENTIAL_PATHS: &[&str] = &["/api/auth/login", "/api/auth/register"];

/// Transforms an outgoing request. Returns a new request; the input is left untouched.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, req: &ApiRequest) -> ApiRequest;
}

/// Observes the outcome of a request. Cannot alter what the caller receives.
pub trait ResponseInterceptor: Send + Sync {
    fn inspect(&self, req: &ApiRequest, outcome: &Result<ApiResponse>);
}

/// Attaches `Authorization: Bearer <token>` from the token store
pub struct AuthHeader {
    tokens: Arc<dyn TokenStore>,
}

impl AuthHeader {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }
}

impl RequestInterceptor for AuthHeader {
    fn intercept(&self, req: &ApiRequest) -> ApiRequest {
        let mut authorized = req.clone();
        let value = self
            .tokens
            .get_token()
            .and_then(|token| HeaderValue::from_str(&format!("Bearer {}", token)).ok());

        match value {
            Some(value) => {
                authorized.headers.insert(AUTHORIZATION, value);
            }
            None => {
                authorized.headers.remove(AUTHORIZATION);
            }
        }
        authorized
    }
}

/// Signs out whenever the server rejects our token
pub struct SignOutOnUnauthorized {
    tokens: Arc<dyn TokenStore>,
    session: SessionState,
}

impl SignOutOnUnauthorized {
    pub fn new(tokens: Arc<dyn TokenStore>, session: SessionState) -> Self {
        Self { tokens, session }
    }
}

impl ResponseInterceptor for SignOutOnUnauthorized {
    fn inspect(&self, req: &ApiRequest, outcome: &Result<ApiResponse>) {
        let Err(err) = outcome else {
            return;
        };
        if !err.is_unauthorized() || CREDENTIAL_PATHS.contains(&req.path.as_str()) {
            return;
        }

        tracing::info!("{} {} was rejected as unauthorized, signing out", req.method, req.path);
        end_session(self.tokens.as_ref(), &self.session);
    }
}

/// Ordered interceptor chains, composed once at startup
#[derive(Clone, Default)]
pub struct Interceptors {
    request: Vec<Arc<dyn RequestInterceptor>>,
    response: Vec<Arc<dyn ResponseInterceptor>>,
}

impl Interceptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request.push(interceptor);
        self
    }

    pub fn with_response(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response.push(interceptor);
        self
    }

    /// Run the request chain in order
    pub fn apply_request(&self, req: &ApiRequest) -> ApiRequest {
        self.request
            .iter()
            .fold(req.clone(), |acc, interceptor| interceptor.intercept(&acc))
    }

    /// Show the outcome to every response interceptor in order
    pub fn observe_response(&self, req: &ApiRequest, outcome: &Result<ApiResponse>) {
        for interceptor in &self.response {
            interceptor.inspect(req, outcome);
        }
    }
}
