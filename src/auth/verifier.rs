//! Password and bearer-token verification

use crate::auth::jwt::TokenIssuer;
use crate::auth::models::User;
use crate::auth::store::UserStore;
use crate::error::{Error, Result};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use std::sync::{Arc, OnceLock};

pub const INVALID_LOGIN_MESSAGE: &str =
    "Your login details could not be verified. Please try again.";

/// Checked in place of a real hash when the email is unknown
const DECOY_PASSWORD: &str = "admindash-decoy-password";

/// Validates credentials against the user store. Read-only per call.
#[derive(Clone)]
pub struct CredentialVerifier {
    users: UserStore,
    tokens: TokenIssuer,
    hash_cost: u32,
    decoy_hash: Arc<OnceLock<String>>,
}

impl CredentialVerifier {
    pub fn new(users: UserStore, tokens: TokenIssuer) -> Self {
        Self {
            users,
            tokens,
            hash_cost: bcrypt::DEFAULT_COST,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// bcrypt cost for new hashes and for the unknown-email decoy
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Password strategy.
    ///
    /// Unknown emails are checked against a decoy hash of the same cost.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User> {
        let Some(record) = self.users.find_by_email(email).await else {
            let decoy = self.decoy_hash.clone();
            let cost = self.hash_cost;
            let password = password.to_string();
            blocking(move || {
                let hash = decoy.get_or_init(|| {
                    bcrypt::hash(DECOY_PASSWORD, cost).unwrap_or_else(|e| {
                        tracing::warn!("Could not build decoy hash: {}", e);
                        String::new()
                    })
                });
                let _ = bcrypt::verify(&password, hash);
            })
            .await?;

            tracing::debug!("Login rejected: unknown email");
            return Err(Error::Unauthorized(INVALID_LOGIN_MESSAGE.to_string()));
        };

        let password = password.to_string();
        let hashed = record.hashed_password.clone();
        let user_id = record.id.clone();
        let matches = blocking(move || {
            // A malformed stored hash counts as a mismatch
            bcrypt::verify(&password, &hashed).unwrap_or_else(|e| {
                tracing::warn!("Stored hash for user {} is unusable: {}", user_id, e);
                false
            })
        })
        .await?;
        if !matches {
            tracing::debug!("Login rejected: password mismatch for user {}", record.id);
            return Err(Error::Unauthorized(INVALID_LOGIN_MESSAGE.to_string()));
        }

        Ok(record.to_user())
    }

    /// Hash a new password off the async workers
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.hash_cost;
        Ok(blocking(move || bcrypt::hash(password, cost)).await??)
    }

    /// Token strategy
    pub async fn verify_token(&self, token: &str) -> Result<User> {
        let claims = self.tokens.validate_token(token)?;
        self.users
            .find_by_id(&claims.sub)
            .await
            .map(|record| record.to_user())
            .ok_or_else(|| Error::Unauthorized("User no longer exists".to_string()))
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        self.tokens.create_token(user)
    }
}

/// Run CPU-bound bcrypt work on the blocking pool
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Other(format!("Password hashing task failed: {}", e)))
}

/// Pull the bearer token out of the Authorization header
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
