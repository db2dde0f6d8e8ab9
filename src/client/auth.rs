//! Client-side authentication session management

use crate::auth::models::{AuthResponse, LoginRequest, MeResponse, RegisterRequest, User};
use crate::client::http::ApiClient;
use crate::client::session::{SessionState, Subscription};
use crate::client::token_store::TokenStore;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Clear the token and the session, notifying subscribers.
/// Shared by explicit sign-out and the unauthorized-response handler.
pub(crate) fn end_session(tokens: &dyn TokenStore, session: &SessionState) {
    tokens.sign_out();
    session.clear();
}

/// Orchestrates login, registration, identity lookup and sign-out
#[derive(Clone)]
pub struct AuthSession {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    session: SessionState,
}

impl AuthSession {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>, session: SessionState) -> Self {
        Self {
            api,
            tokens,
            session,
        }
    }

    /// Exchange email and password for a token.
    ///
    /// Rejected credentials come back as [`Error::InvalidCredentials`] and
    /// leave the session untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .api
            .post_json("/api/auth/login", &body)
            .await
            .map_err(credential_error)?;

        self.establish(response)
    }

    /// Create an account and sign in with it
    pub async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        let body = RegisterRequest {
            fullname: fullname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            repeat_password: confirm_password.to_string(),
        };
        let response: AuthResponse = self
            .api
            .post_json("/api/auth/register", &body)
            .await
            .map_err(credential_error)?;

        self.establish(response)
    }

    /// Resolve the stored token to a user.
    ///
    /// Without a stored token this returns `Ok(None)` and makes no request.
    /// A success that arrives after a sign-out is discarded.
    pub async fn me(&self) -> Result<Option<User>> {
        if self.tokens.get_token().is_none() {
            return Ok(None);
        }

        let generation = self.session.generation();
        let response: MeResponse = self.api.get_json("/api/auth/me").await?;

        if self.session.set_user_if_unchanged(response.user, generation) {
            Ok(self.session.current())
        } else {
            tracing::debug!("Discarding identity response that finished after sign-out");
            Ok(None)
        }
    }

    /// Forget the token and the current user. Idempotent.
    pub fn sign_out(&self) {
        end_session(self.tokens.as_ref(), &self.session);
        tracing::info!("Signed out");
    }

    /// Publish `user` (or none) as the current session
    pub fn set_user(&self, user: Option<User>) {
        self.session.set_user(user);
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    pub fn subscribe(&self) -> Subscription {
        self.session.subscribe()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    fn establish(&self, response: AuthResponse) -> Result<User> {
        let mut user = response.user;
        user.derive_admin();

        // No user is published unless the token was stored
        self.tokens.save_token(&response.token)?;
        self.session.set_user(Some(user.clone()));

        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }
}

fn credential_error(err: Error) -> Error {
    match err {
        Error::Api {
            status: 401,
            message,
        } => Error::InvalidCredentials(message),
        Error::Api {
            status: 400,
            message,
        } => Error::Validation(message),
        Error::Api {
            status: 409,
            message,
        } => Error::Conflict(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::interceptor::Interceptors;
    use crate::client::token_store::MemoryTokenStore;

    fn offline_session() -> AuthSession {
        // Nothing listens on the discard port; any request would fail
        let api = ApiClient::new("http://127.0.0.1:9", Interceptors::new());
        AuthSession::new(api, Arc::new(MemoryTokenStore::new()), SessionState::new())
    }

    #[tokio::test]
    async fn test_me_without_token_skips_network() {
        let auth = offline_session();
        let result = auth.me().await;
        assert!(matches!(result, Ok(None)));
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let auth = offline_session();
        auth.tokens.save_token("tok").unwrap();
        auth.set_user(Some(User::new(
            "u".into(),
            "a@x.com".into(),
            "A".into(),
            vec!["admin".into()],
        )));

        let mut sub = auth.subscribe();
        auth.sign_out();
        auth.sign_out();

        assert!(auth.tokens.get_token().is_none());
        assert!(auth.current_user().is_none());
        let updates = sub.drain();
        assert_eq!(updates.len(), 3);
        assert!(updates[0].as_ref().unwrap().is_admin);
        assert!(updates[1].is_none() && updates[2].is_none());
    }

    #[test]
    fn test_credential_error_mapping() {
        let err = credential_error(Error::Api {
            status: 401,
            message: "nope".into(),
        });
        assert!(matches!(err, Error::InvalidCredentials(ref m) if m == "nope"));

        let err = credential_error(Error::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(matches!(err, Error::Api { status: 500, .. }));
    }
}
