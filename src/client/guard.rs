//! Navigation guard for protected views

use crate::client::session::SessionState;
use std::sync::{Arc, Mutex};

pub const LOGIN_ROUTE: &str = "/auth/login";

/// Receives redirects issued by guards
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that only logs the redirect
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!("Redirecting to {}", route);
    }
}

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}

/// Allows navigation only while a user is signed in
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionState,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(session: SessionState, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Check the live session; redirect to the login view when signed out
    pub fn can_activate(&self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.navigator.navigate(LOGIN_ROUTE);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::User;

    #[test]
    fn test_blocks_and_redirects_without_user() {
        let navigator = Arc::new(RecordingNavigator::new());
        let guard = RouteGuard::new(SessionState::new(), navigator.clone());

        assert!(!guard.can_activate());
        assert_eq!(navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[test]
    fn test_follows_live_session() {
        let session = SessionState::new();
        let navigator = Arc::new(RecordingNavigator::new());
        let guard = RouteGuard::new(session.clone(), navigator.clone());

        session.set_user(Some(User::new("u".into(), "a@x.com".into(), "A".into(), vec![])));
        assert!(guard.can_activate());
        assert!(navigator.routes().is_empty());

        session.clear();
        assert!(!guard.can_activate());
        assert_eq!(navigator.routes().len(), 1);
    }
}
