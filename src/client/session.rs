//! Current-user state with replay to late subscribers

use crate::auth::models::User;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Value published on every session change; `None` means signed out
pub type SessionUpdate = Option<User>;

struct Inner {
    current: SessionUpdate,
    /// Bumped every time the session is cleared
    generation: u64,
    listeners: Vec<UnboundedSender<SessionUpdate>>,
}

/// Shared handle to the authenticated user.
///
/// Clones share the same state. New subscribers first receive the current
/// value, then every later change in the order it was applied.
#[derive(Clone)]
pub struct SessionState {
    inner: Arc<Mutex<Inner>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: None,
                generation: 0,
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> SessionUpdate {
        self.lock().current.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().current.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Receiver is alive, so this cannot fail
        let _ = tx.send(inner.current.clone());
        inner.listeners.push(tx);
        Subscription { rx }
    }

    /// Replace the current user, recomputing `is_admin`, and notify subscribers
    pub fn set_user(&self, user: SessionUpdate) {
        let mut inner = self.lock();
        Self::apply(&mut inner, user);
    }

    /// Set `user` only if the session has not been cleared since `generation`
    pub fn set_user_if_unchanged(&self, user: User, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        Self::apply(&mut inner, Some(user));
        true
    }

    pub fn clear(&self) {
        self.set_user(None);
    }

    fn apply(inner: &mut Inner, user: SessionUpdate) {
        let user = user.map(|mut u| {
            u.derive_admin();
            u
        });
        if user.is_none() {
            inner.generation += 1;
        }
        inner.current = user.clone();
        inner.listeners.retain(|tx| tx.send(user.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream of session updates. Dropping it unsubscribes.
pub struct Subscription {
    rx: UnboundedReceiver<SessionUpdate>,
}

impl Subscription {
    /// Wait for the next update
    pub async fn recv(&mut self) -> Option<SessionUpdate> {
        self.rx.recv().await
    }

    /// Next already-published update, if any
    pub fn try_recv(&mut self) -> Option<SessionUpdate> {
        match self.rx.try_recv() {
            Ok(update) => Some(update),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every update published so far that has not been read
    pub fn drain(&mut self) -> Vec<SessionUpdate> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
