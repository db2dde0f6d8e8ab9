//! In-memory user record storage

use crate::auth::models::{User, UserRecord};
use crate::config::SeedUser;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// User store keyed by user id
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store holding the accounts declared in config
    pub async fn with_seed(seed: &[SeedUser]) -> Result<Self> {
        let store = Self::new();
        for account in seed {
            let record = UserRecord::new(
                normalize_email(&account.email),
                account.fullname.clone(),
                account.password_hash.clone(),
                account.roles.clone(),
            );
            store.insert(record).await?;
        }
        Ok(store)
    }

    /// Insert a record, rejecting duplicate emails
    pub async fn insert(&self, mut record: UserRecord) -> Result<User> {
        record.email = normalize_email(&record.email);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == record.email) {
            return Err(Error::Conflict(format!(
                "Email '{}' is already registered",
                record.email
            )));
        }
        let user = record.to_user();
        users.insert(record.id.clone(), record);
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let email = normalize_email(email);
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        self.users.read().await.get(id).cloned()
    }

    /// All users, oldest first, without password hashes
    pub async fn list(&self) -> Vec<User> {
        let users = self.users.read().await;
        let mut records: Vec<&UserRecord> = users.values().collect();
        records.sort_by_key(|r| r.created_at);
        records.into_iter().map(UserRecord::to_user).collect()
    }

    /// Remove a user by id
    pub async fn remove(&self, id: &str) -> Result<User> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|r| r.to_user())
            .ok_or_else(|| Error::NotFound(format!("User '{}' not found", id)))
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for UserStore {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}
