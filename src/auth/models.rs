//! Authentication models

use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// Stored user account, including its password hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier
    pub id: String,
    /// Login email, unique across the store
    pub email: String,
    pub fullname: String,
    pub roles: Vec<String>,
    /// bcrypt hash of the password
    pub hashed_password: String,
    /// When the account was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserRecord {
    /// Create a new record with a fresh id
    pub fn new(email: String, fullname: String, hashed_password: String, roles: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            fullname,
            roles,
            hashed_password,
            created_at: chrono::Utc::now(),
        }
    }

    /// Client-facing view of this record, without the password hash
    pub fn to_user(&self) -> User {
        User::new(
            self.id.clone(),
            self.email.clone(),
            self.fullname.clone(),
            self.roles.clone(),
        )
    }
}

/// User identity as exchanged with clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Derived from `roles`; recomputed whenever a user enters a session
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn new(id: String, email: String, fullname: String, roles: Vec<String>) -> Self {
        let mut user = Self {
            id,
            email,
            fullname,
            roles,
            is_admin: false,
        };
        user.derive_admin();
        user
    }

    /// Recompute `is_admin` from the role list
    pub fn derive_admin(&mut self) {
        self.is_admin = self.has_role(ADMIN_ROLE);
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub repeat_password: String,
}

/// Response to a successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Response to `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: User,
}
