//! Server-side authentication: user records, tokens and credential checks

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod store;
pub mod validation;
pub mod verifier;

pub use jwt::{Claims, TokenIssuer};
pub use middleware::{require_admin, require_auth};
pub use models::{AuthResponse, LoginRequest, MeResponse, RegisterRequest, User, UserRecord};
pub use store::UserStore;
pub use verifier::{extract_bearer, CredentialVerifier};
