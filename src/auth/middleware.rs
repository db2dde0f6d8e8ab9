//! Authentication middleware and extractors

use crate::api::SharedState;
use crate::auth::models::User;
use crate::auth::verifier::extract_bearer;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Middleware for requiring authentication.
///
/// Runs the token strategy and stores the verified [`User`] in the request
/// extensions, where handlers pick it up with `Extension<User>`.
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let token = extract_bearer(req.headers())
        .map(str::to_owned)
        .ok_or_else(|| Error::Unauthorized("No valid authentication token found".to_string()))?;

    let user = state.verifier.verify_token(&token).await.map_err(|e| {
        tracing::debug!("Rejected bearer token on {}: {}", req.uri().path(), e);
        e
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Reject users without the admin role
pub fn require_admin(user: &User) -> Result<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(Error::Forbidden("Administrator role required".to_string()))
    }
}
