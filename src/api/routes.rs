//! API route handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;

use super::records::Record;
use super::server::SharedState;
use crate::auth::validation::validate_registration;
use crate::auth::{
    require_admin, AuthResponse, LoginRequest, MeResponse, RegisterRequest, User, UserRecord,
};
use crate::error::{Error, Result};

fn malformed(rejection: JsonRejection) -> Error {
    Error::Validation(rejection.body_text())
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Auth routes

pub async fn login(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(req) = payload.map_err(malformed)?;
    let user = state.verifier.verify_password(&req.email, &req.password).await?;
    let token = state.verifier.issue_token(&user)?;

    tracing::info!("User {} logged in", user.id);
    Ok(Json(AuthResponse { user, token }))
}

pub async fn register(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = payload.map_err(malformed)?;
    validate_registration(&req)?;

    let hashed = state.verifier.hash_password(&req.password).await?;
    let record = UserRecord::new(req.email, req.fullname.trim().to_string(), hashed, Vec::new());
    let user = state.users.insert(record).await?;
    let token = state.verifier.issue_token(&user)?;

    tracing::info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

pub async fn me(Extension(user): Extension<User>) -> Json<MeResponse> {
    Json(MeResponse { user })
}

// Equipment routes

pub async fn list_equipment(State(state): State<SharedState>) -> Json<Vec<Record>> {
    Json(state.records.list().await)
}

pub async fn create_equipment(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>)> {
    let Json(data) = payload.map_err(malformed)?;
    let record = state.records.create(data).await?;
    tracing::info!("User {} created equipment {}", user.id, record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_equipment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Record>> {
    Ok(Json(state.records.get(&id).await?))
}

pub async fn update_equipment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(data) = payload.map_err(malformed)?;
    Ok(Json(state.records.update(&id, data).await?))
}

pub async fn delete_equipment(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Record>> {
    let record = state.records.delete(&id).await?;
    tracing::info!("User {} deleted equipment {}", user.id, id);
    Ok(Json(record))
}

// User administration

pub async fn list_users(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<User>>> {
    require_admin(&user)?;
    Ok(Json(state.users.list().await))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    require_admin(&user)?;
    if user.id == id {
        return Err(Error::Validation(
            "Administrators cannot delete their own account".to_string(),
        ));
    }
    let removed = state.users.remove(&id).await?;
    tracing::info!("User {} deleted user {}", user.id, removed.id);
    Ok(Json(removed))
}

/// Fallback for unmatched API routes
pub async fn not_found() -> Error {
    Error::NotFound("Not Found".to_string())
}
