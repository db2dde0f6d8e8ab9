//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, CredentialVerifier, TokenIssuer, UserStore};
use crate::config::{Config, DEV_JWT_SECRET};
use crate::error::Result;

use super::records::RecordStore;
use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub verifier: CredentialVerifier,
    pub records: RecordStore,
}

impl AppState {
    /// Build the stores and verifier described by `config`
    pub async fn from_config(config: Config) -> Result<Self> {
        if config.auth.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("Using the built-in development JWT secret; set auth.jwt_secret");
        }

        let users = UserStore::with_seed(&config.users).await?;
        let verifier = CredentialVerifier::new(users.clone(), TokenIssuer::from_config(&config.auth))
            .with_hash_cost(config.auth.bcrypt_cost);

        Ok(Self {
            config,
            users,
            verifier,
            records: RecordStore::new(),
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    let state = Arc::new(AppState::from_config(config).await?);

    serve(listener, state).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    tracing::info!(
        "Server listening on {} ({} users loaded)",
        listener.local_addr()?,
        state.users.count().await
    );

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(routes::me))
        .route(
            "/equipment",
            get(routes::list_equipment).post(routes::create_equipment),
        )
        .route(
            "/equipment/{id}",
            get(routes::get_equipment)
                .put(routes::update_equipment)
                .delete(routes::delete_equipment),
        )
        .route("/users", get(routes::list_users))
        .route("/users/{id}", axum::routing::delete(routes::delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/health", get(routes::health))
        .route("/auth/login", post(routes::login))
        .route("/auth/register", post(routes::register))
        .merge(protected)
        .fallback(routes::not_found);

    let router = Router::new().nest("/api", api);

    // Dashboard assets; unknown paths resolve to the single-page app's index.html
    let router = match &state.config.server.static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(routes::not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
