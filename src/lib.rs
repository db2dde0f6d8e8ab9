//! admindash - admin dashboard API with bearer-token sessions
//!
//! The library exposes both halves of the dashboard: the axum API server
//! (`api`, `auth`) and the headless client that keeps the signed-in user
//! (`client`).

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use client::Dashboard;
pub use config::Config;
pub use error::Error;
