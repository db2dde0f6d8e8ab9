//! HTTP API server

pub mod records;
pub mod routes;
pub mod server;

pub use server::*;
