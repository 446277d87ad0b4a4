//! Mobile Shop API - HTTP/JSON backend.
//!
//! Exposes bearer-token authentication, a read-only product catalog, a
//! per-user shopping cart with merge-on-duplicate semantics, and an
//! append-only order history.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` via sqlx; every cart mutation is a single atomic statement
//! - Stateless HS256 bearer tokens; identity resolved once per request by
//!   the [`middleware::CurrentUser`] extractor

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
