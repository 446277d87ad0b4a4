//! Business-logic services sitting between routes and repositories.

pub mod auth;
pub mod token;
