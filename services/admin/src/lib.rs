//! Task List Admin service
//!
//! Authenticated CRUD over users and task lists: resource handlers in
//! [`resources`], persistence behind the traits in [`repositories`], and the
//! HTTP surface in [`routes`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod password;
pub mod repositories;
pub mod resources;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
