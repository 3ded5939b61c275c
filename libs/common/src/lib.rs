//! Common library for the Task List Admin application
//!
//! This crate holds what both the admin service and its console client need:
//! the wire models exchanged over HTTP, the pagination envelope, and the
//! PostgreSQL connection helpers used by the service.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! # async fn run() -> Result<(), common::error::DatabaseError> {
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_pool(&config).await?;
//! assert!(health_check(&pool).await?);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod models;
pub mod pagination;
