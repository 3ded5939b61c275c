//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    middleware::TokenVerifier,
    repositories::{MemoryStore, PgTaskListRepository, PgUserRepository},
    resources::{TaskListResource, UserResource},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present when running against PostgreSQL; used by the health check
    pub db_pool: Option<PgPool>,
    pub users: UserResource,
    pub task_lists: TaskListResource,
    pub verifier: TokenVerifier,
}

impl AppState {
    /// State backed by PostgreSQL repositories
    pub fn postgres(pool: PgPool, verifier: TokenVerifier) -> Self {
        Self {
            users: UserResource::new(Arc::new(PgUserRepository::new(pool.clone()))),
            task_lists: TaskListResource::new(Arc::new(PgTaskListRepository::new(pool.clone()))),
            db_pool: Some(pool),
            verifier,
        }
    }

    /// State backed by the in-process store
    pub fn memory(store: MemoryStore, verifier: TokenVerifier) -> Self {
        Self {
            users: UserResource::new(Arc::new(store.clone())),
            task_lists: TaskListResource::new(Arc::new(store)),
            db_pool: None,
            verifier,
        }
    }
}
