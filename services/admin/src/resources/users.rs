//! User resource handler
//!
//! Admin-only. Lists the managed (non-admin) accounts three at a time with
//! search and role filtering, creates accounts with a generated temporary
//! password, and deletes accounts.

use common::{
    models::{Ack, Flash, NewUserInput, Role, UserCreated, UserFilters, UserIndex},
    pagination::{Page, PageRequest},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult, EMAIL_TAKEN, FieldErrors},
    middleware::{Actor, ensure_admin},
    password::{generate_temporary_password, hash_password},
    repositories::{NewUser, RepositoryError, UserRepository, UserSearch},
    validation::validate_new_user,
};

pub const USERS_PER_PAGE: u64 = 3;

const NOT_FOUND: &str = "User not found.";

/// Raw listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub filter: Option<String>,
    /// Kept as text so junk falls back to the first page instead of failing
    pub page: Option<String>,
}

#[derive(Clone)]
pub struct UserResource {
    repository: Arc<dyn UserRepository>,
}

impl UserResource {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, actor: &Actor, query: &UserListQuery) -> ApiResult<UserIndex> {
        ensure_admin(actor)?;

        let criteria = UserSearch::from_filters(query.search.as_deref(), query.filter.as_deref());
        let request = PageRequest::parse(query.page.as_deref(), USERS_PER_PAGE);
        let (users, total) = self.repository.search(&criteria, request).await?;

        Ok(UserIndex {
            users: Page::new(users, request, total),
            user_roles: Role::options(),
            filters: UserFilters {
                search: query.search.clone().unwrap_or_default(),
                filter: query.filter.clone().unwrap_or_else(|| "all".to_string()),
            },
            flash: Flash::default(),
        })
    }

    /// Create an account; the plaintext password is only ever in the returned value
    pub async fn create(&self, actor: &Actor, input: &NewUserInput) -> ApiResult<UserCreated> {
        ensure_admin(actor)?;

        let valid = validate_new_user(input).map_err(ApiError::Validation)?;
        if self.repository.email_exists(&valid.email).await? {
            return Err(ApiError::Validation(FieldErrors::single("email", EMAIL_TAKEN)));
        }

        let temporary_password = generate_temporary_password();
        let password_hash = hash_password(&temporary_password).map_err(|e| {
            error!("{}", e);
            ApiError::InternalServerError
        })?;

        let new_user = NewUser {
            name: valid.name,
            email: valid.email,
            role: valid.role,
            password_hash,
        };
        let user = self.repository.create(&new_user).await.map_err(|e| match e {
            RepositoryError::DuplicateEmail => {
                ApiError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
            }
            other => other.into(),
        })?;
        info!("User {} created user {} with role {}", actor.id, user.id, user.role);

        Ok(UserCreated {
            user,
            temporary_password,
            flash: Flash::success("User created successfully!"),
        })
    }

    /// Declared but without agreed semantics; always answers not implemented
    pub async fn update(&self, actor: &Actor, user_id: i64) -> ApiResult<Ack> {
        ensure_admin(actor)?;
        info!("User {} attempted to update user {}", actor.id, user_id);

        Err(ApiError::NotImplemented(
            "Updating users is not supported yet.".to_string(),
        ))
    }

    /// Delete a managed account; reserved accounts behave as absent
    pub async fn delete(&self, actor: &Actor, user_id: i64) -> ApiResult<Ack> {
        ensure_admin(actor)?;
        info!("User {} deleting user {}", actor.id, user_id);

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .filter(|user| !user.role.is_reserved())
            .ok_or_else(|| {
                error!("User {} not found", user_id);
                ApiError::NotFound(NOT_FOUND.to_string())
            })?;

        if !self.repository.delete(user.id).await? {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }
        info!("Deleted user {}", user.id);

        Ok(Ack {
            flash: Flash::success("User deleted successfully!"),
        })
    }
}
