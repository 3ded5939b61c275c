//! Repositories for database operations
//!
//! Resource handlers talk to persistence through the two traits below. The
//! PostgreSQL adapters live in [`user`] and [`task_list`]; [`memory`] keeps
//! everything in process for local runs and tests.

use async_trait::async_trait;
use common::{
    error::DatabaseError,
    models::{Role, TaskList, TaskListInput, User},
    pagination::PageRequest,
};
use thiserror::Error;

pub mod memory;
pub mod task_list;
pub mod user;

pub use memory::MemoryStore;
pub use task_list::PgTaskListRepository;
pub use user::PgUserRepository;

/// Errors raised by repository adapters
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The store rejected an insert because the email is already in use
    #[error("email already taken")]
    DuplicateEmail,

    /// A stored row could not be mapped onto the model
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        let err = DatabaseError::Query(e);
        if err.is_unique_violation() {
            RepositoryError::DuplicateEmail
        } else {
            RepositoryError::Database(err)
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Filters applied to the managed user listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearch {
    /// Case-insensitive substring matched against name or email
    pub term: Option<String>,
    /// Exact role identifier to match
    pub role: Option<String>,
    /// Role that never appears in the listing
    pub excluded_role: Role,
}

impl UserSearch {
    /// Build the criteria from raw query values; empty search and the `all`
    /// filter both mean "no restriction"
    pub fn from_filters(search: Option<&str>, filter: Option<&str>) -> Self {
        let term = search.filter(|s| !s.is_empty()).map(str::to_string);
        let role = filter.filter(|f| *f != "all").map(str::to_string);

        Self {
            term,
            role,
            excluded_role: Role::Admin,
        }
    }

    /// Whether a user passes every filter
    pub fn matches(&self, user: &User) -> bool {
        if user.role == self.excluded_role {
            return false;
        }

        if let Some(term) = &self.term {
            let term = term.to_lowercase();
            if !user.name.to_lowercase().contains(&term)
                && !user.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        match &self.role {
            Some(role) => user.role.id() == role,
            None => true,
        }
    }
}

/// Insert payload for a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of users matching the criteria, ordered by id, plus the total match count
    async fn search(
        &self,
        criteria: &UserSearch,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<User>, u64)>;

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool>;

    async fn create(&self, new_user: &NewUser) -> RepositoryResult<User>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}

/// Every query is scoped to an owner; a list owned by someone else behaves as absent
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    async fn list_owned(&self, owner_id: i64) -> RepositoryResult<Vec<TaskList>>;

    async fn find_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<Option<TaskList>>;

    async fn create(&self, owner_id: i64, input: &TaskListInput) -> RepositoryResult<TaskList>;

    async fn update_owned(
        &self,
        owner_id: i64,
        list_id: i64,
        input: &TaskListInput,
    ) -> RepositoryResult<Option<TaskList>>;

    async fn delete_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<bool>;
}
