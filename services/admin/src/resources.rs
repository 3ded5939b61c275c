//! Resource handlers
//!
//! The create/read/update/delete operations for each entity, independent of
//! HTTP. Routes extract the caller and the payload and delegate here.

pub mod task_lists;
pub mod users;

pub use task_lists::TaskListResource;
pub use users::{USERS_PER_PAGE, UserListQuery, UserResource};
