//! Wire models shared by the admin service and its clients

pub mod envelope;
pub mod flash;
pub mod task_list;
pub mod user;

// Re-export for convenience
pub use envelope::{Ack, ErrorBody, TaskListIndex, TaskListShow, UserCreated, UserFilters, UserIndex};
pub use flash::Flash;
pub use task_list::{Task, TaskList, TaskListInput};
pub use user::{NewUserInput, Role, RoleOption, UnknownRole, User};
