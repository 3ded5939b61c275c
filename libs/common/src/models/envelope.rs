//! Response envelopes
//!
//! Every response carries a [`Flash`]; index responses add the collection and
//! mutation responses add whatever the caller needs to see exactly once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Flash, RoleOption, TaskList, User};
use crate::pagination::Page;

/// Acknowledgement of a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub flash: Flash,
}

/// Failure body: field-keyed validation messages plus an error notice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
    pub flash: Flash,
}

/// Filter values echoed back with a user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilters {
    pub search: String,
    pub filter: String,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: "all".to_string(),
        }
    }
}

/// Users index payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIndex {
    pub users: Page<User>,
    pub user_roles: Vec<RoleOption>,
    pub filters: UserFilters,
    pub flash: Flash,
}

/// Answer to a successful user creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user: User,
    /// Plaintext credential, surfaced here and nowhere else
    pub temporary_password: String,
    pub flash: Flash,
}

/// Task lists index payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListIndex {
    pub lists: Vec<TaskList>,
    pub flash: Flash,
}

/// Single task list payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListShow {
    pub list: TaskList,
    pub flash: Flash,
}
