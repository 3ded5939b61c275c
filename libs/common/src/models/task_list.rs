//! Task list and task models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of tasks owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub tasks: Vec<Task>,
    pub tasks_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    /// Attach tasks and keep the count in step
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks_count = tasks.len();
        self.tasks = tasks;
        self
    }
}

/// Task belonging to a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Create/update payload for a task list
///
/// Carries no owner field; a `user_id` sent by a client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_ignores_client_supplied_owner() {
        let input: TaskListInput =
            serde_json::from_str(r#"{"title":"Groceries","description":null,"user_id":99}"#)
                .unwrap();
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_with_tasks_updates_count() {
        let now = Utc::now();
        let list = TaskList {
            id: 1,
            user_id: 7,
            title: "Groceries".to_string(),
            description: None,
            tasks: Vec::new(),
            tasks_count: 0,
            created_at: now,
            updated_at: now,
        }
        .with_tasks(vec![Task {
            id: 1,
            list_id: 1,
            title: "Milk".to_string(),
            description: None,
            is_completed: false,
        }]);

        assert_eq!(list.tasks_count, 1);
    }
}
