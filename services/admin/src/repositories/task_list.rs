//! Task list repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::models::{Task, TaskList, TaskListInput};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::info;

use super::{RepositoryResult, TaskListRepository};

#[derive(FromRow)]
struct TaskListRow {
    id: i64,
    user_id: i64,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskListRow> for TaskList {
    fn from(row: TaskListRow) -> Self {
        TaskList {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            tasks: Vec::new(),
            tasks_count: 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct TaskRow {
    id: i64,
    list_id: i64,
    title: String,
    description: Option<String>,
    is_completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            list_id: row.list_id,
            title: row.title,
            description: row.description,
            is_completed: row.is_completed,
        }
    }
}

/// Task list repository
#[derive(Clone)]
pub struct PgTaskListRepository {
    pool: PgPool,
}

impl PgTaskListRepository {
    /// Create a new task list repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the tasks of the given lists and attach them
    async fn attach_tasks(&self, rows: Vec<TaskListRow>) -> RepositoryResult<Vec<TaskList>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, list_id, title, description, is_completed
            FROM tasks
            WHERE list_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut by_list: HashMap<i64, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_list.entry(task.list_id).or_default().push(task.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let tasks = by_list.remove(&row.id).unwrap_or_default();
                TaskList::from(row).with_tasks(tasks)
            })
            .collect())
    }
}

#[async_trait]
impl TaskListRepository for PgTaskListRepository {
    async fn list_owned(&self, owner_id: i64) -> RepositoryResult<Vec<TaskList>> {
        let rows: Vec<TaskListRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM task_lists
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_tasks(rows).await
    }

    async fn find_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<Option<TaskList>> {
        let row: Option<TaskListRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM task_lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(list_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_tasks(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, owner_id: i64, input: &TaskListInput) -> RepositoryResult<TaskList> {
        info!("Inserting task list for user {}", owner_id);

        let row: TaskListRow = sqlx::query_as(
            r#"
            INSERT INTO task_lists (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_owned(
        &self,
        owner_id: i64,
        list_id: i64,
        input: &TaskListInput,
    ) -> RepositoryResult<Option<TaskList>> {
        let row: Option<TaskListRow> = sqlx::query_as(
            r#"
            UPDATE task_lists
            SET title = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_tasks(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM task_lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
