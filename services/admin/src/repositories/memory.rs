//! In-process store backing both repositories
//!
//! Mirrors the relational constraints the service relies on: unique emails,
//! owner-scoped task lists, and cascading deletes from users to lists to tasks.

use async_trait::async_trait;
use chrono::Utc;
use common::{
    models::{Task, TaskList, TaskListInput, User},
    pagination::PageRequest,
};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

use super::{
    NewUser, RepositoryError, RepositoryResult, TaskListRepository, UserRepository, UserSearch,
};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, (User, String)>,
    lists: BTreeMap<i64, TaskList>,
    tasks: BTreeMap<i64, Task>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn tasks_of(&self, list_id: i64) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.list_id == list_id)
            .cloned()
            .collect()
    }

    fn hydrate(&self, list: &TaskList) -> TaskList {
        list.clone().with_tasks(self.tasks_of(list.id))
    }

    fn remove_list(&mut self, list_id: i64) {
        self.lists.remove(&list_id);
        self.tasks.retain(|_, task| task.list_id != list_id);
    }
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored password hash of a user
    pub async fn password_hash(&self, user_id: i64) -> Option<String> {
        let state = self.state.lock().await;
        state.users.get(&user_id).map(|(_, hash)| hash.clone())
    }

    /// Attach a task to a list; tasks have no write endpoint of their own
    pub async fn insert_task(&self, list_id: i64, title: &str) -> Option<Task> {
        let mut state = self.state.lock().await;
        if !state.lists.contains_key(&list_id) {
            return None;
        }

        let task = Task {
            id: state.allocate_id(),
            list_id,
            title: title.to_string(),
            description: None,
            is_completed: false,
        };
        state.tasks.insert(task.id, task.clone());
        Some(task)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn search(
        &self,
        criteria: &UserSearch,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<User>, u64)> {
        let state = self.state.lock().await;
        let matching: Vec<&User> = state
            .users
            .values()
            .map(|(user, _)| user)
            .filter(|user| criteria.matches(user))
            .collect();

        let total = matching.len() as u64;
        let users = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok((users, total))
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|(user, _)| user.email == email))
    }

    async fn create(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|(user, _)| user.email == new_user.email)
        {
            return Err(RepositoryError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: state.allocate_id(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        state
            .users
            .insert(user.id, (user.clone(), new_user.password_hash.clone()));

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut state = self.state.lock().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<i64> = state
            .lists
            .values()
            .filter(|list| list.user_id == id)
            .map(|list| list.id)
            .collect();
        for list_id in owned {
            state.remove_list(list_id);
        }

        Ok(true)
    }
}

#[async_trait]
impl TaskListRepository for MemoryStore {
    async fn list_owned(&self, owner_id: i64) -> RepositoryResult<Vec<TaskList>> {
        let state = self.state.lock().await;
        Ok(state
            .lists
            .values()
            .filter(|list| list.user_id == owner_id)
            .map(|list| state.hydrate(list))
            .collect())
    }

    async fn find_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<Option<TaskList>> {
        let state = self.state.lock().await;
        Ok(state
            .lists
            .get(&list_id)
            .filter(|list| list.user_id == owner_id)
            .map(|list| state.hydrate(list)))
    }

    async fn create(&self, owner_id: i64, input: &TaskListInput) -> RepositoryResult<TaskList> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let list = TaskList {
            id: state.allocate_id(),
            user_id: owner_id,
            title: input.title.clone(),
            description: input.description.clone(),
            tasks: Vec::new(),
            tasks_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.lists.insert(list.id, list.clone());

        Ok(list)
    }

    async fn update_owned(
        &self,
        owner_id: i64,
        list_id: i64,
        input: &TaskListInput,
    ) -> RepositoryResult<Option<TaskList>> {
        let mut state = self.state.lock().await;
        let Some(list) = state
            .lists
            .get_mut(&list_id)
            .filter(|list| list.user_id == owner_id)
        else {
            return Ok(None);
        };

        list.title = input.title.clone();
        list.description = input.description.clone();
        list.updated_at = Utc::now();
        let updated = list.clone();

        Ok(Some(state.hydrate(&updated)))
    }

    async fn delete_owned(&self, owner_id: i64, list_id: i64) -> RepositoryResult<bool> {
        let mut state = self.state.lock().await;
        let owned = state
            .lists
            .get(&list_id)
            .is_some_and(|list| list.user_id == owner_id);
        if owned {
            state.remove_list(list_id);
        }

        Ok(owned)
    }
}
