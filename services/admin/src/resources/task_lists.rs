//! Task list resource handler

use common::models::{Ack, Flash, TaskListIndex, TaskListInput, TaskListShow};
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::Actor,
    repositories::TaskListRepository,
    validation::validate_task_list,
};

const NOT_FOUND: &str = "List not found.";

#[derive(Clone)]
pub struct TaskListResource {
    repository: Arc<dyn TaskListRepository>,
}

impl TaskListResource {
    pub fn new(repository: Arc<dyn TaskListRepository>) -> Self {
        Self { repository }
    }

    /// Every list owned by the caller, tasks attached
    pub async fn list(&self, actor: &Actor) -> ApiResult<TaskListIndex> {
        let lists = self.repository.list_owned(actor.id).await?;

        Ok(TaskListIndex {
            lists,
            flash: Flash::default(),
        })
    }

    pub async fn show(&self, actor: &Actor, list_id: i64) -> ApiResult<TaskListShow> {
        let list = self
            .repository
            .find_owned(actor.id, list_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

        Ok(TaskListShow {
            list,
            flash: Flash::default(),
        })
    }

    /// The owner is always the caller
    pub async fn create(&self, actor: &Actor, input: &TaskListInput) -> ApiResult<Ack> {
        let input = validate_task_list(input).map_err(ApiError::Validation)?;

        let list = self.repository.create(actor.id, &input).await?;
        info!("User {} created task list {}", actor.id, list.id);

        Ok(Ack {
            flash: Flash::success("List created successfully!"),
        })
    }

    pub async fn update(&self, actor: &Actor, list_id: i64, input: &TaskListInput) -> ApiResult<Ack> {
        let input = validate_task_list(input).map_err(ApiError::Validation)?;

        self.repository
            .update_owned(actor.id, list_id, &input)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
        info!("User {} updated task list {}", actor.id, list_id);

        Ok(Ack {
            flash: Flash::success("List updated successfully!"),
        })
    }

    pub async fn delete(&self, actor: &Actor, list_id: i64) -> ApiResult<Ack> {
        if !self.repository.delete_owned(actor.id, list_id).await? {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }
        info!("User {} deleted task list {}", actor.id, list_id);

        Ok(Ack {
            flash: Flash::success("List deleted successfully!"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use common::models::Role;

    fn setup() -> (MemoryStore, TaskListResource) {
        let store = MemoryStore::new();
        let resource = TaskListResource::new(Arc::new(store.clone()));
        (store, resource)
    }

    fn input(title: &str, description: Option<&str>) -> TaskListInput {
        TaskListInput {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_groceries_belong_to_creator_only() {
        let (_, resource) = setup();
        let ann = Actor::new(7, Role::Staff);
        let bob = Actor::new(8, Role::Staff);

        let ack = resource.create(&ann, &input("Groceries", None)).await.unwrap();
        assert_eq!(ack.flash.success.as_deref(), Some("List created successfully!"));

        let owned = resource.list(&ann).await.unwrap().lists;
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].user_id, 7);
        assert_eq!(owned[0].title, "Groceries");
        assert_eq!(owned[0].description, None);

        assert!(resource.list(&bob).await.unwrap().lists.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_title_persists_nothing() {
        let (_, resource) = setup();
        let ann = Actor::new(7, Role::Staff);

        let err = resource
            .create(&ann, &input(&"x".repeat(256), Some("too long")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.get("title").is_some()));
        assert!(resource.list(&ann).await.unwrap().lists.is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let (store, resource) = setup();
        let ann = Actor::new(7, Role::Staff);
        resource
            .create(&ann, &input("Groceries", Some("weekly")))
            .await
            .unwrap();
        let id = store.list_owned(7).await.unwrap()[0].id;

        let ack = resource
            .update(&ann, id, &input("Errands", None))
            .await
            .unwrap();
        assert_eq!(ack.flash.success.as_deref(), Some("List updated successfully!"));

        let shown = resource.show(&ann, id).await.unwrap().list;
        assert_eq!(shown.title, "Errands");
        assert_eq!(shown.description, None);
    }

    #[tokio::test]
    async fn test_foreign_list_is_not_found() {
        let (store, resource) = setup();
        let ann = Actor::new(7, Role::Staff);
        let bob = Actor::new(8, Role::Staff);
        resource.create(&ann, &input("Groceries", None)).await.unwrap();
        let id = store.list_owned(7).await.unwrap()[0].id;

        assert!(matches!(resource.show(&bob, id).await, Err(ApiError::NotFound(_))));
        assert!(matches!(
            resource.update(&bob, id, &input("Mine", None)).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(resource.delete(&bob, id).await, Err(ApiError::NotFound(_))));
        assert_eq!(store.list_owned(7).await.unwrap()[0].title, "Groceries");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let (_, resource) = setup();
        let ann = Actor::new(7, Role::Staff);
        assert!(matches!(resource.delete(&ann, 42).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_list() {
        let (store, resource) = setup();
        let ann = Actor::new(7, Role::Staff);
        resource.create(&ann, &input("Groceries", None)).await.unwrap();
        let id = store.list_owned(7).await.unwrap()[0].id;

        let ack = resource.delete(&ann, id).await.unwrap();
        assert_eq!(ack.flash.success.as_deref(), Some("List deleted successfully!"));
        assert!(resource.list(&ann).await.unwrap().lists.is_empty());
    }
}
