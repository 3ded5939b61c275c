//! Screen state for task lists and users
//!
//! Each screen owns its toast, dialog and delete confirmation. Handlers take
//! the current instant so notice expiry is driven by the caller's clock.
//! After every accepted mutation the screen re-fetches its listing.

mod confirm;
mod form;
mod query;
mod toast;

pub use confirm::ConfirmDelete;
pub use form::{Draft, FormDialog, Submission};
pub use query::ListQuery;
pub use toast::{TOAST_DURATION, Toast, ToastKind, ToastState};

use common::{
    models::{NewUserInput, RoleOption, TaskList, TaskListInput, User},
    pagination::Page,
};
use std::time::Instant;
use tracing::warn;

use crate::client::{AdminClient, ClientError, ClientResult};

/// Route a failed mutation into the dialog and toast
///
/// Validation failures are absorbed into the form; anything else is shown and
/// handed back to the caller.
fn absorb<D: Draft>(
    error: ClientError,
    form: &mut FormDialog<D>,
    toast: &mut ToastState,
    now: Instant,
) -> ClientResult<()> {
    match error {
        ClientError::Validation { errors, flash } => {
            form.fail(errors);
            toast.notify(&flash, now);
            Ok(())
        }
        other => {
            if let Some(flash) = other.flash() {
                toast.notify(flash, now);
            }
            warn!("Request failed: {}", other);
            Err(other)
        }
    }
}

/// Task lists screen
#[derive(Debug, Clone, Default)]
pub struct TaskListsView {
    pub lists: Vec<TaskList>,
    pub toast: ToastState,
    pub form: FormDialog<TaskListInput>,
    pub confirm: ConfirmDelete,
}

impl TaskListsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let index = client.list_task_lists().await?;
        self.lists = index.lists;
        self.toast.notify(&index.flash, now);
        Ok(())
    }

    /// Dispatch the dialog as a create or an update
    pub async fn submit(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let outcome = match self.form.submission() {
            Submission::Create(draft) => client.create_task_list(&draft).await,
            Submission::Update(id, draft) => client.update_task_list(id, &draft).await,
        };

        match outcome {
            Ok(ack) => {
                self.form.succeed();
                self.toast.notify(&ack.flash, now);
                self.load(client, now).await
            }
            Err(error) => absorb(error, &mut self.form, &mut self.toast, now),
        }
    }

    /// Delete the list awaiting confirmation, if any
    pub async fn confirm_delete(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let Some(id) = self.confirm.confirm() else {
            return Ok(());
        };

        match client.delete_task_list(id).await {
            Ok(ack) => {
                self.toast.notify(&ack.flash, now);
                self.load(client, now).await
            }
            Err(error) => {
                if let Some(flash) = error.flash() {
                    self.toast.notify(flash, now);
                }
                Err(error)
            }
        }
    }
}

/// Users screen
#[derive(Debug, Clone, Default)]
pub struct UsersView {
    pub users: Option<Page<User>>,
    pub roles: Vec<RoleOption>,
    pub query: ListQuery,
    pub toast: ToastState,
    pub form: FormDialog<NewUserInput>,
    pub confirm: ConfirmDelete,
    /// Credential of the last created account, shown once to the admin
    pub temporary_password: Option<String>,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the page described by the current query
    pub async fn load(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let index = client.list_users(&self.query).await?;
        self.query.sync(&index.filters, index.users.current_page);
        self.users = Some(index.users);
        self.roles = index.user_roles;
        self.toast.notify(&index.flash, now);
        Ok(())
    }

    pub async fn search(
        &mut self,
        client: &AdminClient,
        search: &str,
        filter: &str,
        now: Instant,
    ) -> ClientResult<()> {
        self.query.submit_search(search, filter);
        self.load(client, now).await
    }

    pub async fn goto(&mut self, client: &AdminClient, page: u64, now: Instant) -> ClientResult<()> {
        self.query.goto(page);
        self.load(client, now).await
    }

    pub fn has_previous(&self) -> bool {
        self.users.as_ref().is_some_and(Page::has_previous)
    }

    pub fn has_next(&self) -> bool {
        self.users.as_ref().is_some_and(Page::has_next)
    }

    /// Dispatch the dialog as a create or an update
    pub async fn submit(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let outcome = match self.form.submission() {
            Submission::Create(draft) => client.create_user(&draft).await.map(|created| {
                self.temporary_password = Some(created.temporary_password);
                created.flash
            }),
            Submission::Update(id, draft) => {
                client.update_user(id, &draft).await.map(|ack| ack.flash)
            }
        };

        match outcome {
            Ok(flash) => {
                self.form.succeed();
                self.toast.notify(&flash, now);
                self.load(client, now).await
            }
            Err(error) => absorb(error, &mut self.form, &mut self.toast, now),
        }
    }

    /// Delete the user awaiting confirmation, if any
    pub async fn confirm_delete(&mut self, client: &AdminClient, now: Instant) -> ClientResult<()> {
        let Some(id) = self.confirm.confirm() else {
            return Ok(());
        };

        match client.delete_user(id).await {
            Ok(ack) => {
                self.toast.notify(&ack.flash, now);
                self.load(client, now).await
            }
            Err(error) => {
                if let Some(flash) = error.flash() {
                    self.toast.notify(flash, now);
                }
                Err(error)
            }
        }
    }
}
