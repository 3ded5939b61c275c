use common::models::{NewUserInput, TaskList, TaskListInput, User};
use std::collections::BTreeMap;

/// Form fields that can be prefilled from an existing record
pub trait Draft: Default + Clone {
    type Record;

    fn record_id(record: &Self::Record) -> i64;

    fn from_record(record: &Self::Record) -> Self;
}

impl Draft for TaskListInput {
    type Record = TaskList;

    fn record_id(record: &TaskList) -> i64 {
        record.id
    }

    fn from_record(record: &TaskList) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}

impl Draft for NewUserInput {
    type Record = User;

    fn record_id(record: &User) -> i64 {
        record.id
    }

    fn from_record(record: &User) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.id().to_string(),
        }
    }
}

/// What a submit should dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<D> {
    Create(D),
    Update(i64, D),
}

/// Create/edit dialog bound to a draft
#[derive(Debug, Clone, Default)]
pub struct FormDialog<D: Draft> {
    open: bool,
    editing: Option<i64>,
    pub draft: D,
    errors: BTreeMap<String, Vec<String>>,
}

impl<D: Draft> FormDialog<D> {
    pub fn new() -> Self {
        Self {
            open: false,
            editing: None,
            draft: D::default(),
            errors: BTreeMap::new(),
        }
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.draft = D::default();
        self.errors.clear();
        self.open = true;
    }

    pub fn open_edit(&mut self, record: &D::Record) {
        self.editing = Some(D::record_id(record));
        self.draft = D::from_record(record);
        self.errors.clear();
        self.open = true;
    }

    /// Hide the dialog; the draft is left as typed
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn submission(&self) -> Submission<D> {
        match self.editing {
            Some(id) => Submission::Update(id, self.draft.clone()),
            None => Submission::Create(self.draft.clone()),
        }
    }

    /// The server accepted the submission
    pub fn succeed(&mut self) {
        self.draft = D::default();
        self.editing = None;
        self.errors.clear();
        self.open = false;
    }

    /// The server rejected the fields; stay open with the draft intact
    pub fn fail(&mut self, errors: BTreeMap<String, Vec<String>>) {
        self.errors = errors;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn groceries() -> TaskList {
        TaskList {
            id: 4,
            user_id: 7,
            title: "Groceries".to_string(),
            description: Some("Weekly".to_string()),
            tasks: Vec::new(),
            tasks_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_submission_without_editing_target() {
        let mut form = FormDialog::<TaskListInput>::new();
        form.open_create();
        form.draft.title = "Groceries".to_string();

        assert!(form.is_open());
        assert_eq!(
            form.submission(),
            Submission::Create(TaskListInput {
                title: "Groceries".to_string(),
                description: None,
            })
        );
    }

    #[test]
    fn test_edit_prefills_and_submits_update() {
        let mut form = FormDialog::<TaskListInput>::new();
        form.open_edit(&groceries());

        assert_eq!(form.editing(), Some(4));
        assert_eq!(form.draft.description.as_deref(), Some("Weekly"));
        assert!(matches!(form.submission(), Submission::Update(4, _)));
    }

    #[test]
    fn test_success_resets_everything() {
        let mut form = FormDialog::<TaskListInput>::new();
        form.open_edit(&groceries());
        form.succeed();

        assert!(!form.is_open());
        assert_eq!(form.editing(), None);
        assert_eq!(form.draft, TaskListInput::default());
    }

    #[test]
    fn test_failure_keeps_draft_and_shows_errors() {
        let mut form = FormDialog::<NewUserInput>::new();
        form.open_create();
        form.draft.email = "taken@x.com".to_string();

        let mut errors = BTreeMap::new();
        errors.insert(
            "email".to_string(),
            vec!["The email has already been taken.".to_string()],
        );
        form.fail(errors);

        assert!(form.is_open());
        assert_eq!(form.draft.email, "taken@x.com");
        assert_eq!(form.error("email"), Some("The email has already been taken."));
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_opening_create_after_edit_clears_target() {
        let mut form = FormDialog::<TaskListInput>::new();
        form.open_edit(&groceries());
        form.close();
        form.open_create();

        assert_eq!(form.editing(), None);
        assert!(form.draft.title.is_empty());
    }
}
