//! Console screens against a live admin service on an ephemeral port

use admin::{
    AppState,
    middleware::{Claims, TokenVerifier},
    repositories::MemoryStore,
    routes::create_router,
};
use common::models::{Flash, TaskListInput};
use console::{
    AdminClient, ClientError,
    view::{TaskListsView, ToastKind, UsersView},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use std::time::Instant;

const SECRET: &str = "console-secret";

fn token(sub: i64, role: &str) -> String {
    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn spawn_server() -> String {
    let state = AppState::memory(MemoryStore::new(), TokenVerifier::from_secret(SECRET));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{address}")
}

#[tokio::test]
async fn test_task_list_screen_round() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(7, "staff")).unwrap();
    let now = Instant::now();

    let mut view = TaskListsView::new();
    view.load(&client, now).await.unwrap();
    assert!(view.lists.is_empty());

    view.form.open_create();
    view.form.draft.title = "Groceries".to_string();
    view.submit(&client, now).await.unwrap();

    assert!(!view.form.is_open());
    assert_eq!(view.lists.len(), 1);
    assert_eq!(view.lists[0].user_id, 7);
    let toast = view.toast.visible(now).unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "List created successfully!");

    let list = view.lists[0].clone();
    view.form.open_edit(&list);
    view.form.draft.title = String::new();
    view.submit(&client, now).await.unwrap();
    assert!(view.form.is_open());
    assert_eq!(view.form.editing(), Some(list.id));
    assert!(view.form.error("title").is_some());

    view.form.draft = TaskListInput {
        title: "Errands".to_string(),
        description: Some("Saturday".to_string()),
    };
    view.submit(&client, now).await.unwrap();
    assert_eq!(view.lists[0].title, "Errands");

    view.confirm.request_delete(list.id);
    view.confirm_delete(&client, now).await.unwrap();
    assert!(view.lists.is_empty());
    assert_eq!(
        view.toast.visible(now).map(|t| t.message.as_str()),
        Some("List deleted successfully!")
    );
}

#[tokio::test]
async fn test_missing_list_reports_not_found() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(7, "staff")).unwrap();

    let error = client.show_task_list(999).await.unwrap_err();
    assert!(matches!(error, ClientError::NotFound(ref flash) if *flash == Flash::error("List not found.")));
}

#[tokio::test]
async fn test_user_screen_pages_and_searches() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(1, "admin")).unwrap();
    let now = Instant::now();
    let mut view = UsersView::new();

    for (name, role) in [
        ("Dana Dev", "developer"),
        ("Devon Ops", "staff"),
        ("Quinn Tester", "QA"),
        ("Sam Staff", "staff"),
    ] {
        view.form.open_create();
        view.form.draft.name = name.to_string();
        view.form.draft.email = format!("{}@x.com", name.to_lowercase().replace(' ', "."));
        view.form.draft.role = role.to_string();
        view.submit(&client, now).await.unwrap();
        assert_eq!(view.temporary_password.as_ref().map(String::len), Some(12));
    }

    let page = view.users.as_ref().unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.data.len(), 3);
    assert!(view.has_next());
    assert!(!view.has_previous());
    assert_eq!(view.roles.len(), 4);

    view.goto(&client, 2, now).await.unwrap();
    assert_eq!(view.users.as_ref().unwrap().data.len(), 1);
    assert!(view.has_previous());

    view.search(&client, "dev", "all", now).await.unwrap();
    let page = view.users.as_ref().unwrap();
    assert_eq!(view.query.page, 1);
    assert_eq!(page.total, 2);

    view.search(&client, "dev", "developer", now).await.unwrap();
    let page = view.users.as_ref().unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].name, "Dana Dev");
    assert_eq!(view.query.filter, "developer");
}

#[tokio::test]
async fn test_user_screen_keeps_draft_on_duplicate_email() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(1, "admin")).unwrap();
    let now = Instant::now();
    let mut view = UsersView::new();

    view.form.open_create();
    view.form.draft.name = "Ann".to_string();
    view.form.draft.email = "ANN@X.COM".to_string();
    view.form.draft.role = "staff".to_string();
    view.submit(&client, now).await.unwrap();
    assert_eq!(view.users.as_ref().unwrap().data[0].email, "ann@x.com");

    view.form.open_create();
    view.form.draft.name = "Ann Again".to_string();
    view.form.draft.email = "ann@x.com".to_string();
    view.form.draft.role = "staff".to_string();
    view.submit(&client, now).await.unwrap();

    assert!(view.form.is_open());
    assert_eq!(view.form.draft.name, "Ann Again");
    assert_eq!(
        view.form.error("email"),
        Some("The email has already been taken.")
    );
}

#[tokio::test]
async fn test_user_screen_is_admin_only() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(2, "staff")).unwrap();
    let mut view = UsersView::new();

    let error = view.load(&client, Instant::now()).await.unwrap_err();
    assert!(matches!(error, ClientError::Forbidden));
}

#[tokio::test]
async fn test_user_update_is_not_implemented() {
    let base_url = spawn_server().await;
    let client = AdminClient::new(&base_url, token(1, "admin")).unwrap();
    let now = Instant::now();
    let mut view = UsersView::new();

    view.form.open_create();
    view.form.draft.name = "Ann".to_string();
    view.form.draft.email = "ann@x.com".to_string();
    view.form.draft.role = "staff".to_string();
    view.submit(&client, now).await.unwrap();

    let user = view.users.as_ref().unwrap().data[0].clone();
    view.form.open_edit(&user);
    let error = view.submit(&client, now).await.unwrap_err();

    assert!(matches!(error, ClientError::NotImplemented(_)));
    assert!(view.form.is_open());
    assert_eq!(view.toast.visible(now).unwrap().kind, ToastKind::Error);
}
