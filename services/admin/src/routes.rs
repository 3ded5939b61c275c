//! Admin service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use common::models::{NewUserInput, TaskListInput};
use serde_json::json;

use crate::{
    error::ApiError,
    middleware::{Actor, auth_middleware},
    resources::UserListQuery,
    state::AppState,
};

/// Create the router for the admin service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/list", get(list_task_lists).post(create_task_list))
        .route(
            "/list/:id",
            get(show_task_list)
                .put(update_task_list)
                .delete(delete_task_list),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/admin", admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db_pool {
        Some(pool) => match common::database::health_check(pool).await {
            Ok(true) => "ok",
            _ => "unavailable",
        },
        None => "memory",
    };

    let (status, summary) = if database == "unavailable" {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };

    (
        status,
        Json(json!({
            "status": summary,
            "service": "admin-service",
            "database": database,
        })),
    )
}

/// List the caller's task lists
pub async fn list_task_lists(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.task_lists.list(&actor).await?))
}

/// Show one of the caller's task lists
pub async fn show_task_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.task_lists.show(&actor, id).await?))
}

/// Create a task list owned by the caller
pub async fn create_task_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    WithRejection(Json(payload), _): WithRejection<Json<TaskListInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let ack = state.task_lists.create(&actor, &payload).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Update one of the caller's task lists
pub async fn update_task_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    WithRejection(Json(payload), _): WithRejection<Json<TaskListInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.task_lists.update(&actor, id, &payload).await?))
}

/// Delete one of the caller's task lists
pub async fn delete_task_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.task_lists.delete(&actor, id).await?))
}

/// Get managed users with pagination, search and role filtering
pub async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.users.list(&actor, &query).await?))
}

/// Create a new user with a temporary password
pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    WithRejection(Json(payload), _): WithRejection<Json<NewUserInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.users.create(&actor, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a user
pub async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.users.update(&actor, id).await?))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.users.delete(&actor, id).await?))
}
