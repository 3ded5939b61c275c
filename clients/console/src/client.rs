//! HTTP client for the admin service

use common::models::{
    Ack, ErrorBody, Flash, NewUserInput, TaskListIndex, TaskListInput, TaskListShow, UserCreated,
    UserIndex,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, time::Duration};
use thiserror::Error;
use tracing::debug;

use crate::view::ListQuery;

/// Errors surfaced to the console, one per answer class of the API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed")]
    Validation {
        errors: BTreeMap<String, Vec<String>>,
        flash: Flash,
    },

    #[error("Not found")]
    NotFound(Flash),

    #[error("Unauthenticated")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not implemented")]
    NotImplemented(Flash),

    #[error("Server error ({status})")]
    Server { status: u16, flash: Flash },
}

impl ClientError {
    /// Notice the server attached to the failure, if any
    pub fn flash(&self) -> Option<&Flash> {
        match self {
            ClientError::Validation { flash, .. }
            | ClientError::NotFound(flash)
            | ClientError::NotImplemented(flash)
            | ClientError::Server { flash, .. } => Some(flash),
            ClientError::Http(_) | ClientError::Unauthorized | ClientError::Forbidden => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Bearer-authenticated client for `/admin` endpoints
#[derive(Clone)]
pub struct AdminClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    // Task lists
    pub async fn list_task_lists(&self) -> ClientResult<TaskListIndex> {
        self.send(self.request(Method::GET, "/admin/list")).await
    }

    pub async fn show_task_list(&self, id: i64) -> ClientResult<TaskListShow> {
        self.send(self.request(Method::GET, &format!("/admin/list/{id}")))
            .await
    }

    pub async fn create_task_list(&self, input: &TaskListInput) -> ClientResult<Ack> {
        self.send(self.request(Method::POST, "/admin/list").json(input))
            .await
    }

    pub async fn update_task_list(&self, id: i64, input: &TaskListInput) -> ClientResult<Ack> {
        self.send(
            self.request(Method::PUT, &format!("/admin/list/{id}"))
                .json(input),
        )
        .await
    }

    pub async fn delete_task_list(&self, id: i64) -> ClientResult<Ack> {
        self.send(self.request(Method::DELETE, &format!("/admin/list/{id}")))
            .await
    }

    // Users
    pub async fn list_users(&self, query: &ListQuery) -> ClientResult<UserIndex> {
        self.send(
            self.request(Method::GET, "/admin/users")
                .query(&query.to_params()),
        )
        .await
    }

    pub async fn create_user(&self, input: &NewUserInput) -> ClientResult<UserCreated> {
        self.send(self.request(Method::POST, "/admin/users").json(input))
            .await
    }

    pub async fn update_user(&self, id: i64, input: &NewUserInput) -> ClientResult<Ack> {
        self.send(
            self.request(Method::PUT, &format!("/admin/users/{id}"))
                .json(input),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<Ack> {
        self.send(self.request(Method::DELETE, &format!("/admin/users/{id}")))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        debug!("{} {}", response.status(), response.url().path());
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Error bodies from proxies or panics may not be JSON at all
    let bytes = response.bytes().await?;
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();

    Err(match status {
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation {
            errors: body.errors,
            flash: body.flash,
        },
        StatusCode::NOT_FOUND => ClientError::NotFound(body.flash),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_IMPLEMENTED => ClientError::NotImplemented(body.flash),
        other => ClientError::Server {
            status: other.as_u16(),
            flash: body.flash,
        },
    })
}
