//! Console client for the admin service
//!
//! [`client::AdminClient`] speaks the HTTP API; [`view`] holds the
//! component-scoped state of the task list and user screens.

pub mod client;
pub mod view;

pub use client::{AdminClient, ClientError, ClientResult};
