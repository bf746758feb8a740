//! HTTP endpoint for the desknotify daemon.
//!
//! Serves a liveness route and a notification trigger:
//! - `GET /` answers with [`ONLINE_MESSAGE`]
//! - `GET /notification` answers with [`WRONG_METHOD_MESSAGE`]
//! - `POST /notification` decodes a [`NotificationRequest`], dispatches it to
//!   the [`Notifier`](desknotify_notifier::Notifier) and answers right away
//!
//! There is no authentication, rate limiting or body size limit. The server
//! is meant for a single trusted local client.

mod handler;
mod server;

pub use handler::{
    DEFAULT_BODY, DEFAULT_TITLE, INVALID_JSON_MESSAGE, NOTIFICATION_TRIGGERED_MESSAGE,
    NotificationRequest, ONLINE_MESSAGE, WRONG_METHOD_MESSAGE, router,
};
pub use server::{NotificationServer, ServerConfig};

#[cfg(test)]
mod test_support;

/// Errors produced by the notification server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("server already running")]
    AlreadyRunning,
}
