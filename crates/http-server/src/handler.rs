//! Routes and request handlers.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use desknotify_notifier::{Notification, Notifier};
use serde::Deserialize;

use crate::ServerError;

/// Body of `GET /`.
pub const ONLINE_MESSAGE: &str = "notification server is online";

/// Body of `GET /notification`.
pub const WRONG_METHOD_MESSAGE: &str = "wrong method";

/// Body of a successful `POST /notification`.
pub const NOTIFICATION_TRIGGERED_MESSAGE: &str = "Notification triggered";

/// Body of a rejected `POST /notification`.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON data";

/// Title used when the request does not carry one.
pub const DEFAULT_TITLE: &str = "Notification request received";

/// Body used when the request does not carry one.
pub const DEFAULT_BODY: &str = "Check calendar for more information";

/// Status of `GET /notification`. Existing clients expect a 200 with the
/// `wrong method` body rather than a 405.
const WRONG_METHOD_STATUS: StatusCode = StatusCode::OK;

/// Media type a `POST /notification` body must be sent as.
const JSON_MEDIA_TYPE: &str = "application/json";

/// JSON payload of `POST /notification`.
///
/// Both fields are optional; `null` counts as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationRequest {
    pub title: Option<String>,
    pub body_message: Option<String>,
}

impl NotificationRequest {
    /// Decodes a request body. The document must be a JSON object.
    pub fn from_json(body: &[u8]) -> Result<Self, ServerError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(ServerError::InvalidPayload(
                "no JSON object provided".into(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Resolves the defaults and produces the notification to show.
    pub fn into_notification(self) -> Notification {
        Notification::new(
            self.title.unwrap_or_else(|| DEFAULT_TITLE.into()),
            self.body_message.unwrap_or_else(|| DEFAULT_BODY.into()),
        )
    }
}

#[derive(Clone)]
struct AppState {
    notifier: Notifier,
}

/// Builds the HTTP router. Accepted notifications go to `notifier`.
pub fn router(notifier: Notifier) -> Router {
    Router::new()
        .route("/", get(home))
        .route(
            "/notification",
            get(get_notification).post(post_notification),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(AppState { notifier })
}

async fn home() -> &'static str {
    ONLINE_MESSAGE
}

async fn get_notification() -> (StatusCode, &'static str) {
    (WRONG_METHOD_STATUS, WRONG_METHOD_MESSAGE)
}

/// Whether the `Content-Type` header names JSON. Parameters such as
/// `charset` are ignored.
fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

async fn post_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    tracing::debug!(len = body.len(), "received POST request to trigger notification");

    if !is_json_content(&headers) {
        tracing::error!(
            content_type = ?headers.get(CONTENT_TYPE),
            "error parsing JSON data: content type is not {JSON_MEDIA_TYPE}"
        );
        return (StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE).into_response();
    }

    let request = match NotificationRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("error parsing JSON data: {e}");
            return (StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE).into_response();
        }
    };

    let notification = request.into_notification();
    tracing::info!(
        title = %notification.title,
        body = %notification.body,
        "notification requested"
    );

    // Fire and forget: the response does not wait for the toast.
    state.notifier.dispatch(notification);

    NOTIFICATION_TRIGGERED_MESSAGE.into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{assert_no_dispatch, next_dispatch, recording_notifier};

    async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        send_as(app, method, uri, Some("application/json"), body).await
    }

    async fn send_as(
        app: Router,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_owned())).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn request_with_both_fields() {
        let request =
            NotificationRequest::from_json(br#"{"title":"T","body_message":"B"}"#).unwrap();
        assert_eq!(request.into_notification(), Notification::new("T", "B"));
    }

    #[test]
    fn request_defaults() {
        let request = NotificationRequest::from_json(b"{}").unwrap();
        assert_eq!(
            request.into_notification(),
            Notification::new(DEFAULT_TITLE, DEFAULT_BODY)
        );

        let request =
            NotificationRequest::from_json(br#"{"title":null,"body_message":"only body"}"#)
                .unwrap();
        assert_eq!(
            request.into_notification(),
            Notification::new(DEFAULT_TITLE, "only body")
        );
    }

    #[test]
    fn request_ignores_unknown_fields() {
        let request =
            NotificationRequest::from_json(br#"{"title":"T","priority":"high"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("T"));
        assert!(request.body_message.is_none());
    }

    #[test]
    fn request_rejects_non_objects() {
        let bodies: [&[u8]; 7] = [b"", b"not json", b"[]", br#"["T","B"]"#, b"42", b"null", br#""T""#];
        for body in bodies {
            assert!(
                NotificationRequest::from_json(body).is_err(),
                "accepted {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn request_rejects_non_string_fields() {
        assert!(NotificationRequest::from_json(br#"{"title":5}"#).is_err());
        assert!(NotificationRequest::from_json(br#"{"body_message":{"text":"B"}}"#).is_err());
    }

    #[tokio::test]
    async fn root_reports_online() {
        let (notifier, mut rx) = recording_notifier();
        let (status, body) = send(router(notifier), Method::GET, "/", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ONLINE_MESSAGE);
        assert_no_dispatch(&mut rx).await;
    }

    #[tokio::test]
    async fn get_notification_reports_wrong_method() {
        let (notifier, mut rx) = recording_notifier();
        let (status, body) = send(router(notifier), Method::GET, "/notification", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, WRONG_METHOD_MESSAGE);
        assert_no_dispatch(&mut rx).await;
    }

    #[tokio::test]
    async fn post_dispatches_requested_notification() {
        let (notifier, mut rx) = recording_notifier();
        let (status, body) = send(
            router(notifier),
            Method::POST,
            "/notification",
            r#"{"title":"T","body_message":"B"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, NOTIFICATION_TRIGGERED_MESSAGE);
        assert_eq!(next_dispatch(&mut rx).await, Notification::new("T", "B"));
        assert_no_dispatch(&mut rx).await;
    }

    #[tokio::test]
    async fn post_empty_object_uses_defaults() {
        let (notifier, mut rx) = recording_notifier();
        let (status, body) = send(router(notifier), Method::POST, "/notification", "{}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, NOTIFICATION_TRIGGERED_MESSAGE);
        assert_eq!(
            next_dispatch(&mut rx).await,
            Notification::new(DEFAULT_TITLE, DEFAULT_BODY)
        );
    }

    #[tokio::test]
    async fn post_invalid_body_is_rejected() {
        for payload in ["", "not json", "[1, 2]", r#"{"title": 5}"#] {
            let (notifier, mut rx) = recording_notifier();
            let (status, body) =
                send(router(notifier), Method::POST, "/notification", payload).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
            assert_eq!(body, INVALID_JSON_MESSAGE);
            assert_no_dispatch(&mut rx).await;
        }
    }

    #[tokio::test]
    async fn post_without_json_content_type_is_rejected() {
        let content_types = [
            None,
            Some("text/plain"),
            Some("application/x-www-form-urlencoded"),
            Some("application/jsonp"),
        ];
        for content_type in content_types {
            let (notifier, mut rx) = recording_notifier();
            let (status, body) = send_as(
                router(notifier),
                Method::POST,
                "/notification",
                content_type,
                r#"{"title":"T","body_message":"B"}"#,
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "content type {content_type:?}");
            assert_eq!(body, INVALID_JSON_MESSAGE);
            assert_no_dispatch(&mut rx).await;
        }
    }

    #[tokio::test]
    async fn post_accepts_json_content_type_parameters() {
        for content_type in ["application/json; charset=utf-8", "Application/JSON"] {
            let (notifier, mut rx) = recording_notifier();
            let (status, body) = send_as(
                router(notifier),
                Method::POST,
                "/notification",
                Some(content_type),
                r#"{"title":"T"}"#,
            )
            .await;

            assert_eq!(status, StatusCode::OK, "content type {content_type:?}");
            assert_eq!(body, NOTIFICATION_TRIGGERED_MESSAGE);
            assert_eq!(
                next_dispatch(&mut rx).await,
                Notification::new("T", DEFAULT_BODY)
            );
        }
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let (notifier, mut rx) = recording_notifier();
        let (status, _) = send(router(notifier), Method::DELETE, "/notification", "").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_no_dispatch(&mut rx).await;
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (notifier, _rx) = recording_notifier();
        let (status, _) = send(router(notifier), Method::GET, "/missing", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
