use gloo::net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;
use trellis_core::model::{
    AiSettings, AiSettingsUpdate, AiSuggestRequest, AiSuggestResponse, AuthResponse,
    ConnectionTestResult, Credentials, Registration, Tag, TagDraft, Task, TaskDraft, TaskPatch,
    User,
};
use trellis_core::response;

use crate::session;

pub const API_BASE_URL: &str = match option_env!("TRELLIS_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// An authenticated request came back 401; the session is gone and the
    /// global handler has already cleared it.
    #[error("session expired")]
    Unauthorized,
    /// The server rejected the request; `message` is its own wording,
    /// surfaced verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Network error. Please check your connection.")]
    Network,
    #[error("unexpected response from server")]
    Decode,
}

fn url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

/// Attaches the stored bearer token, remembering whether one was present so
/// a 401 can be told apart from a plain credential failure.
fn authorized(builder: RequestBuilder) -> (RequestBuilder, bool) {
    match session::load_token() {
        Some(token) => (
            builder.header("Authorization", &format!("Token {token}")),
            true,
        ),
        None => (builder, false),
    }
}

async fn dispatch(
    request: Result<Request, gloo::net::Error>,
    had_token: bool,
) -> Result<Response, ApiError> {
    let request = request.map_err(|err| {
        warn!(error = %err, "failed to build request");
        ApiError::Decode
    })?;
    let path = request.url().to_string();

    let response = request.send().await.map_err(|err| {
        warn!(error = %err, path, "request transport failure");
        ApiError::Network
    })?;

    // Session expiry is global: whatever call tripped it, the stored
    // credential is dead and the user goes back to the login view. A 401
    // from an anonymous call (a failed login) stays an ordinary API error.
    if response.status() == 401 && had_token {
        warn!(path, "authenticated request rejected; clearing session");
        session::expire();
        return Err(ApiError::Unauthorized);
    }

    if !response.ok() {
        let status = response.status();
        let message = error_message(response).await;
        return Err(ApiError::Api { status, message });
    }

    Ok(response)
}

/// Pulls the server's own message out of the usual Django REST shapes.
async fn error_message(response: Response) -> String {
    let fallback = format!(
        "Request failed ({} {})",
        response.status(),
        response.status_text()
    );
    let Ok(body) = response.json::<Value>().await else {
        return fallback;
    };
    for key in ["detail", "error", "message"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }
    fallback
}

async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|err| {
        warn!(error = %err, "failed to decode response body");
        ApiError::Decode
    })
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let (builder, had_token) = authorized(Request::get(&url(path)));
    into_json(dispatch(builder.build(), had_token).await?).await
}

async fn post_json<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    let (builder, had_token) = authorized(Request::post(&url(path)));
    into_json(dispatch(builder.json(body), had_token).await?).await
}

async fn patch_json<T: DeserializeOwned, B: Serialize>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let (builder, had_token) = authorized(Request::patch(&url(path)));
    into_json(dispatch(builder.json(body), had_token).await?).await
}

async fn post_no_body(path: &str) -> Result<(), ApiError> {
    let (builder, had_token) = authorized(Request::post(&url(path)));
    dispatch(builder.build(), had_token).await.map(|_| ())
}

async fn delete(path: &str) -> Result<(), ApiError> {
    let (builder, had_token) = authorized(Request::delete(&url(path)));
    dispatch(builder.build(), had_token).await.map(|_| ())
}

pub async fn login(credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    post_json("/api/auth/login/", credentials).await
}

pub async fn register(registration: &Registration) -> Result<AuthResponse, ApiError> {
    post_json("/api/auth/register/", registration).await
}

pub async fn logout() -> Result<(), ApiError> {
    post_no_body("/api/auth/logout/").await
}

pub async fn profile() -> Result<User, ApiError> {
    get_json("/api/auth/profile/").await
}

/// Task listing goes through the normalization boundary: the endpoint has
/// served both a bare array and a paginated envelope.
pub async fn list_tasks() -> Result<Vec<Task>, ApiError> {
    let body: Value = get_json("/api/tasks/").await?;
    Ok(response::extract_tasks(&body))
}

pub async fn get_task(id: u64) -> Result<Task, ApiError> {
    get_json(&format!("/api/tasks/{id}/")).await
}

pub async fn create_task(draft: &TaskDraft) -> Result<Task, ApiError> {
    post_json("/api/tasks/", draft).await
}

pub async fn update_task(id: u64, patch: &TaskPatch) -> Result<Task, ApiError> {
    patch_json(&format!("/api/tasks/{id}/"), patch).await
}

pub async fn delete_task(id: u64) -> Result<(), ApiError> {
    delete(&format!("/api/tasks/{id}/")).await
}

pub async fn ai_suggest(id: u64, message: String) -> Result<AiSuggestResponse, ApiError> {
    post_json(&format!("/api/tasks/{id}/ai_suggest/"), &AiSuggestRequest { message }).await
}

pub async fn breakdown_task(id: u64) -> Result<(), ApiError> {
    post_no_body(&format!("/api/tasks/{id}/breakdown/")).await
}

pub async fn list_tags() -> Result<Vec<Tag>, ApiError> {
    let body: Value = get_json("/api/tags/").await?;
    Ok(response::extract_tags(&body))
}

pub async fn create_tag(draft: &TagDraft) -> Result<Tag, ApiError> {
    post_json("/api/tags/", draft).await
}

pub async fn update_tag(id: u64, draft: &TagDraft) -> Result<Tag, ApiError> {
    patch_json(&format!("/api/tags/{id}/"), draft).await
}

pub async fn delete_tag(id: u64) -> Result<(), ApiError> {
    delete(&format!("/api/tags/{id}/")).await
}

pub async fn ai_settings() -> Result<AiSettings, ApiError> {
    get_json("/api/ai/settings/").await
}

pub async fn update_ai_settings(update: &AiSettingsUpdate) -> Result<AiSettings, ApiError> {
    post_json("/api/ai/settings/", update).await
}

pub async fn test_ai_connection() -> Result<ConnectionTestResult, ApiError> {
    let (builder, had_token) = authorized(Request::post(&url("/api/ai/test-connection/")));
    into_json(dispatch(builder.build(), had_token).await?).await
}
