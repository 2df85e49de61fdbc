use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use ternimal_types::*;

/// API client for communicating with a TERNIMAL forum server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(status_error(status, error_text))
        }
    }

    /// Like `handle_response`, for endpoints whose success body is unused
    async fn handle_status(&self, response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(status_error(status, error_text))
        }
    }

    // User endpoints

    /// Register a user. Duplicate usernames come back as a non-success
    /// status, surfaced as a status-class `ApiError`.
    pub async fn register_user(&self, username: &str) -> ApiResult<User> {
        let url = format!("{}/register", self.base_url);
        let request = RegisterRequest {
            username: username.to_string(),
        };
        log::debug!("POST {} username={}", url, username);
        let response = self.client.post(&url).json(&request).send().await?;
        self.handle_response(response).await
    }

    // Thread endpoints

    /// List all threads
    pub async fn list_threads(&self) -> ApiResult<Vec<Thread>> {
        let url = format!("{}/threads", self.base_url);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Create a new thread
    pub async fn create_thread(&self, request: &CreateThreadRequest) -> ApiResult<Thread> {
        let url = format!("{}/threads", self.base_url);
        log::debug!("POST {} title={:?}", url, request.title);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Delete a thread by id
    pub async fn delete_thread(&self, thread_id: &str) -> ApiResult<()> {
        let url = format!("{}/threads/{}", self.base_url, thread_id);
        log::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        self.handle_status(response).await
    }

    // Comment endpoints

    /// List the comments attached to a thread
    pub async fn list_comments(&self, thread_id: &str) -> ApiResult<Vec<Comment>> {
        let url = format!("{}/threads/{}/comments", self.base_url, thread_id);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Create a new comment
    pub async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        let url = format!("{}/comments", self.base_url);
        log::debug!("POST {} thread_id={}", url, request.thread_id);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Delete a comment by id
    pub async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        let url = format!("{}/comments/{}", self.base_url, comment_id);
        log::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        self.handle_status(response).await
    }
}

fn status_error(status: reqwest::StatusCode, body: String) -> ApiError {
    let message = clean_error_text(status, body);
    match status.as_u16() {
        404 => ApiError::NotFound(message),
        400 => ApiError::BadRequest(message),
        _ => ApiError::Api(message),
    }
}

/// Error bodies are not guaranteed to be JSON. Prefer the structured shape
/// when present; collapse HTML error pages (e.g. from a proxy) into a short
/// status line; otherwise pass the raw text through.
fn clean_error_text(status: reqwest::StatusCode, body: String) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
        return match parsed.details {
            Some(details) => format!("{}: {}", parsed.error, details),
            None => parsed.error,
        };
    }

    if body.contains("<html>") || body.contains("<!DOCTYPE") {
        format!(
            "Server returned {} error. Please check the server URL.",
            status.as_u16()
        )
    } else if body.is_empty() {
        format!("Server returned {} error", status.as_u16())
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_error_maps_common_statuses() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "gone".to_string()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad".to_string()),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            status_error(StatusCode::CONFLICT, "dup".to_string()),
            ApiError::Api(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ApiError::Api(_)
        ));
    }

    #[test]
    fn status_errors_are_status_class() {
        let err = status_error(StatusCode::CONFLICT, "username taken".to_string());
        assert!(err.is_status());
    }

    #[test]
    fn clean_error_text_prefers_structured_body() {
        let body = r#"{"error": "username taken", "details": null}"#.to_string();
        assert_eq!(
            clean_error_text(StatusCode::CONFLICT, body),
            "username taken"
        );

        let body = r#"{"error": "invalid thread", "details": "title required"}"#.to_string();
        assert_eq!(
            clean_error_text(StatusCode::BAD_REQUEST, body),
            "invalid thread: title required"
        );
    }

    #[test]
    fn clean_error_text_collapses_html_pages() {
        let body = "<html><body><h1>404 Not Found</h1></body></html>".to_string();
        let message = clean_error_text(StatusCode::NOT_FOUND, body);
        assert_eq!(
            message,
            "Server returned 404 error. Please check the server URL."
        );
    }

    #[test]
    fn clean_error_text_passes_raw_text_through() {
        let body = "thread does not exist".to_string();
        assert_eq!(
            clean_error_text(StatusCode::NOT_FOUND, body),
            "thread does not exist"
        );
    }
}
