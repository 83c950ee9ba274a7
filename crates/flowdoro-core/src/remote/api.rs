//! HTTP client for the remote task/session API.

use reqwest::Response;
use url::Url;

use super::{FocusSessionPayload, RemoteSession, RemoteStore, Task};
use crate::error::RemoteError;

/// reqwest-backed client for the task/session endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client against the given base URL (e.g.
    /// `http://localhost:3000/api`).
    ///
    /// # Errors
    /// Returns an error if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| RemoteError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                message: e.to_string(),
            })
    }

    /// GET /tasks
    ///
    /// # Errors
    /// Returns an error on network failure or a non-2xx status.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let resp = self.http.get(self.endpoint("tasks")?).send().await?;
        Ok(ensure_success(resp, "tasks")?.json().await?)
    }

    /// POST /tasks
    ///
    /// # Errors
    /// Returns an error on network failure or a non-2xx status.
    pub async fn create_task(&self, name: &str) -> Result<Task, RemoteError> {
        let resp = self
            .http
            .post(self.endpoint("tasks")?)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Ok(ensure_success(resp, "tasks")?.json().await?)
    }

    /// DELETE /tasks/{id}
    ///
    /// # Errors
    /// Returns an error on network failure or a non-2xx status.
    pub async fn delete_task(&self, id: &str) -> Result<(), RemoteError> {
        let path = format!("tasks/{id}");
        let resp = self.http.delete(self.endpoint(&path)?).send().await?;
        ensure_success(resp, &path)?;
        Ok(())
    }

    /// GET /focus-sessions
    ///
    /// # Errors
    /// Returns an error on network failure or a non-2xx status.
    pub async fn list_sessions(&self) -> Result<Vec<RemoteSession>, RemoteError> {
        let resp = self
            .http
            .get(self.endpoint("focus-sessions")?)
            .send()
            .await?;
        Ok(ensure_success(resp, "focus-sessions")?.json().await?)
    }
}

impl RemoteStore for ApiClient {
    fn submit_session(
        &self,
        payload: &FocusSessionPayload,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send {
        async move {
            let resp = self
                .http
                .post(self.endpoint("focus-sessions")?)
                .json(payload)
                .send()
                .await?;
            ensure_success(resp, "focus-sessions")?;
            Ok(())
        }
    }
}

fn ensure_success(resp: Response, endpoint: &str) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(RemoteError::Status {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        })
    }
}
