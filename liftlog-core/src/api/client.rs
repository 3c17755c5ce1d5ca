//! HTTP client for the remote workout API.
//!
//! Routes (relative to the configured base URL):
//! - `GET /health/database`
//! - `GET/POST /exercises`, `GET/PUT/DELETE /exercises/{id}`
//! - `GET/POST /workouts`, `GET/PUT/DELETE /workouts/{id}`

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Body of `GET /health/database`. The endpoint always answers 200; a failed
/// database check is reported through `connected` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body returned with 404 and 500 responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the backend's database health.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.http.get(self.build_url("health/database")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn list<R: DeserializeOwned>(&self, collection: &str) -> Result<Vec<R>, ApiError> {
        let response = self.http.get(self.build_url(collection)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch<R: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<R, ApiError> {
        let response = self.http.get(self.item_url(collection, id)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// POSTs a draft and returns the stored record (201 or 200).
    pub async fn create<B, R>(&self, collection: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.build_url(collection))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// PUTs a patch and returns the server's updated record.
    pub async fn update<B, R>(&self, collection: &str, id: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .put(self.item_url(collection, id))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.item_url(collection, id)).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Joins the base URL and a relative path with exactly one slash.
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.build_url(collection), urlencoding::encode(id))
    }
}

/// Maps non-success statuses to [`ApiError`], reading `{error}` from the body if present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound(message))
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
