use super::error::{ApiError, ApiResult};
use super::types::{
    AcceptOutcome, AcceptRequest, FileChangeMap, FileChangesRequest, FileChangesResponse,
    ImproveRequest, ImprovementResult, PendingChange, PendingChangesResponse,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const IMPROVE_PATH: &str = "chatv1";
const ACCEPT_PATH: &str = "accept_changes";
const FILE_CHANGES_PATH: &str = "get_file_changes";
const PENDING_PATH: &str = "pending_changes";

/// The code-improvement service, as seen by the viewer
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run an improvement request. Slow: the backend plans, edits and tests.
    async fn improve(&self, request: &ImproveRequest) -> ApiResult<ImprovementResult>;

    /// Commit the pending change set identified by `request.change_id`.
    async fn accept_changes(&self, request: &AcceptRequest) -> ApiResult<AcceptOutcome>;

    /// Per-file diffs and contents for a pending change set.
    async fn file_changes(&self, change_id: &str) -> ApiResult<FileChangeMap>;

    /// Change sets the backend still holds.
    async fn pending_changes(&self) -> ApiResult<Vec<PendingChange>>;
}

/// JSON-over-HTTP client for the backend
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(server_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut base = Url::parse(server_url)?;
        // Endpoints are joined relative to the base, which needs a trailing slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("patchdeck/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path)?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<Value> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        read_body(response, fallback).await
    }

    async fn get_json(&self, path: &str, fallback: &str) -> ApiResult<Value> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        read_body(response, fallback).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn improve(&self, request: &ImproveRequest) -> ApiResult<ImprovementResult> {
        let value = self
            .post_json(IMPROVE_PATH, request, "Failed to improve code")
            .await?;
        ImprovementResult::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn accept_changes(&self, request: &AcceptRequest) -> ApiResult<AcceptOutcome> {
        let value = self
            .post_json(ACCEPT_PATH, request, "Failed to accept changes")
            .await?;
        // Any successful body counts; its fields are informational
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn file_changes(&self, change_id: &str) -> ApiResult<FileChangeMap> {
        let value = self
            .post_json(
                FILE_CHANGES_PATH,
                &FileChangesRequest { change_id },
                "Failed to fetch file changes",
            )
            .await?;
        let response: FileChangesResponse = decode(value)?;
        Ok(response.file_changes.unwrap_or_default())
    }

    async fn pending_changes(&self) -> ApiResult<Vec<PendingChange>> {
        let value = self
            .get_json(PENDING_PATH, "Failed to list pending changes")
            .await?;
        let response: PendingChangesResponse = decode(value)?;
        Ok(response.pending_changes)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Turn a response into its JSON body, or into the failure it reports.
///
/// The reference backend answers some failures with status 200 and an
/// `error` field, so a body-level error counts even on success.
async fn read_body(response: reqwest::Response, fallback: &str) -> ApiResult<Value> {
    let status = response.status();
    let text = response.text().await?;
    classify_body(status, &text, fallback)
}

fn classify_body(status: StatusCode, text: &str, fallback: &str) -> ApiResult<Value> {
    let body = if text.trim().is_empty() {
        Some(Value::Null)
    } else {
        serde_json::from_str::<Value>(text).ok()
    };

    let reported = body.as_ref().and_then(error_message);
    if !status.is_success() || reported.is_some() {
        let message = reported.unwrap_or_else(|| fallback.to_string());
        warn!(status = status.as_u16(), %message, "backend reported failure");
        return Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    body.ok_or_else(|| ApiError::Decode(crate::util::truncate(text, 200)))
}

fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
