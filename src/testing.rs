//! Scripted in-memory backend for tests
//!
//! Responses are configured up front; every call is counted so tests can
//! assert how many requests a workflow issued.

use crate::api::{
    AcceptOutcome, AcceptRequest, ApiError, ApiResult, Backend, FileChangeMap, ImproveRequest,
    ImprovementResult, PendingChange,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Script {
    improve: Option<Result<Value, String>>,
    accept_error: Option<String>,
    file_changes: Option<Result<FileChangeMap, String>>,
    last_accept: Option<AcceptRequest>,
    last_improve: Option<ImproveRequest>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<Script>,
    improve_calls: AtomicUsize,
    accept_calls: AtomicUsize,
    file_change_calls: AtomicUsize,
}

fn backend_error(message: &str) -> ApiError {
    ApiError::Backend {
        status: 500,
        message: message.to_string(),
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn respond_improve(&self, document: Value) {
        self.script().improve = Some(Ok(document));
    }

    pub fn fail_improve(&self, message: &str) {
        self.script().improve = Some(Err(message.to_string()));
    }

    pub fn fail_accept(&self, message: &str) {
        self.script().accept_error = Some(message.to_string());
    }

    pub fn respond_file_changes(&self, map: FileChangeMap) {
        self.script().file_changes = Some(Ok(map));
    }

    pub fn fail_file_changes(&self, message: &str) {
        self.script().file_changes = Some(Err(message.to_string()));
    }

    pub fn improve_calls(&self) -> usize {
        self.improve_calls.load(Ordering::SeqCst)
    }

    pub fn accept_calls(&self) -> usize {
        self.accept_calls.load(Ordering::SeqCst)
    }

    pub fn file_change_calls(&self) -> usize {
        self.file_change_calls.load(Ordering::SeqCst)
    }

    pub fn last_accept(&self) -> Option<AcceptRequest> {
        self.script().last_accept.clone()
    }

    pub fn last_improve(&self) -> Option<ImproveRequest> {
        self.script().last_improve.clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn improve(&self, request: &ImproveRequest) -> ApiResult<ImprovementResult> {
        self.improve_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = {
            let mut script = self.script();
            script.last_improve = Some(request.clone());
            script.improve.clone()
        };
        match scripted {
            Some(Ok(document)) => ImprovementResult::from_value(document)
                .map_err(|e| ApiError::Decode(e.to_string())),
            Some(Err(message)) => Err(backend_error(&message)),
            None => Err(backend_error("Failed to improve code")),
        }
    }

    async fn accept_changes(&self, request: &AcceptRequest) -> ApiResult<AcceptOutcome> {
        self.accept_calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script();
        script.last_accept = Some(request.clone());
        match &script.accept_error {
            Some(message) => Err(backend_error(message)),
            None => Ok(AcceptOutcome {
                change_id: Some(request.change_id.clone()),
                commit_message: request.commit_message.clone(),
            }),
        }
    }

    async fn file_changes(&self, _change_id: &str) -> ApiResult<FileChangeMap> {
        self.file_change_calls.fetch_add(1, Ordering::SeqCst);
        match self.script().file_changes.clone() {
            Some(Ok(map)) => Ok(map),
            Some(Err(message)) => Err(backend_error(&message)),
            None => Ok(FileChangeMap::new()),
        }
    }

    async fn pending_changes(&self) -> ApiResult<Vec<PendingChange>> {
        Ok(Vec::new())
    }
}
