//! Background task handling for patchdeck
//!
//! Every request runs as its own tokio task that owns its inputs and reports
//! back over the channel. Channel sends use `let _ =`: a failed send only
//! means the UI has shut down and nobody is listening.

use crate::accept;
use crate::api::{AcceptRequest, ApiError, ImproveRequest};
use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::store::FetchTicket;
use crate::ui::{App, ToastKind};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Apply every pending message. Returns true when anything changed.
pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) -> bool {
    let mut changed = false;
    while let Ok(msg) = rx.try_recv() {
        changed = true;
        apply_message(app, msg);
    }
    changed
}

pub fn apply_message(app: &mut App, msg: BackgroundMessage) {
    match msg {
        BackgroundMessage::ImproveComplete(outcome) => {
            app.improve_finished(outcome);
        }
        BackgroundMessage::FileChangesLoaded { ticket, result } => {
            if let Some(message) = app.viewer.file_changes_loaded(&ticket, result) {
                app.show_toast(&message, ToastKind::Error);
            }
        }
        BackgroundMessage::AcceptComplete(outcome) => {
            let notice = app.viewer.accept_finished(outcome);
            let kind = if notice.is_success() {
                ToastKind::Success
            } else {
                ToastKind::Error
            };
            app.show_toast(notice.message(), kind);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  REQUEST TASKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn spawn_improve(ctx: &RuntimeContext, request: ImproveRequest) {
    let backend = Arc::clone(ctx.backend);
    let tx = ctx.tx.clone();
    spawn_background(
        ctx.tx.clone(),
        "improve",
        async move {
            let outcome = backend.improve(&request).await.map_err(|e| {
                warn!(error = %e, "improvement request failed");
                e.user_message()
            });
            if let Ok(result) = &outcome {
                info!(change_id = ?result.change_id(), "improvement result received");
            }
            let _ = tx.send(BackgroundMessage::ImproveComplete(outcome));
        },
        |crash| BackgroundMessage::ImproveComplete(Err(crash)),
    );
}

pub fn spawn_file_changes_fetch(ctx: &RuntimeContext, ticket: FetchTicket) {
    let backend = Arc::clone(ctx.backend);
    let tx = ctx.tx.clone();
    let crashed_ticket = ticket.clone();
    spawn_background(
        ctx.tx.clone(),
        "file_changes_fetch",
        async move {
            let result = backend
                .file_changes(&ticket.change_id)
                .await
                .map_err(|e| {
                    warn!(change_id = %ticket.change_id, error = %e, "file change fetch failed");
                    e.user_message()
                });
            let _ = tx.send(BackgroundMessage::FileChangesLoaded { ticket, result });
        },
        move |crash| BackgroundMessage::FileChangesLoaded {
            ticket: crashed_ticket,
            result: Err(crash),
        },
    );
}

pub fn spawn_accept(ctx: &RuntimeContext, request: AcceptRequest) {
    let backend = Arc::clone(ctx.backend);
    let tx = ctx.tx.clone();
    spawn_background(
        ctx.tx.clone(),
        "accept_changes",
        async move {
            let outcome = accept::submit(backend.as_ref(), &request).await;
            if let Err(e) = &outcome {
                warn!(change_id = %request.change_id, error = %e, "accept failed");
            }
            let _ = tx.send(BackgroundMessage::AcceptComplete(outcome));
        },
        |crash| BackgroundMessage::AcceptComplete(Err(ApiError::Internal(crash))),
    );
}

/// Run `fut` on the runtime. If it panics, `on_panic` turns the panic text
/// into the task's own completion message so the state it was settling is
/// released.
pub fn spawn_background<F, P>(
    tx: mpsc::Sender<BackgroundMessage>,
    task_name: &'static str,
    fut: F,
    on_panic: P,
) where
    F: Future<Output = ()> + Send + 'static,
    P: FnOnce(String) -> BackgroundMessage + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            error!(task = task_name, panic = %detail, "background task crashed");
            let _ = tx.send(on_panic(format!(
                "Background task '{}' crashed unexpectedly: {}",
                task_name, detail
            )));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AcceptOutcome, ApiResult, Backend, FileChangeMap, FileChangeRecord, ImprovementResult,
        PendingChange,
    };
    use crate::testing::ScriptedBackend;
    use crate::ui::ResultTab;
    use serde_json::json;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn app_with_result(change_id: Option<&str>) -> App {
        let mut app = App::new("http://localhost:5000", None);
        let result = ImprovementResult::from_value(json!({ "change_id": change_id })).unwrap();
        app.improve_finished(Ok(result));
        app.toast = None;
        app
    }

    fn x_py() -> FileChangeMap {
        let mut map = FileChangeMap::new();
        map.insert(
            "x.py".to_string(),
            FileChangeRecord::new(Some("@@ -1,1 +1,1 @@\n-old\n+new"), Some("old"), "new"),
        );
        map
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_changes_are_fetched_once_per_change_id() {
        let scripted = Arc::new(ScriptedBackend::new());
        scripted.respond_file_changes(x_py());
        let backend: Arc<dyn Backend> = scripted.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = app_with_result(Some("c1"));
        let ticket = app.viewer.select_tab(ResultTab::FileChanges).unwrap();
        spawn_file_changes_fetch(&ctx, ticket);
        // Toggling while the request is in flight must not issue another
        assert!(app.viewer.select_tab(ResultTab::Plan).is_none());
        assert!(app.viewer.select_tab(ResultTab::FileChanges).is_none());

        let msg = rx.recv_timeout(WAIT).unwrap();
        apply_message(&mut app, msg);
        assert_eq!(app.viewer.active_file(), Some("x.py"));

        assert!(app.viewer.select_tab(ResultTab::Raw).is_none());
        assert!(app.viewer.select_tab(ResultTab::FileChanges).is_none());
        assert_eq!(scripted.file_change_calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn fetch_failure_becomes_error_toast() {
        let scripted = Arc::new(ScriptedBackend::new());
        scripted.fail_file_changes("Change ID c1 not found");
        let backend: Arc<dyn Backend> = scripted.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = app_with_result(Some("c1"));
        let ticket = app.viewer.select_tab(ResultTab::FileChanges).unwrap();
        spawn_file_changes_fetch(&ctx, ticket);
        apply_message(&mut app, rx.recv_timeout(WAIT).unwrap());

        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error());
        assert_eq!(
            toast.message,
            "Error fetching file changes: Change ID c1 not found"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn accept_conflict_is_reported_and_retriggerable() {
        let scripted = Arc::new(ScriptedBackend::new());
        scripted.fail_accept("git conflict");
        let backend: Arc<dyn Backend> = scripted.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = app_with_result(Some("c1"));
        let request = app.viewer.begin_accept().unwrap();
        assert!(app.viewer.accept_in_progress());
        spawn_accept(&ctx, request);
        apply_message(&mut app, rx.recv_timeout(WAIT).unwrap());

        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error());
        assert!(toast.message.contains("git conflict"));
        assert!(!app.viewer.accept_in_progress());
        assert!(app.viewer.can_commit());
        assert_eq!(scripted.accept_calls(), 1);
        assert_eq!(app.viewer.change_id(), Some("c1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn improve_result_replaces_view() {
        let scripted = Arc::new(ScriptedBackend::new());
        scripted.respond_improve(json!({
            "change_id": "c2",
            "plan": { "files_to_modify": ["a.py"] }
        }));
        let backend: Arc<dyn Backend> = scripted.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = App::new("http://localhost:5000", None);
        app.form.repo_path = "/repo".to_string();
        app.form.prompt = "add logging".to_string();
        let request = app.begin_improve().unwrap();
        spawn_improve(&ctx, request);
        assert!(drain_until_message(&mut app, &rx));

        assert_eq!(app.viewer.change_id(), Some("c2"));
        assert!(!app.is_improving());
        assert_eq!(scripted.improve_calls(), 1);
        assert_eq!(
            scripted.last_improve().map(|r| r.prompt),
            Some("add logging".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn improve_failure_keeps_previous_result() {
        let scripted = Arc::new(ScriptedBackend::new());
        scripted.fail_improve("Repository path does not exist");
        let backend: Arc<dyn Backend> = scripted.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = app_with_result(Some("c1"));
        app.open_form();
        app.form.repo_path = "/missing".to_string();
        app.form.prompt = "add logging".to_string();
        let request = app.begin_improve().unwrap();
        spawn_improve(&ctx, request);
        assert!(drain_until_message(&mut app, &rx));

        assert_eq!(
            app.form.error.as_deref(),
            Some("Repository path does not exist")
        );
        assert!(app.show_form);
        assert_eq!(app.viewer.change_id(), Some("c1"));
    }

    /// Backend whose every call panics mid-request
    struct CrashingBackend;

    #[async_trait::async_trait]
    impl Backend for CrashingBackend {
        async fn improve(&self, _: &ImproveRequest) -> ApiResult<ImprovementResult> {
            panic!("improve exploded")
        }
        async fn accept_changes(&self, _: &AcceptRequest) -> ApiResult<AcceptOutcome> {
            panic!("accept exploded")
        }
        async fn file_changes(&self, _: &str) -> ApiResult<FileChangeMap> {
            panic!("fetch exploded")
        }
        async fn pending_changes(&self) -> ApiResult<Vec<PendingChange>> {
            panic!("pending exploded")
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn crashed_tasks_leave_every_trigger_usable() {
        let backend: Arc<dyn Backend> = Arc::new(CrashingBackend);
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            backend: &backend,
            tx: &tx,
        };

        let mut app = app_with_result(Some("c1"));
        let ticket = app.viewer.select_tab(ResultTab::FileChanges).unwrap();
        spawn_file_changes_fetch(&ctx, ticket);
        apply_message(&mut app, rx.recv_timeout(WAIT).unwrap());
        assert!(!app.viewer.is_fetching_file_changes());
        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error());
        assert!(toast.message.contains("fetch exploded"));
        app.viewer.select_tab(ResultTab::Plan);
        assert!(app.viewer.select_tab(ResultTab::FileChanges).is_some());

        let request = app.viewer.begin_accept().unwrap();
        spawn_accept(&ctx, request);
        apply_message(&mut app, rx.recv_timeout(WAIT).unwrap());
        assert!(!app.viewer.accept_in_progress());
        assert!(app.viewer.can_commit());
        assert!(app.toast.as_ref().unwrap().message.contains("accept exploded"));

        app.open_form();
        app.form.repo_path = "/repo".to_string();
        app.form.prompt = "add logging".to_string();
        let request = app.begin_improve().unwrap();
        spawn_improve(&ctx, request);
        apply_message(&mut app, rx.recv_timeout(WAIT).unwrap());
        assert!(!app.is_improving());
        assert!(app.form.error.as_deref().unwrap().contains("improve exploded"));
        assert!(!app.loading().is_loading());
        assert_eq!(app.viewer.change_id(), Some("c1"));
    }

    fn drain_until_message(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) -> bool {
        match rx.recv_timeout(WAIT) {
            Ok(msg) => {
                apply_message(app, msg);
                drain_messages(app, rx);
                true
            }
            Err(_) => false,
        }
    }
}
