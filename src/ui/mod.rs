//! Terminal UI for patchdeck
//!
//! `App` is the single owner of UI state. Background tasks never touch it;
//! their results arrive as messages and are applied by the event loop.

pub mod form;
mod render;
pub mod theme;
pub mod types;
pub mod viewer;

pub use form::{FormField, SubmissionForm};
pub use render::render;
pub use types::{
    DiffViewMode, InputMode, LoadingState, ResultTab, Toast, ToastKind, SPINNER_FRAMES,
};
pub use viewer::{FileChangesView, ResultViewer};

use crate::api::{ImproveRequest, ImprovementResult};
use tracing::info;

pub struct App {
    /// Backend address, shown in the header
    pub server_url: String,
    pub viewer: ResultViewer,
    pub form: SubmissionForm,
    /// The form is shown until the first result arrives, and on demand
    pub show_form: bool,
    pub input_mode: InputMode,
    pub toast: Option<Toast>,
    pub loading_frame: usize,
    pub should_quit: bool,
    improving: bool,
}

impl App {
    pub fn new(server_url: &str, default_repo_path: Option<&str>) -> Self {
        Self {
            server_url: server_url.to_string(),
            viewer: ResultViewer::new(),
            form: SubmissionForm::new(default_repo_path),
            show_form: true,
            input_mode: InputMode::RepoPath,
            toast: None,
            loading_frame: 0,
            should_quit: false,
            improving: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  LOADING
    // ═══════════════════════════════════════════════════════════════════════

    /// The most significant request in flight
    pub fn loading(&self) -> LoadingState {
        if self.improving {
            LoadingState::Improving
        } else if self.viewer.accept_in_progress() {
            LoadingState::Committing
        } else if self.viewer.is_fetching_file_changes() {
            LoadingState::FetchingFileChanges
        } else {
            LoadingState::None
        }
    }

    pub fn is_improving(&self) -> bool {
        self.improving
    }

    pub fn tick_loading(&mut self) {
        if self.loading().is_loading() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.loading_frame % SPINNER_FRAMES.len()]
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  SUBMISSION
    // ═══════════════════════════════════════════════════════════════════════

    pub fn open_form(&mut self) {
        self.show_form = true;
        self.form.focus = FormField::RepoPath;
        self.input_mode = InputMode::RepoPath;
    }

    /// Close the form if there is a result to go back to.
    pub fn close_form(&mut self) {
        if self.viewer.result().is_some() {
            self.show_form = false;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Validate the form and mark an improvement as running.
    pub fn begin_improve(&mut self) -> Option<ImproveRequest> {
        if self.improving {
            self.show_toast("An improvement is already running", ToastKind::Info);
            return None;
        }
        let request = self.form.submit()?;
        info!(repo = %request.repo_path, "submitting improvement request");
        self.improving = true;
        Some(request)
    }

    pub fn improve_finished(&mut self, outcome: Result<ImprovementResult, String>) {
        self.improving = false;
        match outcome {
            Ok(result) => {
                self.viewer.replace_result(result);
                self.show_form = false;
                self.input_mode = InputMode::Normal;
                self.show_toast("Improvement ready", ToastKind::Success);
            }
            Err(message) => {
                self.form.error = Some(message.clone());
                self.show_form = true;
                self.show_toast(&message, ToastKind::Error);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  TOASTS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn clear_expired_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// Show a toast, replacing whatever is visible
    pub fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ready_form(app: &mut App) {
        app.form.repo_path = "/repo".to_string();
        app.form.prompt = "add logging".to_string();
    }

    #[test]
    fn invalid_form_never_starts_improving() {
        let mut app = App::new("http://localhost:5000", None);
        assert!(app.begin_improve().is_none());
        assert!(!app.is_improving());
        assert!(app.form.error.is_some());
        assert_eq!(app.loading(), LoadingState::None);
    }

    #[test]
    fn one_improvement_at_a_time() {
        let mut app = App::new("http://localhost:5000", None);
        ready_form(&mut app);
        assert!(app.begin_improve().is_some());
        assert_eq!(app.loading(), LoadingState::Improving);
        assert!(app.begin_improve().is_none());
    }

    #[test]
    fn result_closes_form_and_resets_view() {
        let mut app = App::new("http://localhost:5000", None);
        ready_form(&mut app);
        app.begin_improve();
        let result = ImprovementResult::from_value(json!({ "change_id": "c1" })).unwrap();
        app.improve_finished(Ok(result));

        assert!(!app.show_form);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.viewer.change_id(), Some("c1"));
        assert_eq!(app.viewer.active_tab(), ResultTab::Plan);
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));
    }

    #[test]
    fn failure_stays_on_form_with_message() {
        let mut app = App::new("http://localhost:5000", None);
        ready_form(&mut app);
        app.begin_improve();
        app.improve_finished(Err("Repository not found".to_string()));

        assert!(app.show_form);
        assert_eq!(app.form.error.as_deref(), Some("Repository not found"));
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error()));
        assert!(!app.is_improving());
    }

    #[test]
    fn form_cannot_close_without_result() {
        let mut app = App::new("http://localhost:5000", None);
        app.close_form();
        assert!(app.show_form);
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
