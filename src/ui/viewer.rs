//! Per-result viewer state
//!
//! One `ResultViewer` lives for the whole session. It owns the current
//! result together with everything derived from it (active tab, fetched file
//! changes, selection). Replacing the result resets the derived state; the
//! acceptance controller survives so an in-flight commit still reports back.

use crate::accept::{AcceptNotice, AcceptRejection, ChangeAcceptance};
use crate::api::{AcceptOutcome, AcceptRequest, ApiResult, FileChangeMap, FileChangeRecord, ImprovementResult};
use crate::store::{ChangeFileStore, Ensure, FetchTicket, LoadState};
use crate::ui::types::{DiffViewMode, ResultTab};
use std::sync::Arc;

/// What the file-changes tab can show right now
#[derive(Debug, Clone, PartialEq)]
pub enum FileChangesView<'a> {
    /// No change id, never fetched, or the fetch failed
    Unavailable,
    Loading,
    Loaded {
        map: &'a FileChangeMap,
        active: Option<(&'a str, &'a FileChangeRecord)>,
    },
}

#[derive(Debug, Default)]
pub struct ResultViewer {
    result: Option<ImprovementResult>,
    active_tab: ResultTab,
    diff_mode: DiffViewMode,
    active_file: Option<String>,
    file_changes: ChangeFileStore,
    acceptance: ChangeAcceptance,
    pub commit_message: String,
    pub scroll: u16,
}

impl ResultViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&ImprovementResult> {
        self.result.as_ref()
    }

    pub fn change_id(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| r.change_id())
    }

    /// Show a new result. Cached file changes are dropped wholesale and any
    /// fetch still running for the old result is ignored when it lands.
    pub fn replace_result(&mut self, result: ImprovementResult) {
        self.result = Some(result);
        self.active_tab = ResultTab::Plan;
        self.diff_mode = DiffViewMode::Diff;
        self.active_file = None;
        self.file_changes.reset();
        self.commit_message.clear();
        self.scroll = 0;
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  TABS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn active_tab(&self) -> ResultTab {
        self.active_tab
    }

    /// Switch views. Entering the file-changes view may require a fetch,
    /// returned as a ticket for the caller to run.
    pub fn select_tab(&mut self, tab: ResultTab) -> Option<FetchTicket> {
        if self.active_tab != tab {
            self.scroll = 0;
        }
        self.active_tab = tab;
        if tab == ResultTab::FileChanges {
            self.ensure_file_changes()
        } else {
            None
        }
    }

    fn ensure_file_changes(&mut self) -> Option<FetchTicket> {
        let change_id = self.result.as_ref().and_then(|r| r.change_id())?;
        match self.file_changes.ensure_loaded(change_id) {
            Ensure::Fetch(ticket) => Some(ticket),
            Ensure::Pending => None,
            Ensure::Ready(map) => {
                let selected = self
                    .active_file
                    .as_ref()
                    .is_some_and(|path| map.contains_key(path));
                if !selected {
                    self.active_file = map.keys().next().cloned();
                }
                None
            }
        }
    }

    /// Apply a finished fetch. Returns the notification to show on failure.
    pub fn file_changes_loaded(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<FileChangeMap, String>,
    ) -> Option<String> {
        match self.file_changes.complete(ticket, outcome)? {
            LoadState::Loaded(map) => {
                self.active_file = map.keys().next().cloned();
                None
            }
            LoadState::Failed(message) => Some(format!("Error fetching file changes: {}", message)),
            LoadState::Loading => None,
        }
    }

    pub fn is_fetching_file_changes(&self) -> bool {
        self.change_id()
            .is_some_and(|id| self.file_changes.is_loading(id))
    }

    pub fn file_changes_view(&self) -> FileChangesView<'_> {
        let Some(change_id) = self.change_id() else {
            return FileChangesView::Unavailable;
        };
        match self.file_changes.state(change_id) {
            Some(LoadState::Loading) => FileChangesView::Loading,
            Some(LoadState::Loaded(map)) => {
                let active = self
                    .active_file
                    .as_deref()
                    .and_then(|path| map.get_key_value(path))
                    .map(|(path, record)| (path.as_str(), record));
                FileChangesView::Loaded { map, active }
            }
            Some(LoadState::Failed(_)) | None => FileChangesView::Unavailable,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  FILE SELECTION
    // ═══════════════════════════════════════════════════════════════════════

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn diff_mode(&self) -> DiffViewMode {
        self.diff_mode
    }

    pub fn set_diff_mode(&mut self, mode: DiffViewMode) {
        if self.diff_mode != mode {
            self.scroll = 0;
        }
        self.diff_mode = mode;
    }

    fn loaded_map(&self) -> Option<Arc<FileChangeMap>> {
        let change_id = self.change_id()?;
        self.file_changes.loaded(change_id).cloned()
    }

    /// Select the file `offset` positions away from the current one, clamped
    /// to the list bounds.
    pub fn move_file_selection(&mut self, offset: isize) {
        let Some(map) = self.loaded_map() else {
            return;
        };
        if map.is_empty() {
            return;
        }
        let current = self
            .active_file
            .as_deref()
            .and_then(|path| map.get_index_of(path))
            .unwrap_or(0);
        let last = map.len() - 1;
        let target = current.saturating_add_signed(offset).min(last);
        if let Some((path, _)) = map.get_index(target) {
            if self.active_file.as_deref() != Some(path.as_str()) {
                self.scroll = 0;
            }
            self.active_file = Some(path.clone());
        }
    }

    pub fn select_file(&mut self, path: &str) -> bool {
        let known = self
            .loaded_map()
            .is_some_and(|map| map.contains_key(path));
        if known {
            self.active_file = Some(path.to_string());
            self.scroll = 0;
        }
        known
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.scroll.saturating_add(delta as u16)
        };
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  COMMIT
    // ═══════════════════════════════════════════════════════════════════════

    pub fn accept_in_progress(&self) -> bool {
        self.acceptance.in_progress()
    }

    /// The commit trigger is offered only when there is something to commit
    /// and no commit is running.
    pub fn can_commit(&self) -> bool {
        self.change_id().is_some() && !self.acceptance.in_progress()
    }

    pub fn begin_accept(&mut self) -> Result<AcceptRequest, AcceptRejection> {
        let change_id = self.result.as_ref().and_then(|r| r.change_id());
        self.acceptance.begin(change_id, &self.commit_message)
    }

    pub fn accept_finished(&mut self, outcome: ApiResult<AcceptOutcome>) -> AcceptNotice {
        self.acceptance.finish(outcome)
    }
}
