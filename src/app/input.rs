//! Input handling for the patchdeck TUI

use crate::accept::AcceptRejection;
use crate::app::background;
use crate::app::RuntimeContext;
use crate::ui::{App, DiffViewMode, FormField, InputMode, ResultTab, ToastKind};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: i32 = 10;

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN INPUT DISPATCHER
// ═══════════════════════════════════════════════════════════════════════════

/// Main key event handler - dispatches to mode-specific handlers
pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    match app.input_mode {
        InputMode::RepoPath | InputMode::Prompt => handle_form_input(app, key, ctx),
        InputMode::CommitMessage => handle_commit_message_input(app, key),
        InputMode::Normal if app.show_form => handle_form_idle(app, key, ctx),
        InputMode::Normal => handle_viewer_input(app, key, ctx),
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
//  SUBMISSION FORM
// ═══════════════════════════════════════════════════════════════════════════

fn focus_mode(field: FormField) -> InputMode {
    match field {
        FormField::RepoPath => InputMode::RepoPath,
        FormField::Prompt => InputMode::Prompt,
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.form.toggle_focus();
            app.input_mode = focus_mode(app.form.focus);
        }
        KeyCode::Enter => submit_form(app, ctx),
        KeyCode::Backspace => app.form.pop(),
        KeyCode::Char(c) => app.form.push(c),
        _ => {}
    }
}

/// Form visible but not being edited (e.g. while a request runs)
fn handle_form_idle(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') => app.input_mode = focus_mode(app.form.focus),
        KeyCode::Enter => submit_form(app, ctx),
        KeyCode::Esc => app.close_form(),
        _ => {}
    }
}

fn submit_form(app: &mut App, ctx: &RuntimeContext) {
    if let Some(request) = app.begin_improve() {
        app.input_mode = InputMode::Normal;
        background::spawn_improve(ctx, request);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESULT VIEWER
// ═══════════════════════════════════════════════════════════════════════════

fn handle_viewer_input(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    let on_files = app.viewer.active_tab() == ResultTab::FileChanges;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(tab) = ResultTab::from_digit(c) {
                select_tab(app, tab, ctx);
            }
        }
        KeyCode::Tab | KeyCode::Right => {
            let tab = app.viewer.active_tab().next();
            select_tab(app, tab, ctx);
        }
        KeyCode::BackTab | KeyCode::Left => {
            let tab = app.viewer.active_tab().prev();
            select_tab(app, tab, ctx);
        }
        KeyCode::Char('j') | KeyCode::Down if on_files => app.viewer.move_file_selection(1),
        KeyCode::Char('k') | KeyCode::Up if on_files => app.viewer.move_file_selection(-1),
        KeyCode::Char('j') | KeyCode::Down => app.viewer.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.viewer.scroll_by(-1),
        KeyCode::Char('d') if on_files => app.viewer.set_diff_mode(DiffViewMode::Diff),
        KeyCode::Char('o') if on_files => app.viewer.set_diff_mode(DiffViewMode::Original),
        KeyCode::Char('c') if on_files => app.viewer.set_diff_mode(DiffViewMode::Current),
        KeyCode::PageDown => app.viewer.scroll_by(PAGE),
        KeyCode::PageUp => app.viewer.scroll_by(-PAGE),
        KeyCode::Home => app.viewer.scroll = 0,
        KeyCode::Char('m') => app.input_mode = InputMode::CommitMessage,
        KeyCode::Char('C') => commit(app, ctx),
        KeyCode::Char('n') => app.open_form(),
        _ => {}
    }
}

fn select_tab(app: &mut App, tab: ResultTab, ctx: &RuntimeContext) {
    if let Some(ticket) = app.viewer.select_tab(tab) {
        background::spawn_file_changes_fetch(ctx, ticket);
    }
}

fn commit(app: &mut App, ctx: &RuntimeContext) {
    match app.viewer.begin_accept() {
        Ok(request) => background::spawn_accept(ctx, request),
        // The trigger is disabled while a commit runs
        Err(AcceptRejection::InProgress) => {}
        Err(rejection @ AcceptRejection::MissingChangeId) => {
            app.show_toast(rejection.user_message(), ToastKind::Error);
        }
    }
}

fn handle_commit_message_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.viewer.commit_message.pop();
        }
        KeyCode::Char(c) => app.viewer.commit_message.push(c),
        _ => {}
    }
}
