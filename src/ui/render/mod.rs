mod files;
mod footer;
mod form;
mod header;
mod toast;
mod views;

use crate::ui::theme::Theme;
use crate::ui::types::ResultTab;
use crate::ui::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use files::render_file_changes;
use footer::{render_commit_panel, render_footer};
use form::render_form;
use header::{render_header, render_tabs};
use toast::render_toast;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with dark background
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(5),    // Form or result
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);
    if app.show_form || app.viewer.result().is_none() {
        render_form(frame, inset(layout[1]), app);
    } else {
        render_result(frame, layout[1], app);
    }
    render_footer(frame, layout[2], app);

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.viewer.result() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tabs
            Constraint::Min(3),    // Active view
            Constraint::Length(3), // Commit panel
        ])
        .split(area);

    render_tabs(frame, layout[0], app);

    let body = inset(layout[1]);
    match app.viewer.active_tab() {
        ResultTab::FileChanges => render_file_changes(frame, body, app),
        tab => {
            let lines = views::tab_lines(result, tab);
            let view = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((app.viewer.scroll, 0));
            frame.render_widget(view, body);
        }
    }

    render_commit_panel(frame, layout[2], app);
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        width: area.width.saturating_sub(2),
        ..area
    }
}
