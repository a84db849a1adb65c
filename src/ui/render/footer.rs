use crate::ui::theme::Theme;
use crate::ui::types::{InputMode, ResultTab};
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Commit message field and trigger, shown under every result view
pub(super) fn render_commit_panel(frame: &mut Frame, area: Rect, app: &App) {
    let viewer = &app.viewer;
    let editing = app.input_mode == InputMode::CommitMessage;

    let mut message = vec![Span::styled(" Commit Message: ", Theme::text_muted())];
    if viewer.commit_message.is_empty() && !editing {
        message.push(Span::styled(
            "Enter commit message (optional)",
            Theme::text_dim().add_modifier(Modifier::ITALIC),
        ));
    } else {
        message.push(Span::styled(viewer.commit_message.as_str(), Theme::text()));
    }
    if editing {
        message.push(Span::styled("█", Style::default().fg(Theme::WHITE)));
    }

    let trigger = if viewer.accept_in_progress() {
        Span::styled(
            format!(" {} Committing... ", app.spinner()),
            Style::default().fg(Theme::YELLOW),
        )
    } else if viewer.can_commit() {
        Span::styled(
            " C Commit Changes ",
            Style::default()
                .fg(Theme::GREY_900)
                .bg(Theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" No change to accept ", Theme::text_dim())
    };

    let border = if editing {
        Theme::border_active()
    } else {
        Theme::border()
    };
    let panel = Paragraph::new(vec![
        Line::from(message),
        Line::from(vec![Span::raw(" "), trigger]),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(border)
            .title(Span::styled(" Version Control Integration ", Theme::heading())),
    );
    frame.render_widget(panel, area);
}

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    let loading = app.loading();
    if loading.is_loading() {
        spans.push(Span::styled(
            format!("{} ", app.spinner()),
            Style::default().fg(Theme::WHITE),
        ));
        spans.push(Span::styled(loading.message(), Theme::text_muted()));
        spans.push(Span::raw("   "));
    }

    for (key, label) in key_hints(app) {
        spans.push(Span::styled(key, Theme::key()));
        spans.push(Span::styled(format!(" {}  ", label), Theme::text_dim()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.input_mode {
        InputMode::RepoPath | InputMode::Prompt => {
            vec![("Enter", "submit"), ("Tab", "next field"), ("Esc", "back")]
        }
        InputMode::CommitMessage => vec![("Enter", "done"), ("Esc", "done")],
        InputMode::Normal if app.show_form => {
            vec![("i", "edit"), ("Enter", "submit"), ("Esc", "back"), ("q", "quit")]
        }
        InputMode::Normal => {
            let mut hints = vec![("1-6", "tab"), ("Tab", "next")];
            if app.viewer.active_tab() == ResultTab::FileChanges {
                hints.push(("j/k", "file"));
                hints.push(("d/o/c", "mode"));
            }
            hints.push(("PgUp/PgDn", "scroll"));
            hints.push(("m", "message"));
            if app.viewer.can_commit() {
                hints.push(("C", "commit"));
            }
            hints.push(("n", "new"));
            hints.push(("q", "quit"));
            hints
        }
    }
}
