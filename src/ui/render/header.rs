use crate::ui::theme::Theme;
use crate::ui::types::ResultTab;
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {}", Theme::PRODUCT_NAME),
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(app.server_url.as_str(), Theme::text_dim()),
    ];

    if let Some(change_id) = app.viewer.change_id() {
        spans.push(Span::styled("  change ", Theme::text_dim()));
        spans.push(Span::styled(change_id, Theme::text_muted()));
    }

    if let Some(tests) = app.viewer.result().and_then(|r| r.test_results.as_ref()) {
        let (mark, color) = if tests.success {
            (Theme::CHECK_MARK, Theme::GREEN)
        } else {
            (Theme::CROSS_MARK, Theme::RED)
        };
        spans.push(Span::styled(
            format!("  {} tests", mark),
            Style::default().fg(color),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).style(Style::default().bg(Theme::BG));
    frame.render_widget(header, area);
}

pub(super) fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.viewer.active_tab();
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in ResultTab::ALL.iter().enumerate() {
        let style = if *tab == active {
            Style::default()
                .fg(Theme::GREY_900)
                .bg(Theme::GREY_100)
                .add_modifier(Modifier::BOLD)
        } else {
            Theme::text_muted()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
