use crate::ui::form::FormField;
use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub(super) fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let editing = app.input_mode.is_form();

    let mut lines = vec![
        Line::from(Span::styled(" Input Repo Path", Theme::title())),
        field_line(
            &form.repo_path,
            "Enter Repo Path",
            editing && form.focus == FormField::RepoPath,
        ),
        Line::from(""),
        Line::from(Span::styled(" Improvement Prompt", Theme::title())),
    ];

    let prompt_focused = editing && form.focus == FormField::Prompt;
    if form.prompt.is_empty() {
        lines.push(field_line(
            "",
            "Describe how you want the code to be improved...",
            prompt_focused,
        ));
    } else {
        let count = form.prompt.lines().count();
        for (i, line) in form.prompt.lines().enumerate() {
            lines.push(field_line(line, "", prompt_focused && i + 1 == count));
        }
    }
    lines.push(Line::from(""));

    if app.is_improving() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", app.spinner()), Style::default().fg(Theme::WHITE)),
            Span::styled("Improving...", Theme::text_muted()),
        ]));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {} {}", Theme::CROSS_MARK, error),
            Style::default().fg(Theme::RED),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn field_line<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let marker_style = if focused {
        Theme::selected()
    } else {
        Theme::text_dim()
    };
    let mut spans = vec![Span::styled(format!(" {} ", Theme::ARROW_RIGHT), marker_style)];
    if value.is_empty() && !placeholder.is_empty() {
        spans.push(Span::styled(
            placeholder,
            Theme::text_dim().add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(value, Theme::text()));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Theme::WHITE)));
    }
    Line::from(spans)
}
