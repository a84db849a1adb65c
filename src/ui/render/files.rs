use crate::api::{FileChangeMap, FileChangeRecord};
use crate::diff;
use crate::ui::theme::Theme;
use crate::ui::types::DiffViewMode;
use crate::ui::{App, FileChangesView};
use crate::util::fit_path_left;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub(super) fn render_file_changes(frame: &mut Frame, area: Rect, app: &App) {
    let viewer = &app.viewer;
    let title = Line::from(Span::styled("File Changes", Theme::title()));

    let (map, active) = match viewer.file_changes_view() {
        FileChangesView::Unavailable => {
            let lines = vec![
                title,
                Line::from(""),
                Line::from(Span::styled("  No file changes available.", Theme::text_dim())),
            ];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }
        FileChangesView::Loading => {
            let lines = vec![
                title,
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("  {} ", app.spinner()), Style::default().fg(Theme::WHITE)),
                    Span::styled("Loading file changes...", Theme::text_muted()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }
        FileChangesView::Loaded { map, active } => (map, active),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(vec![title]), rows[0]);

    let list_width = (rows[1].width / 3).clamp(20, 44);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(10)])
        .split(rows[1]);

    let selected = active.map(|(path, _)| path);
    let list = Paragraph::new(file_list_lines(map, selected, list_width.saturating_sub(2) as usize))
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Theme::border())
                .title(Span::styled("Files", Theme::heading())),
        );
    frame.render_widget(list, columns[0]);

    let mode = viewer.diff_mode();
    let mut header = vec![Span::styled(
        format!(" {}  ", selected.unwrap_or("")),
        Theme::selected(),
    )];
    for candidate in DiffViewMode::ALL {
        let style = if candidate == mode {
            Style::default().fg(Theme::GREY_900).bg(Theme::GREY_100)
        } else {
            Theme::text_dim()
        };
        header.push(Span::styled(
            format!(" {} {} ", candidate.key(), candidate.label()),
            style,
        ));
        header.push(Span::raw(" "));
    }

    let body_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(columns[1]);
    frame.render_widget(Paragraph::new(Line::from(header)), body_area[0]);

    let body = match active {
        Some((_, record)) => file_body_lines(record, mode),
        None => vec![Line::from(Span::styled(
            " Select a file to view changes",
            Theme::text_dim(),
        ))],
    };
    frame.render_widget(Paragraph::new(body).scroll((viewer.scroll, 0)), body_area[1]);
}

pub(crate) fn file_list_lines<'a>(
    map: &'a FileChangeMap,
    selected: Option<&str>,
    width: usize,
) -> Vec<Line<'a>> {
    map.iter()
        .map(|(path, record)| {
            let is_selected = selected == Some(path.as_str());
            let stats = diff::render(record.diff.as_deref()).stats();
            let badge = if record.is_new_file() {
                " new".to_string()
            } else {
                format!(" +{} -{}", stats.added, stats.removed)
            };
            let marker = if is_selected {
                format!("{} ", Theme::ARROW_RIGHT)
            } else {
                "  ".to_string()
            };
            let name_width = width.saturating_sub(marker.chars().count() + badge.chars().count());
            let name_style = if is_selected {
                Theme::selected()
            } else {
                Theme::text()
            };
            Line::from(vec![
                Span::styled(marker, Theme::text_muted()),
                Span::styled(fit_path_left(path, name_width), name_style),
                Span::styled(badge, Theme::text_dim()),
            ])
        })
        .collect()
}

/// Body of the selected file in the chosen mode
pub(crate) fn file_body_lines(record: &FileChangeRecord, mode: DiffViewMode) -> Vec<Line<'_>> {
    match mode {
        DiffViewMode::Diff => {
            let rendered = diff::render(record.diff.as_deref());
            if rendered.is_placeholder() {
                return vec![Line::from(Span::styled(" No diff available", Theme::text_dim()))];
            }
            rendered
                .lines()
                .map(|line| Line::from(Span::styled(line.text, Theme::diff_line(line.kind))))
                .collect()
        }
        DiffViewMode::Original => match record.original.as_deref() {
            Some(original) => content_lines(original),
            None => vec![Line::from(Span::styled(
                " No original content (new file)",
                Theme::text_dim(),
            ))],
        },
        DiffViewMode::Current => content_lines(record.current()),
    }
}

fn content_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .map(|line| Line::from(Span::styled(line, Theme::text())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::views::plain;

    #[test]
    fn diff_body_keeps_order_and_colors() {
        let record = FileChangeRecord::new(Some("@@ -1,1 +1,1 @@\n-old\n+new"), Some("old"), "new");
        let lines = file_body_lines(&record, DiffViewMode::Diff);
        assert_eq!(plain(&lines), vec!["@@ -1,1 +1,1 @@", "-old", "+new"]);
        assert_eq!(lines[1].spans[0].style.fg, Some(Theme::RED));
        assert_eq!(lines[2].spans[0].style.fg, Some(Theme::GREEN));
    }

    #[test]
    fn original_and_current_modes() {
        let record = FileChangeRecord::new(Some("-old\n+new"), Some("old"), "new");
        assert_eq!(plain(&file_body_lines(&record, DiffViewMode::Original)), vec!["old"]);
        assert_eq!(plain(&file_body_lines(&record, DiffViewMode::Current)), vec!["new"]);

        let created = FileChangeRecord::new(Some("New file: n.py\n\nx = 1"), None, "x = 1");
        assert_eq!(
            plain(&file_body_lines(&created, DiffViewMode::Original)),
            vec![" No original content (new file)"]
        );
    }

    #[test]
    fn missing_diff_is_a_placeholder() {
        let record = FileChangeRecord::new(None, Some("a"), "a");
        assert_eq!(
            plain(&file_body_lines(&record, DiffViewMode::Diff)),
            vec![" No diff available"]
        );
    }

    #[test]
    fn file_list_marks_selection_and_counts() {
        let mut map = FileChangeMap::new();
        map.insert(
            "x.py".to_string(),
            FileChangeRecord::new(Some("--- a/x.py\n+++ b/x.py\n-old\n+new\n+more"), Some("old"), "new"),
        );
        map.insert("n.py".to_string(), FileChangeRecord::new(None, None, ""));

        let lines = plain(&file_list_lines(&map, Some("x.py"), 30));
        assert_eq!(lines[0], "▸ x.py +2 -1");
        assert_eq!(lines[1], "  n.py new");
    }
}
