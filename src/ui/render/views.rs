//! Text projections of a result, one per tab
//!
//! Each function reads the result and nothing else. An absent substructure
//! gets an explicit placeholder; a present but empty list renders no items.

use crate::api::{Changes, ImprovementResult, Plan, TestAnalysis, TestResults};
use crate::ui::theme::Theme;
use crate::ui::types::ResultTab;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use serde_json::Value;

pub(crate) fn tab_lines(result: &ImprovementResult, tab: ResultTab) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(tab.title(), Theme::title())), Line::from("")];
    match tab {
        ResultTab::Plan => plan_lines(result.plan.as_ref(), &mut lines),
        ResultTab::Changes => changes_lines(result.changes.as_ref(), &mut lines),
        ResultTab::Tests => tests_lines(
            result.test_results.as_ref(),
            result.test_analysis.as_ref(),
            &mut lines,
        ),
        ResultTab::GeneratedTests => generated_lines(result.generated_tests(), &mut lines),
        ResultTab::Raw => raw_lines(result, &mut lines),
        // Drawn separately: it has its own layout
        ResultTab::FileChanges => {}
    }
    lines
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Theme::heading()))
}

fn placeholder(text: &str) -> Line<'_> {
    Line::from(Span::styled(format!("  {}", text), Theme::text_dim()))
}

fn push_bullets<'a>(
    lines: &mut Vec<Line<'a>>,
    items: Option<&'a [String]>,
    when_absent: &'static str,
) {
    match items {
        Some(items) => {
            for item in items {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {} ", Theme::BULLET), Theme::text_dim()),
                    Span::styled(item.as_str(), Theme::text()),
                ]));
            }
        }
        None => lines.push(placeholder(when_absent)),
    }
}

fn push_block<'a>(lines: &mut Vec<Line<'a>>, text: &'a str, style: Style) {
    for line in text.lines() {
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(line, style)]));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PLAN / CHANGES
// ═══════════════════════════════════════════════════════════════════════════

fn plan_lines<'a>(plan: Option<&'a Plan>, lines: &mut Vec<Line<'a>>) {
    let Some(plan) = plan else {
        lines.push(placeholder("No plan available"));
        return;
    };

    lines.push(heading("Files to Modify"));
    push_bullets(lines, plan.files_to_modify.as_deref(), "None");
    lines.push(Line::from(""));

    lines.push(heading("Files to Create"));
    push_bullets(lines, plan.files_to_create.as_deref(), "None");
    lines.push(Line::from(""));

    lines.push(heading("Implementation Steps"));
    match plan.implementation_steps.as_deref() {
        Some(steps) => {
            for (i, step) in steps.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}. ", i + 1), Theme::text_dim()),
                    Span::styled(step.as_str(), Theme::text()),
                ]));
            }
        }
        None => lines.push(placeholder("No steps provided")),
    }
    lines.push(Line::from(""));

    lines.push(heading("Potential Risks"));
    push_bullets(lines, plan.potential_risks.as_deref(), "No risks identified");
}

fn changes_lines<'a>(changes: Option<&'a Changes>, lines: &mut Vec<Line<'a>>) {
    let Some(changes) = changes else {
        lines.push(placeholder("No changes available"));
        return;
    };

    lines.push(heading("Modified Files"));
    push_bullets(lines, changes.modified_files.as_deref(), "No files modified");
    lines.push(Line::from(""));

    lines.push(heading("Created Files"));
    push_bullets(lines, changes.created_files.as_deref(), "No files created");

    if let Some(errors) = changes.errors.as_deref().filter(|e| !e.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Errors",
            Theme::heading().fg(Theme::RED),
        )));
        for error in errors {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", Theme::CROSS_MARK), Style::default().fg(Theme::RED)),
                Span::styled(error.as_str(), Style::default().fg(Theme::RED)),
            ]));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  TESTS
// ═══════════════════════════════════════════════════════════════════════════

fn tests_lines<'a>(
    results: Option<&'a TestResults>,
    analysis: Option<&'a TestAnalysis>,
    lines: &mut Vec<Line<'a>>,
) {
    let Some(results) = results else {
        lines.push(placeholder("No test results available"));
        return;
    };

    if results.success {
        lines.push(Line::from(Span::styled(
            format!("{} All tests passed!", Theme::CHECK_MARK),
            Theme::selected().fg(Theme::GREEN),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{} Tests failed", Theme::CROSS_MARK),
            Theme::selected().fg(Theme::RED),
        )));
    }
    lines.push(Line::from(""));

    if let Some(analysis) = analysis.filter(|_| !results.success) {
        analysis_lines(analysis, lines);
        lines.push(Line::from(""));
    }

    lines.push(heading("Test Output"));
    push_block(lines, results.output.as_deref().unwrap_or(""), Theme::text_muted());

    if let Some(error) = results.error.as_deref().filter(|e| !e.is_empty()) {
        lines.push(Line::from(""));
        lines.push(heading("Error Output"));
        push_block(lines, error, Style::default().fg(Theme::RED));
    }
}

fn analysis_lines<'a>(analysis: &'a TestAnalysis, lines: &mut Vec<Line<'a>>) {
    lines.push(heading("Test Analysis"));
    lines.push(Line::from(vec![
        Span::styled("  Summary: ", Theme::heading()),
        Span::styled(analysis.summary.as_deref().unwrap_or(""), Theme::text()),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  Root Causes", Theme::heading())));
    for cause in analysis.root_causes.iter().flatten() {
        lines.push(Line::from(vec![
            Span::styled(format!("    {} ", Theme::BULLET), Theme::text_dim()),
            Span::styled(cause.as_str(), Theme::text()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  Suggested Fixes", Theme::heading())));
    for fix in analysis.fixes.iter().flatten() {
        for (label, value) in [("File: ", &fix.file), ("Issue: ", &fix.issue), ("Fix: ", &fix.fix)] {
            lines.push(Line::from(vec![
                Span::styled(format!("    {}", label), Theme::text_muted()),
                Span::styled(value.as_str(), Theme::text()),
            ]));
        }
        lines.push(Line::from(""));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  GENERATED TESTS / RAW
// ═══════════════════════════════════════════════════════════════════════════

fn generated_lines<'a>(tests: Option<&'a [Value]>, lines: &mut Vec<Line<'a>>) {
    let Some(tests) = tests.filter(|t| !t.is_empty()) else {
        lines.push(placeholder("No tests were generated"));
        return;
    };
    for (i, test) in tests.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("{} Test {}", Theme::ARROW_RIGHT, i + 1),
            Theme::heading(),
        )));
        match test {
            Value::String(text) => push_block(lines, text, Theme::text()),
            other => lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(other.to_string(), Theme::text()),
            ])),
        }
    }
}

fn raw_lines(result: &ImprovementResult, lines: &mut Vec<Line<'_>>) {
    for line in result.raw_pretty().lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Theme::text_muted())));
    }
}

#[cfg(test)]
pub(crate) fn plain(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}
