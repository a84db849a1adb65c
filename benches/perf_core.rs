use criterion::{black_box, criterion_group, criterion_main, Criterion};
use patchdeck::api::{FileChangeMap, FileChangeRecord, ImprovementResult};
use patchdeck::diff;
use patchdeck::ui::{self, App, ResultTab};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;

fn synthetic_diff(hunks: usize) -> String {
    let mut out = String::from("--- a/src/big.py\n+++ b/src/big.py\n");
    for h in 0..hunks {
        out.push_str(&format!("@@ -{0},6 +{0},7 @@\n", h * 10 + 1));
        out.push_str(" def handler(request):\n");
        out.push_str(&format!("-    return process(request, {})\n", h));
        out.push_str(&format!("+    logger.info(\"handling {}\")\n", h));
        out.push_str(&format!("+    return process(request, {})\n", h));
        out.push_str(" \n");
    }
    out
}

fn synthetic_file_changes(file_count: usize) -> FileChangeMap {
    let mut map = FileChangeMap::new();
    for i in 0..file_count {
        let diff = synthetic_diff(20);
        map.insert(
            format!("src/module_{:03}/file_{:04}.py", i % 40, i),
            FileChangeRecord::new(Some(&diff), Some("old"), "new"),
        );
    }
    map
}

fn bench_diff_render(c: &mut Criterion) {
    let text = synthetic_diff(2_000);
    c.bench_function("diff_classify_10k_lines", |b| {
        b.iter(|| {
            let rendered = diff::render(black_box(Some(text.as_str())));
            black_box(rendered.lines().count());
        });
    });

    c.bench_function("diff_stats_10k_lines", |b| {
        b.iter(|| black_box(diff::render(Some(text.as_str())).stats()));
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let mut app = App::new("http://localhost:5000", Some("/repo"));
    let result = ImprovementResult::from_value(json!({
        "change_id": "bench",
        "plan": {
            "files_to_modify": (0..200).map(|i| format!("src/file_{i}.py")).collect::<Vec<_>>(),
            "implementation_steps": ["Add logging", "Wire handler"],
        },
        "test_results": { "success": true, "output": "ok" }
    }))
    .expect("synthetic result should decode");
    app.improve_finished(Ok(result));

    let backend = TestBackend::new(140, 42);
    let mut terminal = Terminal::new(backend).expect("terminal should initialize");

    c.bench_function("render_frame_plan", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| ui::render(frame, &app))
                .expect("draw should succeed");
        });
    });

    if let Some(ticket) = app.viewer.select_tab(ResultTab::FileChanges) {
        app.viewer
            .file_changes_loaded(&ticket, Ok(synthetic_file_changes(500)));
    }

    c.bench_function("render_frame_file_changes", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| ui::render(frame, &app))
                .expect("draw should succeed");
        });
    });
}

criterion_group!(benches, bench_diff_render, bench_render_frame);
criterion_main!(benches);
