//! TUI runtime for patchdeck
//!
//! Requests run as tokio tasks (see `background.rs`); this loop is the only
//! code that mutates `App`.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::ui::{self, App};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Run the TUI until the user quits.
///
/// With `submit_on_start`, the pre-filled form is submitted right away.
pub async fn run_tui(
    mut app: App,
    api: Arc<dyn crate::api::Backend>,
    submit_on_start: bool,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel::<BackgroundMessage>();
    let ctx = RuntimeContext {
        backend: &api,
        tx: &tx,
    };

    if submit_on_start {
        if let Some(request) = app.begin_improve() {
            background::spawn_improve(&ctx, request);
        }
    }

    info!("ui started");
    let result = run_loop(&mut terminal, &mut app, &rx, &ctx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("ui stopped");

    result
}

/// Main event loop with background message handling
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mpsc::Receiver<BackgroundMessage>,
    ctx: &RuntimeContext,
) -> Result<()> {
    let mut needs_redraw = true;

    loop {
        // Clear expired toasts
        if app.toast.as_ref().is_some_and(|t| t.is_expired()) {
            app.clear_expired_toast();
            needs_redraw = true;
        }

        // Advance spinner animation
        if app.loading().is_loading() {
            app.tick_loading();
            needs_redraw = true;
        }

        // Check for background messages (non-blocking)
        if background::drain_messages(app, rx) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            needs_redraw = false;
        }

        // Poll for events with fast timeout (snappy animations)
        if event::poll(Duration::from_millis(80))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key_event(app, key, ctx)?;
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
