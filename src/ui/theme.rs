//! Greyscale theme for patchdeck
//! Monochrome chrome; color is reserved for diff lines and test status.

use crate::diff::DiffLineKind;
use ratatui::style::{Color, Modifier, Style};

/// The greyscale color palette
pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Core greyscale palette - from brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    /// Pure white - maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Near white - headers, selected items
    const GREY_50: Color = Color::Rgb(250, 250, 250);

    /// Bright grey - primary text
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);

    /// Light grey - secondary text
    const GREY_200: Color = Color::Rgb(180, 180, 180);

    /// Medium grey - muted text
    const GREY_300: Color = Color::Rgb(140, 140, 140);

    /// Dark grey - inactive tabs, hints
    const GREY_400: Color = Color::Rgb(100, 100, 100);

    /// Darker grey - borders, separators
    const GREY_500: Color = Color::Rgb(70, 70, 70);

    /// Overlay backgrounds
    pub const GREY_700: Color = Color::Rgb(35, 35, 35);

    /// Deepest background
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accent colors for diffs and status
    // ─────────────────────────────────────────────────────────────────────

    /// Green for additions and passing tests
    pub const GREEN: Color = Color::Rgb(100, 200, 100);

    /// Red for removals and failures
    pub const RED: Color = Color::Rgb(200, 100, 100);

    /// Hunk headers
    const CYAN: Color = Color::Rgb(110, 170, 200);

    pub const YELLOW: Color = Color::Rgb(210, 180, 90);

    pub const PRODUCT_NAME: &'static str = "patchdeck";

    pub const ARROW_RIGHT: char = '▸';
    pub const CHECK_MARK: char = '✓';
    pub const CROSS_MARK: char = '✗';
    pub const BULLET: char = '•';

    // ─────────────────────────────────────────────────────────────────────
    // Pre-built styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::GREY_200)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::GREY_500)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn key() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Foreground for a classified diff line
    pub fn diff_line(kind: DiffLineKind) -> Style {
        match kind {
            DiffLineKind::Added => Style::default().fg(Self::GREEN),
            DiffLineKind::Removed => Style::default().fg(Self::RED),
            DiffLineKind::HunkHeader => Style::default().fg(Self::CYAN),
            DiffLineKind::Context => Style::default().fg(Self::GREY_200),
        }
    }
}
