use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════
//  RESULT TABS
// ═══════════════════════════════════════════════════════════════════════════

/// The six views of a result. Exactly one is active; a new result starts on
/// [`ResultTab::Plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Plan,
    Changes,
    Tests,
    GeneratedTests,
    FileChanges,
    Raw,
}

impl ResultTab {
    pub const ALL: [ResultTab; 6] = [
        ResultTab::Plan,
        ResultTab::Changes,
        ResultTab::Tests,
        ResultTab::GeneratedTests,
        ResultTab::FileChanges,
        ResultTab::Raw,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultTab::Plan => "Plan",
            ResultTab::Changes => "Changes",
            ResultTab::Tests => "Test Results",
            ResultTab::GeneratedTests => "Generated Tests",
            ResultTab::FileChanges => "File Changes",
            ResultTab::Raw => "Raw Data",
        }
    }

    /// Heading shown above the view body
    pub fn title(&self) -> &'static str {
        match self {
            ResultTab::Plan => "Implementation Plan",
            ResultTab::Changes => "Implemented Changes",
            ResultTab::Tests => "Test Results",
            ResultTab::GeneratedTests => "Generated Tests",
            ResultTab::FileChanges => "File Changes",
            ResultTab::Raw => "Raw Results",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Digit shortcut: '1' is the first tab
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// What the file-changes body shows for the selected file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffViewMode {
    #[default]
    Diff,
    Original,
    Current,
}

impl DiffViewMode {
    pub const ALL: [DiffViewMode; 3] = [
        DiffViewMode::Diff,
        DiffViewMode::Original,
        DiffViewMode::Current,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DiffViewMode::Diff => "Diff",
            DiffViewMode::Original => "Original",
            DiffViewMode::Current => "Current",
        }
    }

    pub fn key(&self) -> char {
        match self {
            DiffViewMode::Diff => 'd',
            DiffViewMode::Original => 'o',
            DiffViewMode::Current => 'c',
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  INPUT AND LOADING
// ═══════════════════════════════════════════════════════════════════════════

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    RepoPath,
    Prompt,
    CommitMessage,
}

impl InputMode {
    pub fn is_form(&self) -> bool {
        matches!(self, InputMode::RepoPath | InputMode::Prompt)
    }
}

/// Loading state for background requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    None,
    Improving,
    FetchingFileChanges,
    Committing,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        !matches!(self, LoadingState::None)
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoadingState::None => "",
            LoadingState::Improving => "Improving code...",
            LoadingState::FetchingFileChanges => "Loading file changes...",
            LoadingState::Committing => "Committing...",
        }
    }
}

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ═══════════════════════════════════════════════════════════════════════════
//  TOASTS
// ═══════════════════════════════════════════════════════════════════════════

/// Toast notification kind - affects duration and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 10,
        }
    }
}

/// Toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str, kind: ToastKind) -> Self {
        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ToastKind::Error)
    }
}
