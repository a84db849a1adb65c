//! Unified diff line classification
//!
//! Diffs arrive fully computed from the backend. This module only decides
//! how each line is shown: it never parses hunk ranges and never recomputes
//! a diff.

/// How a single diff line is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Added,
    Removed,
    HunkHeader,
    Context,
}

impl DiffLineKind {
    /// Classify a line by its leading characters alone.
    pub fn classify(line: &str) -> Self {
        if line.starts_with("@@") {
            DiffLineKind::HunkHeader
        } else if line.starts_with('+') {
            DiffLineKind::Added
        } else if line.starts_with('-') {
            DiffLineKind::Removed
        } else {
            DiffLineKind::Context
        }
    }
}

/// A classified line, borrowing its text from the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLine<'a> {
    pub kind: DiffLineKind,
    pub text: &'a str,
}

/// Addition/removal counts for a file list badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

/// Renderable view over diff text.
///
/// Holds only a borrow of the input, so it is `Copy` and every call to
/// [`RenderedDiff::lines`] starts a fresh pass from the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedDiff<'a> {
    text: Option<&'a str>,
}

/// Classify `diff_text` for display.
///
/// One entry per line, in order. A trailing newline ends the last line
/// rather than opening an empty one, so `"-a\n+b\n"` has two entries.
/// Blank lines inside the text are kept as context entries.
///
/// Absent or empty text yields a placeholder with no lines.
pub fn render(diff_text: Option<&str>) -> RenderedDiff<'_> {
    RenderedDiff {
        text: diff_text.filter(|text| !text.is_empty()),
    }
}

impl<'a> RenderedDiff<'a> {
    /// True when there was no diff text to show
    pub fn is_placeholder(&self) -> bool {
        self.text.is_none()
    }

    pub fn lines(&self) -> DiffLines<'a> {
        DiffLines {
            inner: self.text.map(str::lines),
        }
    }

    pub fn len(&self) -> usize {
        self.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> DiffStats {
        self.lines().fold(DiffStats::default(), |mut stats, line| {
            // File headers are not content changes
            if line.text.starts_with("+++ ") || line.text.starts_with("--- ") {
                return stats;
            }
            match line.kind {
                DiffLineKind::Added => stats.added += 1,
                DiffLineKind::Removed => stats.removed += 1,
                DiffLineKind::HunkHeader | DiffLineKind::Context => {}
            }
            stats
        })
    }
}

impl<'a> IntoIterator for RenderedDiff<'a> {
    type Item = DiffLine<'a>;
    type IntoIter = DiffLines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Lazy iterator over classified lines, in input order
#[derive(Debug, Clone)]
pub struct DiffLines<'a> {
    inner: Option<std::str::Lines<'a>>,
}

impl<'a> Iterator for DiffLines<'a> {
    type Item = DiffLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.inner.as_mut()?.next()?;
        Some(DiffLine {
            kind: DiffLineKind::classify(text),
            text,
        })
    }
}
