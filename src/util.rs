use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }

    if max <= 3 {
        return s.chars().take(max).collect();
    }

    let truncated: String = s.chars().take(max - 3).collect();
    format!("{}...", truncated)
}

/// Fit a path into `width` terminal columns, keeping its tail.
///
/// File names matter more than leading directories, so the cut happens on
/// the left.
pub fn fit_path_left(path: &str, width: usize) -> String {
    if UnicodeWidthStr::width(path) <= width {
        return path.to_string();
    }
    if width <= 1 {
        return "…".chars().take(width).collect();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in path.chars().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.reverse();

    let mut out = String::from("…");
    out.extend(tail);
    out
}
