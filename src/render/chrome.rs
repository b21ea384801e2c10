//! Tab bar and status line text

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::{Tab, TabList};

use super::style::Palette;

/// Format the tab bar
///
/// Each tab is shown as ` name ` (with `*` when it has unsaved changes),
/// the active one highlighted. Visible text is cut at `width` terminal
/// columns.
pub fn format_tabs(
    tabs: &TabList,
    active_index: usize,
    width: usize,
    palette: &Palette,
) -> String {
    let mut out = String::new();
    let mut used = 0;

    for (index, tab) in tabs.iter().enumerate() {
        if used >= width {
            break;
        }

        let dirty = if tab.dirty { "*" } else { "" };
        let full = format!(" {}{} ", tab.title(), dirty);
        let label = truncate(&full, width - used);
        used += label.width();

        out.push_str(palette.pick(index == active_index));
        out.push_str(label);
        if label.len() < full.len() {
            break;
        }
    }

    out.push_str(&palette.normal);
    out
}

/// Format the status line for `tab`, followed by `message` if non-empty
///
/// Visible text is cut at `width` terminal columns.
pub fn format_status(tab: &Tab, message: &str, width: usize, palette: &Palette) -> String {
    let path = tab
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "untitled".to_string());

    let mut text = format!(
        " {} | {}:{} | {} lines",
        path,
        tab.cursor.row + 1,
        tab.cursor_col() + 1,
        tab.line_count()
    );
    if tab.dirty {
        text.push_str(" | modified");
    }
    if !message.is_empty() {
        text.push_str(" | ");
        text.push_str(message);
    }

    let text = truncate(&text, width);
    format!("{}{}\x1b[K", palette.highlight, text)
}

/// Longest prefix of `s` that fits in `width` columns
///
/// A wide character that would straddle the limit is left out.
fn truncate(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..i];
        }
        used += w;
    }
    s
}
