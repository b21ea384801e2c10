//! Full-frame renderer
//!
//! Every frame is drawn from scratch: clear the screen, draw the tab bar,
//! the visible text rows with their gutter and selection highlighting, the
//! status line, then place the cursor.

mod chrome;
mod style;
mod viewport;

pub use chrome::{format_status, format_tabs};
pub use style::Palette;
pub use viewport::{clamp_offset, gutter_width, is_highlighted, text_cols, text_rows};

use std::io::{self, Write};

use crate::document::TabList;
use crate::term::WindowSize;

/// Clear screen and home the cursor
const CLEAR_HOME: &[u8] = b"\x1b[2J\x1b[H";

/// Draws frames into any writer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    /// Create a renderer with the given colours
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// The colours in use
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Draw one frame for the active tab
    ///
    /// Moves the active tab's viewport so the cursor is visible.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        tabs: &mut TabList,
        status: &str,
        size: WindowSize,
    ) -> io::Result<()> {
        let width = usize::from(size.cols);
        let height = usize::from(size.rows);
        let palette = &self.palette;

        let mut frame: Vec<u8> = Vec::with_capacity(width * height * 2);
        frame.extend_from_slice(CLEAR_HOME);
        frame.extend_from_slice(palette.normal.as_bytes());

        let active_index = tabs.active_index();
        frame.extend_from_slice(format_tabs(tabs, active_index, width, palette).as_bytes());
        frame.extend_from_slice(b"\r\n");

        let tab = tabs.active_mut();
        tab.off_row = clamp_offset(tab.off_row, tab.cursor.row, height);
        let tab = &*tab;

        let line_count = tab.line_count();
        let gutter = gutter_width(line_count);
        let max_cols = text_cols(width, gutter);
        let (start, end) = tab.selection();

        // Screen row (1-based) holding the cursor
        let mut cursor_screen_row = 2;

        for i in 0..text_rows(height) {
            let row = tab.off_row + i;

            if row < line_count {
                if row == tab.cursor.row {
                    write!(
                        frame,
                        "{}  {:>gutter$}  {} ",
                        palette.highlight,
                        row + 1,
                        palette.normal
                    )?;
                    cursor_screen_row = i + 2;
                } else {
                    write!(
                        frame,
                        "{}  {:>gutter$} |{} ",
                        palette.normal,
                        row + 1,
                        palette.normal
                    )?;
                }

                let line = tab.line(row);
                let mut current = None;
                for (col, &byte) in line.iter().enumerate().take(max_cols) {
                    let lit = is_highlighted(row, col, start, end);
                    if current != Some(lit) {
                        frame.extend_from_slice(palette.pick(lit).as_bytes());
                        current = Some(lit);
                    }
                    frame.push(byte);
                }

                // End-of-line cell
                let lit = is_highlighted(row, line.len(), start, end);
                frame.extend_from_slice(palette.pick(lit).as_bytes());
                frame.push(b' ');
            } else {
                write!(frame, "{}  {:gutter$} :{} ", palette.normal, "", palette.normal)?;
            }

            frame.extend_from_slice(palette.normal.as_bytes());
            frame.extend_from_slice(b"\r\n");
        }

        frame.extend_from_slice(format_status(tab, status, width, palette).as_bytes());
        frame.extend_from_slice(palette.normal.as_bytes());

        let cursor_screen_col = tab.cursor_col() + gutter + viewport::GUTTER_PAD;
        write!(frame, "\x1b[{};{}H", cursor_screen_row, cursor_screen_col)?;

        out.write_all(&frame)?;
        out.flush()
    }
}
