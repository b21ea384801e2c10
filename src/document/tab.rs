//! A single open document
//!
//! A tab owns its text buffer together with the cursor, the selection
//! anchor and the viewport offset. The selection runs between the anchor
//! and the cursor; when both are equal there is no selection.
//!
//! Columns are not clamped when the cursor moves vertically, only when they
//! are used, so moving through a short line keeps the original column.

use std::path::{Path, PathBuf};

use crate::input::Direction;

use super::buffer::{LineBuffer, Position, TextBuffer};
use super::{OpenError, SaveError};

/// Extensions that are never opened
const DENIED_EXTENSIONS: [&str; 2] = [".java", ".py"];

/// True when `path` ends in a denied extension
pub fn is_denied(path: &Path) -> bool {
    let path = path.to_string_lossy();
    DENIED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// An open document
#[derive(Debug)]
pub struct Tab {
    buffer: Box<dyn TextBuffer>,
    /// Where the document is saved, if anywhere
    pub path: Option<PathBuf>,
    /// Unsaved changes
    pub dirty: bool,
    /// Cursor position
    pub cursor: Position,
    /// Selection anchor
    pub anchor: Position,
    /// Topmost visible line
    pub off_row: usize,
}

impl Default for Tab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab {
    /// Create an empty, unnamed tab
    pub fn new() -> Self {
        Self::with_buffer(Box::new(LineBuffer::new()), None)
    }

    /// Wrap an existing buffer
    pub fn with_buffer(buffer: Box<dyn TextBuffer>, path: Option<PathBuf>) -> Self {
        Self {
            buffer,
            path,
            dirty: false,
            cursor: Position::default(),
            anchor: Position::default(),
            off_row: 0,
        }
    }

    /// Open a file from disk
    ///
    /// Fails if the path does not exist, has a denied extension, or cannot
    /// be read.
    pub fn open(path: &Path) -> Result<Self, OpenError> {
        if path.metadata().is_err() {
            return Err(OpenError::Missing {
                path: path.to_path_buf(),
            });
        }
        if is_denied(path) {
            return Err(OpenError::Denied {
                path: path.to_path_buf(),
            });
        }

        let buffer = LineBuffer::open(path).map_err(|source| OpenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), lines = buffer.line_count(), "opened file");

        Ok(Self::with_buffer(Box::new(buffer), Some(path.to_path_buf())))
    }

    /// The underlying text buffer
    pub fn buffer(&self) -> &dyn TextBuffer {
        self.buffer.as_ref()
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Raw bytes of a line
    pub fn line(&self, row: usize) -> &[u8] {
        self.buffer.line(row)
    }

    /// Length of a line
    pub fn line_len(&self, row: usize) -> usize {
        self.buffer.line_len(row)
    }

    /// Name shown in the tab bar
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// `pos` with its column clamped to the line length
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.line_count() - 1);
        Position::new(row, pos.col.min(self.line_len(row)))
    }

    /// Cursor column clamped to the current line
    pub fn cursor_col(&self) -> usize {
        self.clamp(self.cursor).col
    }

    /// True when the anchor and the cursor differ
    pub fn has_selection(&self) -> bool {
        self.clamp(self.anchor) != self.clamp(self.cursor)
    }

    /// Selection endpoints in document order, columns clamped
    pub fn selection(&self) -> (Position, Position) {
        let anchor = self.clamp(self.anchor);
        let cursor = self.clamp(self.cursor);
        if anchor <= cursor {
            (anchor, cursor)
        } else {
            (cursor, anchor)
        }
    }

    /// Drop the selection, keeping the cursor where it is
    pub fn collapse(&mut self) {
        self.anchor = self.cursor;
    }

    /// Insert one byte at the cursor, replacing the selection
    pub fn write(&mut self, byte: u8) {
        let at = self.take_selection();
        self.cursor = self.buffer.insert(at, byte);
        self.anchor = self.cursor;
        self.dirty = true;
    }

    /// Delete the selection, or the byte before the cursor
    pub fn delete(&mut self) {
        if self.has_selection() {
            self.take_selection();
            self.anchor = self.cursor;
            self.dirty = true;
            return;
        }

        let end = self.clamp(self.cursor);
        let start = match end {
            Position { row: 0, col: 0 } => return,
            Position { row, col: 0 } => Position::new(row - 1, self.line_len(row - 1)),
            Position { row, col } => Position::new(row, col - 1),
        };

        self.cursor = self.buffer.remove(start, end);
        self.anchor = self.cursor;
        self.dirty = true;
    }

    /// Delete the selection, or the byte under the cursor
    pub fn delete_forward(&mut self) {
        if !self.has_selection() {
            let before = self.clamp(self.cursor);
            self.move_cursor(Direction::Right, false);
            if self.cursor == before {
                // End of document
                return;
            }
        }
        self.delete();
    }

    /// Move the cursor one step
    ///
    /// Left and right wrap across line ends. Up and down keep the column.
    /// Unless `extend` is set the selection collapses onto the cursor.
    pub fn move_cursor(&mut self, dir: Direction, extend: bool) {
        let last = self.line_count() - 1;
        let Position { row, col } = self.cursor;

        self.cursor = match dir {
            Direction::Up => Position::new(row.saturating_sub(1), col),
            Direction::Down => Position::new((row + 1).min(last), col),
            Direction::Left => {
                let col = self.cursor_col();
                if col > 0 {
                    Position::new(row, col - 1)
                } else if row > 0 {
                    Position::new(row - 1, self.line_len(row - 1))
                } else {
                    Position::new(row, col)
                }
            }
            Direction::Right => {
                let col = self.cursor_col();
                if col < self.line_len(row) {
                    Position::new(row, col + 1)
                } else if row < last {
                    Position::new(row + 1, 0)
                } else {
                    Position::new(row, col)
                }
            }
        };

        if !extend {
            self.collapse();
        }
    }

    /// Move the cursor `lines` lines up or down
    pub fn move_lines(&mut self, dir: Direction, lines: usize) {
        for _ in 0..lines {
            self.move_cursor(dir, false);
        }
    }

    /// Cursor to the start of the line
    ///
    /// Like the other jumps below, this leaves the anchor where it is, so an
    /// active selection stretches to the new cursor.
    pub fn home(&mut self) {
        self.cursor.col = 0;
    }

    /// Cursor to the end of the line
    pub fn end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
    }

    /// Cursor to the first line, keeping the column
    pub fn jump_top(&mut self) {
        self.cursor.row = 0;
    }

    /// Cursor to the last line, keeping the column
    pub fn jump_bottom(&mut self) {
        self.cursor.row = self.line_count() - 1;
    }

    /// Scroll the view up by at most `lines`, stopping at the first line
    pub fn scroll_up(&mut self, lines: usize) {
        self.off_row = self.off_row.saturating_sub(lines);
    }

    /// Scroll the view down by at most `lines`, stopping at the last line
    pub fn scroll_down(&mut self, lines: usize) {
        let last = self.line_count() - 1;
        if self.off_row < last {
            self.off_row = (self.off_row + lines).min(last);
        }
    }

    /// Write the buffer to its path
    ///
    /// Clears `dirty` on success and leaves it untouched on failure.
    pub fn save(&mut self) -> Result<(), SaveError> {
        let path = self.path.as_deref().ok_or(SaveError::NoPath)?;

        self.buffer.write_to(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved file");

        self.dirty = false;
        Ok(())
    }

    /// Remove the selected range and return where the cursor ends up
    fn take_selection(&mut self) -> Position {
        if !self.has_selection() {
            return self.clamp(self.cursor);
        }
        let (start, end) = self.selection();
        self.cursor = self.buffer.remove(start, end);
        self.cursor
    }
}
