//! Text storage
//!
//! The editor core only needs a handful of operations from its text store,
//! collected in [`TextBuffer`]. [`LineBuffer`] is the stock implementation:
//! one byte vector per line.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A position in a buffer
///
/// `col` may point one past the last byte of the line. Positions order by
/// row, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index (0-based)
    pub row: usize,
    /// Byte index within the line (0-based)
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Operations the editor core uses on a text store
///
/// Implementations always hold at least one (possibly empty) line.
pub trait TextBuffer: fmt::Debug {
    /// Number of lines, never zero
    fn line_count(&self) -> usize;

    /// Raw bytes of a line, without the line terminator
    ///
    /// Panics if `row` is out of range.
    fn line(&self, row: usize) -> &[u8];

    /// Length of a line in bytes
    fn line_len(&self, row: usize) -> usize {
        self.line(row).len()
    }

    /// Insert one byte, returning the position just after it
    ///
    /// `\r` and `\n` split the line. The column is clamped to the line.
    fn insert(&mut self, at: Position, byte: u8) -> Position;

    /// Remove everything from `start` up to (not including) `end`
    ///
    /// Lines between the two are joined. Returns `start`, clamped.
    fn remove(&mut self, start: Position, end: Position) -> Position;

    /// Write the whole contents to `path`
    fn write_to(&self, path: &Path) -> io::Result<()>;
}

/// A buffer stored as a vector of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Vec<u8>>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty buffer with a single empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    /// Build a buffer from file contents
    ///
    /// Lines are split on `\n`; one trailing `\r` per line is dropped.
    pub fn from_bytes(data: &[u8]) -> Self {
        let lines = data
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
            .collect();
        Self { lines }
    }

    /// Load a buffer from disk
    pub fn open(path: &Path) -> io::Result<Self> {
        let data = fs::read(path)?;
        Ok(Self::from_bytes(&data))
    }

    /// The whole contents, lines joined with `\n`
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        let col = pos.col.min(self.lines[row].len());
        Position::new(row, col)
    }
}

impl TextBuffer for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, row: usize) -> &[u8] {
        &self.lines[row]
    }

    fn insert(&mut self, at: Position, byte: u8) -> Position {
        let at = self.clamp(at);

        match byte {
            b'\r' | b'\n' => {
                let rest = self.lines[at.row].split_off(at.col);
                self.lines.insert(at.row + 1, rest);
                Position::new(at.row + 1, 0)
            }
            _ => {
                self.lines[at.row].insert(at.col, byte);
                Position::new(at.row, at.col + 1)
            }
        }
    }

    fn remove(&mut self, start: Position, end: Position) -> Position {
        let start = self.clamp(start);
        let end = self.clamp(end);
        if end <= start {
            return start;
        }

        if start.row == end.row {
            self.lines[start.row].drain(start.col..end.col);
        } else {
            let tail = self.lines[end.row].split_off(end.col);
            self.lines.drain(start.row + 1..=end.row);
            let line = &mut self.lines[start.row];
            line.truncate(start.col);
            line.extend_from_slice(&tail);
        }

        start
    }

    fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_bytes())
    }
}
