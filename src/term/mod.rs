//! Terminal mode handling
//!
//! Puts the controlling terminal into raw mode, restores it on every exit
//! path, and reports the window size. The editor talks to the terminal
//! through the [`Terminal`] trait so the control loop can also be driven
//! from an in-memory script.

mod raw;
mod scripted;
mod size;

pub use raw::{RawMode, RawTerminal};
pub use scripted::ScriptedTerminal;
pub use size::query_size;

use std::io;

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to change terminal attributes: {0}")]
    Termios(#[source] nix::Error),

    #[error("Terminal size unavailable")]
    SizeUnavailable,

    #[error("Failed to read from terminal: {0}")]
    Read(#[source] nix::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for terminal operations
pub type TermResult<T> = Result<T, TermError>;

/// Terminal window size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 25)
    }
}

/// A source of raw input bytes with a read timeout
pub trait ByteSource {
    /// Read one byte, blocking until it arrives or the read timeout elapses.
    ///
    /// Returns `Ok(None)` on timeout.
    fn read_byte(&mut self) -> TermResult<Option<u8>>;
}

/// Everything the control loop needs from a terminal
pub trait Terminal: ByteSource {
    /// Current window size
    fn size(&self) -> TermResult<WindowSize>;

    /// Window size, or `fallback` when the terminal cannot report one
    fn size_or(&self, fallback: WindowSize) -> WindowSize {
        self.size().unwrap_or(fallback)
    }
}
