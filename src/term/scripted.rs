//! In-memory terminal for tests and benchmarks
//!
//! Feeds a fixed byte script to the decoder. Once the script is exhausted
//! every read reports a timeout, the same as an idle tty.

use std::collections::VecDeque;

use super::{ByteSource, TermError, TermResult, Terminal, WindowSize};

/// A terminal that replays a byte script
#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<Option<u8>>,
    size: Option<WindowSize>,
}

impl ScriptedTerminal {
    /// Create a terminal of the given size with an empty script
    pub fn new(size: WindowSize) -> Self {
        Self {
            input: VecDeque::new(),
            size: Some(size),
        }
    }

    /// Create a terminal that cannot report its size
    pub fn sizeless() -> Self {
        Self::default()
    }

    /// Append bytes to the script
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied().map(Some));
    }

    /// Append a read timeout to the script
    pub fn push_timeout(&mut self) {
        self.input.push_back(None);
    }

    /// Builder form of [`push_bytes`](Self::push_bytes)
    pub fn with_bytes(mut self, bytes: &[u8]) -> Self {
        self.push_bytes(bytes);
        self
    }

    /// Change the reported size
    pub fn resize(&mut self, size: WindowSize) {
        self.size = Some(size);
    }

    /// Number of script entries not yet consumed
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl ByteSource for ScriptedTerminal {
    fn read_byte(&mut self) -> TermResult<Option<u8>> {
        Ok(self.input.pop_front().flatten())
    }
}

impl Terminal for ScriptedTerminal {
    fn size(&self) -> TermResult<WindowSize> {
        self.size.ok_or(TermError::SizeUnavailable)
    }
}
