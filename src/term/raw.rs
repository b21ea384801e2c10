//! Raw mode guard and the stdin-backed terminal
//!
//! Raw mode is held by a [`RawMode`] value: creating it captures the current
//! attributes, dropping it puts them back. Reads use `VMIN = 0` with a short
//! `VTIME`, so every read returns after one byte or after the timeout.

use std::io::{self, Write};

use nix::errno::Errno;
use nix::libc;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use nix::unistd;

use super::{query_size, ByteSource, TermError, TermResult, Terminal, WindowSize};

/// Enable X10, button-event, SGR and urxvt mouse reporting
const MOUSE_ON: &[u8] = b"\x1b[?1000;1002;1006;1015h";
/// Disable the mouse reporting modes enabled by [`MOUSE_ON`]
const MOUSE_OFF: &[u8] = b"\x1b[?1000;1002;1006;1015l";
/// Clear screen, home cursor, reset colours
const CLEAR: &[u8] = b"\x1b[2J\x1b[H\x1b[0m";

/// RAII guard for raw terminal mode
///
/// Only one guard should exist per process. The original attributes are
/// restored when the guard is dropped, including while unwinding.
pub struct RawMode {
    original: Termios,
    mouse: bool,
}

impl RawMode {
    /// Enter raw mode on stdin
    ///
    /// `read_timeout_ds` is the `VTIME` value in deciseconds. When `mouse` is
    /// set, extended mouse reporting is switched on as well.
    pub fn enter(read_timeout_ds: u8, mouse: bool) -> TermResult<Self> {
        let original = termios::tcgetattr(io::stdin()).map_err(TermError::Termios)?;

        let mut raw = original.clone();

        raw.input_flags.remove(
            InputFlags::BRKINT
                | InputFlags::ICRNL
                | InputFlags::INPCK
                | InputFlags::ISTRIP
                | InputFlags::IXON,
        );
        raw.output_flags.remove(OutputFlags::OPOST);
        raw.control_flags.insert(ControlFlags::CS8);
        raw.local_flags.remove(
            LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
        );

        // Return as soon as one byte is there, or after the timeout
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = read_timeout_ds;

        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw).map_err(TermError::Termios)?;
        tracing::debug!(read_timeout_ds, mouse, "entered raw mode");

        let guard = Self { original, mouse };
        if mouse {
            let mut stdout = io::stdout();
            stdout.write_all(MOUSE_ON)?;
            stdout.flush()?;
        }

        Ok(guard)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = stdout.write_all(MOUSE_OFF);
        }
        let _ = stdout.write_all(CLEAR);
        let _ = stdout.flush();

        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original) {
            tracing::warn!("failed to restore terminal attributes: {}", e);
        } else {
            tracing::debug!("left raw mode");
        }
    }
}

/// The process terminal: stdin for input, stdout for size queries
///
/// Owns the raw mode guard, so dropping the terminal restores the tty.
pub struct RawTerminal {
    _raw: RawMode,
}

impl RawTerminal {
    /// Put the terminal into raw mode and wrap it
    pub fn open(read_timeout_ds: u8, mouse: bool) -> TermResult<Self> {
        Ok(Self {
            _raw: RawMode::enter(read_timeout_ds, mouse)?,
        })
    }
}

impl ByteSource for RawTerminal {
    fn read_byte(&mut self) -> TermResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match unistd::read(libc::STDIN_FILENO, &mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            // SIGWINCH and friends interrupt the read; treat it as a tick
            Err(Errno::EINTR) | Err(Errno::EAGAIN) => Ok(None),
            Err(e) => Err(TermError::Read(e)),
        }
    }
}

impl Terminal for RawTerminal {
    fn size(&self) -> TermResult<WindowSize> {
        query_size(libc::STDOUT_FILENO)
    }
}
