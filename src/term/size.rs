//! Window size query

use std::os::unix::io::RawFd;

use nix::libc;
use nix::pty::Winsize;

use super::{TermError, TermResult, WindowSize};

/// Query the window size of the terminal behind `fd`
///
/// Fails with [`TermError::SizeUnavailable`] when the ioctl fails or the
/// terminal reports zero columns.
pub fn query_size(fd: RawFd) -> TermResult<WindowSize> {
    let mut ws = Winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ writes a `winsize` into the pointer we pass
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == -1 || ws.ws_col == 0 {
        Err(TermError::SizeUnavailable)
    } else {
        Ok(WindowSize::new(ws.ws_col, ws.ws_row))
    }
}
