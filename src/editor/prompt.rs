//! Single-line prompt
//!
//! A nested loop on the bottom row of the screen. Printable bytes are
//! appended, Backspace removes the last one, Enter accepts and Ctrl+Q
//! cancels. Everything else is ignored.

use std::io::Write;

use crate::input::{ctrl, Decoded, Decoder, Key};
use crate::render::Palette;
use crate::term::{Terminal, WindowSize};

use super::EditResult;

/// Read a line of input, showing `label` in front of it
///
/// Returns the input on Enter and `None` on Ctrl+Q. The prompt row is drawn
/// on the first timeout and after every key, never on later timeouts.
pub fn prompt_line<T, W>(
    decoder: &mut Decoder,
    term: &mut T,
    out: &mut W,
    palette: &Palette,
    fallback: WindowSize,
    label: &str,
) -> EditResult<Option<Vec<u8>>>
where
    T: Terminal + ?Sized,
    W: Write + ?Sized,
{
    let mut input: Vec<u8> = Vec::new();
    let mut first = true;

    loop {
        let size = term.size_or(fallback);

        match decoder.next_key(term)? {
            Decoded::Key(key) => match key {
                Key::Control(c) if c == ctrl(b'q') => {
                    tracing::debug!(label, "prompt cancelled");
                    return Ok(None);
                }
                Key::Control(c) if c == ctrl(b'm') => {
                    tracing::debug!(label, len = input.len(), "prompt accepted");
                    return Ok(Some(input));
                }
                Key::Backspace => {
                    input.pop();
                }
                Key::Control(c) if c == ctrl(b'h') => {
                    input.pop();
                }
                Key::Char(byte) => input.push(byte),
                _ => {}
            },
            Decoded::Discarded => {}
            Decoded::Timeout => {
                if !first {
                    continue;
                }
                first = false;
            }
        }

        let row = size.rows.max(1);
        write!(out, "\x1b[{};1H", row)?;
        write!(out, "{} {} {} ", palette.highlight, label, palette.normal)?;
        out.write_all(&input)?;
        write!(out, "\x1b[K")?;
        write!(out, "\x1b[{};{}H", row, input.len() + label.len() + 4)?;
        out.flush()?;
    }
}
