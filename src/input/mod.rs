//! Input decoding
//!
//! Turns the bytes a terminal sends for keyboard and mouse input into
//! logical [`Key`] events.
//!
//! # Keyboard
//!
//! - Printable bytes become [`Key::Char`], C0 bytes become [`Key::Control`]
//! - `CSI A..D`, `CSI H/F`, `SS3 H/F` and `CSI n ~` for navigation keys
//! - `CSI 1 ; 2 x` (Shift) extends the selection, `CSI 1 ; 5 x` (Ctrl)
//!   jumps or switches tabs
//!
//! # Mouse
//!
//! Only SGR reports (`CSI < b ; x ; y M`) are understood. The wheel scrolls,
//! button code 0 requests a close, everything else is ignored.

mod decoder;
mod key;

pub use decoder::{Decoded, Decoder, Step};
pub use key::{ctrl, Direction, Key};
