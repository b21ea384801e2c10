//! Input decoder state machine
//!
//! Converts the raw byte stream from the terminal into [`Key`] events.
//! One call to [`Decoder::next_key`] produces at most one key.
//!
//! # State Machine
//!
//! States:
//! - Ground: waiting for the first byte of an event
//! - Escape: after ESC
//! - Csi: after `ESC [`
//! - CsiParam: accumulating a numeric parameter (`ESC [ 3`)
//! - CsiModifier: after `;`, waiting for the modifier digit
//! - CsiFinal: modifier read, waiting for the final letter
//! - Ss3: after `ESC O`
//! - Mouse: after `ESC [ <`, accumulating the SGR button code
//! - MouseTail: button resolved, skipping to the `M`/`m` terminator
//!
//! Unknown bytes inside a sequence discard it. A timeout in the middle of a
//! sequence discards it as well; consumed bytes are never replayed.

use crate::term::{ByteSource, TermResult};

use super::key::Key;

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
    CsiParam(u16),
    CsiModifier,
    CsiFinal(u8),
    Ss3,
    Mouse(u16),
    MouseTail(Key),
}

/// Result of feeding one byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The sequence needs more bytes
    Pending,
    /// A complete key
    Emit(Key),
    /// The sequence was not recognized and has been dropped
    Discard,
}

/// Result of one decode cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A key was decoded
    Key(Key),
    /// Bytes were consumed but formed no key
    Discarded,
    /// The read timed out before any byte arrived
    Timeout,
}

/// The input decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder in the ground state
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    /// True when no sequence is in progress
    pub fn is_ground(&self) -> bool {
        self.state == State::Ground
    }

    /// Read and decode one event
    ///
    /// Performs one read per byte the sequence still needs. A timeout before
    /// the first byte yields [`Decoded::Timeout`].
    pub fn next_key<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> TermResult<Decoded> {
        self.state = State::Ground;

        let Some(first) = source.read_byte()? else {
            return Ok(Decoded::Timeout);
        };

        let mut step = self.step(first);
        loop {
            match step {
                Step::Emit(key) => return Ok(Decoded::Key(key)),
                Step::Discard => return Ok(Decoded::Discarded),
                Step::Pending => {}
            }

            step = match source.read_byte()? {
                Some(byte) => self.step(byte),
                None => match self.timeout() {
                    Some(key) => Step::Emit(key),
                    None => Step::Discard,
                },
            };
        }
    }

    /// Decode a complete byte slice, skipping discarded sequences
    ///
    /// A sequence left unfinished at the end of the slice is treated as if
    /// the read timed out.
    pub fn decode_all(&mut self, bytes: &[u8]) -> Vec<Key> {
        let mut keys = Vec::new();

        for &byte in bytes {
            if let Step::Emit(key) = self.step(byte) {
                keys.push(key);
            }
        }
        if !self.is_ground() {
            keys.extend(self.timeout());
        }

        keys
    }

    /// Feed one byte
    pub fn step(&mut self, byte: u8) -> Step {
        let (next, step) = match self.state {
            State::Ground => Self::ground(byte),
            State::Escape => Self::escape(byte),
            State::Csi => Self::csi(byte),
            State::CsiParam(param) => Self::csi_param(param, byte),
            State::CsiModifier => Self::csi_modifier(byte),
            State::CsiFinal(modifier) => Self::csi_final(modifier, byte),
            State::Ss3 => Self::ss3(byte),
            State::Mouse(button) => Self::mouse(button, byte),
            State::MouseTail(pending) => Self::mouse_tail(pending, byte),
        };

        if step == Step::Discard {
            tracing::trace!(state = ?self.state, byte, "discarding input sequence");
        }
        self.state = next;
        step
    }

    /// The read timed out in the middle of a sequence
    ///
    /// Returns the key of a mouse report whose button was already resolved;
    /// every other partial sequence is dropped.
    pub fn timeout(&mut self) -> Option<Key> {
        let state = std::mem::replace(&mut self.state, State::Ground);
        match state {
            State::MouseTail(pending) => Some(pending),
            State::Ground => None,
            _ => {
                tracing::trace!(?state, "input sequence cut short");
                None
            }
        }
    }

    fn ground(byte: u8) -> (State, Step) {
        match byte {
            ESC => (State::Escape, Step::Pending),
            DEL => (State::Ground, Step::Emit(Key::Backspace)),
            0x00..=0x1f => (State::Ground, Step::Emit(Key::Control(byte))),
            _ => (State::Ground, Step::Emit(Key::Char(byte))),
        }
    }

    fn escape(byte: u8) -> (State, Step) {
        match byte {
            b'[' => (State::Csi, Step::Pending),
            b'O' => (State::Ss3, Step::Pending),
            _ => (State::Ground, Step::Discard),
        }
    }

    fn csi(byte: u8) -> (State, Step) {
        let key = match byte {
            b'0'..=b'9' => return (State::CsiParam(u16::from(byte - b'0')), Step::Pending),
            b'<' => return (State::Mouse(0), Step::Pending),
            b'A' => Key::ArrowUp,
            b'B' => Key::ArrowDown,
            b'C' => Key::ArrowRight,
            b'D' => Key::ArrowLeft,
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => return (State::Ground, Step::Discard),
        };
        (State::Ground, Step::Emit(key))
    }

    fn csi_param(param: u16, byte: u8) -> (State, Step) {
        match byte {
            b'0'..=b'9' => {
                let param = param.saturating_mul(10).saturating_add(u16::from(byte - b'0'));
                (State::CsiParam(param), Step::Pending)
            }
            b';' => (State::CsiModifier, Step::Pending),
            b'~' => {
                let key = match param {
                    1 | 7 => Key::Home,
                    4 | 8 => Key::End,
                    3 => Key::Delete,
                    5 => Key::PageUp,
                    6 => Key::PageDown,
                    _ => return (State::Ground, Step::Discard),
                };
                (State::Ground, Step::Emit(key))
            }
            _ => (State::Ground, Step::Discard),
        }
    }

    fn csi_modifier(byte: u8) -> (State, Step) {
        match byte {
            b'0'..=b'9' => (State::CsiFinal(byte), Step::Pending),
            _ => (State::Ground, Step::Discard),
        }
    }

    fn csi_final(modifier: u8, byte: u8) -> (State, Step) {
        let key = match (modifier, byte) {
            // Shift
            (b'2', b'A') => Key::SelectArrowUp,
            (b'2', b'B') => Key::SelectArrowDown,
            (b'2', b'C') => Key::SelectArrowRight,
            (b'2', b'D') => Key::SelectArrowLeft,
            // Ctrl
            (b'5', b'A') => Key::JumpTop,
            (b'5', b'B') => Key::JumpBottom,
            (b'5', b'C') => Key::NextTab,
            (b'5', b'D') => Key::PrevTab,
            _ => return (State::Ground, Step::Discard),
        };
        (State::Ground, Step::Emit(key))
    }

    fn ss3(byte: u8) -> (State, Step) {
        match byte {
            b'H' => (State::Ground, Step::Emit(Key::Home)),
            b'F' => (State::Ground, Step::Emit(Key::End)),
            _ => (State::Ground, Step::Discard),
        }
    }

    fn mouse(button: u16, byte: u8) -> (State, Step) {
        match byte {
            b'0'..=b'9' => {
                let button = button.saturating_mul(10).saturating_add(u16::from(byte - b'0'));
                (State::Mouse(button), Step::Pending)
            }
            b';' => (State::MouseTail(Self::mouse_key(button)), Step::Pending),
            b'M' | b'm' => (State::Ground, Step::Emit(Self::mouse_key(button))),
            _ => (State::Ground, Step::Discard),
        }
    }

    fn mouse_tail(pending: Key, byte: u8) -> (State, Step) {
        match byte {
            b'M' | b'm' => (State::Ground, Step::Emit(pending)),
            _ => (State::MouseTail(pending), Step::Pending),
        }
    }

    /// Map an SGR button code to a key
    fn mouse_key(button: u16) -> Key {
        match button {
            0 => Key::CloseRequested,
            64 => Key::ScrollUp,
            65 => Key::ScrollDown,
            _ => Key::MouseIgnored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::key::ctrl;
    use crate::term::{ScriptedTerminal, WindowSize};

    fn decode(bytes: &[u8]) -> Vec<Key> {
        Decoder::new().decode_all(bytes)
    }

    fn scripted(bytes: &[u8]) -> ScriptedTerminal {
        ScriptedTerminal::new(WindowSize::default()).with_bytes(bytes)
    }

    #[test]
    fn test_ground_bytes() {
        assert_eq!(
            decode(b"a\x11\x7f\x08~"),
            vec![
                Key::Char(b'a'),
                Key::Control(ctrl(b'q')),
                Key::Backspace,
                Key::Control(0x08),
                Key::Char(b'~'),
            ]
        );
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::ArrowUp, Key::ArrowDown, Key::ArrowRight, Key::ArrowLeft]
        );
    }

    #[test]
    fn test_home_end_variants() {
        assert_eq!(
            decode(b"\x1b[H\x1b[F\x1bOH\x1bOF\x1b[1~\x1b[7~\x1b[4~\x1b[8~"),
            vec![
                Key::Home,
                Key::End,
                Key::Home,
                Key::End,
                Key::Home,
                Key::Home,
                Key::End,
                Key::End,
            ]
        );
    }

    #[test]
    fn test_tilde_keys() {
        assert_eq!(
            decode(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![Key::Delete, Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn test_unknown_tilde_key_is_consumed() {
        // F5 is not bound; the whole sequence goes, nothing leaks as text
        assert_eq!(decode(b"\x1b[15~x"), vec![Key::Char(b'x')]);
    }

    #[test]
    fn test_modified_arrows() {
        assert_eq!(
            decode(b"\x1b[1;2A\x1b[1;2B\x1b[1;2C\x1b[1;2D"),
            vec![
                Key::SelectArrowUp,
                Key::SelectArrowDown,
                Key::SelectArrowRight,
                Key::SelectArrowLeft,
            ]
        );
        assert_eq!(
            decode(b"\x1b[1;5A\x1b[1;5B\x1b[1;5C\x1b[1;5D"),
            vec![Key::JumpTop, Key::JumpBottom, Key::NextTab, Key::PrevTab]
        );
    }

    #[test]
    fn test_shift_home_end_are_dropped() {
        assert_eq!(decode(b"\x1b[1;2H\x1b[12;2F"), Vec::<Key>::new());
        assert_eq!(decode(b"\x1b[1;2Hq"), vec![Key::Char(b'q')]);
    }

    #[test]
    fn test_unknown_modifier_is_dropped() {
        // Alt+Up
        assert_eq!(decode(b"\x1b[1;3Ak"), vec![Key::Char(b'k')]);
    }

    #[test]
    fn test_escape_followed_by_other_byte() {
        // Alt+x: ESC and the x are both consumed
        assert_eq!(decode(b"\x1bxy"), vec![Key::Char(b'y')]);
    }

    #[test]
    fn test_mouse_wheel() {
        assert_eq!(
            decode(b"\x1b[<64;10;5M\x1b[<65;10;5M"),
            vec![Key::ScrollUp, Key::ScrollDown]
        );
    }

    #[test]
    fn test_mouse_button_zero_requests_close() {
        assert_eq!(decode(b"\x1b[<0;3;4M"), vec![Key::CloseRequested]);
        assert_eq!(decode(b"\x1b[<0;3;4m"), vec![Key::CloseRequested]);
    }

    #[test]
    fn test_mouse_other_buttons_ignored() {
        assert_eq!(
            decode(b"\x1b[<2;1;1M\x1b[<35;80;24Mz"),
            vec![Key::MouseIgnored, Key::MouseIgnored, Key::Char(b'z')]
        );
    }

    #[test]
    fn test_next_key_timeout() {
        let mut term = scripted(b"");
        let mut decoder = Decoder::new();
        assert_eq!(decoder.next_key(&mut term).unwrap(), Decoded::Timeout);
    }

    #[test]
    fn test_next_key_short_sequence_is_discarded() {
        let mut term = scripted(b"\x1b[");
        term.push_timeout();
        term.push_bytes(b"A");

        let mut decoder = Decoder::new();
        assert_eq!(decoder.next_key(&mut term).unwrap(), Decoded::Discarded);
        // The trailing byte is decoded on its own
        assert_eq!(
            decoder.next_key(&mut term).unwrap(),
            Decoded::Key(Key::Char(b'A'))
        );
    }

    #[test]
    fn test_next_key_reads_only_what_it_needs() {
        let mut term = scripted(b"\x1b[1;2Dhi");
        let mut decoder = Decoder::new();

        assert_eq!(
            decoder.next_key(&mut term).unwrap(),
            Decoded::Key(Key::SelectArrowLeft)
        );
        assert_eq!(term.remaining(), 2);
    }

    #[test]
    fn test_mouse_report_cut_short_keeps_button() {
        let mut term = scripted(b"\x1b[<64;1");
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.next_key(&mut term).unwrap(),
            Decoded::Key(Key::ScrollUp)
        );
    }

    #[test]
    fn test_lone_escape_is_discarded() {
        let mut term = scripted(b"\x1b");
        let mut decoder = Decoder::new();
        assert_eq!(decoder.next_key(&mut term).unwrap(), Decoded::Discarded);
        assert!(decoder.is_ground());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn expected(modifier: u8, letter: u8) -> Option<Key> {
            match (modifier, letter) {
                (b'2', b'A') => Some(Key::SelectArrowUp),
                (b'2', b'B') => Some(Key::SelectArrowDown),
                (b'2', b'C') => Some(Key::SelectArrowRight),
                (b'2', b'D') => Some(Key::SelectArrowLeft),
                (b'5', b'A') => Some(Key::JumpTop),
                (b'5', b'B') => Some(Key::JumpBottom),
                (b'5', b'C') => Some(Key::NextTab),
                (b'5', b'D') => Some(Key::PrevTab),
                _ => None,
            }
        }

        proptest! {
            #[test]
            fn modified_csi_follows_table(
                d1 in b'0'..=b'9',
                d2 in b'0'..=b'9',
                modifier in b'0'..=b'9',
                letter in b'A'..=b'Z',
                tail in proptest::collection::vec(any::<u8>(), 0..8),
            ) {
                let mut seq = vec![ESC, b'[', d1, d2, b';', modifier, letter];
                seq.extend_from_slice(&tail);

                let mut term = ScriptedTerminal::new(WindowSize::default()).with_bytes(&seq);
                let decoded = Decoder::new().next_key(&mut term).unwrap();

                match expected(modifier, letter) {
                    Some(key) => prop_assert_eq!(decoded, Decoded::Key(key)),
                    None => prop_assert_eq!(decoded, Decoded::Discarded),
                }
                prop_assert_eq!(term.remaining(), tail.len());
            }

            #[test]
            fn arbitrary_input_ends_in_ground(
                bytes in proptest::collection::vec(any::<u8>(), 0..256),
            ) {
                let mut decoder = Decoder::new();
                let keys = decoder.decode_all(&bytes);
                prop_assert!(decoder.is_ground());
                prop_assert!(keys.len() <= bytes.len());
            }

            #[test]
            fn delete_is_always_delete(prefix in proptest::collection::vec(b'a'..=b'z', 0..16)) {
                let mut seq = prefix.clone();
                seq.extend_from_slice(b"\x1b[3~");
                let keys = Decoder::new().decode_all(&seq);
                prop_assert_eq!(keys.len(), prefix.len() + 1);
                prop_assert_eq!(keys.last().copied(), Some(Key::Delete));
            }
        }
    }
}
