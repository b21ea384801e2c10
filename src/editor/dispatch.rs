//! Key dispatch
//!
//! Maps each decoded key to an operation on the active tab or the tab list.

use std::io::Write;

use crate::document::CloseOutcome;
use crate::input::{ctrl, Direction, Key};
use crate::render::text_rows;
use crate::term::{Terminal, WindowSize};

use super::{path_from_input, EditResult, Editor, Flow};

const CONFIRM_DISCARD: &str = "there are unsaved changes, sure? (y/n)";
const ASK_PATH: &str = "path:";

impl<T: Terminal, W: Write> Editor<T, W> {
    /// Apply one key
    pub fn dispatch(&mut self, key: Key, size: WindowSize) -> EditResult<Flow> {
        let page = text_rows(usize::from(size.rows)) / 2;
        let scroll = self.config.scroll_step;

        if let Some((dir, extend)) = key.arrow() {
            self.tabs.active_mut().move_cursor(dir, extend);
            return Ok(Flow::Continue);
        }

        match key {
            Key::Quit => return self.close_active(),
            Key::Control(c) if c == ctrl(b'q') => return self.close_active(),
            Key::CloseRequested => {
                tracing::info!("close requested by mouse report");
                return Ok(Flow::Exit);
            }
            Key::Control(c) if c == ctrl(b'n') => {
                if let Err(e) = self.tabs.create(None) {
                    self.status = e.to_string();
                }
            }
            Key::Control(c) if c == ctrl(b'o') => self.open()?,
            Key::Control(c) if c == ctrl(b's') => self.save()?,
            Key::Control(c) if c == ctrl(b'b') => self.tabs.active_mut().home(),
            Key::Control(c) if c == ctrl(b'h') => self.tabs.active_mut().delete(),
            Key::Backspace => self.tabs.active_mut().delete(),
            Key::Delete => self.tabs.active_mut().delete_forward(),
            // Enter and Tab are text
            Key::Control(c @ (b'\r' | b'\t')) | Key::Char(c) => {
                self.status.clear();
                self.tabs.active_mut().write(c);
            }
            // The anchor stays put, with or without Shift
            Key::Home | Key::SelectHome => self.tabs.active_mut().home(),
            Key::End | Key::SelectEnd => self.tabs.active_mut().end(),
            Key::PageUp => self.tabs.active_mut().move_lines(Direction::Up, page),
            Key::PageDown => self.tabs.active_mut().move_lines(Direction::Down, page),
            Key::JumpTop => self.tabs.active_mut().jump_top(),
            Key::JumpBottom => self.tabs.active_mut().jump_bottom(),
            Key::NextTab => self.tabs.next(),
            Key::PrevTab => self.tabs.prev(),
            Key::ScrollUp => self.tabs.active_mut().scroll_up(scroll),
            Key::ScrollDown => self.tabs.active_mut().scroll_down(scroll),
            _ => {}
        }

        Ok(Flow::Continue)
    }

    /// Close the active tab, asking first if it has unsaved changes
    fn close_active(&mut self) -> EditResult<Flow> {
        if self.tabs.active().dirty {
            let confirmed = self
                .prompt(CONFIRM_DISCARD)?
                .is_some_and(|answer| matches!(answer.first(), Some(b'y' | b'Y')));
            if !confirmed {
                return Ok(Flow::Continue);
            }
        }

        match self.tabs.close_active() {
            CloseOutcome::Closed => Ok(Flow::Continue),
            CloseOutcome::LastTab => Ok(Flow::Exit),
        }
    }

    /// Ask for a path and open it in a new tab
    fn open(&mut self) -> EditResult<()> {
        let Some(input) = self.prompt(ASK_PATH)? else {
            return Ok(());
        };
        if input.is_empty() {
            return Ok(());
        }

        let path = path_from_input(input);
        if let Err(e) = self.tabs.create(Some(&path)) {
            tracing::warn!("{}", e);
            self.status = e.to_string();
        }
        Ok(())
    }

    /// Save the active tab if it has unsaved changes
    ///
    /// A tab without a path asks for one. If saving fails, a path that was
    /// only just entered is forgotten again.
    fn save(&mut self) -> EditResult<()> {
        if !self.tabs.active().dirty {
            return Ok(());
        }

        let mut prompted = false;
        if self.tabs.active().path.is_none() {
            if let Some(input) = self.prompt(ASK_PATH)? {
                if !input.is_empty() {
                    self.tabs.active_mut().path = Some(path_from_input(input));
                    prompted = true;
                }
            }
        }

        let tab = self.tabs.active_mut();
        match tab.save() {
            Ok(()) => self.status = "file saved successfully".to_string(),
            Err(e) => {
                tracing::warn!("{}", e);
                self.status = e.to_string();
                if prompted {
                    tab.path = None;
                }
            }
        }
        Ok(())
    }
}
