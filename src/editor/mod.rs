//! The editor control loop
//!
//! One cycle reads a key through the [`Decoder`], applies it to the tab
//! list, and redraws. A read that times out redraws only the very first
//! time, to paint the initial screen; after that frames are tied to input.

mod dispatch;
mod prompt;

pub use prompt::prompt_line;

use std::ffi::OsString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use crate::app::Config;
use crate::document::{Tab, TabList};
use crate::input::{Decoded, Decoder};
use crate::render::{Palette, Renderer};
use crate::term::{TermError, Terminal, WindowSize};

/// Error that stops the control loop
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Terminal error: {0}")]
    Term(#[from] TermError),

    #[error("Failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

/// Result type for editor operations
pub type EditResult<T> = Result<T, EditError>;

/// Whether the loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The editor: tabs plus the terminal they are shown on
pub struct Editor<T: Terminal, W: Write> {
    term: T,
    out: W,
    tabs: TabList,
    decoder: Decoder,
    renderer: Renderer,
    config: Config,
    /// Transient message shown in the status line
    status: String,
    /// No timeout has been seen yet
    first_frame: bool,
}

impl<T: Terminal, W: Write> Editor<T, W> {
    /// Create an editor with a single empty tab
    pub fn new(term: T, out: W, config: Config) -> Self {
        Self::with_tabs(term, out, config, TabList::new(Tab::new()))
    }

    /// Create an editor showing `tabs`
    pub fn with_tabs(term: T, out: W, config: Config, tabs: TabList) -> Self {
        let renderer = Renderer::new(Palette::from(&config.colors));
        Self {
            term,
            out,
            tabs,
            decoder: Decoder::new(),
            renderer,
            config,
            status: String::new(),
            first_frame: true,
        }
    }

    /// The open tabs
    pub fn tabs(&self) -> &TabList {
        &self.tabs
    }

    /// The open tabs, mutably
    pub fn tabs_mut(&mut self) -> &mut TabList {
        &mut self.tabs
    }

    /// The current status message
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// The terminal
    pub fn terminal(&self) -> &T {
        &self.term
    }

    /// The terminal, mutably
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// The output writer
    pub fn output(&self) -> &W {
        &self.out
    }

    /// The output writer, mutably
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Run until the last tab is closed
    pub fn run(&mut self) -> EditResult<()> {
        tracing::info!(tabs = self.tabs.len(), "editor started");
        while self.step()? == Flow::Continue {}
        tracing::info!("editor finished");
        Ok(())
    }

    /// Run one read, dispatch, redraw cycle
    pub fn step(&mut self) -> EditResult<Flow> {
        let size = self.size();

        match self.decoder.next_key(&mut self.term)? {
            Decoded::Key(key) => {
                if self.dispatch(key, size)? == Flow::Exit {
                    return Ok(Flow::Exit);
                }
            }
            Decoded::Discarded => {}
            Decoded::Timeout => {
                if !self.first_frame {
                    return Ok(Flow::Continue);
                }
                self.first_frame = false;
            }
        }

        self.redraw(size)?;
        Ok(Flow::Continue)
    }

    /// Draw a full frame
    pub fn redraw(&mut self, size: WindowSize) -> EditResult<()> {
        self.renderer
            .draw(&mut self.out, &mut self.tabs, &self.status, size)?;
        Ok(())
    }

    /// Current window size, or the configured fallback
    fn size(&self) -> WindowSize {
        self.term.size_or(self.config.fallback_size)
    }

    /// Ask for a line of text at the bottom of the screen
    ///
    /// `None` when the user cancelled with Ctrl+Q.
    fn prompt(&mut self, label: &str) -> EditResult<Option<Vec<u8>>> {
        prompt_line(
            &mut self.decoder,
            &mut self.term,
            &mut self.out,
            self.renderer.palette(),
            self.config.fallback_size,
            label,
        )
    }
}

/// Convert prompt input to a path
pub fn path_from_input(input: Vec<u8>) -> PathBuf {
    PathBuf::from(OsString::from_vec(input))
}

/// Open the files named on the command line
///
/// Files that cannot be opened are reported in the returned status message.
/// Without any successfully opened file the list holds one empty tab.
pub fn startup_tabs(paths: &[PathBuf]) -> (TabList, String) {
    let mut tabs: Option<TabList> = None;
    let mut status = String::new();

    for path in paths {
        match Tab::open(path) {
            Ok(tab) => match tabs.as_mut() {
                Some(list) => {
                    list.push(tab);
                }
                None => tabs = Some(TabList::new(tab)),
            },
            Err(e) => {
                tracing::warn!("{}", e);
                status = e.to_string();
            }
        }
    }

    let mut tabs = tabs.unwrap_or_else(|| TabList::new(Tab::new()));
    // Start on the first file, like opening them one by one and going back
    while tabs.active_index() > 0 {
        tabs.prev();
    }
    (tabs, status)
}
