//! Documents and tabs
//!
//! - `buffer`: text storage behind the [`TextBuffer`] trait
//! - `tab`: one open document with its cursor, selection and viewport
//! - `tabs`: the ordered list of open tabs

mod buffer;
mod tab;
mod tabs;

pub use buffer::{LineBuffer, Position, TextBuffer};
pub use tab::{is_denied, Tab};
pub use tabs::{CloseOutcome, TabList};

use std::io;
use std::path::PathBuf;

/// Error opening a file into a new tab
///
/// The `Display` text is shown in the status line.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("cannot open file: \"{}\"", path.display())]
    Missing { path: PathBuf },

    #[error("file too dangerous: \"{}\"", path.display())]
    Denied { path: PathBuf },

    #[error("cannot read file: \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error saving a tab
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("cannot save file: no path")]
    NoPath,

    #[error("cannot save file: \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
