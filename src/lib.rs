//! Mochi Edit Library
//!
//! A full-screen terminal text editor driven straight from raw tty bytes,
//! without any terminal UI library. This crate provides:
//!
//! - `term`: Raw mode, window size, and a scripted terminal for tests
//! - `input`: Key model and the escape sequence decoder
//! - `document`: Line buffers, tabs with cursor and selection, the tab list
//! - `render`: Frame, tab bar, and status line drawing
//! - `editor`: The control loop, key dispatch, and the modal prompt
//! - `app`: Configuration and logging

pub mod app;
pub mod document;
pub mod editor;
pub mod input;
pub mod render;
pub mod term;

pub use app::Config;
pub use editor::{EditError, Editor, Flow};
