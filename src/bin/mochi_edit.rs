//! Mochi Edit
//!
//! Full-screen terminal text editor. Opens each file named on the command
//! line in its own tab.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use mochi_edit::app::logging;
use mochi_edit::editor::{self, Editor};
use mochi_edit::term::RawTerminal;
use mochi_edit::Config;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut config_path: Option<PathBuf> = None;
    let mut files: Vec<PathBuf> = Vec::new();
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("mochi-edit: --config needs a path");
                    return ExitCode::FAILURE;
                }
            }
            "-h" | "--help" => {
                show_help = true;
            }
            arg => files.push(PathBuf::from(arg)),
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = Config::load_or_default(config_path.as_deref());

    if let Some(path) = logging::log_path(config.log_file.as_deref()) {
        if let Err(e) = logging::init(&path) {
            eprintln!("mochi-edit: cannot open log file {}: {}", path.display(), e);
        }
    }

    let (tabs, status) = editor::startup_tabs(&files);

    let term = match RawTerminal::open(config.read_timeout_ds, config.mouse_reporting) {
        Ok(term) => term,
        Err(e) => {
            eprintln!("mochi-edit: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut editor = Editor::with_tabs(term, io::stdout(), config, tabs);
    editor.set_status(status);
    let result = editor.run();

    // Restore the terminal before reporting anything
    drop(editor);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("mochi-edit: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!(
        r#"mochi-edit - Full-screen terminal text editor

USAGE:
    mochi-edit [OPTIONS] [FILE...]

OPTIONS:
    -c, --config <PATH>  Read configuration from PATH
                         (default: ~/.config/mochi-edit/config.json)
    -h, --help           Show this help message

KEYS:
    Ctrl+Q               Close tab (quits after the last one)
    Ctrl+N               New tab
    Ctrl+O               Open file in a new tab
    Ctrl+S               Save
    Ctrl+B               Start of line
    Ctrl+Left/Right      Previous/next tab
    Ctrl+Up/Down         First/last line
    Shift+arrows         Extend selection

ENVIRONMENT:
    MOCHI_EDIT_LOG       Write logs to this file
    RUST_LOG             Log filter (default: warn)
"#
    );
}
