//! Structured logging with box-drawing output.
//!
//! Every line written by datedrop goes through the macros in this module so the
//! CLI output keeps a single visual shape:
//!
//! ```text
//! ┏ datedrop v0.3.0 ━━╸
//! ┃
//! ┣ Replaying 6 events
//! ┃   year 2024
//! ┣[DEBUG] Emitted 2024-03-05
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - **`log_block_start!`** opens a new conceptual block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`** continues the current block (`┣ message`).
//! - **`log_indented!`** lists details under the previous line (`┃   message`).
//! - **`log_pipe!`** inserts a bare `┃` spacer, typically before a level-tagged line.
//! - **`log_version!`** / **`log_end!`** frame a whole run.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_critical!`** carry a colored
//!   `[LEVEL]` tag. **`log_debug!`** is only printed once `Log::set_debug(true)` ran.
//!
//! Output normally goes to stdout with ANSI colors. [`Log::redirect`] swaps in any
//! writer (a file for `replay --log`, a buffer in tests); colors are stripped
//! for redirected output and stdout is restored when the guard drops.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static TIMESTAMPS_ENABLED: AtomicBool = AtomicBool::new(false);

type Sink = Box<dyn Write + Send>;

// None means stdout
static SINK: Mutex<Option<Sink>> = Mutex::new(None);

/// Runtime switches for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all output, e.g. for quiet scripted runs.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Prefix every line with the clock's current time.
    pub fn set_timestamps(enabled: bool) {
        TIMESTAMPS_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Send all output to `writer` until the returned guard is dropped.
    pub fn redirect<W: Write + Send + 'static>(writer: W) -> LogRedirect {
        let mut sink = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = sink.replace(Box::new(writer));
        LogRedirect { previous }
    }

    /// Send all output to a freshly created file.
    pub fn redirect_to_file(path: &std::path::Path) -> anyhow::Result<LogRedirect> {
        use anyhow::Context;

        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        Ok(Self::redirect(file))
    }

    /// Timestamp prefix (`[HH:MM:SS] `) or an empty string when disabled.
    /// Public for macro access.
    pub fn get_timestamp_prefix() -> String {
        if TIMESTAMPS_ENABLED.load(Ordering::SeqCst) {
            format!("[{}] ", crate::clock::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Restores the previous log destination on drop.
pub struct LogRedirect {
    previous: Option<Sink>,
}

impl Drop for LogRedirect {
    fn drop(&mut self) {
        let mut sink = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(writer) = sink.as_mut() {
            let _ = writer.flush();
        }
        *sink = self.previous.take();
    }
}

/// Remove ANSI SGR sequences (`ESC [ ... m`).
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Write one already-formatted chunk to the active destination.
pub fn write_output(text: &str) {
    let mut sink = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match sink.as_mut() {
        Some(writer) => {
            let _ = writer.write_all(strip_ansi_codes(text).as_bytes());
        }
        None => {
            print!("{text}");
            let _ = std::io::stdout().flush();
        }
    }
}

/// Shared body of every line macro: checks the switches, prefixes and writes.
pub fn emit_line(marker: &str, message: &str) {
    if !Log::is_enabled() {
        return;
    }
    let prefix = Log::get_timestamp_prefix();
    write_output(&format!("{prefix}{marker}{message}\n"));
}

// # Logging Macros

/// Log a message that continues the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┣ ", &format!($($arg)*))
    };
}

/// Log a detail line nested under the previous message.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┃   ", &format!($($arg)*))
    };
}

/// Log an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit_line("┃", "")
    };
}

/// Start a new block of related lines.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {{
        $crate::logger::emit_line("┃", "");
        $crate::logger::emit_line("┣ ", &format!($($arg)*));
    }};
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit_line(
            "┏ ",
            &format!("datedrop v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit_line("╹", "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┣[\x1b[32mINFO\x1b[0m] ", &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┣[\x1b[33mWARNING\x1b[0m] ", &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┣[\x1b[31mERROR\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log an error that terminates the current flow (`┗` corner).
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {{
        $crate::logger::emit_line("┃", "");
        $crate::logger::emit_line("┗[\x1b[31mERROR\x1b[0m] ", &format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)*) => {
        $crate::logger::emit_line("┣[\x1b[31mCRITICAL\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log a debug line; silent unless debug output was enabled.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::Log::is_debug() {
            $crate::logger::emit_line("┣[\x1b[32mDEBUG\x1b[0m] ", &format!($($arg)*))
        }
    };
}
