//! Colored, leveled printing
//!
//! A [`Printer`] is the handle callers keep around: it owns the console it
//! writes to and the severity threshold. The threshold is per handle; share
//! the handle (e.g. behind an `Arc`) to share the setting.
//!
//! Every emitted line is composed as
//! `color + [timestamp] + prefix + text + suffix + reset + end`.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chrono::Local;
use tracing::{error, trace};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Color, FormatMode, Level, Message, RESET};
use crate::infrastructure::{Console, StdConsole, Stream};

pub const DEFAULT_FATAL_MESSAGE: &str = "Fatal error: Program stopped.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-call presentation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub prefix: String,
    pub suffix: String,
    pub format: FormatMode,
    /// Prepend `[YYYY-MM-DD HH:MM:SS] ` (local time).
    pub timestamp: bool,
    /// Line terminator written after the reset sequence.
    pub end: String,
    /// Only honoured by `err_with` and `fatal_with`.
    pub interrupt: bool,
    pub fatal_message: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            format: FormatMode::Auto,
            timestamp: false,
            end: "\n".into(),
            interrupt: false,
            fatal_message: DEFAULT_FATAL_MESSAGE.into(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn format(mut self, format: FormatMode) -> Self {
        self.format = format;
        self
    }

    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    pub fn interrupt(mut self, interrupt: bool) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn fatal_message(mut self, message: impl Into<String>) -> Self {
        self.fatal_message = message.into();
        self
    }
}

/// Leveled, colored printer.
pub struct Printer {
    console: Arc<dyn Console>,
    threshold: AtomicU8,
}

impl Printer {
    /// Create a printer writing to `console`, threshold INFO.
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            console,
            threshold: AtomicU8::new(Level::default().rank()),
        }
    }

    /// Printer bound to the process' standard streams.
    pub fn stdio() -> Self {
        Self::new(Arc::new(StdConsole))
    }

    pub fn with_level(self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        Level::from_rank(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Applies to every subsequent call through this handle.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.rank(), Ordering::Relaxed);
    }

    /// Set the threshold by name (case-insensitive).
    pub fn set_level_name(&self, name: &str) -> ApplicationResult<Level> {
        let level: Level = name.parse()?;
        self.set_level(level);
        Ok(level)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level.rank() >= self.threshold.load(Ordering::Relaxed)
    }

    /// Generic emission gate.
    ///
    /// Tokens carrying a severity are dropped when it is below the threshold;
    /// decorative tokens (NONE, CYAN, GRAY, ENDC) always print.
    pub fn print(&self, message: impl Into<Message>, color: Color, stream: Stream, opts: &Options) {
        if let Some(level) = color.severity() {
            if !self.is_enabled(level) {
                trace!(%level, threshold = %self.level(), "message below threshold");
                return;
            }
        }
        self.emit(&message.into(), color.code(), stream, opts);
    }

    pub fn debug(&self, message: impl Into<Message>) {
        self.debug_with(message, &Options::default());
    }

    pub fn debug_with(&self, message: impl Into<Message>, opts: &Options) {
        self.print(message, Color::Debug, Stream::Stdout, opts);
    }

    pub fn ok(&self, message: impl Into<Message>) {
        self.ok_with(message, &Options::default());
    }

    pub fn ok_with(&self, message: impl Into<Message>, opts: &Options) {
        self.print(message, Color::Ok, Stream::Stdout, opts);
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.info_with(message, &Options::default());
    }

    pub fn info_with(&self, message: impl Into<Message>, opts: &Options) {
        self.print(message, Color::Info, Stream::Stdout, opts);
    }

    pub fn warn(&self, message: impl Into<Message>) {
        self.warn_with(message, &Options::default());
    }

    pub fn warn_with(&self, message: impl Into<Message>, opts: &Options) {
        self.print(message, Color::Warning, Stream::Stderr, opts);
    }

    pub fn err(&self, message: impl Into<Message>) {
        self.print(message, Color::Err, Stream::Stderr, &Options::default());
    }

    /// Print an error; with `opts.interrupt` also print the fatal message and
    /// return [`ApplicationError::Interrupted`].
    pub fn err_with(&self, message: impl Into<Message>, opts: &Options) -> ApplicationResult<()> {
        self.print_or_stop(message, Color::Err, opts)
    }

    pub fn fatal(&self, message: impl Into<Message>) {
        self.print(message, Color::Fatal, Stream::Stderr, &Options::default());
    }

    /// Same contract as [`Printer::err_with`], in the FATAL color.
    pub fn fatal_with(&self, message: impl Into<Message>, opts: &Options) -> ApplicationResult<()> {
        self.print_or_stop(message, Color::Fatal, opts)
    }

    /// Print with a caller-supplied escape sequence to stdout. Never gated.
    pub fn custom(&self, message: impl Into<Message>, escape: &str) {
        self.custom_with(message, escape, Stream::Stdout, &Options::default());
    }

    pub fn custom_with(
        &self,
        message: impl Into<Message>,
        escape: &str,
        stream: Stream,
        opts: &Options,
    ) {
        self.emit(&message.into(), escape, stream, opts);
    }

    fn print_or_stop(
        &self,
        message: impl Into<Message>,
        color: Color,
        opts: &Options,
    ) -> ApplicationResult<()> {
        self.print(message, color, Stream::Stderr, opts);
        if !opts.interrupt {
            return Ok(());
        }
        self.print(
            opts.fatal_message.as_str(),
            color,
            Stream::Stderr,
            &Options::default(),
        );
        Err(ApplicationError::Interrupted {
            message: opts.fatal_message.clone(),
        })
    }

    fn emit(&self, message: &Message, code: &str, stream: Stream, opts: &Options) {
        let stamp = opts.timestamp.then(timestamp);
        let text = message.render(opts.format);
        let line = compose(code, stamp.as_deref(), &opts.prefix, &text, &opts.suffix);
        self.write(stream, &format!("{line}{}", opts.end));
    }

    /// Write failures go to the tracing side channel, never back through the printer.
    pub(crate) fn write(&self, stream: Stream, text: &str) {
        if let Err(e) = self.console.write(stream, text) {
            error!(%stream, error = %e, "console write failed");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::stdio()
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Colored text without printing. Timestamp and terminator are ignored.
pub fn colored_string(message: impl Into<Message>, color: Color, opts: &Options) -> String {
    let text = message.into().render(opts.format);
    compose(color.code(), None, &opts.prefix, &text, &opts.suffix)
}

pub(crate) fn compose(
    code: &str,
    stamp: Option<&str>,
    prefix: &str,
    text: &str,
    suffix: &str,
) -> String {
    format!("{code}{}{prefix}{text}{suffix}{RESET}", stamp.unwrap_or(""))
}

fn timestamp() -> String {
    format!("[{}] ", Local::now().format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_parts_when_composing_then_wrapped_in_color_and_reset() {
        let line = compose("\x1b[92m", Some("[t] "), "> ", "msg", " <");
        assert_eq!(line, "\x1b[92m[t] > msg <\x1b[0m");
    }

    #[test]
    fn given_default_options_then_newline_and_stock_fatal_message() {
        let opts = Options::default();
        assert_eq!(opts.end, "\n");
        assert_eq!(opts.fatal_message, DEFAULT_FATAL_MESSAGE);
        assert_eq!(opts.format, FormatMode::Auto);
        assert!(!opts.interrupt && !opts.timestamp);
    }

    #[test]
    fn given_timestamp_then_bracketed_local_time() {
        let stamp = timestamp();
        assert!(stamp.starts_with('[') && stamp.ends_with("] "));
        assert_eq!(stamp.len(), "[2024-01-01 00:00:00] ".len());
    }

    #[test]
    fn given_name_when_setting_level_then_threshold_changes() {
        let printer = Printer::new(Arc::new(crate::infrastructure::MemoryConsole::new()));
        assert_eq!(printer.level(), Level::Info);
        assert_eq!(printer.set_level_name("error").unwrap(), Level::Error);
        assert_eq!(printer.level(), Level::Error);
        assert!(printer.set_level_name("loud").is_err());
        assert_eq!(printer.level(), Level::Error);
    }
}
