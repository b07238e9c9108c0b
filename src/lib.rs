//! Colored console printing.
//!
//! A [`Printer`] wraps ANSI colors around messages written to stdout or
//! stderr, gates them by severity, and pretty-prints structured data:
//!
//! ```no_run
//! use cprintf::{Level, Options, Printer};
//! use serde_json::json;
//!
//! let printer = Printer::stdio();
//! printer.info("plain text");
//! printer.info(json!({"hello": "world", "list": [1, 2, 3]}));
//! printer.warn_with("disk almost full", &Options::new().timestamp(true));
//!
//! printer.set_level(Level::Warning);
//! printer.debug("suppressed");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    colored_string, render_progress, render_table, Align, ApplicationError, ApplicationResult,
    LineStyle, Options, Printer, ProgressStyle, TableStyle, DEFAULT_FATAL_MESSAGE,
};
pub use domain::{parse_escape, Color, DomainError, FormatMode, Level, Message, RESET};
pub use infrastructure::{Console, MemoryConsole, StdConsole, Stream};
