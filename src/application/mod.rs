//! Application layer: the printer handle and its presentation helpers
//!
//! This layer combines domain formatting with the console I/O boundary.

pub mod decor;
pub mod error;
pub mod printer;

pub use decor::{render_progress, render_table, Align, LineStyle, ProgressStyle, TableStyle};
pub use error::{ApplicationError, ApplicationResult};
pub use printer::{colored_string, Options, Printer, DEFAULT_FATAL_MESSAGE};
