//! Domain layer: levels, color tokens and message formatting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod color;
pub mod error;
pub mod format;
pub mod level;

pub use color::{parse_escape, Color, RESET};
pub use error::DomainError;
pub use format::{FormatMode, Message};
pub use level::Level;
