//! Color tokens and their ANSI escape sequences
//!
//! The table is fixed for the lifetime of the process and emitted
//! unconditionally; no terminal capability detection happens here.

use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, Level};

/// SGR reset, appended after every colored message.
pub const RESET: &str = "\x1b[0m";

/// Symbolic color token bound to a fixed escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    None,
    Debug,
    Ok,
    Info,
    Warning,
    Err,
    Fatal,
    Endc,
    Cyan,
    Gray,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::None,
        Color::Debug,
        Color::Ok,
        Color::Info,
        Color::Warning,
        Color::Err,
        Color::Fatal,
        Color::Endc,
        Color::Cyan,
        Color::Gray,
    ];

    /// Escape sequence for this token.
    pub fn code(self) -> &'static str {
        match self {
            Color::None | Color::Endc => RESET,
            Color::Debug => "\x1b[95m",
            Color::Ok => "\x1b[94m",
            Color::Info => "\x1b[92m",
            Color::Warning => "\x1b[93m",
            Color::Err => "\x1b[91m",
            Color::Fatal => "\x1b[31m",
            Color::Cyan => "\x1b[96m",
            Color::Gray => "\x1b[90m",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::None => "NONE",
            Color::Debug => "DEBUG",
            Color::Ok => "OK",
            Color::Info => "INFO",
            Color::Warning => "WARNING",
            Color::Err => "ERR",
            Color::Fatal => "FATAL",
            Color::Endc => "ENDC",
            Color::Cyan => "CYAN",
            Color::Gray => "GRAY",
        }
    }

    /// Severity used by the emission gate. Decorative tokens have none.
    pub fn severity(self) -> Option<Level> {
        match self {
            Color::Debug => Some(Level::Debug),
            Color::Ok | Color::Info => Some(Level::Info),
            Color::Warning => Some(Level::Warning),
            Color::Err => Some(Level::Error),
            Color::Fatal => Some(Level::Fatal),
            Color::None | Color::Endc | Color::Cyan | Color::Gray => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, DomainError> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "ERROR" {
            return Ok(Color::Err);
        }
        Self::ALL
            .into_iter()
            .find(|color| color.name() == upper)
            .ok_or_else(|| DomainError::InvalidColor(s.to_string()))
    }
}

/// Turn a user-supplied escape spelling into the real sequence.
///
/// Accepts `\033[96m`, `\x1b[96m`, `\e[96m`, a string already holding the
/// ESC byte, or bare SGR parameters such as `96` or `1;36`.
pub fn parse_escape(spec: &str) -> Result<String, DomainError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(DomainError::InvalidEscape(spec.to_string()));
    }
    if spec.chars().all(|c| c.is_ascii_digit() || c == ';') {
        return Ok(format!("\x1b[{spec}m"));
    }
    let code = ["\\033", "\\x1b", "\\x1B", "\\e", "\\u001b"]
        .iter()
        .fold(spec.to_string(), |acc, literal| acc.replace(literal, "\x1b"));
    if code.starts_with('\x1b') {
        Ok(code)
    } else {
        Err(DomainError::InvalidEscape(spec.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_token_when_coding_then_matches_table() {
        assert_eq!(Color::Info.code(), "\x1b[92m");
        assert_eq!(Color::Fatal.code(), "\x1b[31m");
        assert_eq!(Color::Endc.code(), RESET);
    }

    #[test]
    fn given_names_when_parsing_then_case_insensitive() {
        assert_eq!("warning".parse::<Color>().unwrap(), Color::Warning);
        assert_eq!("Err".parse::<Color>().unwrap(), Color::Err);
        assert_eq!("error".parse::<Color>().unwrap(), Color::Err);
    }

    #[test]
    fn given_unknown_token_when_parsing_then_raises() {
        assert_eq!(
            "magenta".parse::<Color>().unwrap_err(),
            DomainError::InvalidColor("magenta".into())
        );
    }

    #[test]
    fn given_decorative_tokens_when_asking_severity_then_none() {
        assert_eq!(Color::Cyan.severity(), None);
        assert_eq!(Color::None.severity(), None);
        assert_eq!(Color::Ok.severity(), Some(Level::Info));
        assert_eq!(Color::Err.severity(), Some(Level::Error));
    }

    #[test]
    fn given_escape_spellings_when_parsing_then_normalized() {
        assert_eq!(parse_escape("96").unwrap(), "\x1b[96m");
        assert_eq!(parse_escape("1;36").unwrap(), "\x1b[1;36m");
        assert_eq!(parse_escape("\\033[96m").unwrap(), "\x1b[96m");
        assert_eq!(parse_escape("\\e[31m").unwrap(), "\x1b[31m");
        assert_eq!(parse_escape("\x1b[90m").unwrap(), "\x1b[90m");
        assert!(parse_escape("cyan").is_err());
        assert!(parse_escape("").is_err());
    }
}
