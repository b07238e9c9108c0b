//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::{Align, DEFAULT_FATAL_MESSAGE};
use crate::domain::{Color, FormatMode, Level};

/// Colored console printing: leveled messages, JSON pretty-printing, progress bars and tables
#[derive(Parser, Debug)]
#[command(name = "cprintf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Diagnostic logging to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (TOML), layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Minimum level printed: DEBUG, INFO, WARNING, ERROR, FATAL
    #[arg(short, long, global = true)]
    pub level: Option<Level>,

    /// Prefix messages with [YYYY-MM-DD HH:MM:SS]
    #[arg(short, long, global = true)]
    pub timestamp: bool,

    /// Message format: auto, raw, json, pretty
    #[arg(short, long, global = true)]
    pub format: Option<FormatMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a debug message (purple, stdout)
    Debug(MessageArgs),

    /// Print a confirmation message (blue, stdout)
    #[command(name = "ok")]
    Confirm(MessageArgs),

    /// Print an informational message (green, stdout)
    Info(MessageArgs),

    /// Print a warning (yellow, stderr)
    Warn(MessageArgs),

    /// Print an error (bright red, stderr)
    #[command(name = "err")]
    Error(StopArgs),

    /// Print a fatal error (red, stderr)
    Fatal(StopArgs),

    /// Print with a custom escape sequence, never filtered by level
    Custom {
        /// Escape sequence: `\033[96m`, `\e[96m` or SGR parameters like `96`
        code: String,
        /// Message text (JSON is pretty-printed in auto mode)
        message: String,
        /// Write to stderr instead of stdout
        #[arg(long)]
        stderr: bool,
        #[command(flatten)]
        decor: Decor,
    },

    /// Print a colored string, never filtered by level
    Colored {
        /// Message text
        message: String,
        /// Color token (NONE, DEBUG, OK, INFO, WARNING, ERR, FATAL, CYAN, GRAY)
        #[arg(long, default_value = "NONE")]
        color: Color,
        #[command(flatten)]
        decor: Decor,
    },

    /// Print a separator line
    Line {
        /// Line length (default from config)
        #[arg(long)]
        length: Option<usize>,
        /// Fill character
        #[arg(long = "char", default_value_t = '-')]
        fill: char,
        /// Color token
        #[arg(long, default_value = "INFO")]
        color: Color,
        /// Write to stderr instead of stdout
        #[arg(long)]
        stderr: bool,
    },

    /// Run a progress bar from 0 to TOTAL
    Progress {
        /// Number of steps
        #[arg(long, default_value_t = 100)]
        total: u64,
        /// Delay between steps in milliseconds
        #[arg(long, default_value_t = 20)]
        delay_ms: u64,
        /// Bar width (default from config)
        #[arg(long)]
        width: Option<usize>,
        /// Fill character
        #[arg(long, default_value_t = '█')]
        fill: char,
        /// Color token
        #[arg(long, default_value = "INFO")]
        color: Color,
        #[command(flatten)]
        decor: Decor,
    },

    /// Render a JSON array of rows as a table
    Table {
        /// JSON file with rows, e.g. [[1, "Alice", 25]] (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Comma separated header names
        #[arg(long, value_delimiter = ',')]
        headers: Vec<String>,
        /// Cell alignment: left, right, center
        #[arg(long, default_value = "left")]
        align: Align,
        /// Color token
        #[arg(long, default_value = "INFO")]
        color: Color,
    },

    /// Show every color token in its color
    Colors,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}

/// Text placed around the message inside the color.
#[derive(Args, Debug, Clone, Default)]
pub struct Decor {
    /// Text before the message
    #[arg(short, long, default_value = "")]
    pub prefix: String,
    /// Text after the message
    #[arg(short, long, default_value = "")]
    pub suffix: String,
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Message text (JSON is pretty-printed in auto mode)
    pub message: String,
    #[command(flatten)]
    pub decor: Decor,
}

#[derive(Args, Debug)]
pub struct StopArgs {
    #[command(flatten)]
    pub message: MessageArgs,
    /// Print the fatal message and exit with status 1
    #[arg(long)]
    pub interrupt: bool,
    /// Message printed before stopping
    #[arg(long, default_value = DEFAULT_FATAL_MESSAGE)]
    pub fatal_message: String,
}
