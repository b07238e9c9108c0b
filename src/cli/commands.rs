//! Command dispatch

use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{colored_string, LineStyle, Options, Printer, ProgressStyle, TableStyle};
use crate::cli::args::{Cli, Commands, ConfigCommands, Decor, MessageArgs, StopArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{parse_escape, Color};
use crate::infrastructure::{StdConsole, Stream};

/// Load settings, apply command line overrides and run the command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let printer = settings.printer(Arc::new(StdConsole));
    debug!(?settings, "effective settings");
    dispatch(&cli.command, &printer, &settings)
}

/// Settings from files and environment, overridden by global flags.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        settings.level = level;
    }
    if cli.timestamp {
        settings.timestamp = true;
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }
    Ok(settings)
}

/// Run a single command against `printer`.
pub fn dispatch(command: &Commands, printer: &Printer, settings: &Settings) -> CliResult<()> {
    match command {
        Commands::Debug(args) => {
            printer.debug_with(args.message.as_str(), &message_options(settings, &args.decor));
            Ok(())
        }
        Commands::Confirm(args) => {
            printer.ok_with(args.message.as_str(), &message_options(settings, &args.decor));
            Ok(())
        }
        Commands::Info(args) => {
            printer.info_with(args.message.as_str(), &message_options(settings, &args.decor));
            Ok(())
        }
        Commands::Warn(args) => {
            printer.warn_with(args.message.as_str(), &message_options(settings, &args.decor));
            Ok(())
        }
        Commands::Error(args) => {
            let MessageArgs { message, decor } = &args.message;
            printer.err_with(message.as_str(), &stop_options(settings, decor, args))?;
            Ok(())
        }
        Commands::Fatal(args) => {
            let MessageArgs { message, decor } = &args.message;
            printer.fatal_with(message.as_str(), &stop_options(settings, decor, args))?;
            Ok(())
        }
        Commands::Custom {
            code,
            message,
            stderr,
            decor,
        } => _custom(printer, settings, code, message, *stderr, decor),
        Commands::Colored {
            message,
            color,
            decor,
        } => {
            let opts = message_options(settings, decor);
            let text = colored_string(message.as_str(), *color, &opts);
            printer.write(Stream::Stdout, &format!("{text}\n"));
            Ok(())
        }
        Commands::Line {
            length,
            fill,
            color,
            stderr,
        } => {
            let base = settings.line_style();
            let style = LineStyle {
                length: length.unwrap_or(base.length),
                fill: *fill,
                color: *color,
                stream: if *stderr { Stream::Stderr } else { Stream::Stdout },
            };
            printer.line_with(&style);
            Ok(())
        }
        Commands::Progress {
            total,
            delay_ms,
            width,
            fill,
            color,
            decor,
        } => {
            let base = settings.progress_style();
            let style = ProgressStyle {
                prefix: decor.prefix.clone(),
                suffix: decor.suffix.clone(),
                width: width.unwrap_or(base.width),
                fill: *fill,
                color: *color,
                ..base
            };
            _progress(printer, *total, Duration::from_millis(*delay_ms), &style)
        }
        Commands::Table {
            file,
            headers,
            align,
            color,
        } => {
            let rows = read_rows(file.as_deref())?;
            let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
            let headers = (!headers.is_empty()).then_some(headers.as_slice());
            printer.print_table(
                &rows,
                headers,
                &TableStyle {
                    color: *color,
                    align: *align,
                },
            );
            Ok(())
        }
        Commands::Colors => {
            _colors(printer);
            Ok(())
        }
        Commands::Config { command } => _config(settings, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn message_options(settings: &Settings, decor: &Decor) -> Options {
    settings
        .options()
        .prefix(decor.prefix.as_str())
        .suffix(decor.suffix.as_str())
}

fn stop_options(settings: &Settings, decor: &Decor, args: &StopArgs) -> Options {
    message_options(settings, decor)
        .interrupt(args.interrupt)
        .fatal_message(args.fatal_message.as_str())
}

#[instrument(skip(printer, settings, decor))]
fn _custom(
    printer: &Printer,
    settings: &Settings,
    code: &str,
    message: &str,
    stderr: bool,
    decor: &Decor,
) -> CliResult<()> {
    let escape = parse_escape(code)?;
    let stream = if stderr { Stream::Stderr } else { Stream::Stdout };
    printer.custom_with(message, &escape, stream, &message_options(settings, decor));
    Ok(())
}

#[instrument(skip(printer, style))]
fn _progress(printer: &Printer, total: u64, delay: Duration, style: &ProgressStyle) -> CliResult<()> {
    printer.progress_bar(0, total, style)?;
    for current in 1..=total {
        thread::sleep(delay);
        printer.progress_bar(current, total, style)?;
    }
    Ok(())
}

fn _colors(printer: &Printer) {
    for color in Color::ALL {
        let label = format!("{:<8} {:?}", color.name(), color.code());
        printer.custom_with(label.as_str(), color.code(), Stream::Stdout, &Options::default());
    }
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::header("Global config");
                output::detail(&path.display());
            }
            None => output::info("no home directory, global config disabled"),
        },
    }
    Ok(())
}

/// Read table rows from `file`, or stdin when absent.
#[instrument]
pub fn read_rows(file: Option<&Path>) -> CliResult<Vec<Vec<String>>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("read {}", path.display()), e))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io("read stdin", e))?;
            buf
        }
    };
    parse_rows(&text)
}

/// Parse a JSON array of rows into cell text. Strings are used verbatim,
/// other values in their JSON spelling.
pub fn parse_rows(text: &str) -> CliResult<Vec<Vec<String>>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(text)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
