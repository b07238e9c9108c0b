//! Presentation helpers: separator lines, progress bars and tables
//!
//! None of these are gated by the severity threshold; the color only picks
//! the escape sequence.

use std::fmt::Display;
use std::iter;
use std::str::FromStr;

use itertools::Itertools;

use crate::application::printer::compose;
use crate::application::{ApplicationError, ApplicationResult, Printer};
use crate::domain::{Color, DomainError};
use crate::infrastructure::Stream;

const COLUMN_SEPARATOR: &str = " | ";

/// Separator line settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub length: usize,
    pub fill: char,
    pub color: Color,
    pub stream: Stream,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            length: 50,
            fill: '-',
            color: Color::Info,
            stream: Stream::Stdout,
        }
    }
}

/// Progress bar settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStyle {
    pub prefix: String,
    pub suffix: String,
    pub width: usize,
    pub fill: char,
    pub empty: char,
    pub color: Color,
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            width: 50,
            fill: '█',
            empty: '-',
            color: Color::Info,
        }
    }
}

/// Cell alignment within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl FromStr for Align {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" | "centre" => Ok(Align::Center),
            _ => Err(DomainError::InvalidAlign(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    pub color: Color,
    pub align: Align,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            color: Color::Info,
            align: Align::Left,
        }
    }
}

/// Progress bar text without color or carriage returns.
///
/// The bar holds `floor(width * current / total)` fill characters, capped at
/// `width`; the percentage has one decimal place.
pub fn render_progress(current: u64, total: u64, style: &ProgressStyle) -> ApplicationResult<String> {
    if total == 0 {
        return Err(ApplicationError::ZeroTotal { current });
    }
    let percent = 100.0 * current as f64 / total as f64;
    let filled = (style.width as u128 * current as u128 / total as u128).min(style.width as u128) as usize;
    let bar: String = iter::repeat(style.fill)
        .take(filled)
        .chain(iter::repeat(style.empty).take(style.width - filled))
        .collect();
    Ok(format!(
        "{} |{bar}| {percent:.1}% {}",
        style.prefix, style.suffix
    ))
}

/// Table lines: header and separator (when headers are given), then one line
/// per row. Empty `rows` renders nothing.
///
/// Columns are as wide as their longest cell (header included), measured in
/// characters. Rows shorter than the widest row are padded with empty cells.
pub fn render_table<R, C>(rows: &[R], headers: Option<&[&str]>, align: Align) -> Vec<String>
where
    R: AsRef<[C]>,
    C: Display,
{
    if rows.is_empty() {
        return Vec::new();
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.as_ref().iter().map(ToString::to_string).collect())
        .collect();
    let headers: Vec<String> = headers
        .unwrap_or_default()
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = cells
        .iter()
        .map(Vec::len)
        .chain(iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            headers
                .get(i)
                .into_iter()
                .chain(cells.iter().filter_map(|row| row.get(i)))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 2);
    if !headers.is_empty() {
        lines.push(render_row(&headers, &widths, Align::Left));
        lines.push("-".repeat(table_width(&widths)));
    }
    lines.extend(cells.iter().map(|row| render_row(row, &widths, align)));
    lines
}

fn table_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1)
}

fn render_row(row: &[String], widths: &[usize], align: Align) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| pad(row.get(i).map(String::as_str).unwrap_or(""), width, align))
        .join(COLUMN_SEPARATOR)
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{cell:<width$}"),
        Align::Right => format!("{cell:>width$}"),
        Align::Center => format!("{cell:^width$}"),
    }
}

impl Printer {
    /// Print a 50 character `-` line in the INFO color.
    pub fn line(&self) {
        self.line_with(&LineStyle::default());
    }

    pub fn line_with(&self, style: &LineStyle) {
        let rule: String = iter::repeat(style.fill).take(style.length).collect();
        self.write_colored(style.stream, style.color, &rule);
    }

    /// Redraw the progress bar in place on stdout.
    ///
    /// Output starts and ends with `\r`; a newline follows only once
    /// `current == total`.
    pub fn progress_bar(&self, current: u64, total: u64, style: &ProgressStyle) -> ApplicationResult<()> {
        let body = render_progress(current, total, style)?;
        let mut text = format!("\r{}\r", compose(style.color.code(), None, "", &body, ""));
        if current == total {
            text.push('\n');
        }
        self.write(Stream::Stdout, &text);
        Ok(())
    }

    /// Print `rows` as a table on stdout, one colored line per table line.
    pub fn print_table<R, C>(&self, rows: &[R], headers: Option<&[&str]>, style: &TableStyle)
    where
        R: AsRef<[C]>,
        C: Display,
    {
        for line in render_table(rows, headers, style.align) {
            self.write_colored(Stream::Stdout, style.color, &line);
        }
    }

    fn write_colored(&self, stream: Stream, color: Color, text: &str) {
        self.write(stream, &format!("{}\n", compose(color.code(), None, "", text, "")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_half_done_when_rendering_progress_then_half_filled() {
        let style = ProgressStyle {
            width: 10,
            ..ProgressStyle::default()
        };
        assert_eq!(
            render_progress(5, 10, &style).unwrap(),
            " |█████-----| 50.0% "
        );
    }

    #[test]
    fn given_fraction_when_rendering_progress_then_floors_fill() {
        let style = ProgressStyle {
            width: 10,
            fill: '#',
            prefix: "p".into(),
            suffix: "s".into(),
            ..ProgressStyle::default()
        };
        assert_eq!(render_progress(1, 3, &style).unwrap(), "p |###-------| 33.3% s");
    }

    #[test]
    fn given_zero_total_when_rendering_progress_then_error() {
        let err = render_progress(0, 0, &ProgressStyle::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::ZeroTotal { current: 0 }));
    }

    #[test]
    fn given_overshoot_when_rendering_progress_then_bar_capped() {
        let style = ProgressStyle {
            width: 4,
            ..ProgressStyle::default()
        };
        assert_eq!(render_progress(6, 3, &style).unwrap(), " |████| 200.0% ");
    }

    #[test]
    fn given_align_names_when_parsing_then_matches() {
        assert_eq!("RIGHT".parse::<Align>().unwrap(), Align::Right);
        assert_eq!("center".parse::<Align>().unwrap(), Align::Center);
        assert!("justify".parse::<Align>().is_err());
    }

    #[test]
    fn given_widths_when_padding_then_aligned() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Right), "   ab");
        assert_eq!(pad("ab", 5, Align::Center), " ab  ");
    }

    #[test]
    fn given_ragged_rows_when_rendering_table_then_missing_cells_empty() {
        let rows = vec![vec!["a", "bb"], vec!["ccc"]];
        let lines = render_table(&rows, None, Align::Left);
        assert_eq!(lines, vec!["a   | bb", "ccc |   "]);
    }
}
