//! Table formatting utilities for terminal output.
//!
//! Column widths are measured in Unicode display width so CJK branch
//! names stay aligned.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// ANSI escape sequences used for status lines.
pub mod color {
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

/// Pads a string with spaces on the right up to the given display width.
/// Strings already at least that wide are returned unchanged.
///
/// # Examples
/// ```ignore
/// assert_eq!(pad_to_width("hello", 8), "hello   ");
/// assert_eq!(pad_to_width("日本語", 8), "日本語  ");
/// ```
pub fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(padding))
}

/// Render a boxed table with a header row.
///
/// ```text
/// +--------+------------+
/// | Merged | Not Merged |
/// +--------+------------+
/// | 2      | 1          |
/// +--------+------------+
/// ```
pub fn render_table<W: Write>(
    writer: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{border}+");

    writeln!(writer, "{border}")?;
    writeln!(writer, "{}", render_row(&widths, headers.iter().copied()))?;
    writeln!(writer, "{border}")?;
    for row in rows {
        writeln!(writer, "{}", render_row(&widths, row.iter().map(String::as_str)))?;
    }
    writeln!(writer, "{border}")?;

    Ok(())
}

fn render_row<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    let inner = widths
        .iter()
        .map(|w| format!(" {} ", pad_to_width(cells.next().unwrap_or(""), *w)))
        .collect::<Vec<_>>()
        .join("|");
    format!("|{inner}|")
}
