//! Exported row table files.
//!
//! The engine writes one record per line. A field is quoted when it contains
//! a quote, the delimiter or a line break; inside quotes `""` stands for `"`.

use std::io;

use itertools::Itertools;

use crate::domain::{Row, RowTable};

/// Default delimiter of exported tables.
pub const DELIMITER: char = ',';

/// Decode an exported table. Blank lines are skipped.
pub fn parse_table(text: &str, delimiter: char) -> io::Result<RowTable> {
    let mut table = RowTable::new();
    let mut row = Row::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // current record has seen any content (a field, a delimiter or quotes)
    let mut dirty = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
                dirty = true;
            }
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                dirty = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                if dirty {
                    row.push(std::mem::take(&mut field));
                    table.push(std::mem::take(&mut row));
                }
                dirty = false;
            }
            _ => {
                field.push(ch);
                dirty = true;
            }
        }
    }

    if in_quotes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unterminated quoted field starting on line {}", quote_line),
        ));
    }
    if dirty {
        row.push(field);
        table.push(row);
    }

    Ok(table)
}

fn escape_field(field: &str, delimiter: char) -> String {
    let needs_quotes = field
        .chars()
        .any(|c| c == '"' || c == delimiter || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encode a table the way the engine exports it, one line per row.
pub fn format_table(table: &[Row], delimiter: char) -> String {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|field| escape_field(field, delimiter))
                .join(&delimiter.to_string())
        })
        .map(|line| line + "\n")
        .collect()
}
