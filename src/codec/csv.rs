// src/codec/csv.rs
//! Delimited single-line form of a [`TodoItem`].
//!
//! Seven fields in fixed order, separated by `;`:
//! `id;text;priority;deadline;done;creationDate;modificationDate`.
//! The token `NULL` marks an absent value in any position. Nothing is quoted
//! or escaped, so a separator or newline inside `id` or `text` breaks the
//! line on the next read.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::entity::{
    format_epoch_seconds, from_epoch_seconds, generate_id, to_epoch_seconds, Priority, TodoItem,
};
use crate::error::{Result, TodoError};

pub const SEPARATOR: char = ';';
pub const NULL: &str = "NULL";
pub const FIELD_COUNT: usize = 7;

/// Decode one line using the default `;` separator.
pub fn decode(line: &str) -> Result<TodoItem> {
    decode_with_separator(line, SEPARATOR)
}

pub fn decode_with_separator(line: &str, separator: char) -> Result<TodoItem> {
    let cells: Vec<Option<&str>> = line
        .split(separator)
        .map(|cell| if cell == NULL { None } else { Some(cell) })
        .collect();

    if cells.len() != FIELD_COUNT {
        return Err(TodoError::decode(format!(
            "expected {} fields, got {}",
            FIELD_COUNT,
            cells.len()
        )));
    }

    let text = cells[1].ok_or_else(|| TodoError::decode("missing required field 'text'"))?;

    let priority = match cells[2] {
        Some(token) => token.parse::<Priority>().map_err(TodoError::Decode)?,
        None => Priority::default(),
    };

    let done = match cells[4] {
        Some(token) => token
            .parse::<bool>()
            .map_err(|_| TodoError::decode(format!("invalid 'done' value: {}", token)))?,
        None => return Err(TodoError::decode("missing required field 'done'")),
    };

    let id = cells[0].map(str::to_string).unwrap_or_else(generate_id);

    let deadline = optional_date(cells[3], "deadline")?;
    let modification_date = optional_date(cells[6], "modificationDate")?;

    // Unlike the other dates, an unreadable creation date falls back to now
    let creation_date = cells[5]
        .and_then(|cell| cell.parse::<f64>().ok())
        .and_then(from_epoch_seconds)
        .unwrap_or_else(Utc::now);

    Ok(TodoItem::from_parts(
        id,
        text.to_string(),
        priority,
        deadline,
        done,
        creation_date,
        modification_date,
    ))
}

/// Encode one record as a single line (no trailing newline).
pub fn encode(item: &TodoItem) -> String {
    encode_with_separator(item, SEPARATOR)
}

pub fn encode_with_separator(item: &TodoItem, separator: char) -> String {
    let priority = if item.priority().is_default() {
        NULL
    } else {
        item.priority().as_str()
    };

    let fields = [
        item.id().to_string(),
        item.text().to_string(),
        priority.to_string(),
        format_optional_date(item.deadline()),
        item.done().to_string(),
        format_epoch_seconds(to_epoch_seconds(&item.creation_date())),
        format_optional_date(item.modification_date()),
    ];

    fields.join(&separator.to_string())
}

/// Decode every line of a blob. Lines that fail are logged and skipped;
/// the survivors keep their input order.
pub fn decode_lines(blob: &str) -> Vec<TodoItem> {
    blob.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .filter_map(|(index, line)| match decode(line) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed CSV line");
                None
            }
        })
        .collect()
}

pub fn encode_lines<'a>(items: impl IntoIterator<Item = &'a TodoItem>) -> String {
    items
        .into_iter()
        .map(encode)
        .collect::<Vec<_>>()
        .join("\n")
}

fn optional_date(cell: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>> {
    let Some(cell) = cell else {
        return Ok(None);
    };

    let secs = cell
        .parse::<f64>()
        .map_err(|_| TodoError::decode(format!("invalid '{}' value: {}", field, cell)))?;

    from_epoch_seconds(secs)
        .map(Some)
        .ok_or_else(|| TodoError::decode(format!("'{}' is out of range: {}", field, cell)))
}

fn format_optional_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(dt) => format_epoch_seconds(to_epoch_seconds(&dt)),
        None => NULL.to_string(),
    }
}
