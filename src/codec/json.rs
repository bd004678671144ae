// src/codec/json.rs
//! JSON form of a [`TodoItem`].
//!
//! Decoding is lenient about optional keys and strict about required ones:
//! `text` (string) and `done` (bool) must be present, `priority` must be a
//! known token when given as a string. Encoding is compact: `priority` is
//! left out when it is `normal`, absent dates are left out entirely.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::entity::{from_epoch_seconds, generate_id, to_epoch_seconds, Priority, TodoItem};
use crate::error::{Result, TodoError};

use super::keys;

/// Decode one record from a JSON value.
pub fn decode(value: &Value) -> Result<TodoItem> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(TodoError::decode(format!(
                "expected an object, got {}",
                type_name(other)
            )))
        }
    };

    let text = match map.get(keys::TEXT) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(TodoError::decode(format!(
                "'text' must be a string, got {}",
                type_name(other)
            )))
        }
        None => return Err(TodoError::decode("missing required key 'text'")),
    };

    let done = match map.get(keys::DONE) {
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(TodoError::decode(format!(
                "'done' must be a boolean, got {}",
                type_name(other)
            )))
        }
        None => return Err(TodoError::decode("missing required key 'done'")),
    };

    // A non-string priority is treated like a missing one
    let priority = match map.get(keys::PRIORITY) {
        Some(Value::String(s)) => s.parse::<Priority>().map_err(TodoError::Decode)?,
        _ => Priority::default(),
    };

    let id = match map.get(keys::ID) {
        Some(Value::String(s)) => s.clone(),
        _ => generate_id(),
    };

    let creation_date = date_field(map, keys::CREATION_DATE)?.unwrap_or_else(Utc::now);
    let deadline = date_field(map, keys::DEADLINE)?;
    let modification_date = date_field(map, keys::MODIFICATION_DATE)?;

    Ok(TodoItem::from_parts(
        id,
        text,
        priority,
        deadline,
        done,
        creation_date,
        modification_date,
    ))
}

/// Encode one record as a JSON object.
pub fn encode(item: &TodoItem) -> Value {
    let mut map = Map::new();
    map.insert(keys::ID.to_string(), Value::from(item.id()));
    map.insert(keys::TEXT.to_string(), Value::from(item.text()));
    map.insert(keys::DONE.to_string(), Value::from(item.done()));
    map.insert(
        keys::CREATION_DATE.to_string(),
        Value::from(to_epoch_seconds(&item.creation_date())),
    );

    if !item.priority().is_default() {
        map.insert(
            keys::PRIORITY.to_string(),
            Value::from(item.priority().as_str()),
        );
    }

    if let Some(deadline) = item.deadline() {
        map.insert(
            keys::DEADLINE.to_string(),
            Value::from(to_epoch_seconds(&deadline)),
        );
    }

    if let Some(modified) = item.modification_date() {
        map.insert(
            keys::MODIFICATION_DATE.to_string(),
            Value::from(to_epoch_seconds(&modified)),
        );
    }

    Value::Object(map)
}

/// Decode a payload that must be an array of record objects.
///
/// Fails on the first element that does not decode; nothing is returned
/// for the elements before it.
pub fn decode_array(value: &Value) -> Result<Vec<TodoItem>> {
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(TodoError::decode(format!(
                "expected an array of todo items, got {}",
                type_name(other)
            )))
        }
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            decode(element).map_err(|e| match e {
                TodoError::Decode(reason) => {
                    TodoError::Decode(format!("element {}: {}", index, reason))
                }
                other => other,
            })
        })
        .collect()
}

pub fn encode_array<'a>(items: impl IntoIterator<Item = &'a TodoItem>) -> Value {
    Value::Array(items.into_iter().map(encode).collect())
}

/// Numbers become dates; any other type counts as absent. A number that
/// cannot be represented as a date is a decode failure.
fn date_field(map: &Map<String, Value>, key: &str) -> Result<Option<DateTime<Utc>>> {
    match map.get(key).and_then(Value::as_f64) {
        Some(secs) => from_epoch_seconds(secs)
            .map(Some)
            .ok_or_else(|| TodoError::decode(format!("'{}' is out of range: {}", key, secs))),
        None => Ok(None),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
