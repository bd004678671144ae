use std::io;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::codec;
use crate::config::{resolve_data_dir, StoreConfig};
use crate::entity::{from_epoch_seconds, Priority, TodoItem};
use crate::error::{Result, TodoError};
use crate::storage::{FsResources, TodoStore};

use super::Format;

const SHORT_ID_LEN: usize = 8;

/// Open the store for `data_dir` and load the active format. A missing file
/// is treated as an empty list so the first `add` works.
fn open_store(data_dir: Option<PathBuf>, format: Format) -> Result<TodoStore<FsResources>> {
    let dir = resolve_data_dir(data_dir);
    let config = StoreConfig::load(&dir)?;
    let mut store = TodoStore::with_config(FsResources::new(&dir), config);

    match load(&mut store, format) {
        Ok(count) => debug!(count, %format, "Loaded todos"),
        Err(TodoError::ResourceNotFound(name)) => {
            debug!(resource = %name, "No saved todos yet, starting empty")
        }
        Err(e) => return Err(e),
    }

    Ok(store)
}

fn load(store: &mut TodoStore<FsResources>, format: Format) -> Result<usize> {
    match format {
        Format::Json => store.load_json(),
        Format::Csv => store.load_csv(),
    }
}

fn save(store: &TodoStore<FsResources>, format: Format) -> Result<()> {
    match format {
        Format::Json => store.save_json(),
        Format::Csv => store.save_csv(),
    }
}

/// Exact id first, then a unique id prefix.
fn resolve_id(store: &TodoStore<FsResources>, id: &str) -> Result<String> {
    if store.contains(id) {
        return Ok(id.to_string());
    }

    let matches: Vec<&TodoItem> = store.iter().filter(|t| t.id().starts_with(id)).collect();
    match matches.as_slice() {
        [only] => Ok(only.id().to_string()),
        [] => Err(TodoError::EntityNotFound(id.to_string())),
        _ => Err(TodoError::InvalidInput(format!(
            "id prefix '{}' matches {} todos",
            id,
            matches.len()
        ))),
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or epoch seconds.
fn parse_deadline(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    s.parse::<f64>()
        .ok()
        .and_then(from_epoch_seconds)
        .ok_or_else(|| {
            TodoError::InvalidInput(format!(
                "invalid deadline '{}': expected YYYY-MM-DD or epoch seconds",
                s
            ))
        })
}

fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

fn format_line(item: &TodoItem) -> String {
    let check = if item.done() { "x" } else { " " };
    let due = item
        .deadline()
        .map(|d| format!(" due:{}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "  {} [{}] ({}){} {}",
        short_id(item.id()),
        check,
        item.priority(),
        due,
        item.text()
    )
}

#[allow(clippy::too_many_arguments)]
pub fn handle_add(
    data_dir: Option<PathBuf>,
    format: Format,
    text: String,
    priority: String,
    deadline: Option<String>,
    done: bool,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let priority: Priority = priority.parse().map_err(TodoError::InvalidInput)?;
    let deadline = deadline.as_deref().map(parse_deadline).transpose()?;

    let mut store = open_store(data_dir, format)?;

    let mut item = TodoItem::new(text)
        .with_priority(priority)
        .with_deadline(deadline)
        .with_done(done);
    if let Some(id) = id {
        item = item.with_id(id);
    }

    let replaced = store.add(item.clone()).is_some();
    save(&store, format)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&codec::json::encode(&item))?
        );
    } else if replaced {
        println!("Replaced todo {} - {}", short_id(item.id()), item.text());
    } else {
        println!("Created todo {} - {}", short_id(item.id()), item.text());
    }

    Ok(())
}

pub fn handle_list(data_dir: Option<PathBuf>, format: Format, json: bool) -> Result<()> {
    let store = open_store(data_dir, format)?;

    if json {
        let payload = codec::json::encode_array(store.iter());
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if store.is_empty() {
        println!("No todos found.");
    } else {
        println!("Todos:\n");
        for item in store.iter() {
            println!("{}", format_line(item));
        }
    }

    Ok(())
}

pub fn handle_get(data_dir: Option<PathBuf>, format: Format, id: String, json: bool) -> Result<()> {
    let store = open_store(data_dir, format)?;
    let id = resolve_id(&store, &id)?;
    let item = store
        .get(&id)
        .ok_or_else(|| TodoError::EntityNotFound(id.clone()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&codec::json::encode(item))?
        );
    } else {
        println!("id:        {}", item.id());
        println!("text:      {}", item.text());
        println!("priority:  {}", item.priority());
        println!("done:      {}", item.done());
        println!("created:   {}", item.creation_date().to_rfc3339());
        if let Some(deadline) = item.deadline() {
            println!("deadline:  {}", deadline.to_rfc3339());
        }
        if let Some(modified) = item.modification_date() {
            println!("modified:  {}", modified.to_rfc3339());
        }
    }

    Ok(())
}

pub fn handle_done(data_dir: Option<PathBuf>, format: Format, id: String, undo: bool) -> Result<()> {
    let mut store = open_store(data_dir, format)?;
    let id = resolve_id(&store, &id)?;

    store.mark_done(&id, !undo);
    save(&store, format)?;

    if undo {
        println!("Reopened todo {}", short_id(&id));
    } else {
        println!("Completed todo {}", short_id(&id));
    }

    Ok(())
}

pub fn handle_remove(data_dir: Option<PathBuf>, format: Format, id: String, force: bool) -> Result<()> {
    let mut store = open_store(data_dir, format)?;
    let id = resolve_id(&store, &id)?;

    if !force {
        let text = store.get(&id).map(|t| t.text().to_string()).unwrap_or_default();
        eprintln!("Remove todo {} - {}? [y/N] ", short_id(&id), text);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(TodoError::InvalidInput(
                "Use --force to remove in non-interactive mode".to_string(),
            ));
        }
    }

    if !store.remove(&id) {
        return Err(TodoError::EntityNotFound(id));
    }
    save(&store, format)?;

    println!("Removed todo {}", short_id(&id));
    Ok(())
}

pub fn handle_convert(data_dir: Option<PathBuf>, format: Format, to: Option<Format>) -> Result<()> {
    let dir = resolve_data_dir(data_dir);
    let config = StoreConfig::load(&dir)?;
    let mut store = TodoStore::with_config(FsResources::new(&dir), config);

    // Unlike the other commands, converting a missing file is an error
    load(&mut store, format)?;

    let target = to.unwrap_or_else(|| format.other());
    save(&store, target)?;

    println!(
        "Converted {} todos from {} to {} in {}",
        store.len(),
        format,
        target,
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_deadline_date() {
        let dt = parse_deadline("2023-06-12").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-06-12T00:00:00+00:00");
    }

    #[test]
    fn test_parse_deadline_epoch() {
        let dt = parse_deadline("1686588922").unwrap();
        assert_eq!(dt.timestamp(), 1686588922);
    }

    #[test]
    fn test_parse_deadline_invalid() {
        assert!(matches!(
            parse_deadline("next week"),
            Err(TodoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let tmp = TempDir::new().unwrap();
        let mut store = TodoStore::new(FsResources::new(tmp.path()));
        store.add(TodoItem::new("a").with_id("abc123"));
        store.add(TodoItem::new("b").with_id("abd456"));

        assert_eq!(resolve_id(&store, "abc123").unwrap(), "abc123");
        assert_eq!(resolve_id(&store, "abd").unwrap(), "abd456");
        assert!(matches!(
            resolve_id(&store, "ab"),
            Err(TodoError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_id(&store, "zzz"),
            Err(TodoError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_format_line() {
        let item = TodoItem::new("Walk the dog")
            .with_id("0123456789")
            .with_priority(Priority::Important)
            .with_done(true);
        assert_eq!(format_line(&item), "  01234567 [x] (important) Walk the dog");
    }

    #[test]
    fn test_open_store_without_files_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(Some(tmp.path().to_path_buf()), Format::Csv).unwrap();
        assert!(store.is_empty());
    }
}
