// src/storage/todo_store.rs
use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::codec;
use crate::config::StoreConfig;
use crate::entity::TodoItem;
use crate::error::{Result, TodoError};

use super::Resources;

/// At most one [`TodoItem`] per id, persisted through a [`Resources`]
/// backend.
///
/// Inserting an item whose id is already held replaces the old one (last
/// write wins). Items are kept ordered by id, so saved files are stable.
/// The store does no locking; callers serialize access.
pub struct TodoStore<R: Resources> {
    items: BTreeMap<String, TodoItem>,
    resources: R,
    config: StoreConfig,
}

impl<R: Resources> TodoStore<R> {
    pub fn new(resources: R) -> Self {
        Self::with_config(resources, StoreConfig::default())
    }

    pub fn with_config(resources: R, config: StoreConfig) -> Self {
        Self {
            items: BTreeMap::new(),
            resources,
            config,
        }
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Insert or replace. Returns the item previously held under that id.
    pub fn add(&mut self, item: TodoItem) -> Option<TodoItem> {
        self.items.insert(item.id().to_string(), item)
    }

    /// Returns whether an item was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.items.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.values()
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.items.values().cloned().collect()
    }

    /// Set the done flag and stamp the modification date.
    pub fn mark_done(&mut self, id: &str, done: bool) -> bool {
        match self.items.remove(id) {
            Some(item) => {
                let updated = item
                    .with_done(done)
                    .with_modification_date(Some(Utc::now()));
                self.items.insert(id.to_string(), updated);
                true
            }
            None => false,
        }
    }

    /// Write every item as a JSON array.
    pub fn save_json(&self) -> Result<()> {
        let name = &self.config.json_file;
        self.resources.ensure_container()?;

        let payload = codec::json::encode_array(self.items.values());
        let bytes = serde_json::to_vec(&payload)?;
        self.resources.write(name, &bytes)?;

        debug!(resource = %name, count = self.items.len(), "Saved JSON");
        Ok(())
    }

    /// Merge items from the JSON resource into the store.
    ///
    /// Every element must decode; if one fails the store is left untouched.
    pub fn load_json(&mut self) -> Result<usize> {
        let name = self.config.json_file.clone();
        if !self.resources.exists(&name) {
            return Err(TodoError::ResourceNotFound(name));
        }

        let bytes = self.resources.read(&name)?;
        let payload: serde_json::Value = serde_json::from_slice(&bytes)?;
        let loaded = codec::json::decode_array(&payload)?;

        let count = loaded.len();
        for item in loaded {
            self.add(item);
        }

        info!(resource = %name, loaded = count, total = self.items.len(), "Merged JSON");
        Ok(count)
    }

    /// Write every item as one CSV line each.
    pub fn save_csv(&self) -> Result<()> {
        let name = &self.config.csv_file;
        self.resources.ensure_container()?;

        let payload = codec::csv::encode_lines(self.items.values());
        self.resources.write(name, payload.as_bytes())?;

        debug!(resource = %name, count = self.items.len(), "Saved CSV");
        Ok(())
    }

    /// Replace the store contents with the items in the CSV resource.
    ///
    /// Malformed lines are skipped, not reported as errors.
    pub fn load_csv(&mut self) -> Result<usize> {
        let name = self.config.csv_file.clone();
        if !self.resources.exists(&name) {
            return Err(TodoError::ResourceNotFound(name));
        }

        let bytes = self.resources.read(&name)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| TodoError::decode(format!("{} is not valid UTF-8: {}", name, e)))?;

        let loaded = codec::csv::decode_lines(&text);
        self.items = loaded
            .into_iter()
            .map(|item| (item.id().to_string(), item))
            .collect();

        info!(resource = %name, total = self.items.len(), "Replaced from CSV");
        Ok(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{from_epoch_seconds, Priority};
    use crate::storage::{FsResources, MemoryResources};
    use tempfile::TempDir;

    fn item(id: &str, text: &str) -> TodoItem {
        TodoItem::new(text)
            .with_id(id)
            .with_creation_date(from_epoch_seconds(1000.0).unwrap())
    }

    fn memory_store() -> TodoStore<MemoryResources> {
        TodoStore::new(MemoryResources::new())
    }

    #[test]
    fn test_add_same_id_keeps_one_last_wins() {
        let mut store = memory_store();
        assert!(store.add(item("1", "first")).is_none());

        let replaced = store.add(item("1", "second").with_priority(Priority::Important));
        assert_eq!(replaced.unwrap().text(), "first");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().text(), "second");
    }

    #[test]
    fn test_remove() {
        let mut store = memory_store();
        store.add(item("1", "a"));
        store.add(item("2", "b"));

        assert!(!store.remove("nope"));
        assert_eq!(store.len(), 2);

        assert!(store.remove("1"));
        assert_eq!(store.len(), 1);
        assert!(!store.contains("1"));
        assert!(!store.remove("1"));
    }

    #[test]
    fn test_mark_done_stamps_modification() {
        let mut store = memory_store();
        store.add(item("1", "a"));

        assert!(store.mark_done("1", true));
        let updated = store.get("1").unwrap();
        assert!(updated.done());
        assert!(updated.modification_date().is_some());

        assert!(!store.mark_done("missing", true));
    }

    #[test]
    fn test_save_json_writes_array() {
        let mut store = memory_store();
        store.add(item("b", "second"));
        store.add(item("a", "first").with_priority(Priority::Important));
        store.save_json().unwrap();

        let bytes = store.resources().contents("TodoList.json").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["id"], "a");
        assert_eq!(array[0]["priority"], "important");
        assert_eq!(array[1]["id"], "b");
        assert!(array[1].get("priority").is_none());
    }

    #[test]
    fn test_load_json_missing_resource() {
        let mut store = memory_store();
        assert!(matches!(
            store.load_json(),
            Err(TodoError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_load_json_merges_with_existing() {
        let resources = MemoryResources::new().with_file(
            "TodoList.json",
            r#"[{"id":"1","text":"from file","done":true},{"id":"2","text":"new","done":false}]"#,
        );
        let mut store = TodoStore::new(resources);
        store.add(item("1", "in memory"));
        store.add(item("3", "kept"));

        let loaded = store.load_json().unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("1").unwrap().text(), "from file");
        assert!(store.contains("3"));
    }

    #[test]
    fn test_load_json_bad_element_aborts() {
        let resources = MemoryResources::new().with_file(
            "TodoList.json",
            r#"[{"id":"1","text":"ok","done":true},{"id":"2","done":false}]"#,
        );
        let mut store = TodoStore::new(resources);
        store.add(item("0", "existing"));

        assert!(matches!(store.load_json(), Err(TodoError::Decode(_))));
        assert_eq!(store.len(), 1);
        assert!(!store.contains("1"));
    }

    #[test]
    fn test_load_json_rejects_non_array_and_bad_text() {
        let resources = MemoryResources::new().with_file("TodoList.json", r#"{"id":"1"}"#);
        let mut store = TodoStore::new(resources);
        assert!(matches!(store.load_json(), Err(TodoError::Decode(_))));

        let resources = MemoryResources::new().with_file("TodoList.json", "not json");
        let mut store = TodoStore::new(resources);
        assert!(matches!(store.load_json(), Err(TodoError::Json(_))));
    }

    #[test]
    fn test_save_csv_then_load_replaces() {
        let mut store = memory_store();
        store.add(item("1", "a"));
        store.add(item("2", "b").with_done(true));
        store.save_csv().unwrap();

        let bytes = store.resources().contents("TodoList.csv").unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "1;a;NULL;NULL;false;1000.0;NULL\n2;b;NULL;NULL;true;1000.0;NULL"
        );

        store.remove("1");
        store.add(item("9", "only in memory"));

        let count = store.load_csv().unwrap();
        assert_eq!(count, 2);
        assert!(store.contains("1"));
        assert!(store.contains("2"));
        assert!(!store.contains("9"));
    }

    #[test]
    fn test_load_csv_skips_malformed_lines() {
        let resources = MemoryResources::new().with_file(
            "TodoList.csv",
            "1;ok;NULL;NULL;false;10;NULL\n2;bad;NULL;false;10;NULL\n3;ok too;important;NULL;true;10;NULL",
        );
        let mut store = TodoStore::new(resources);
        assert_eq!(store.load_csv().unwrap(), 2);
        assert!(store.contains("1"));
        assert!(store.contains("3"));
    }

    #[test]
    fn test_load_csv_collapses_duplicate_ids() {
        let resources = MemoryResources::new().with_file(
            "TodoList.csv",
            "1;old;NULL;NULL;false;10;NULL\n1;new;NULL;NULL;true;10;NULL",
        );
        let mut store = TodoStore::new(resources);
        assert_eq!(store.load_csv().unwrap(), 1);
        assert_eq!(store.get("1").unwrap().text(), "new");
    }

    #[test]
    fn test_load_csv_missing_resource() {
        let mut store = memory_store();
        assert!(matches!(store.load_csv(), Err(TodoError::ResourceNotFound(_))));
    }

    #[test]
    fn test_save_to_unwritable_resources() {
        let mut store = TodoStore::new(MemoryResources::read_only());
        store.add(item("1", "a"));
        assert!(matches!(
            store.save_json(),
            Err(TodoError::ResourceUnwritable { .. })
        ));
        assert!(matches!(
            store.save_csv(),
            Err(TodoError::ResourceUnwritable { .. })
        ));
    }

    #[test]
    fn test_fs_json_round_trip() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");

        let mut store = TodoStore::new(FsResources::new(&dir));
        let original = item("abc", "Погладить кошечку")
            .with_priority(Priority::Unimportant)
            .with_deadline(from_epoch_seconds(2000.5))
            .with_modification_date(from_epoch_seconds(1500.0));
        store.add(original.clone());
        store.save_json().unwrap();
        assert!(dir.join("TodoList.json").exists());

        let mut reopened = TodoStore::new(FsResources::new(&dir));
        reopened.load_json().unwrap();
        assert!(reopened.get("abc").unwrap().same_content(&original));
    }

    #[test]
    fn test_custom_file_names() {
        let config = StoreConfig {
            json_file: "tasks.json".to_string(),
            csv_file: "tasks.csv".to_string(),
        };
        let mut store = TodoStore::with_config(MemoryResources::new(), config);
        store.add(item("1", "a"));
        store.save_json().unwrap();
        store.save_csv().unwrap();

        assert!(store.resources().exists("tasks.json"));
        assert!(store.resources().exists("tasks.csv"));
        assert!(!store.resources().exists("TodoList.json"));
    }
}
