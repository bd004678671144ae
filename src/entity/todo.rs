// src/entity/todo.rs
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Priority;

/// A single task record.
///
/// Identity is the `id` alone: two items with the same id compare equal and
/// hash the same no matter what the other fields hold. Use
/// [`TodoItem::same_content`] for a field-by-field comparison.
#[derive(Debug, Clone)]
pub struct TodoItem {
    id: String,
    text: String,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
    done: bool,
    creation_date: DateTime<Utc>,
    modification_date: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// New open item with a generated id, created now.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            text: text.into(),
            priority: Priority::default(),
            deadline: None,
            done: false,
            creation_date: Utc::now(),
            modification_date: None,
        }
    }

    pub fn from_parts(
        id: String,
        text: String,
        priority: Priority,
        deadline: Option<DateTime<Utc>>,
        done: bool,
        creation_date: DateTime<Utc>,
        modification_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            text,
            priority,
            deadline,
            done,
            creation_date,
            modification_date,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn with_creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = creation_date;
        self
    }

    pub fn with_modification_date(mut self, modification_date: Option<DateTime<Utc>>) -> Self {
        self.modification_date = modification_date;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        self.modification_date
    }

    /// Compare every field, not just the identity.
    pub fn same_content(&self, other: &TodoItem) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.priority == other.priority
            && self.deadline == other.deadline
            && self.done == other.done
            && self.creation_date == other.creation_date
            && self.modification_date == other.modification_date
    }
}

impl PartialEq for TodoItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TodoItem {}

impl Hash for TodoItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}
