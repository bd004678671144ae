//! Pure conversions between [`TodoItem`](crate::entity::TodoItem) and its
//! two persisted text forms. No I/O happens here.

pub mod csv;
pub mod json;

/// Key names shared by the JSON form.
pub mod keys {
    pub const ID: &str = "id";
    pub const TEXT: &str = "text";
    pub const PRIORITY: &str = "priority";
    pub const DEADLINE: &str = "deadline";
    pub const DONE: &str = "done";
    pub const CREATION_DATE: &str = "creationDate";
    pub const MODIFICATION_DATE: &str = "modificationDate";
}
