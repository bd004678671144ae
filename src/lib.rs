pub mod cli;
pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod storage;

pub use config::StoreConfig;
pub use entity::{Priority, TodoItem};
pub use error::{Result, TodoError};
pub use storage::{FsResources, MemoryResources, Resources, TodoStore};
