mod resources;
mod todo_store;

pub use resources::{FsResources, MemoryResources, Resources};
pub use todo_store::TodoStore;
