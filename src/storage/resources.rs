// src/storage/resources.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, TodoError};

/// Byte-level access to named resources. The store never touches the
/// filesystem directly; it goes through one of these.
pub trait Resources {
    fn exists(&self, name: &str) -> bool;

    /// Fails with [`TodoError::ResourceNotFound`] when `name` is missing.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Fails with [`TodoError::ResourceUnwritable`] when the bytes cannot be
    /// stored.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Make sure the container for the resources exists. Idempotent.
    fn ensure_container(&self) -> Result<()>;
}

/// Resources stored as files directly under one directory.
#[derive(Debug, Clone)]
pub struct FsResources {
    root: PathBuf,
}

impl FsResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Resources for FsResources {
    fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TodoError::ResourceNotFound(path.display().to_string()),
            _ => TodoError::Io(e),
        })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(name);
        fs::write(&path, bytes).map_err(|source| TodoError::ResourceUnwritable {
            name: path.display().to_string(),
            source,
        })
    }

    fn ensure_container(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|source| TodoError::ResourceUnwritable {
            name: self.root.display().to_string(),
            source,
        })
    }
}

/// In-memory resources. Not thread-safe; meant for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryResources {
    files: RefCell<HashMap<String, Vec<u8>>>,
    read_only: bool,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails with `ResourceUnwritable`.
    pub fn read_only() -> Self {
        Self {
            files: RefCell::default(),
            read_only: true,
        }
    }

    pub fn with_file(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.borrow_mut().insert(name.into(), bytes.into());
        self
    }

    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).cloned()
    }
}

impl Resources for MemoryResources {
    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.files
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| TodoError::ResourceNotFound(name.to_string()))
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(TodoError::ResourceUnwritable {
                name: name.to_string(),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "read-only resources"),
            });
        }
        self.files
            .borrow_mut()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn ensure_container(&self) -> Result<()> {
        Ok(())
    }
}
