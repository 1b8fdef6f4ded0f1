// Persistence layer: ordered todo records, one canonical line each
// The whole list is replaced on save - there is no incremental persistence

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::fs;
use tokio::sync::Mutex as AsyncMutex;

use crate::error::TodoError;
use crate::models::Todo;

/// Capability contract over a persisted ordered todo collection.
///
/// The store itself takes no locks; callers must serialize their own
/// load-modify-save cycles (see [`SharedTodoStore`]). Concurrent external
/// processes racing on the same file can silently lose updates - a
/// documented limitation, saves are whole-list last-write-wins.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Load all records in store order. A missing store is created empty
    /// and yields an empty list; an unreadable one is an I/O error.
    async fn load(&self) -> Result<Vec<Todo>, TodoError>;

    /// Replace the store's entire contents.
    async fn save(&self, todos: &[Todo]) -> Result<(), TodoError>;
}

/// Shared store handle. The async mutex serializes load-modify-save cycles
/// within the process so no two engine calls interleave.
pub type SharedTodoStore = Arc<AsyncMutex<Box<dyn TodoStore>>>;

pub fn shared_store(store: impl TodoStore + 'static) -> SharedTodoStore {
    Arc::new(AsyncMutex::new(Box::new(store)))
}

/// Default store file (~/.todo/todo.txt)
pub fn default_store_path() -> PathBuf {
    let home = dirs::home_dir().expect("failed to resolve home directory");
    home.join(".todo").join("todo.txt")
}

// ============================================
// FILE STORE
// ============================================

/// Store backed by a UTF-8 text file, one record per line, trailing newline.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TodoError {
        TodoError::StoreIo { path: self.path.clone(), source }
    }
}

#[async_trait]
impl TodoStore for FileStore {
    async fn load(&self) -> Result<Vec<Todo>, TodoError> {
        let exists = fs::try_exists(&self.path).await.map_err(|e| self.io_error(e))?;
        if !exists {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
                }
            }
            fs::write(&self.path, "").await.map_err(|e| self.io_error(e))?;
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path).await.map_err(|e| self.io_error(e))?;
        Ok(data
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Todo::parse)
            .collect())
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), TodoError> {
        let mut contents = todos.iter().map(Todo::serialize).collect::<Vec<_>>().join("\n");
        contents.push('\n');

        // write to a sibling temp file and rename over the store, so a
        // failed write never leaves a truncated store behind
        let tmp = self.path.with_extension("txt.tmp");
        fs::write(&tmp, contents).await.map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| self.io_error(e))
    }
}

// ============================================
// MEMORY STORE
// ============================================

/// In-memory store, used by tests and embedders that do not want a file.
#[derive(Default)]
pub struct MemoryStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self { todos: Mutex::new(todos) }
    }

    /// Current contents, for assertions
    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos.lock().clone()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.todos.lock().clone())
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), TodoError> {
        *self.todos.lock() = todos.to_vec();
        Ok(())
    }
}
