//! core::store::json_store
//!
//! File-backed command executor.
//!
//! # Write Protocol
//!
//! Every submitted command runs under the exclusive [`StoreLock`]:
//!
//! 1. Reload the in-memory set from the store file
//! 2. Apply the command to a copy of the reloaded set
//! 3. Serialize the copy and write it to a temp file next to the store
//! 4. `fsync` and rename over the store file
//! 5. Replace the in-memory set with the copy
//!
//! Step 1 picks up writes made by other handles on the same workspace since
//! this one was opened. A failure after it leaves the file untouched and the
//! in-memory set as the file last had it.
//!
//! # Example
//!
//! ```
//! use templatework::core::model::Container;
//! use templatework::core::paths::WorkspacePaths;
//! use templatework::core::store::JsonStore;
//! use templatework::core::types::ContainerId;
//! use templatework::engine::command::ContainerLookup;
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! let paths = WorkspacePaths::new(temp.path().to_path_buf());
//!
//! let store = JsonStore::init(&paths, paths.store_path()).unwrap();
//! store.add_container(Container::new(ContainerId::new(1), "root")).unwrap();
//!
//! let reopened = JsonStore::open(&paths, paths.store_path()).unwrap();
//! assert!(reopened.find(ContainerId::new(1)).is_some());
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::lock::{LockError, StoreLock};
use super::schema::{parse_store, SchemaError, StoreDocumentV1};
use crate::core::model::Container;
use crate::core::paths::WorkspacePaths;
use crate::core::types::ContainerId;
use crate::engine::command::{
    Actor, Command, CommandError, CommandExecutor, CommandOutcome, ContainerLookup,
};
use crate::engine::exec::ContainerSet;

/// Errors from opening or writing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store file does not exist.
    #[error("store not found at {0} (run `tw init` first)")]
    NotFound(PathBuf),

    /// Store file already exists.
    #[error("store already exists at {0}")]
    AlreadyExists(PathBuf),

    /// Failed to read the store file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the store file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file content is invalid.
    #[error("invalid store {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// Could not take the workspace lock.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// A container could not be added.
    #[error("cannot add container: {0}")]
    Rejected(String),
}

/// Container store persisted as a JSON document.
#[derive(Debug)]
pub struct JsonStore {
    paths: WorkspacePaths,
    path: PathBuf,
    state: Mutex<ContainerSet>,
}

impl JsonStore {
    /// Open an existing store file and load its containers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file does not exist, or a read
    /// or schema error if it cannot be loaded.
    pub fn open(paths: &WorkspacePaths, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let set = load_set(&path)?;

        Ok(Self {
            paths: paths.clone(),
            path,
            state: Mutex::new(set),
        })
    }

    /// Create a new, empty store file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the file exists.
    pub fn init(paths: &WorkspacePaths, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            return Err(StoreError::AlreadyExists(path));
        }

        let _lock = StoreLock::acquire(paths)?;
        let set = ContainerSet::new();
        write_atomic(&path, &set)?;

        Ok(Self {
            paths: paths.clone(),
            path,
            state: Mutex::new(set),
        })
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a new container.
    ///
    /// Container creation is not a template command, so it bypasses the
    /// executor but follows the same write protocol.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rejected` if the container conflicts with the
    /// existing set, or a lock or write error.
    pub fn add_container(&self, container: Container) -> Result<(), StoreError> {
        let _lock = StoreLock::acquire(&self.paths)?;
        let mut state = self.state();
        *state = load_set(&self.path)?;

        let mut next = state.clone();
        next.insert(container).map_err(StoreError::Rejected)?;
        write_atomic(&self.path, &next)?;

        *state = next;
        Ok(())
    }

    /// Snapshot of all containers, in id order.
    pub fn containers(&self) -> Vec<Container> {
        self.state().iter().cloned().collect()
    }

    fn state(&self) -> MutexGuard<'_, ContainerSet> {
        // A poisoned set is still consistent: it is only replaced wholesale.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommandExecutor for JsonStore {
    fn submit(&self, actor: &Actor, command: Command) -> Result<CommandOutcome, CommandError> {
        let kind = command.kind();
        log::debug!("{} submits {} on {}", actor, kind, command.target());

        let _lock = StoreLock::acquire(&self.paths)
            .map_err(|e| CommandError::new(kind, e.to_string()))?;
        let mut state = self.state();
        *state = load_set(&self.path).map_err(|e| CommandError::new(kind, e.to_string()))?;

        let mut next = state.clone();
        let outcome = next.apply(command)?;
        write_atomic(&self.path, &next).map_err(|e| CommandError::new(kind, e.to_string()))?;

        *state = next;
        Ok(outcome)
    }
}

impl ContainerLookup for JsonStore {
    fn find(&self, id: ContainerId) -> Option<Container> {
        self.state().get(id).cloned()
    }
}

/// Read and validate the store file at `path`.
fn load_set(path: &Path) -> Result<ContainerSet, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let set = parse_store(&content)
        .and_then(StoreDocumentV1::into_set)
        .map_err(|source| StoreError::Schema {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("loaded {} containers from {}", set.len(), path.display());
    Ok(set)
}

/// Write the set to `path` via temp file and rename.
fn write_atomic(path: &Path, set: &ContainerSet) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err(parent))?;
    }

    let doc = StoreDocumentV1::from_set(set);
    let contents = serde_json::to_string_pretty(&doc).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;
    file.write_all(contents.as_bytes())
        .map_err(write_err(&temp_path))?;
    file.sync_all().map_err(write_err(&temp_path))?;

    fs::rename(&temp_path, path).map_err(write_err(path))?;
    Ok(())
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Write { path, source }
}
