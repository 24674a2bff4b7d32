use crate::domain::Task;
use crate::error::StorageError;
use crate::persistence::files::{atomic_write, read_file};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Durable home of the task list. Used only by the task store.
pub trait TaskStorage {
    /// Read the stored list. A store that was never written yields an empty list.
    fn load(&self) -> Result<Vec<Task>, StorageError>;
    /// Replace the stored list
    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for Box<T> {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        (**self).save(tasks)
    }
}

/// Tasks stored as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        normalize(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;
        atomic_write(&self.path, &json)
    }
}

/// Trim descriptions of a hand-edited file and reject records that break
/// the task invariants: empty descriptions and repeated ids.
fn normalize(mut tasks: Vec<Task>) -> Result<Vec<Task>, StorageError> {
    let mut seen = HashSet::new();
    for task in &mut tasks {
        let trimmed = task.description.trim();
        if trimmed.is_empty() {
            return Err(StorageError::Invalid(format!("task {} has an empty description", task.id)));
        }
        if trimmed.len() != task.description.len() {
            task.description = trimmed.to_string();
        }
        if !seen.insert(task.id) {
            return Err(StorageError::Invalid(format!("task id {} appears twice", task.id)));
        }
    }
    Ok(tasks)
}

/// Volatile storage for `--ephemeral` runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tasks: Vec<Task>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, saves: 0 }
    }

    /// What was last written
    #[cfg(test)]
    pub fn stored(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of successful saves
    #[cfg(test)]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        Ok(self.tasks.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        self.tasks = tasks.to_vec();
        self.saves += 1;
        Ok(())
    }
}
