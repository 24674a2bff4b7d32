use crate::domain::TaskId;
use thiserror::Error;

/// Failures of the durable task store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access task file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse task file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to prepare storage directory: {0}")]
    Directory(String),

    #[error("Invalid task record: {0}")]
    Invalid(String),
}

impl StorageError {
    pub fn directory(msg: impl Into<String>) -> Self {
        StorageError::Directory(msg.into())
    }
}

/// Errors returned by timer and task commands
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown mode: {0}")]
    InvalidMode(String),

    #[error("Task description cannot be empty")]
    InvalidInput,

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Completed tasks cannot be selected: {0}")]
    InvalidSelection(TaskId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::InvalidMode("nap".to_string()).to_string(),
            "Unknown mode: nap"
        );
        assert_eq!(
            CoreError::InvalidInput.to_string(),
            "Task description cannot be empty"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: CoreError = StorageError::directory("no home").into();
        assert!(matches!(err, CoreError::Storage(StorageError::Directory(_))));
        assert_eq!(
            err.to_string(),
            "Failed to prepare storage directory: no home"
        );
    }
}
