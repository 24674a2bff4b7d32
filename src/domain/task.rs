use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable task identifier, ordered by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Short prefix for display and log lines
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do item that can be linked to the running timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new open task. The caller is responsible for trimming.
    pub fn new(description: String) -> Self {
        Self {
            id: TaskId::new(),
            description,
            completed: false,
        }
    }

    /// Checkbox glyph for list rendering
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new("Write proposal".to_string());
        assert!(!task.completed);
        assert_eq!(task.checkbox(), "[ ]");
    }

    #[test]
    fn test_ids_are_unique() {
        let first = TaskId::new();
        let second = TaskId::new();
        assert_ne!(first, second);
        assert_eq!(first.short().len(), 8);
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::new("Review".to_string());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["description"], "Review");
        assert_eq!(value["completed"], false);
        assert_eq!(value["id"], task.id.to_string());
    }
}
