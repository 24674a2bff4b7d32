use crate::domain::{Task, TaskId};
use crate::error::CoreError;
use crate::persistence::TaskStorage;
use tracing::{info, warn};

/// Something observable that happened to the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    /// The persisted list changed
    Changed,
    SelectionChanged(Option<TaskId>),
}

/// Owns the ordered task list, the selection, and their persistence.
///
/// Every mutation builds the next list, writes it through the storage and
/// only then commits it, so a failed write leaves memory matching disk.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    selected: Option<TaskId>,
    storage: S,
    events: Vec<TaskEvent>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Read the initial list from storage
    pub fn load(storage: S) -> Result<Self, CoreError> {
        let tasks = storage.load()?;
        info!(count = tasks.len(), "tasks loaded");
        Ok(Self {
            tasks,
            selected: None,
            storage,
            events: Vec::new(),
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.get(id))
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.len() - self.pending_count()
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<TaskEvent> {
        std::mem::take(&mut self.events)
    }

    fn position(&self, id: TaskId) -> Result<usize, CoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    fn clean_description(description: &str) -> Result<String, CoreError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            warn!("rejected empty task description");
            return Err(CoreError::InvalidInput);
        }
        Ok(trimmed.to_string())
    }

    /// Persist `next`, then commit it together with the new selection
    fn commit(&mut self, next: Vec<Task>, selected: Option<TaskId>) -> Result<(), CoreError> {
        if let Err(err) = self.storage.save(&next) {
            warn!(error = %err, "failed to persist tasks, keeping previous state");
            return Err(err.into());
        }

        self.tasks = next;
        self.events.push(TaskEvent::Changed);
        if selected != self.selected {
            self.selected = selected;
            self.events.push(TaskEvent::SelectionChanged(selected));
        }
        Ok(())
    }

    /// Append a new open task
    pub fn add(&mut self, description: &str) -> Result<TaskId, CoreError> {
        let task = Task::new(Self::clean_description(description)?);
        let id = task.id;

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next, self.selected)?;

        info!(task = %id.short(), "task added");
        Ok(id)
    }

    /// Replace a task's description, keeping its position and completion
    pub fn edit(&mut self, id: TaskId, description: &str) -> Result<(), CoreError> {
        let index = self.position(id)?;
        let description = Self::clean_description(description)?;

        let mut next = self.tasks.clone();
        next[index].description = description;
        self.commit(next, self.selected)?;

        info!(task = %id.short(), "task edited");
        Ok(())
    }

    pub fn remove(&mut self, id: TaskId) -> Result<(), CoreError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        next.remove(index);
        let selected = self.selected.filter(|s| *s != id);
        self.commit(next, selected)?;

        info!(task = %id.short(), "task removed");
        Ok(())
    }

    /// Flip completion. A task that becomes completed loses the selection.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<(), CoreError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        next[index].completed = !next[index].completed;
        let completed = next[index].completed;
        let selected = if completed {
            self.selected.filter(|s| *s != id)
        } else {
            self.selected
        };
        self.commit(next, selected)?;

        info!(task = %id.short(), completed, "task completion toggled");
        Ok(())
    }

    /// Select a task, or deselect it when it is already selected
    pub fn select(&mut self, id: TaskId) -> Result<(), CoreError> {
        let index = self.position(id)?;

        let selected = if self.selected == Some(id) {
            None
        } else if self.tasks[index].completed {
            warn!(task = %id.short(), "rejected selection of completed task");
            return Err(CoreError::InvalidSelection(id));
        } else {
            Some(id)
        };

        self.selected = selected;
        self.events.push(TaskEvent::SelectionChanged(selected));
        Ok(())
    }

    pub fn clear_completed(&mut self) -> Result<(), CoreError> {
        let next: Vec<Task> = self.tasks.iter().filter(|t| !t.completed).cloned().collect();
        let selected = self
            .selected
            .filter(|s| next.iter().any(|t| t.id == *s));
        let removed = self.tasks.len() - next.len();
        self.commit(next, selected)?;

        info!(removed, "completed tasks cleared");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        self.commit(Vec::new(), None)?;

        info!("all tasks cleared");
        Ok(())
    }
}
