use crate::clock::Clock;
use crate::domain::TaskId;
use crate::error::CoreError;
use crate::persistence::TaskStorage;
use crate::tasks::{TaskEvent, TaskStore};
use crate::timer::{TimerController, TimerEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};

/// Event published to session subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Timer(TimerEvent),
    Tasks(TaskEvent),
}

/// Ties the timer to the task list.
///
/// Commands go through the session so that, after each one, queued events are
/// dispatched in order. When a countdown completes, the selected open task is
/// marked completed before the completion event reaches any subscriber.
pub struct Session<C: Clock, S: TaskStorage> {
    timer: TimerController<C>,
    tasks: TaskStore<S>,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl<C: Clock, S: TaskStorage> Session<C, S> {
    pub fn new(timer: TimerController<C>, tasks: TaskStore<S>) -> Self {
        Self {
            timer,
            tasks,
            subscribers: Vec::new(),
        }
    }

    pub fn timer(&self) -> &TimerController<C> {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskStore<S> {
        &self.tasks
    }

    /// Register a new listener. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Mark the selected task completed, if it is still open
    fn complete_selected_task(&mut self) -> Result<(), CoreError> {
        let Some(task) = self.tasks.selected_task() else {
            return Ok(());
        };
        if task.completed {
            return Ok(());
        }

        let id = task.id;
        info!(task = %id.short(), "countdown finished with task selected, completing it");
        self.tasks.toggle_completed(id)
    }

    /// Apply the completion policy and publish everything queued so far.
    /// The first policy failure is returned after all events were published.
    fn dispatch(&mut self) -> Result<(), CoreError> {
        let mut failure = None;

        for event in self.timer.drain_events() {
            if let TimerEvent::Completed(_) = event {
                if let Err(err) = self.complete_selected_task() {
                    warn!(error = %err, "could not complete selected task");
                    failure.get_or_insert(err);
                }
            }
            self.publish(SessionEvent::Timer(event));
        }

        for event in self.tasks.drain_events() {
            self.publish(SessionEvent::Tasks(event));
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run a command, then dispatch whatever it emitted
    fn run<T>(
        &mut self,
        command: impl FnOnce(&mut Self) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let result = command(self);
        let dispatched = self.dispatch();
        let value = result?;
        dispatched?;
        Ok(value)
    }

    /// Apply ticks that are due on the clock
    pub fn pump(&mut self) -> Result<u32, CoreError> {
        self.run(|s| Ok(s.timer.pump()))
    }

    pub fn select_mode(&mut self, token: &str) -> Result<(), CoreError> {
        self.run(|s| s.timer.select_mode(token))
    }

    pub fn toggle(&mut self) -> Result<(), CoreError> {
        self.run(|s| {
            s.timer.toggle();
            Ok(())
        })
    }

    pub fn pause_if_running(&mut self) -> Result<bool, CoreError> {
        self.run(|s| Ok(s.timer.pause_if_running()))
    }

    pub fn add(&mut self, description: &str) -> Result<TaskId, CoreError> {
        self.run(|s| s.tasks.add(description))
    }

    pub fn edit(&mut self, id: TaskId, description: &str) -> Result<(), CoreError> {
        self.run(|s| s.tasks.edit(id, description))
    }

    pub fn remove(&mut self, id: TaskId) -> Result<(), CoreError> {
        self.run(|s| s.tasks.remove(id))
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> Result<(), CoreError> {
        self.run(|s| s.tasks.toggle_completed(id))
    }

    pub fn select(&mut self, id: TaskId) -> Result<(), CoreError> {
        self.run(|s| s.tasks.select(id))
    }

    pub fn clear_completed(&mut self) -> Result<(), CoreError> {
        self.run(|s| s.tasks.clear_completed())
    }

    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        self.run(|s| s.tasks.clear_all())
    }
}
