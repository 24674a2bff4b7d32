use crate::clock::IntervalClock;
use crate::domain::{ModeId, Task, TaskId, TimerStatus, UiMode};
use crate::error::CoreError;
use crate::notifications;
use crate::persistence::{Settings, TaskStorage};
use crate::session::{Session, SessionEvent};
use crate::tasks::TaskEvent;
use crate::timer::{format_clock, TimerEvent};
use std::sync::mpsc::Receiver;
use tracing::warn;

/// Session type used by the terminal application
pub type AppSession = Session<IntervalClock, Box<dyn TaskStorage>>;

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub description: String,
    /// Task being edited, None when adding
    pub editing: Option<TaskId>,
}

/// One-line announcement shown at the bottom of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct AppState {
    pub session: AppSession,
    pub events: Receiver<SessionEvent>,
    pub settings: Settings,
    pub cursor: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status: Option<StatusLine>,
    pub bell_pending: bool,
}

impl AppState {
    pub fn new(mut session: AppSession, settings: Settings) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            settings,
            cursor: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: None,
            bell_pending: false,
        }
    }

    fn announce(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    /// Show a rejected command in the status line
    fn report<T>(&mut self, result: Result<T, CoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "command rejected");
                self.status = Some(StatusLine {
                    text: err.to_string(),
                    is_error: true,
                });
                None
            }
        }
    }

    /// React to everything the session published since the last call
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Timer(TimerEvent::RunStateChanged(true)) => {
                self.announce("Timer started");
            }
            SessionEvent::Timer(TimerEvent::RunStateChanged(false)) => {
                self.announce("Timer paused");
            }
            SessionEvent::Timer(TimerEvent::ModeChanged(mode)) => {
                let label = self.session.timer().registry().get(mode).label;
                self.announce(format!("{} mode selected", label));
            }
            SessionEvent::Timer(TimerEvent::Completed(mode)) => {
                let label = self.session.timer().registry().get(mode).label;
                self.announce("Timer finished");
                if self.settings.bell {
                    self.bell_pending = true;
                }
                if self.settings.notifications {
                    notifications::notify_timer_finished(label);
                }
            }
            SessionEvent::Timer(TimerEvent::Tick(_)) => {}
            SessionEvent::Tasks(TaskEvent::Changed) => self.clamp_cursor(),
            SessionEvent::Tasks(TaskEvent::SelectionChanged(_)) => {}
        }
    }

    /// Take the pending bell request
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Apply due clock ticks
    pub fn tick(&mut self) {
        let result = self.session.pump();
        self.report(result);
        self.drain_events();
    }

    /// Title for the terminal window, e.g. "24:59 - Fokus"
    pub fn window_title(&self) -> String {
        format!(
            "{} - Fokus",
            format_clock(self.session.timer().state().remaining_secs)
        )
    }

    pub fn timer_status(&self) -> TimerStatus {
        self.session.timer().state().status
    }

    // Timer commands

    pub fn toggle_timer(&mut self) {
        let result = self.session.toggle();
        self.report(result);
        self.drain_events();
    }

    pub fn select_mode(&mut self, mode: ModeId) {
        let result = self.session.select_mode(mode.token());
        self.report(result);
        self.drain_events();
    }

    /// The terminal lost focus
    pub fn focus_lost(&mut self) {
        if !self.settings.pause_on_focus_lost {
            return;
        }
        let result = self.session.pause_if_running();
        self.report(result);
        self.drain_events();
    }

    // Task list navigation

    pub fn tasks(&self) -> &[Task] {
        self.session.tasks().tasks()
    }

    fn clamp_cursor(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.tasks().len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.tasks().get(self.cursor)
    }

    fn cursor_task_id(&self) -> Option<TaskId> {
        self.cursor_task().map(|t| t.id)
    }

    // Task commands on the row under the cursor

    /// Link (or unlink) the task under the cursor to the timer
    pub fn select_task(&mut self) {
        if let Some(id) = self.cursor_task_id() {
            let result = self.session.select(id);
            self.report(result);
            self.drain_events();
        }
    }

    pub fn toggle_task_done(&mut self) {
        if let Some(id) = self.cursor_task_id() {
            let result = self.session.toggle_completed(id);
            self.report(result);
            self.drain_events();
        }
    }

    pub fn remove_task(&mut self) {
        if let Some(id) = self.cursor_task_id() {
            let result = self.session.remove(id);
            self.report(result);
            self.drain_events();
        }
    }

    pub fn clear_completed(&mut self) {
        let result = self.session.clear_completed();
        if self.report(result).is_some() {
            self.announce("Completed tasks cleared");
        }
        self.drain_events();
    }

    /// Ask for confirmation before clearing the list
    pub fn request_clear_all(&mut self) {
        if !self.tasks().is_empty() {
            self.ui_mode = UiMode::ConfirmClearAll;
        }
    }

    pub fn confirm_clear_all(&mut self) {
        let result = self.session.clear_all();
        if self.report(result).is_some() {
            self.announce("All tasks cleared");
        }
        self.ui_mode = UiMode::Normal;
        self.drain_events();
    }

    pub fn cancel_clear_all(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    // Input form

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            description: String::new(),
            editing: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Start editing the task under the cursor
    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.cursor_task() {
            self.input_form = Some(InputFormState {
                description: task.description.clone(),
                editing: Some(task.id),
            });
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.description.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.description.pop();
        }
    }

    /// Submit the form. An invalid description keeps the form open.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let result = match form.editing {
            Some(id) => self.session.edit(id, &form.description),
            None => self.session.add(&form.description).map(|_| ()),
        };

        if self.report(result).is_some() {
            if form.editing.is_none() {
                self.cursor = self.tasks().len().saturating_sub(1);
            }
            self.input_form = None;
            self.ui_mode = UiMode::Normal;
        }
        self.drain_events();
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{ModeRegistry, TimerStatus};
    use crate::persistence::MemoryStorage;
    use crate::tasks::TaskStore;
    use crate::timer::TimerController;

    pub(crate) fn create_test_app() -> AppState {
        let settings = Settings {
            notifications: false,
            ..Settings::default()
        };
        let timer = TimerController::new(
            ModeRegistry::new(&settings.durations),
            IntervalClock::default(),
            ModeId::Focus,
        );
        let storage: Box<dyn TaskStorage> = Box::new(MemoryStorage::new());
        let tasks = TaskStore::load(storage).unwrap();
        AppState::new(Session::new(timer, tasks), settings)
    }

    fn add(app: &mut AppState, description: &str) {
        app.start_add_task();
        for c in description.chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert!(app.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.window_title(), "25:00 - Fokus");
        assert_eq!(app.timer_status(), TimerStatus::Idle);
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = create_test_app();
        add(&mut app, "Write report");

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].description, "Write report");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_empty_form_stays_open_with_error() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert!(app.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_edit_task_through_form() {
        let mut app = create_test_app();
        add(&mut app, "Draft");

        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        app.input_form_backspace();
        app.input_form_backspace();
        app.input_form_add_char('w');
        app.submit_input_form();

        assert_eq!(app.tasks()[0].description, "Draw");
    }

    #[test]
    fn test_cursor_follows_list() {
        let mut app = create_test_app();
        add(&mut app, "a");
        add(&mut app, "b");
        assert_eq!(app.cursor, 1);

        app.move_cursor_down();
        assert_eq!(app.cursor, 1);

        app.remove_task();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.cursor_task().unwrap().description, "a");

        app.move_cursor_up();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_select_completed_task_reports_error() {
        let mut app = create_test_app();
        add(&mut app, "done already");
        app.toggle_task_done();
        app.select_task();

        assert_eq!(app.session.tasks().selected(), None);
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("cannot be selected"));
    }

    #[test]
    fn test_toggle_timer_announces() {
        let mut app = create_test_app();
        app.toggle_timer();
        assert_eq!(app.timer_status(), TimerStatus::Running);
        assert_eq!(app.status.as_ref().unwrap().text, "Timer started");

        app.toggle_timer();
        assert_eq!(app.status.as_ref().unwrap().text, "Timer paused");
    }

    #[test]
    fn test_mode_change_announces() {
        let mut app = create_test_app();
        app.select_mode(ModeId::LongBreak);
        assert_eq!(app.status.as_ref().unwrap().text, "Long break mode selected");
        assert_eq!(app.window_title(), "15:00 - Fokus");
    }

    #[test]
    fn test_focus_lost_pauses_when_enabled() {
        let mut app = create_test_app();
        app.toggle_timer();
        app.focus_lost();
        assert_eq!(app.timer_status(), TimerStatus::Paused);

        app.settings.pause_on_focus_lost = false;
        app.toggle_timer();
        app.focus_lost();
        assert_eq!(app.timer_status(), TimerStatus::Running);
    }

    #[test]
    fn test_completion_rings_bell() {
        let mut app = create_test_app();
        app.handle_event(SessionEvent::Timer(TimerEvent::Completed(ModeId::Focus)));
        assert_eq!(app.status.as_ref().unwrap().text, "Timer finished");
        assert!(app.take_bell());
        assert!(!app.take_bell());
    }

    #[test]
    fn test_clear_all_needs_confirmation() {
        let mut app = create_test_app();
        add(&mut app, "a");

        app.request_clear_all();
        assert_eq!(app.ui_mode, UiMode::ConfirmClearAll);
        app.cancel_clear_all();
        assert_eq!(app.tasks().len(), 1);

        app.request_clear_all();
        app.confirm_clear_all();
        assert!(app.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_clear_completed_keeps_open_tasks() {
        let mut app = create_test_app();
        add(&mut app, "open");
        add(&mut app, "finished");
        app.toggle_task_done();

        app.clear_completed();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.cursor, 0);
    }
}
