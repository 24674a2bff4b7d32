/// Run status of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Full duration, not counting
    Idle,
    Running,
    /// Partially elapsed, not counting
    Paused,
}

impl TimerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Label for the start/pause button
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Running => "Pause",
            Self::Paused => "Resume",
            Self::Idle => "Start",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    ConfirmClearAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_label() {
        assert_eq!(TimerStatus::Idle.action_label(), "Start");
        assert_eq!(TimerStatus::Running.action_label(), "Pause");
        assert_eq!(TimerStatus::Paused.action_label(), "Resume");
    }

    #[test]
    fn test_is_running() {
        assert!(TimerStatus::Running.is_running());
        assert!(!TimerStatus::Paused.is_running());
        assert!(!TimerStatus::Idle.is_running());
    }
}
