pub mod enums;
pub mod mode;
pub mod task;

pub use enums::{TimerStatus, UiMode};
pub use mode::{Durations, Mode, ModeId, ModeRegistry};
pub use task::{Task, TaskId};
