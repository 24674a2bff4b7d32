pub mod files;
pub mod settings;
pub mod storage;

pub use files::{atomic_write, DataDir};
pub use settings::{load_settings, save_settings, Settings};
pub use storage::{JsonFileStorage, MemoryStorage, TaskStorage};
