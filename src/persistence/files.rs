use crate::error::StorageError;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the per-project data directory
const DIR_NAME: &str = ".fokus";

/// Where fokus keeps tasks.json, settings.json and its logs.
///
/// The nearest `.fokus` above the working directory wins, so a project can
/// carry its own task list. Otherwise everything lives in `~/.fokus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Resolve the data directory for the current working directory
    pub fn discover() -> Result<Self> {
        let cwd = env::current_dir().context("Could not determine current directory")?;
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::discover_from(&cwd, &home))
    }

    fn discover_from(cwd: &Path, home: &Path) -> Self {
        let root = cwd
            .ancestors()
            .map(|dir| dir.join(DIR_NAME))
            .find(|candidate| candidate.is_dir())
            .unwrap_or_else(|| home.join(DIR_NAME));
        Self { root }
    }

    /// Resolve the data directory and make sure it exists
    pub fn open() -> Result<Self> {
        let data_dir = Self::discover()?;
        fs::create_dir_all(&data_dir.root)
            .with_context(|| format!("Failed to create directory: {}", data_dir.root.display()))?;
        Ok(data_dir)
    }

    /// Create a project-local `.fokus` in `dir`. Fails if one is already there.
    pub fn init_in(dir: &Path) -> Result<Self> {
        let root = dir.join(DIR_NAME);
        if root.exists() {
            anyhow::bail!("Fokus directory already exists: {}", root.display());
        }
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.root.join("tasks.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StorageError> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .ok_or_else(|| StorageError::directory(format!("{} has no parent", path.display())))?;

    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, StorageError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    Ok(fs::read_to_string(path)?)
}
