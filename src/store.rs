//! Persistence seam: loading and saving the reminder document.
//!
//! Path resolution order: explicit `--file` flag, then the
//! `REMIND_MD_FILE` environment variable, then
//! `~/.remind-md/remind.md`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants as C;
use crate::error::RemindResult;

/// Handle to the reminder document on disk.
#[derive(Debug, Clone)]
pub struct ReminderFile {
    path: PathBuf,
}

impl ReminderFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReminderFile { path: path.into() }
    }

    /// Resolve the document path from an optional flag value.
    pub fn resolve(flag: Option<&str>) -> RemindResult<Self> {
        if let Some(path) = flag {
            return Ok(ReminderFile::new(path));
        }
        if let Ok(path) = std::env::var(C::FILE_ENV_VAR) {
            if !path.is_empty() {
                return Ok(ReminderFile::new(path));
            }
        }
        let home = crate::default_remind_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "no home directory; pass --file or set REMIND_MD_FILE",
            )
        })?;
        Ok(ReminderFile::new(home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file reads as empty so a fresh
    /// setup works without manual bootstrapping.
    pub fn load(&self) -> RemindResult<String> {
        if self.path.exists() {
            Ok(fs::read_to_string(&self.path)?)
        } else {
            Ok(String::new())
        }
    }

    /// Write the document, creating parent directories on first save.
    pub fn save(&self, content: &str) -> RemindResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}
