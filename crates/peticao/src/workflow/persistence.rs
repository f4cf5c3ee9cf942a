//! Session files: pretty JSON written by replace-on-rename.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PeticaoError, Result};

use super::session::WorkflowSession;

/// Session file used when none is given.
pub const DEFAULT_SESSION_FILE: &str = "peticao.session.json";

impl WorkflowSession {
    /// Write the session as pretty JSON.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed over
    /// `path`, so an interrupted save leaves the previous session intact.
    /// Missing parent directories are created.
    ///
    /// ```no_run
    /// # use peticao::WorkflowSession;
    /// # fn example(session: &WorkflowSession) -> peticao::Result<()> {
    /// session.save("peticao.session.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PeticaoError::Persistence(format!("cannot encode session: {}", e)))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| io_failure("create", dir, e))?;
        }

        let staging = staging_path(path);
        fs::write(&staging, json).map_err(|e| io_failure("write", &staging, e))?;
        fs::rename(&staging, path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            io_failure("replace", path, e)
        })?;

        tracing::debug!(path = %path.display(), step = %self.current_step, "session saved");
        Ok(())
    }

    /// Read a session written by [`WorkflowSession::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| io_failure("read", path, e))?;

        serde_json::from_str(&json).map_err(|e| {
            PeticaoError::Persistence(format!("'{}' is not a session file: {}", path.display(), e))
        })
    }

    /// The session at `path`, or a fresh one if nothing is there yet.
    pub fn load_or_new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}

/// Session file path: the given one, or [`DEFAULT_SESSION_FILE`] in the
/// current directory.
pub fn session_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_failure(action: &str, path: &Path, err: std::io::Error) -> PeticaoError {
    PeticaoError::Persistence(format!("cannot {} '{}': {}", action, path.display(), err))
}
