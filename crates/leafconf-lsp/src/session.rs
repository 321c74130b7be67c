//! Current-file session
//!
//! The editor integration keeps one "current file": loading a file makes it
//! current, saving writes the buffer back to whatever file is current.
//! Access is serialized through a fair mutex, so operations complete in the
//! order they were requested and a save that arrived first is never
//! redirected by a later load.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Errors raised by session file operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no file is currently loaded")]
    NoCurrentFile,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The file the editor is working on
#[derive(Debug, Default)]
pub struct CurrentFile {
    path: Mutex<Option<PathBuf>>,
}

impl CurrentFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the session in arrival order
    ///
    /// The guard can read or replace the current path. Dropping it lets the
    /// next waiter in.
    pub async fn lock(&self) -> MutexGuard<'_, Option<PathBuf>> {
        self.path.lock().await
    }

    /// Path of the current file, if any
    pub async fn current(&self) -> Option<PathBuf> {
        self.lock().await.clone()
    }

    /// Make `path` current and return its content
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<String, SessionError> {
        let path = path.as_ref().to_path_buf();
        let mut current = self.lock().await;

        *current = Some(path.clone());
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SessionError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Loaded {}", path.display());
        Ok(content)
    }

    /// Write `text` to the current file and return its path
    pub async fn save(&self, text: &str) -> Result<PathBuf, SessionError> {
        let current = self.lock().await;
        let path = current.clone().ok_or(SessionError::NoCurrentFile)?;

        tokio::fs::write(&path, text)
            .await
            .map_err(|source| SessionError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Saved {} bytes to {}", text.len(), path.display());
        Ok(path)
    }
}
