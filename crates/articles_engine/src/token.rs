use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use articles_logging::articles_debug;
use thiserror::Error;

use crate::{AtomicFileWriter, PersistError};

/// File holding the session token inside the data directory.
pub const TOKEN_FILENAME: &str = "token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("failed to read token from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write token: {0}")]
    Write(#[from] PersistError),
}

/// Persistent storage for the single session credential.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, TokenStoreError>;
    fn set(&self, token: &str) -> Result<(), TokenStoreError>;
    fn remove(&self) -> Result<(), TokenStoreError>;
}

/// Keeps the token as the sole content of `{dir}/token`.
pub struct FileTokenStore {
    writer: AtomicFileWriter,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(TOKEN_FILENAME)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>, TokenStoreError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read { path, source }),
        }
    }

    fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        let path = self.writer.write(TOKEN_FILENAME, token)?;
        articles_debug!("Stored session token at {:?}", path);
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStoreError> {
        self.writer.remove(TOKEN_FILENAME)?;
        articles_debug!("Removed session token from {:?}", self.writer.dir());
        Ok(())
    }
}

/// In-process token storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a valid Option.
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.lock().clone())
    }

    fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStoreError> {
        *self.lock() = None;
        Ok(())
    }
}
