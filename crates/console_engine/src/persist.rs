use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use console_logging::console_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("invalid state key {0:?}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the state directory exists; create if missing.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StateDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_state_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // `persist` replaces an existing target on every platform we run on.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Durable string store: one file per key under a state directory.
///
/// Plays the part browser local storage plays for a web console: values
/// outlive the process and are only gone after an explicit `remove`.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads a value; a missing key is `Ok(None)`.
    pub fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let filename = file_name_for(key)?;
        let path = AtomicFileWriter::new(self.dir.clone()).write(&filename, value)?;
        console_debug!("Wrote state key {} to {:?}", key, path);
        Ok(())
    }

    /// Removes a value; removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        Ok(self.dir.join(file_name_for(key)?))
    }
}

fn file_name_for(key: &str) -> Result<String, PersistError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
    if !valid {
        return Err(PersistError::InvalidKey(key.to_string()));
    }
    Ok(format!("{key}.state"))
}
