//! Files kept under the state directory. A replacement is staged in a sibling
//! temp file and renamed over the target, so readers see the old contents or
//! the new ones, never a mix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory unusable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` when missing and checks that files can be created in it.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => {
            return Err(PersistError::StateDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        }
        Err(err) => return Err(PersistError::StateDir(err.to_string())),
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
    Ok(())
}

/// One named file in a state directory.
#[derive(Debug, Clone)]
pub struct StateFile {
    dir: PathBuf,
    name: String,
}

impl StateFile {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// `Ok(None)` when the file has not been written yet.
    pub fn read(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path()) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn replace(&self, contents: &[u8]) -> Result<(), PersistError> {
        ensure_state_dir(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged
            .persist(self.path())
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(())
    }

    /// A file that is already gone counts as removed.
    pub fn remove(&self) -> Result<(), PersistError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
