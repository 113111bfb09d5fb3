use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use hearthmode_app::ports::{StateError, StateStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// One JSON file holding one value of type `S`.
///
/// Saves go through a temporary file in the same directory followed by a
/// rename, so a concurrent reader sees either the old or the new content.
#[derive(Debug)]
pub struct JsonFileStore<S> {
    path: PathBuf,
    _marker: PhantomData<fn() -> S>,
}

impl<S> JsonFileStore<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S> JsonFileStore<S>
where
    S: Serialize + DeserializeOwned,
{
    fn read(&self) -> Result<Option<S>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write(&self, state: &S) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, state)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl<S> StateStore<S> for JsonFileStore<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, StateError> {
        let state = self.read()?;
        if state.is_none() {
            tracing::debug!(path = %self.path.display(), "no state file yet");
        }
        Ok(state)
    }

    fn save(&self, state: &S) -> Result<(), StateError> {
        self.write(state)?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
