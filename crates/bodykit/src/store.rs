//! Location of uploaded body files

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::body::FileRef;
use crate::error::{Error, ErrorKind, Result};

/// Environment variable overriding the body file directory
pub const BODY_FILE_DIR_ENV: &str = "BODYKIT_BODY_FILE_DIR";

/// Directory used when the environment does not name one
pub const DEFAULT_BODY_FILE_DIR: &str = "/opt/metersphere/data/body";

/// Maps an uploaded file to the path it is stored under
pub trait FileStore {
    fn resolve(&self, file: &FileRef) -> Result<PathBuf>;
}

/// Flat directory holding files as `<id>_<name>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyFileDir {
    root: PathBuf,
}

impl BodyFileDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read the directory from `BODYKIT_BODY_FILE_DIR`, falling back to the default
    pub fn from_env() -> Self {
        match std::env::var(BODY_FILE_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => {
                debug!(dir = DEFAULT_BODY_FILE_DIR, "using default body file directory");
                Self::default()
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for BodyFileDir {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_FILE_DIR)
    }
}

impl FileStore for BodyFileDir {
    /// `<root>/<id>_<name>`; the stored name must be one plain path component
    fn resolve(&self, file: &FileRef) -> Result<PathBuf> {
        let stored_name = file.stored_name();
        let mut components = Path::new(&stored_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(&stored_name)),
            _ => Err(Error::new(ErrorKind::InvalidFileRef { stored_name })),
        }
    }
}
