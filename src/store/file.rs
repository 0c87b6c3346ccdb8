use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{Result, StepflowError, convert::PositionMap};

use super::{PositionStore, storage_key};

/// Position store writing one JSON file per workflow type.
///
/// Files are named after the namespaced storage key, percent-encoding every
/// byte outside `[A-Za-z0-9._-]` so that distinct keys never share a file.
/// A file that fails to parse is treated as missing.
#[derive(Debug, Clone)]
pub struct FilePositionStore {
    dir: PathBuf,
    prefix: String,
}

impl FilePositionStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StepflowError::Store(format!("failed to create position dir {:?}: {}", dir, e)))?;

        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(
        &self,
        workflow_type: &str,
    ) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(&storage_key(&self.prefix, workflow_type))))
    }
}

fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            stem.push(byte as char);
        } else {
            let _ = write!(stem, "%{:02X}", byte);
        }
    }
    stem
}

impl PositionStore for FilePositionStore {
    fn load(
        &self,
        workflow_type: &str,
    ) -> Result<Option<PositionMap>> {
        let path = self.path_for(workflow_type);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        match serde_json::from_str::<PositionMap>(&text) {
            Ok(positions) => Ok(Some(positions)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable position file");
                Ok(None)
            }
        }
    }

    fn save(
        &self,
        workflow_type: &str,
        positions: &PositionMap,
    ) -> Result<()> {
        let path = self.path_for(workflow_type);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, serde_json::to_vec(positions)?)?;
        fs::rename(&tmp, &path).map_err(|e| StepflowError::Store(format!("failed to write {:?}: {}", path, e)))
    }

    fn remove(
        &self,
        workflow_type: &str,
    ) -> Result<()> {
        match fs::remove_file(self.path_for(workflow_type)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
