use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Task;

/// Name of the hidden store file in the user's home directory
const STORE_FILE: &str = ".twig.json";

/// Error type for store I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not locate home directory")]
    NoHomeDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse store file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The fixed store location: `~/.twig.json`
pub fn default_store_path() -> Result<PathBuf, StoreError> {
    dirs::home_dir()
        .map(|home| home.join(STORE_FILE))
        .ok_or(StoreError::NoHomeDir)
}

/// Load the forest from `path`. A missing file is the empty forest.
pub fn load(path: &Path) -> Result<Vec<Task>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the forest to `path` atomically (temp file + rename), so a
/// failed write never truncates the existing store.
pub fn save(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(tasks)?;
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
