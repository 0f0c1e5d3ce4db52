// JSON file output
//
// Reports are dumped as pretty-printed JSON into the configured files
// directory (default ./files), created on demand.

use crate::error::IntelError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialize `data` as pretty JSON into `<dir>/<name>.json`.
pub fn save_json<T: Serialize>(data: &T, name: &str, dir: &Path) -> Result<PathBuf, IntelError> {
    let json = serde_json::to_string_pretty(data)?;
    save_string(&json, &format!("{name}.json"), dir)
}

/// Write raw text into `<dir>/<file_name>`.
pub fn save_string(content: &str, file_name: &str, dir: &Path) -> Result<PathBuf, IntelError> {
    fs::create_dir_all(dir).map_err(|source| IntelError::FileSystemError {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, content).map_err(|source| IntelError::FileSystemError {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(path)
}
