//! File persistence
//!
//! Features:
//! - Versioned JSON envelope (`{"version": N, "data": ...}`)
//! - Atomic replace (write tmp file, then rename over the target)
//! - Typed errors so callers can pick their own fallback

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope format version written by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has format version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("failed to encode data for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    /// Missing file, as opposed to a file that is present but unusable
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::NotFound { .. })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Read and unwrap an envelope written by [`save_json`]
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PersistError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PersistError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let malformed = |source| PersistError::Malformed {
        path: path.to_path_buf(),
        source,
    };
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&text).map_err(malformed)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    serde_json::from_value(envelope.data).map_err(malformed)
}

/// Write `data` inside an envelope, replacing `path` atomically
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistError> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        data,
    };
    let json = serde_json::to_string_pretty(&envelope).map_err(|source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(write_err)?;
    if let Err(err) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            log::debug!("Could not remove {}: {}", tmp.display(), cleanup);
        }
        return Err(write_err(err));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        save_json(&path, &vec![1u32, 2, 3]).unwrap();
        let loaded: Vec<u32> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
        // No temp file left behind
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json::<Vec<u32>>(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_json::<Vec<u32>>(&path),
            Err(PersistError::Malformed { .. })
        ));

        // Valid envelope, wrong payload shape
        fs::write(&path, r#"{"version": 1, "data": "text"}"#).unwrap();
        assert!(matches!(
            load_json::<Vec<u32>>(&path),
            Err(PersistError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, r#"{"version": 99, "data": []}"#).unwrap();
        assert!(matches!(
            load_json::<Vec<u32>>(&path),
            Err(PersistError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_failed_replace_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail
        let path = dir.path().join("scores.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = save_json(&path, &vec![1u32]).unwrap_err();
        assert!(matches!(err, PersistError::Write { .. }));
        assert!(!tmp_path(&path).exists());
    }
}
