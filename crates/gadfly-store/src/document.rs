//! On-disk documents and the load/flush cycle shared by both stores

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use gadfly_domain::{Fact, ProfileBook};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Format version written into every document
pub const DOCUMENT_VERSION: u32 = 1;

fn current_version() -> u32 {
    DOCUMENT_VERSION
}

/// Rating store document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingsDocument {
    /// Format version
    #[serde(default = "current_version")]
    pub version: u32,
    /// Time of the last flush
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Profiles by domain name
    #[serde(default)]
    pub domains: ProfileBook,
}

impl Default for RatingsDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            last_updated: None,
            domains: ProfileBook::new(),
        }
    }
}

/// Knowledge graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Format version
    #[serde(default = "current_version")]
    pub version: u32,
    /// Time of the last flush
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Facts in insertion order
    #[serde(default)]
    pub facts: Vec<Fact>,
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            last_updated: None,
            facts: Vec::new(),
        }
    }
}

/// Read a document, falling back to the default when the file does not exist
pub(crate) fn load<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No document yet, starting empty");
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    let document = serde_json::from_slice(&bytes).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Document is not valid JSON");
        StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Loaded document");
    Ok(document)
}

/// Write a document atomically: sibling temp file, fsync, rename
pub(crate) fn flush<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(document).map_err(StoreError::Serialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&json)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), bytes = json.len(), "Flushed document");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
