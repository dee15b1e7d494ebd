//=========================================================================
// Key/Value Store
//=========================================================================
//
// Persistence surface for small named counters (the high score).
//
// Architecture:
//   KeyValueStore (trait)
//     ├─ JsonFileStore: `{ "topScore": 120 }` in the platform data dir
//     └─ MemoryStore:   HashMap, for tests and headless runs
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, warn};

//=== StoreError ==========================================================

/// Failures reading or writing persisted values.
#[derive(Debug)]
pub enum StoreError {
    /// The backing file could not be read or written.
    Io(io::Error),

    /// The backing file exists but is not a JSON object of integers.
    Format(serde_json::Error),

    /// The platform offers no per-user data directory.
    NoDataDir,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Store I/O error: {}", e),
            Self::Format(e) => write!(f, "Store file is malformed: {}", e),
            Self::NoDataDir => write!(f, "Could not determine data directory"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::NoDataDir => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}

//=== KeyValueStore =======================================================

/// Named unsigned integers that survive a restart.
pub trait KeyValueStore: Send {
    /// Reads `key`. A missing key is `Ok(None)`, not an error.
    fn load(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Writes `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

//=== JsonFileStore =======================================================

/// Stores values as a flat JSON object in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// File name inside the data directory.
    pub const FILE_NAME: &'static str = "store.json";

    /// Opens the store in the user's data directory for `app`.
    pub fn open_default(app: &str) -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", app).ok_or(StoreError::NoDataDir)?;
        Ok(Self::at(dirs.data_dir().join(Self::FILE_NAME)))
    }

    /// Uses an explicit file path. The file need not exist yet.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, u64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    /// Writes `key`, keeping the other values. A malformed file is
    /// replaced rather than blocking every future save.
    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut values = match self.read_all() {
            Err(StoreError::Format(e)) => {
                warn!(target: "store", "Overwriting malformed {}: {}", self.path.display(), e);
                HashMap::new()
            }
            other => other?,
        };
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;

        debug!(target: "store", "Saved {} = {} to {}", key, value, self.path.display());
        Ok(())
    }
}

//=== MemoryStore =========================================================

/// In-memory store; nothing outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value.
    pub fn with_value(mut self, key: &str, value: u64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
