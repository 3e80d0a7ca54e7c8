use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error};

use super::keys;
use crate::config::E2eConfig;
use crate::core::{E2eError, Result};

/// File-backed key/value store handed from one serial step to the next
///
/// A fresh handle is loaded for every step and written back when the step ends.
/// There is no locking: at most one step may hold a handle for a given path at a
/// time, which is why suites sharing a snapshot run on a single worker.
#[derive(Debug, Clone)]
pub struct SharedState {
    path: PathBuf,
    values: Map<String, Value>,
}

/// Defaults seeded into a loaded state for keys it does not already hold
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    values: Map<String, Value>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &E2eConfig) -> Self {
        let mut bootstrap = Self::new()
            .with(keys::BASE_URL, config.service.base_url.clone())
            .with(keys::ADMIN_API_KEY, config.service.admin_api_key.clone())
            .with(keys::CONNECTOR_ID, config.connector_id.clone());

        if let Some(path) = &config.connector_auth_file_path {
            bootstrap = bootstrap.with(
                keys::CONNECTOR_AUTH_FILE_PATH,
                path.to_string_lossy().into_owned(),
            );
        }
        if let Some(operator) = &config.operator {
            bootstrap = bootstrap
                .with(keys::OPERATOR_EMAIL, operator.email.clone())
                .with(keys::OPERATOR_PASSWORD, operator.password.clone());
        }

        bootstrap
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    fn seed(&self, target: &mut Map<String, Value>) {
        for (key, value) in &self.values {
            if !target.contains_key(key) {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

impl SharedState {
    /// An empty, unpersisted state bound to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: Map::new(),
        }
    }

    /// Read the snapshot at `path`
    ///
    /// A missing file yields an empty state. A file that exists but is not a JSON
    /// object is an error: the snapshot is authoritative.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<Map<String, Value>>(&raw).map_err(|source| {
                E2eError::StateCorrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(source) => {
                return Err(E2eError::StateRead {
                    path: path.clone(),
                    source,
                })
            }
        };

        debug!(path = %path.display(), keys = values.len(), "Loaded shared state");

        Ok(Self { path, values })
    }

    /// `load`, then fill absent bootstrap keys
    pub fn load_seeded(path: impl Into<PathBuf>, bootstrap: &Bootstrap) -> Result<Self> {
        let mut state = Self::load(path)?;
        bootstrap.seed(&mut state.values);
        Ok(state)
    }

    /// Overwrite the snapshot with only the bootstrap keys
    pub fn reset(path: impl Into<PathBuf>, bootstrap: &Bootstrap) -> Result<Self> {
        let mut state = Self::empty(path);
        bootstrap.seed(&mut state.values);
        state.persist()?;
        Ok(state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// String value a step cannot proceed without
    pub fn require_str(&self, key: &str) -> Result<String> {
        self.get_str(key)
            .map(str::to_owned)
            .ok_or_else(|| E2eError::missing_key(key))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Overwrite top-level keys from `partial`; nested objects are replaced whole
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.values.insert(key, value);
        }
    }

    pub fn get_all(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Write the full state over the snapshot
    ///
    /// The file is replaced via rename so a reader never sees a half-written
    /// snapshot.
    pub fn persist(&self) -> Result<()> {
        let write_err = |source: std::io::Error| E2eError::StateWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let encoded = serde_json::to_vec_pretty(&self.values)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, encoded).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to persist shared state");
            let _ = fs::remove_file(&tmp);
            write_err(e)
        })?;

        debug!(path = %self.path.display(), keys = self.values.len(), "Persisted shared state");
        Ok(())
    }
}
