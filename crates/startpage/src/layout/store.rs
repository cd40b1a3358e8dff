//! Persisted layout store.
//!
//! The layout lives in a durable key-value backend under two keys: the
//! ordered widget list and the enabled set, each a JSON array of widget id
//! strings. Loading never fails: each entry that is missing, corrupt or
//! unreadable falls back to its default independently, and unknown ids are
//! pruned. Saving never fails either: backend errors are logged and the
//! in-memory state remains authoritative.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{reset_all, LayoutState};
use crate::registry::{Registry, WidgetId};

/// Key holding the ordered widget list.
pub const ORDER_KEY: &str = "dashboard-layout";

/// Key holding the enabled widget set.
pub const ENABLED_KEY: &str = "dashboard-enabled";

/// Errors raised by layout backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("Failed to read layout file: {path}")]
    Read {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be written or replaced.
    #[error("Failed to write layout file: {path}")]
    Write {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be encoded as JSON.
    #[error("Failed to encode layout entry: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend refuses reads or writes altogether.
    #[error("Layout storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable string-keyed store.
///
/// `set_entries` must apply all entries or none of them, so a reader never
/// sees the order from one save next to the enabled set of another.
pub trait KeyValueBackend: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Returns the values stored under each of `keys`, read together.
    fn get_entries(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Stores every `(key, value)` pair in one step.
    fn set_entries(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    /// Short description for log messages (a path, `memory`, ...).
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// JSON file backend
// ---------------------------------------------------------------------------

/// Backend storing all keys in one JSON object on disk.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write leaves the previous layout intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "layout file is corrupt, ignoring it"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn get_entries(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        let mut map = self.read_map()?;
        Ok(keys.iter().map(|key| map.remove(*key)).collect())
    }

    fn set_entries(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        // An unreadable file is not rewritten, or keys it holds would be lost.
        let mut map = self.read_map()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        let content = serde_json::to_string_pretty(&map)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

/// Backend keeping entries in memory.
///
/// Clones share the same entries, so a test can hand one clone to a
/// [`LayoutStore`] and use another to inspect or corrupt what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a raw entry, bypassing the store.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().entries.insert(key.to_string(), value.to_string());
    }

    /// Returns a raw entry as written by the store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Makes every subsequent write fail, as a full or disabled storage would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set_entries(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        for (key, value) in entries {
            inner.entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Loads, saves and resets the layout against a backend, validating every
/// id against the registry.
pub struct LayoutStore {
    backend: Box<dyn KeyValueBackend>,
    registry: Registry,
}

impl LayoutStore {
    /// Creates a store over `backend` for the widgets in `registry`.
    pub fn new(backend: impl KeyValueBackend + 'static, registry: Registry) -> Self {
        Self {
            backend: Box::new(backend),
            registry,
        }
    }

    /// The registry ids are validated against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reads the persisted layout, falling back per entry to defaults.
    pub fn load(&self) -> LayoutState {
        let (order, enabled) = match self.backend.get_entries(&[ORDER_KEY, ENABLED_KEY]) {
            Ok(entries) => {
                let mut entries = entries.into_iter();
                (
                    parse_ids(ORDER_KEY, entries.next().flatten()),
                    parse_ids(ENABLED_KEY, entries.next().flatten()),
                )
            }
            Err(e) => {
                warn!(
                    backend = %self.backend.describe(),
                    error = %e,
                    "failed to read layout, using defaults"
                );
                (None, None)
            }
        };
        reconcile(&self.registry, order, enabled)
    }

    /// Persists `state`, logging instead of failing if the backend is
    /// unavailable.
    pub fn save(&mut self, state: &LayoutState) {
        if let Err(e) = self.try_save(state) {
            warn!(
                backend = %self.backend.describe(),
                error = %e,
                "failed to persist layout, keeping it in memory only"
            );
        }
    }

    /// Persists `state`, reporting backend failures to the caller.
    pub fn try_save(&mut self, state: &LayoutState) -> Result<(), StoreError> {
        let order: Vec<&str> = state.order().iter().map(|id| id.as_str()).collect();
        let enabled: Vec<&str> = state
            .order()
            .iter()
            .filter(|id| state.is_enabled(**id))
            .map(|id| id.as_str())
            .collect();
        let entries = [
            (ORDER_KEY, serde_json::to_string(&order)?),
            (ENABLED_KEY, serde_json::to_string(&enabled)?),
        ];
        self.backend.set_entries(&entries)?;
        debug!(backend = %self.backend.describe(), "layout saved");
        Ok(())
    }

    /// Persists and returns the default layout.
    pub fn reset(&mut self) -> LayoutState {
        let state = reset_all(&LayoutState::default_for(&self.registry));
        self.save(&state);
        info!("layout reset to defaults");
        state
    }
}

/// Parses a persisted entry as a list of raw id strings. Missing and
/// unparseable entries both come back as `None`.
fn parse_ids(key: &str, raw: Option<String>) -> Option<Vec<String>> {
    let raw = raw?;
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!(key, error = %e, "corrupt layout entry, using default");
            None
        }
    }
}

/// Turns raw persisted entries into a valid layout for `registry`.
///
/// - unknown ids and duplicates are dropped from the order
/// - registered widgets missing from the order are appended in registration
///   order; they start enabled only if there is no usable enabled entry
/// - the enabled set is intersected with the order
fn reconcile(
    registry: &Registry,
    order: Option<Vec<String>>,
    enabled: Option<Vec<String>>,
) -> LayoutState {
    let mut ids: Vec<WidgetId> = Vec::new();
    for raw in order.unwrap_or_default() {
        match registry.resolve(&raw) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(id) => debug!(widget = %id, "dropping duplicate widget id"),
            None => debug!(widget = %raw, "dropping unknown widget id"),
        }
    }
    for id in registry.ids() {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    match enabled {
        Some(raw) => {
            let enabled: Vec<WidgetId> = raw.iter().filter_map(|r| registry.resolve(r)).collect();
            LayoutState::from_parts(ids, enabled)
        }
        None => {
            let all = ids.clone();
            LayoutState::from_parts(ids, all)
        }
    }
}
