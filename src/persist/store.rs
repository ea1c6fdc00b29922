use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// String key-value storage used for the persisted snapshot.
pub trait KeyValueStore {
    /// Read `key`, `None` when it was never written or was removed.
    fn get(&self, key: &str) -> CardResult<Option<String>>;
    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> CardResult<()>;
    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> CardResult<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CardResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CardResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CardResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir` (created lazily on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory (`$XDG_DATA_HOME/cardsmith` on Linux).
    pub fn in_data_dir() -> CardResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| CardError::storage("no platform data directory available"))?;
        Ok(Self::new(base.join("cardsmith")))
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CardResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CardError::storage(format!("invalid store key \"{key}\"")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CardResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read '{}'", path.display()))
                .into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CardResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create store dir '{}'", self.dir.display()))?;
        // Readers never observe a partial file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).with_context(|| format!("write '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CardResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove '{}'", path.display()))
                .into()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
