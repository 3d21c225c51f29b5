use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Fixed key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Accessor for the single session token cell.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// In-memory token cell, used by tests and one-off clients.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    cell: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            cell: RwLock::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.cell.read().ok().and_then(|t| t.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut cell = self
            .cell
            .write()
            .map_err(|_| anyhow::anyhow!("token cell poisoned"))?;
        *cell = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut cell = self
            .cell
            .write()
            .map_err(|_| anyhow::anyhow!("token cell poisoned"))?;
        *cell = None;
        Ok(())
    }
}

/// Token cell persisted as a YAML key-value file. Reads are served from
/// memory; writes go through to disk.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileTokenStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).with_context(|| {
                format!("Failed to read session file: {:?}", path)
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&content)
                    .with_context(|| "Failed to parse session file")?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("session store poisoned"))?;
        f(&mut entries);

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create session directory: {:?}", dir)
            })?;
        }
        let content = serde_yaml::to_string(&*entries)
            .with_context(|| "Failed to serialize session")?;
        std::fs::write(&self.path, content).with_context(|| {
            format!("Failed to write session file: {:?}", self.path)
        })
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|e| e.get(TOKEN_KEY).cloned())
            .filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) -> Result<()> {
        self.update(|e| {
            e.insert(TOKEN_KEY.to_string(), token.to_string());
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(|e| {
            e.remove(TOKEN_KEY);
        })
    }
}
