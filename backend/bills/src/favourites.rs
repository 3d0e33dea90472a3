//! # Favourites
//!
//! Favourites are stored as bill keys only, never as records. The full set is
//! written back after every toggle, so whatever a later `load` sees is always a
//! complete set.
//!
//! Stored value: a JSON array of key strings under [`FAVOURITES_KEY`]. Anything
//! unreadable loads as an empty set.
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use tracing::{info, warn};

use crate::error::StorageError;

pub const FAVOURITES_KEY: &str = "favourite-bills";

pub trait Storage {
    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per storage key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

/// Insertion-ordered set of raw key strings.
///
/// Keys are kept as written; structural validation happens when they are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    keys: Vec<String>,
}

impl FavouriteSet {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn insert(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }

        self.keys.push(key.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }
}

impl<S: Into<String>> FromIterator<S> for FavouriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for key in iter {
            set.insert(&key.into());
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

pub struct FavouriteStore<S: Storage> {
    storage: S,
    favourites: FavouriteSet,
}

impl<S: Storage> FavouriteStore<S> {
    pub fn load(storage: S) -> Self {
        let favourites = storage
            .read(FAVOURITES_KEY)
            .map(|raw| decode(&raw))
            .unwrap_or_default();

        info!("Loaded {} favourite bills", favourites.len());

        Self {
            storage,
            favourites,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.favourites.contains(key)
    }

    pub fn set(&self) -> &FavouriteSet {
        &self.favourites
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds `key` if absent, removes it if present, then persists the whole set.
    /// On a failed write the in-memory set is left unchanged.
    pub fn toggle(&mut self, key: &str) -> Result<Toggle, StorageError> {
        let mut next = self.favourites.clone();

        let toggle = if next.remove(key) {
            Toggle::Removed
        } else {
            next.insert(key);
            Toggle::Added
        };

        let encoded = serde_json::to_string(&next.keys)?;
        self.storage.write(FAVOURITES_KEY, &encoded)?;
        self.favourites = next;

        info!("Toggled favourite {key}: {toggle:?}");

        Ok(toggle)
    }
}

fn decode(raw: &str) -> FavouriteSet {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(keys) => keys.into_iter().collect(),
        Err(e) => {
            warn!("Discarding unreadable favourites: {e}");
            FavouriteSet::default()
        }
    }
}
