use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use spdlog::warn;

use crate::post::PostId;

pub const LIKES_KEY: &str = "likes";

/// String key-value storage backing the like counter.
pub trait KeyValueStore: Send {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `base_dir`
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(FileStore { base_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        // write then rename, readers never see a partial file
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)
    }
}

/// Per-post like counts. Counts only go up and every increment is persisted.
pub struct LikeCounter {
    store: Box<dyn KeyValueStore>,
    counts: BTreeMap<String, u64>,
}

impl LikeCounter {
    /// Loads the saved counts. Missing or unreadable state starts empty.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let counts = match store.read(LIKES_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Ignoring unreadable like counts: {}", e);
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Could not read like counts: {}", e);
                BTreeMap::new()
            }
        };

        LikeCounter { store, counts }
    }

    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    pub fn get(&self, id: PostId) -> u64 {
        self.counts.get(&id.to_string()).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, id: PostId) -> io::Result<u64> {
        let key = id.to_string();
        let count = self.get(id) + 1;

        let mut counts = self.counts.clone();
        counts.insert(key, count);
        let json = serde_json::to_string(&counts)?;

        // memory follows disk, a failed write leaves the old count
        self.store.write(LIKES_KEY, &json)?;
        self.counts = counts;
        Ok(count)
    }
}
