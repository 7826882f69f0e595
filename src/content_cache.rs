use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

pub enum Expire {
    Never,
    After(Duration),
}

struct CacheValue<T> {
    expire_date: DateTime<Utc>,
    value: Arc<T>,
}

fn expire_date(expire_after: Expire) -> DateTime<Utc> {
    match expire_after {
        Expire::Never => DateTime::<Utc>::MAX_UTC,
        Expire::After(duration) => Utc::now() + duration,
    }
}

/// Single slot cache holding the latest loaded value.
/// Concurrent loads are allowed, the last one stored wins.
pub struct ContentCache<T> {
    slot: RwLock<Option<CacheValue<T>>>,
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        ContentCache {
            slot: RwLock::new(None),
        }
    }

    pub fn store(&self, content: T, expire_after: Expire) -> Arc<T> {
        let expire_date = expire_date(expire_after);
        let value = Arc::new(content);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(CacheValue {
            expire_date,
            value: value.clone(),
        });
        value
    }

    /// The cached value, if it has not expired yet
    pub fn get(&self) -> Option<Arc<T>> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        match *slot {
            Some(ref cache_value) if Utc::now() <= cache_value.expire_date => Some(cache_value.value.clone()),
            _ => None,
        }
    }

    /// Keeps the stored value, even an expired one, for another `expire_after`
    pub fn renew(&self, expire_after: Expire) -> Option<Arc<T>> {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        let cache_value = slot.as_mut()?;
        cache_value.expire_date = expire_date(expire_after);
        Some(cache_value.value.clone())
    }
}
