//! Bounded in-memory cache for weather payloads
//!
//! Entries expire after a fixed TTL and the cache never holds more than
//! `capacity` locations. Expired entries are dropped on lookup and purged
//! before an insert at capacity; if the cache is still full, the oldest
//! entry is evicted.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// A cached payload and when it was fetched
#[derive(Debug, Clone, Serialize)]
pub struct CachedWeather {
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

impl CachedWeather {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp < ttl
    }
}

/// Weather cache keyed by `"{lat}-{lon}"`
pub struct WeatherCache {
    entries: Mutex<HashMap<String, CachedWeather>>,
    ttl: Duration,
    capacity: usize,
}

impl WeatherCache {
    pub fn new(ttl: std::time::Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(10)),
            capacity: capacity.max(1),
        }
    }

    /// Cache key for a coordinate pair as the caller wrote it
    pub fn key(lat: &str, lon: &str) -> String {
        format!("{}-{}", lat.trim(), lon.trim())
    }

    /// Fresh payload for `key`, if any
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Utc::now()).await
    }

    pub async fn insert(&self, key: String, data: Value) {
        self.insert_at(key, data, Utc::now()).await
    }

    async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl) => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn insert_at(&self, key: String, data: Value, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.is_fresh(now, ttl));

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.timestamp)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::debug!("Weather cache full, evicting {}", oldest);
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CachedWeather {
                data,
                timestamp: now,
            },
        );
    }

    /// Copy of all entries, including stale ones not yet purged
    pub async fn snapshot(&self) -> HashMap<String, CachedWeather> {
        self.entries.lock().await.clone()
    }
}
