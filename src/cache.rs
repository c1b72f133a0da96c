use std::{env, fs, io, path::PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Station;

const SNAPSHOT_FILE: &str = "stations.json";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to create cache directory: {0}.")]
    CreateDir(io::Error),
    #[error("Failed to find cache directory.")]
    CacheDir,
    #[error("Failed to serialize or deserialize snapshot: {0}.")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write snapshot: {0}.")]
    WriteFile(io::Error),
    #[error("Failed to read snapshot: {0}.")]
    ReadFile(io::Error),
    #[error("Failed to delete snapshot: {0}.")]
    DeleteFile(io::Error),
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    fetched_at: DateTime<Utc>,
    stations: Vec<Station>,
}

/// Time-based cache of the last fetched station list, one JSON snapshot
/// in the platform cache directory.
#[non_exhaustive]
pub struct PriceCache {
    ttl: Duration,
}

impl PriceCache {
    #[inline]
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// The cached station list, unless the snapshot is missing, unreadable
    /// or older than the TTL.
    #[inline]
    #[must_use]
    pub fn load_fresh(&self) -> Option<Vec<Station>> {
        self.load_fresh_at(Utc::now())
    }

    fn load_fresh_at(&self, now: DateTime<Utc>) -> Option<Vec<Station>> {
        let file_path = Self::file_path().ok()?;
        let content = fs::read_to_string(file_path).ok()?;
        let snapshot: Snapshot = serde_json::from_str(&content).ok()?;

        let age = now.signed_duration_since(snapshot.fetched_at);
        if age > self.ttl || age < Duration::zero() {
            debug!(age_minutes = age.num_minutes(), "snapshot is stale");
            return None;
        }

        debug!(
            stations = snapshot.stations.len(),
            age_minutes = age.num_minutes(),
            "serving stations from snapshot"
        );

        Some(snapshot.stations)
    }

    /// Stores a fresh snapshot stamped with the current time.
    #[inline]
    pub fn store(&self, stations: &[Station]) -> Result<(), CacheError> {
        self.store_at(stations, Utc::now())
    }

    fn store_at(
        &self,
        stations: &[Station],
        now: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let file_path = Self::file_path()?;
        let snapshot = Snapshot {
            fetched_at: now,
            stations: stations.to_vec(),
        };
        let serialized = serde_json::to_string(&snapshot)?;

        fs::write(&file_path, serialized).map_err(CacheError::WriteFile)?;

        debug!(stations = stations.len(), "stored snapshot");

        Ok(())
    }

    /// Deletes the snapshot so the next query refetches. A missing snapshot
    /// is not an error.
    #[inline]
    pub fn invalidate(&self) -> Result<(), CacheError> {
        let file_path = Self::file_path()?;

        if file_path.exists() {
            fs::remove_file(file_path).map_err(CacheError::DeleteFile)?;
        }

        Ok(())
    }

    fn file_path() -> Result<PathBuf, CacheError> {
        let cache_dir = if let Ok(env_dir) = env::var("FUELCLI_CACHE_DIR") {
            PathBuf::from(env_dir)
        } else {
            let base_dir = dirs::cache_dir().ok_or(CacheError::CacheDir)?;
            base_dir.join("fuelcli")
        };

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(CacheError::CreateDir)?;
        }

        Ok(cache_dir.join(SNAPSHOT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use super::PriceCache;
    use crate::feeds::fixture::FixtureFeed;

    // Snapshot location comes from the environment, so the tests that touch
    // it cannot run in parallel.
    fn with_cache_dir<T>(test: impl FnOnce() -> T) -> T {
        static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
        let _guard = LOCK.lock().unwrap();

        let tmp_dir = TempDir::new().unwrap();
        env::set_var("FUELCLI_CACHE_DIR", tmp_dir.path());
        let result = test();
        env::remove_var("FUELCLI_CACHE_DIR");
        result
    }

    #[test]
    fn fresh_snapshot_round_trips() {
        with_cache_dir(|| {
            let cache = PriceCache::new(Duration::minutes(30));
            let stations = FixtureFeed::stations();

            cache.store(&stations).unwrap();

            assert_eq!(cache.load_fresh(), Some(stations));
        });
    }

    #[test]
    fn stale_snapshot_is_ignored() {
        with_cache_dir(|| {
            let cache = PriceCache::new(Duration::minutes(30));
            let stations = FixtureFeed::stations();
            let old = Utc::now() - Duration::minutes(45);

            cache.store_at(&stations, old).unwrap();

            assert_eq!(cache.load_fresh(), None);
        });
    }

    #[test]
    fn invalidate_removes_the_snapshot() {
        with_cache_dir(|| {
            let cache = PriceCache::new(Duration::minutes(30));

            cache.store(&FixtureFeed::stations()).unwrap();
            cache.invalidate().unwrap();

            assert_eq!(cache.load_fresh(), None);
            // Idempotent on a missing snapshot.
            cache.invalidate().unwrap();
        });
    }

    #[test]
    fn missing_snapshot_reads_as_none() {
        with_cache_dir(|| {
            let cache = PriceCache::new(Duration::minutes(30));
            assert_eq!(cache.load_fresh(), None);
        });
    }
}
