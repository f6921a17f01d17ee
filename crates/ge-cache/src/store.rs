//! JSON-file result store with at-most-once computation per key.

use crate::key::CacheKey;
use chrono::{DateTime, Utc};
use ge_common::EvalResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

/// Store-level failures. Callers treat every one of them as "no cache",
/// never as an evaluation failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One cached evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    /// `null` for a cached NaN outcome, so undefined results are also
    /// remembered and not recomputed.
    pub value: EvalResult,
    pub computed_at: DateTime<Utc>,
}

/// On-disk shape of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    entries: HashMap<String, CacheRecord>,
}

/// Persistent result cache backed by a single JSON file.
///
/// Writes go through a temp file and rename, so a crash mid-write leaves the
/// previous file intact. Concurrent `get_or_compute` calls for the same key
/// run the computation once; later callers block on the first.
pub struct ResultStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, CacheRecord>>,
    inflight: Mutex<HashMap<String, Arc<OnceLock<EvalResult>>>>,
    load_warning: Option<String>,
}

impl ResultStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file starts an empty store; an unreadable or corrupted file
    /// also starts empty, with the problem reported via `load_warning`;
    /// the cache must never block evaluation.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut load_warning = None;
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<StoreFile>(&text) {
                Ok(file) => file.entries,
                Err(e) => {
                    load_warning = Some(format!(
                        "corrupted cache file {} treated as empty: {e}",
                        path.display()
                    ));
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                load_warning = Some(format!(
                    "unreadable cache file {} treated as empty: {e}",
                    path.display()
                ));
                HashMap::new()
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            inflight: Mutex::new(HashMap::new()),
            load_warning,
        })
    }

    /// Default store location under the platform cache directory.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("gene-entropy")
            .join("results.json")
    }

    /// Problem found while loading, if any. Informational only.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a cached result.
    pub fn get(&self, key: &CacheKey) -> Option<EvalResult> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key.as_str())
            .map(|record| record.value)
    }

    /// Insert a result and write the store through to disk.
    pub fn insert(&self, key: &CacheKey, value: EvalResult) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.as_str().to_string(),
            CacheRecord {
                value,
                computed_at: Utc::now(),
            },
        );
        self.persist(&entries)
    }

    /// Return the cached result for `key`, computing it at most once across
    /// concurrent callers on a miss.
    ///
    /// A failed disk write after computing degrades silently: the value is
    /// still returned and stays available in memory.
    pub fn get_or_compute<F>(&self, key: &CacheKey, compute: F) -> EvalResult
    where
        F: FnOnce() -> EvalResult,
    {
        if let Some(hit) = self.get(key) {
            return hit;
        }

        let cell = {
            let mut inflight = self.inflight.lock().expect("cache lock poisoned");
            // Another caller may have finished between the entries check and
            // taking this lock; entries are inserted before inflight removal,
            // so a re-check here makes "miss and no cell" mean "not started".
            if let Some(hit) = self.get(key) {
                return hit;
            }
            inflight
                .entry(key.as_str().to_string())
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .clone()
        };

        let mut computed_here = false;
        let value = *cell.get_or_init(|| {
            computed_here = true;
            compute()
        });

        if computed_here {
            // Best effort; the computed value is authoritative either way.
            let _ = self.insert(key, value);
            let mut inflight = self.inflight.lock().expect("cache lock poisoned");
            inflight.remove(key.as_str());
        }

        value
    }

    fn persist(&self, entries: &HashMap<String, CacheRecord>) -> Result<(), StoreError> {
        let file = StoreFile {
            entries: entries.clone(),
        };
        let text = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ge_common::{Parameters, Quantity};

    fn key(n_mean: f64) -> CacheKey {
        let p = Parameters::new(2.01, 0.5, n_mean).unwrap();
        CacheKey::new(Quantity::H, &p, 6, 86, None)
    }

    #[test]
    fn miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path().join("results.json")).unwrap();

        let k = key(50.0);
        assert_eq!(store.get(&k), None);
        store.insert(&k, EvalResult::Finite(5.83)).unwrap();
        assert_eq!(store.get(&k), Some(EvalResult::Finite(5.83)));
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let store = ResultStore::open(path.clone()).unwrap();
        store.insert(&key(50.0), EvalResult::Finite(5.83)).unwrap();
        store.insert(&key(10.0), EvalResult::NotANumber).unwrap();
        drop(store);

        let reopened = ResultStore::open(path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get(&key(50.0)), Some(EvalResult::Finite(5.83)));
        // NaN outcomes are remembered too.
        assert_eq!(reopened.get(&key(10.0)), Some(EvalResult::NotANumber));
    }

    #[test]
    fn corrupted_file_is_an_empty_store_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ResultStore::open(path).unwrap();
        assert!(store.is_empty());
        assert!(store.load_warning().is_some());
    }

    #[test]
    fn get_or_compute_runs_once_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path().join("results.json")).unwrap();
        let k = key(50.0);

        let mut calls = 0;
        let first = store.get_or_compute(&k, || {
            calls += 1;
            EvalResult::Finite(1.0)
        });
        assert_eq!(first, EvalResult::Finite(1.0));
        assert_eq!(calls, 1);

        let second = store.get_or_compute(&k, || {
            calls += 1;
            EvalResult::Finite(2.0)
        });
        assert_eq!(second, EvalResult::Finite(1.0));
        assert_eq!(calls, 1);
    }

    #[test]
    fn concurrent_get_or_compute_is_at_most_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ResultStore::open(dir.path().join("results.json")).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let k = key(50.0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let calls = calls.clone();
                let k = k.clone();
                std::thread::spawn(move || {
                    store.get_or_compute(&k, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Widen the race window.
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        EvalResult::Finite(5.83)
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), EvalResult::Finite(5.83));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
