// src/services/cache.rs

//! In-memory package cache with single-flight lookups.
//!
//! Concurrent misses for the same module share one inner search: the first
//! caller runs it, the rest wait on the same cell and receive its result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::Searcher;
use crate::error::Result;
use crate::models::Package;
use crate::utils::module;

/// A cached package with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPackage {
    pub package: Package,

    /// When the package was first stored
    pub created: DateTime<Utc>,

    /// Last time the entry was stored or served
    pub updated: DateTime<Utc>,
}

impl CachedPackage {
    fn new(package: Package) -> Self {
        let now = Utc::now();
        Self {
            package,
            created: now,
            updated: now,
        }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CachedPackage>,
    pending: HashMap<String, Arc<OnceCell<Package>>>,
}

/// Searcher wrapper that keeps every successful result for the process lifetime.
///
/// Failed searches are not cached.
pub struct CachedSearcher<S> {
    searcher: S,
    state: Mutex<CacheState>,
}

impl<S: Searcher> CachedSearcher<S> {
    pub fn new(searcher: S) -> Self {
        Self {
            searcher,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The wrapped searcher.
    pub fn inner(&self) -> &S {
        &self.searcher
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the cache entries.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut HashMap<String, CachedPackage>) -> R) -> R {
        f(&mut self.lock().entries)
    }

    /// Store a package under `module`, replacing any previous entry.
    pub fn add(&self, module: &str, package: Package) {
        let key = module::normalize(module).to_string();
        self.lock().entries.insert(key, CachedPackage::new(package));
    }

    /// Every cached entry, oldest first.
    pub fn all(&self) -> Vec<(String, CachedPackage)> {
        let mut all: Vec<_> = self
            .lock()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        all.sort_by(|a, b| a.1.created.cmp(&b.1.created).then_with(|| a.0.cmp(&b.0)));
        all
    }

    /// Whether `module` is cached. Does not refresh the entry.
    pub fn cached(&self, module: &str) -> bool {
        self.lock().entries.contains_key(module::normalize(module))
    }

    /// Remove one entry, returning whether it existed.
    pub fn clear(&self, module: &str) -> bool {
        self.lock()
            .entries
            .remove(module::normalize(module))
            .is_some()
    }

    pub fn clear_all(&self) {
        self.lock().entries.clear();
    }

    /// Drop entries not used since `before`, returning how many were removed.
    pub fn prune(&self, before: DateTime<Utc>) -> usize {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.retain(|_, entry| entry.updated >= before);
        let removed = count - state.entries.len();
        if removed > 0 {
            log::debug!("Pruned {removed} cached packages");
        }
        removed
    }
}

#[async_trait]
impl<S: Searcher> Searcher for CachedSearcher<S> {
    async fn search(&self, module: &str) -> Result<Package> {
        let key = module::normalize(module).to_string();

        let cell = {
            let mut state = self.lock();
            if let Some(entry) = state.entries.get_mut(&key) {
                entry.updated = Utc::now();
                log::debug!("Cache hit for {key}");
                return Ok(entry.package.clone());
            }
            Arc::clone(
                state
                    .pending
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let result = cell
            .get_or_try_init(|| self.searcher.search(&key))
            .await
            .cloned();

        let mut state = self.lock();
        if state
            .pending
            .get(&key)
            .is_some_and(|pending| Arc::ptr_eq(pending, &cell))
        {
            state.pending.remove(&key);
        }

        let package = result?;
        let entry = state
            .entries
            .entry(key)
            .or_insert_with(|| CachedPackage::new(package.clone()));
        entry.updated = Utc::now();
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocError;
    use chrono::Duration as ChronoDuration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSearcher {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl MockSearcher {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Duration::ZERO)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Searcher for MockSearcher {
        async fn search(&self, module: &str) -> Result<Package> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(DocError::InvalidStatus(503));
            }
            Ok(Package::new(module, module.rsplit('/').next().unwrap_or(module)))
        }
    }

    #[tokio::test]
    async fn test_hit_skips_search() {
        let cache = CachedSearcher::new(MockSearcher::new(Duration::ZERO));

        let first = cache.search("net/http").await.unwrap();
        let created = cache.all()[0].1.created;
        let second = cache.search("/net/http/").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name, "http");
        assert_eq!(cache.inner().calls(), 1);
        assert!(cache.cached("net/http"));

        let (_, entry) = &cache.all()[0];
        assert_eq!(entry.created, created);
        assert!(entry.updated >= entry.created);
    }

    #[tokio::test]
    async fn test_concurrent_misses_coalesce() {
        let cache = CachedSearcher::new(MockSearcher::new(Duration::from_millis(50)));

        let results =
            futures::future::join_all((0..8).map(|_| cache.search("encoding/json"))).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(cache.inner().calls(), 1);
        assert_eq!(cache.all().len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_search_separately() {
        let cache = CachedSearcher::new(MockSearcher::new(Duration::from_millis(10)));
        let (a, b) = tokio::join!(cache.search("fmt"), cache.search("os"));
        assert_eq!(a.unwrap().name, "fmt");
        assert_eq!(b.unwrap().name, "os");
        assert_eq!(cache.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_not_cached() {
        let cache = CachedSearcher::new(MockSearcher::failing());

        assert!(cache.search("fmt").await.is_err());
        assert!(cache.search("fmt").await.is_err());
        assert_eq!(cache.inner().calls(), 2);
        assert!(!cache.cached("fmt"));
    }

    #[tokio::test]
    async fn test_add_and_clear() {
        let cache = CachedSearcher::new(MockSearcher::new(Duration::ZERO));
        cache.add("fmt", Package::new("fmt", "fmt"));
        cache.add("os", Package::new("os", "os"));

        assert_eq!(cache.search("fmt").await.unwrap().url, "fmt");
        assert_eq!(cache.inner().calls(), 0);

        assert!(cache.clear("fmt"));
        assert!(!cache.clear("fmt"));
        assert!(!cache.cached("fmt"));
        assert!(cache.cached("os"));

        cache.clear_all();
        assert!(cache.all().is_empty());
    }

    #[test]
    fn test_prune() {
        let cache = CachedSearcher::new(MockSearcher::new(Duration::ZERO));
        cache.add("fmt", Package::new("fmt", "fmt"));
        cache.add("os", Package::new("os", "os"));

        let cutoff = Utc::now() - ChronoDuration::hours(1);
        cache.with_cache(|entries| {
            if let Some(entry) = entries.get_mut("fmt") {
                entry.updated = cutoff - ChronoDuration::minutes(5);
            }
        });

        assert_eq!(cache.prune(cutoff), 1);
        assert!(!cache.cached("fmt"));
        assert!(cache.cached("os"));
        assert_eq!(cache.prune(cutoff), 0);
    }
}
