// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! One batcher per cache key.
//!
//! The [`BatcherRegistry`] guarantees that all callers asking for the same key
//! (e.g. `"pool-137"`) share a single [`Batcher`], and therefore a single
//! store, TTL clock and in-flight refresh.
//!
//! Registries are plain values: build them at startup, keep them in a
//! process-wide context, and hand out references. Tests create their own to
//! stay isolated.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vaultscan::batcher::BatcherRegistry;
//!
//! let registry: BatcherRegistry<LpFetcher> = BatcherRegistry::new();
//!
//! // Zero-argument construction via `Default`
//! let lps = registry.get_instance("lps-137");
//!
//! // Or inject configuration on first use
//! let lps = registry.get_or_insert_with("lps-137", || LpFetcher::new(ttl));
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::{BatchFetcher, Batcher};

/// A thread-safe map from cache key to [`Batcher`].
///
/// Keys are never evicted; their number is bounded by the distinct chains and
/// accounts a process serves, not by request volume.
pub struct BatcherRegistry<F: BatchFetcher> {
    batchers: RwLock<HashMap<String, Batcher<F>>>,
}

impl<F: BatchFetcher> Default for BatcherRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: BatchFetcher> std::fmt::Debug for BatcherRegistry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatcherRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl<F: BatchFetcher> BatcherRegistry<F> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            batchers: RwLock::new(HashMap::new()),
        }
    }

    /// Get the batcher for `key`, constructing it with `F::default()` on first use
    pub fn get_instance(&self, key: &str) -> Batcher<F>
    where
        F: Default,
    {
        self.get_or_insert_with(key, F::default)
    }

    /// Get the batcher for `key`, constructing its fetcher with `make` on first use.
    ///
    /// Concurrent first access still yields exactly one batcher: `make` is only
    /// called under the write lock, after re-checking for a winner.
    pub fn get_or_insert_with(&self, key: &str, make: impl FnOnce() -> F) -> Batcher<F> {
        // Try read lock first for better concurrency
        if let Some(batcher) = self.get(key) {
            return batcher;
        }

        let mut batchers = self
            .batchers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        batchers
            .entry(key.to_string())
            .or_insert_with(|| {
                let batcher = Batcher::new(key, make());
                debug!(key = key, fetcher = batcher.fetcher().name(), "Registered batcher");
                batcher
            })
            .clone()
    }

    /// Get the batcher for `key` if one exists
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Batcher<F>> {
        self.batchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Check if a batcher exists for `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.batchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of registered batchers
    #[must_use]
    pub fn len(&self) -> usize {
        self.batchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered keys
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.batchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::CallBatch;
    use crate::errors::BatchError;
    use crate::multicall::MulticallExecutor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    struct NoopFetcher {
        ttl: Duration,
    }

    impl Default for NoopFetcher {
        fn default() -> Self {
            Self {
                ttl: Duration::from_secs(1),
            }
        }
    }

    impl BatchFetcher for NoopFetcher {
        type Context = Arc<dyn MulticallExecutor>;

        fn name(&self) -> &'static str {
            "noop"
        }

        fn ttl(&self) -> Duration {
            self.ttl
        }

        fn build_calls(&self, _ctx: &Self::Context) -> Result<CallBatch, BatchError> {
            Ok(CallBatch::new())
        }

        fn executor(&self, ctx: &Self::Context) -> Arc<dyn MulticallExecutor> {
            ctx.clone()
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = BatcherRegistry::<NoopFetcher>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("pool-137").is_none());
    }

    #[test]
    fn test_get_instance_is_idempotent() {
        let registry = BatcherRegistry::<NoopFetcher>::new();

        let first = registry.get_or_insert_with("pool-137", || NoopFetcher {
            ttl: Duration::from_secs(7),
        });
        let second = registry.get_or_insert_with("pool-137", || NoopFetcher {
            ttl: Duration::from_secs(99),
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(second.fetcher().ttl(), Duration::from_secs(7), "first caller wins");
        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn test_keys_are_independent() {
        let registry = BatcherRegistry::<NoopFetcher>::new();
        registry.get_instance("pool-137");
        registry.get_instance("pool-1");

        assert!(registry.contains("pool-137"));
        assert!(registry.contains("pool-1"));
        assert!(!registry.contains("pool-10"));

        let mut keys = registry.keys();
        keys.sort();
        assert_eq!(keys, vec!["pool-1".to_string(), "pool-137".to_string()]);
    }

    #[test]
    fn test_concurrent_first_access_constructs_once() {
        let registry = Arc::new(BatcherRegistry::<NoopFetcher>::new());
        CONSTRUCTED.store(0, Ordering::SeqCst);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.get_or_insert_with("lps-137", || {
                        CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
                        NoopFetcher::default()
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    }
}
