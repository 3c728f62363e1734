// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Request-coalescing, TTL-bounded batched cache.
//!
//! A [`Batcher`] owns a [`CacheStore`] and refreshes it through a
//! [`BatchFetcher`]: the fetcher builds labeled calls for every entity, the
//! batcher executes them in one multicall round trip and merges the results.
//!
//! # Refresh state machine
//!
//! `perform` is the only entry point that touches the network:
//!
//! - **Hit**: the last successful refresh is younger than the TTL and nothing
//!   is in flight. Returns immediately.
//! - **Join**: a refresh is in flight. The caller awaits that refresh and
//!   shares its outcome, regardless of its own view of freshness.
//! - **Refresh**: otherwise a new refresh starts. Only a successful refresh
//!   advances `last_refresh`, so the call after a failure retries at once.
//!
//! Any number of concurrent callers therefore collapse into one round trip
//! per key.
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultscan::batcher::{Batcher, BatcherRegistry};
//!
//! let registry: BatcherRegistry<PoolFetcher> = BatcherRegistry::new();
//! let batcher = registry.get_instance("pool-137");
//!
//! batcher.perform(&ctx).await?;
//! let record = batcher.entity("vault-1");
//! ```

mod registry;

pub use registry::BatcherRegistry;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument};

use crate::batch::{CacheStore, CallBatch, EntityRecord};
use crate::errors::{BatchError, RefreshError};
use crate::multicall::MulticallExecutor;
use crate::spans;

/// Domain glue for one kind of batched dataset.
///
/// Implementations build the calls for every relevant entity; they never
/// perform I/O themselves.
pub trait BatchFetcher: Send + Sync + 'static {
    /// Typed arguments of a refresh (chain, account, executor, ...)
    type Context: Clone + Send + Sync + 'static;

    /// Short name used in logs and spans
    fn name(&self) -> &'static str;

    /// Maximum age of cached data before a refresh is required
    fn ttl(&self) -> Duration;

    /// Build the flat batch of calls for every entity of `ctx`
    fn build_calls(&self, ctx: &Self::Context) -> Result<CallBatch, BatchError>;

    /// Executor the batch is submitted to
    fn executor(&self, ctx: &Self::Context) -> Arc<dyn MulticallExecutor>;
}

/// Counters describing how a batcher has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatcherStats {
    /// `perform` calls answered from fresh data
    pub hits: u64,
    /// `perform` calls that joined an in-flight refresh
    pub coalesced: u64,
    /// Refreshes started
    pub refreshes: u64,
    /// Refreshes that failed
    pub failures: u64,
}

#[derive(Debug, Default)]
struct StatCounters {
    hits: AtomicU64,
    coalesced: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

impl StatCounters {
    fn snapshot(&self) -> BatcherStats {
        BatcherStats {
            hits: self.hits.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

type InFlight = Shared<BoxFuture<'static, Result<(), RefreshError>>>;

#[derive(Default)]
struct RefreshState {
    last_refresh: Option<Instant>,
    in_flight: Option<InFlight>,
}

impl RefreshState {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        self.last_refresh
            .is_some_and(|at| now.saturating_duration_since(at) < ttl)
    }
}

struct Inner<F: BatchFetcher> {
    key: String,
    fetcher: F,
    store: RwLock<CacheStore>,
    state: Mutex<RefreshState>,
    stats: StatCounters,
}

impl<F: BatchFetcher> Inner<F> {
    // The state is consistent at every unlock, so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn build_and_execute(&self, ctx: &F::Context) -> Result<usize, BatchError> {
        let batch = {
            let _guard = spans::build_calls(self.fetcher.name()).entered();
            self.fetcher.build_calls(ctx)?
        };

        if batch.is_empty() {
            debug!(key = %self.key, "No calls to batch, skipping multicall");
            return Ok(0);
        }

        debug!(
            key = %self.key,
            calls = batch.len(),
            entities = batch.entity_count(),
            "Executing batched calls"
        );

        let values = self
            .fetcher
            .executor(ctx)
            .aggregate(&batch.calls())
            .await?;

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.merge(batch.descriptors(), values)
    }
}

/// Clears the in-flight marker when the refresh task ends, including by panic.
struct CompletionGuard<F: BatchFetcher> {
    inner: Arc<Inner<F>>,
    succeeded: bool,
}

impl<F: BatchFetcher> Drop for CompletionGuard<F> {
    fn drop(&mut self) {
        let mut state = self.inner.state();
        state.in_flight = None;
        if self.succeeded {
            state.last_refresh = Some(Instant::now());
        }
    }
}

/// A TTL-bounded, request-coalescing cache over one batched dataset.
///
/// Cloning is cheap and every clone shares the same store and refresh state.
pub struct Batcher<F: BatchFetcher> {
    inner: Arc<Inner<F>>,
}

impl<F: BatchFetcher> Clone for Batcher<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: BatchFetcher> std::fmt::Debug for Batcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batcher")
            .field("key", &self.inner.key)
            .field("fetcher", &self.inner.fetcher.name())
            .field("ttl", &self.inner.fetcher.ttl())
            .finish_non_exhaustive()
    }
}

impl<F: BatchFetcher> Batcher<F> {
    /// Create a batcher for `key`; no I/O happens until the first `perform`
    pub fn new(key: impl Into<String>, fetcher: F) -> Self {
        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                fetcher,
                store: RwLock::new(CacheStore::new()),
                state: Mutex::new(RefreshState::default()),
                stats: StatCounters::default(),
            }),
        }
    }

    /// Cache key this batcher was registered under
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The fetcher driving refreshes
    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    /// Ensure the store is fresh, refreshing or joining a refresh as needed.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure shared by every caller of the same refresh.
    pub async fn perform(&self, ctx: &F::Context) -> Result<(), RefreshError> {
        let refresh = {
            let mut state = self.inner.state();

            if let Some(in_flight) = state.in_flight.as_ref() {
                self.inner.stats.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!(key = %self.inner.key, "Joining in-flight refresh");
                in_flight.clone()
            } else if state.is_fresh(self.inner.fetcher.ttl(), Instant::now()) {
                self.inner.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %self.inner.key, "Cache hit");
                return Ok(());
            } else {
                let refresh = self.start_refresh(ctx.clone());
                state.in_flight = Some(refresh.clone());
                refresh
            }
        };

        refresh.await
    }

    fn start_refresh(&self, ctx: F::Context) -> InFlight {
        self.inner.stats.refreshes.fetch_add(1, Ordering::Relaxed);

        let inner = Arc::clone(&self.inner);
        let span = spans::refresh(&inner.key, inner.fetcher.name());
        let owner = Arc::clone(&self.inner);

        let task = tokio::spawn(
            async move {
                let mut guard = CompletionGuard {
                    inner,
                    succeeded: false,
                };

                let result = guard.inner.build_and_execute(&ctx).await;
                match result {
                    Ok(fields) => {
                        guard.succeeded = true;
                        info!(key = %guard.inner.key, fields, "Refresh complete");
                        Ok(())
                    }
                    Err(e) => {
                        guard.inner.stats.failures.fetch_add(1, Ordering::Relaxed);
                        warn!(key = %guard.inner.key, error = %e, "Refresh failed");
                        Err(RefreshError::from(e))
                    }
                }
            }
            .instrument(span),
        );

        async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    owner.stats.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(key = %owner.key, error = %e, "Refresh task aborted");
                    Err(RefreshError::from(BatchError::RefreshAborted {
                        key: owner.key.clone(),
                        details: e.to_string(),
                    }))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Copy of one entity's record as of the last merge
    pub fn entity(&self, id: &str) -> Option<EntityRecord> {
        self.read_store(|store| store.entity(id).cloned())
    }

    /// Copy of the whole store
    pub fn snapshot(&self) -> CacheStore {
        self.read_store(CacheStore::clone)
    }

    /// Run `f` against the store without cloning it
    pub fn read_store<T>(&self, f: impl FnOnce(&CacheStore) -> T) -> T {
        let store = self
            .inner
            .store
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// When the last successful refresh completed
    pub fn last_refresh(&self) -> Option<Instant> {
        self.inner.state().last_refresh
    }

    /// Whether a refresh is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.inner.state().in_flight.is_some()
    }

    /// Usage counters
    pub fn stats(&self) -> BatcherStats {
        self.inner.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{to_batched_calls, EntityId, ReadCall};
    use crate::errors::MulticallError;
    use alloy_dyn_abi::{DynSolType, DynSolValue};
    use alloy_primitives::{Address, Bytes, U256};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingExecutor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MulticallExecutor for CountingExecutor {
        async fn aggregate(
            &self,
            calls: &[ReadCall],
        ) -> Result<Vec<DynSolValue>, MulticallError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(calls
                .iter()
                .map(|_| DynSolValue::Uint(U256::from(n), 256))
                .collect())
        }
    }

    #[derive(Clone)]
    struct Ctx {
        entities: Vec<&'static str>,
        executor: Arc<CountingExecutor>,
    }

    struct OneFieldFetcher;

    impl BatchFetcher for OneFieldFetcher {
        type Context = Ctx;

        fn name(&self) -> &'static str {
            "one-field"
        }

        fn ttl(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn build_calls(&self, ctx: &Ctx) -> Result<CallBatch, BatchError> {
            let mut batch = CallBatch::new();
            for id in &ctx.entities {
                let call =
                    ReadCall::from_raw(Address::ZERO, Bytes::new(), DynSolType::Uint(256));
                batch.extend(to_batched_calls(&EntityId::from(*id), [("value", call)]))?;
            }
            Ok(batch)
        }

        fn executor(&self, ctx: &Ctx) -> Arc<dyn MulticallExecutor> {
            ctx.executor.clone()
        }
    }

    fn ctx(entities: Vec<&'static str>) -> Ctx {
        Ctx {
            entities,
            executor: Arc::new(CountingExecutor::default()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_perform_within_ttl_is_a_hit() {
        let batcher = Batcher::new("test", OneFieldFetcher);
        let ctx = ctx(vec!["a"]);

        batcher.perform(&ctx).await.unwrap();
        batcher.perform(&ctx).await.unwrap();

        assert_eq!(ctx.executor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            batcher.stats(),
            BatcherStats {
                hits: 1,
                coalesced: 0,
                refreshes: 1,
                failures: 0
            }
        );
        assert!(!batcher.is_refreshing());
        assert!(batcher.last_refresh().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch_succeeds_without_executor() {
        let batcher = Batcher::new("test", OneFieldFetcher);
        let ctx = ctx(vec![]);

        batcher.perform(&ctx).await.unwrap();

        assert_eq!(ctx.executor.calls.load(Ordering::SeqCst), 0);
        assert!(batcher.snapshot().is_empty());
        assert!(batcher.last_refresh().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_after_ttl_overwrites_values() {
        let batcher = Batcher::new("test", OneFieldFetcher);
        let ctx = ctx(vec!["a", "b"]);

        batcher.perform(&ctx).await.unwrap();
        assert_eq!(batcher.entity("a").unwrap().uint("value"), Some(U256::ZERO));

        tokio::time::advance(Duration::from_secs(6)).await;
        batcher.perform(&ctx).await.unwrap();

        assert_eq!(batcher.entity("a").unwrap().uint("value"), Some(U256::from(1)));
        assert_eq!(batcher.entity("b").unwrap().uint("value"), Some(U256::from(1)));
        assert_eq!(ctx.executor.calls.load(Ordering::SeqCst), 2);
    }

    struct PanickingFetcher;

    impl BatchFetcher for PanickingFetcher {
        type Context = Ctx;

        fn name(&self) -> &'static str {
            "panicking"
        }

        fn ttl(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn build_calls(&self, _ctx: &Ctx) -> Result<CallBatch, BatchError> {
            panic!("call construction blew up");
        }

        fn executor(&self, ctx: &Ctx) -> Arc<dyn MulticallExecutor> {
            ctx.executor.clone()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_refresh_is_aborted_and_counted() {
        let batcher = Batcher::new("k", PanickingFetcher);
        let ctx = ctx(vec!["a"]);

        let error = batcher.perform(&ctx).await.unwrap_err();

        assert!(matches!(
            error.inner(),
            BatchError::RefreshAborted { key, .. } if key == "k"
        ));
        assert!(!batcher.is_refreshing());
        assert!(batcher.last_refresh().is_none());
        assert_eq!(
            batcher.stats(),
            BatcherStats {
                hits: 0,
                coalesced: 0,
                refreshes: 1,
                failures: 1
            }
        );

        // The next call starts a new refresh instead of joining a dead one
        assert!(batcher.perform(&ctx).await.is_err());
        assert_eq!(batcher.stats().refreshes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_entities_fail_the_refresh() {
        let batcher = Batcher::new("test", OneFieldFetcher);
        let ctx = ctx(vec!["a", "a"]);

        let error = batcher.perform(&ctx).await.unwrap_err();

        assert!(matches!(error.inner(), BatchError::DuplicateField { .. }));
        assert_eq!(ctx.executor.calls.load(Ordering::SeqCst), 0);
        assert!(batcher.last_refresh().is_none());
        assert_eq!(batcher.stats().failures, 1);
    }
}
