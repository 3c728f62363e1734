//! Span creation helpers for vaultscan operations.
//!
//! Telemetry stays out of business logic: each instrumented operation has a
//! span helper here, attached with `tracing::Instrument` at the call site.
//!
//! Usage pattern:
//! ```rust,ignore
//! async fn my_operation(&self) -> Result<T> {
//!     inner_work().instrument(spans::my_operation(key)).await
//! }
//! ```

use alloy_primitives::Address;
use tracing::Span;

/// Create span for one batcher refresh (build, execute, merge).
///
/// Parent: whichever caller started the refresh
/// Children: build_calls and multicall spans
#[inline]
pub(crate) fn refresh(key: &str, fetcher: &'static str) -> Span {
    tracing::info_span!("vaultscan.refresh", key = %key, fetcher = fetcher)
}

/// Create span for building the call batch of a refresh.
///
/// Parent: refresh span
#[inline]
pub(crate) fn build_calls(fetcher: &'static str) -> Span {
    tracing::debug_span!("vaultscan.build_calls", fetcher = fetcher)
}

/// Create span for a single Multicall3 round trip.
///
/// Parent: refresh span
/// Children: the provider's eth_call
#[inline]
pub(crate) fn multicall(multicall: Address, call_count: usize) -> Span {
    tracing::debug_span!(
        "vaultscan.multicall",
        multicall = %multicall,
        call_count = call_count,
    )
}
