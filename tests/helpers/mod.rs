// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for vaultscan integration tests
//!
//! Provides a scriptable [`MulticallExecutor`] so batchers and readers can be
//! exercised without a blockchain connection.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::U256;
use async_trait::async_trait;
use vaultscan::{MulticallError, MulticallExecutor, ReadCall};

type Responder = Box<dyn Fn(usize, &ReadCall) -> DynSolValue + Send + Sync>;

/// Mock executor answering every call through a closure
///
/// The closure receives the zero-based number of the batch being executed and
/// the call, so tests can make values change between refreshes.
///
/// # Example
///
/// ```rust,ignore
/// let executor = MockExecutor::new(|batch, call| uint_for(call, U256::from(batch)))
///     .with_delay(Duration::from_millis(100));
///
/// let chain = ChainContext::new(137, Arc::new(executor), catalog);
/// ```
pub struct MockExecutor {
    responder: Responder,
    delay: Option<Duration>,
    failure: Mutex<Option<String>>,
    batches: AtomicUsize,
    calls: AtomicUsize,
    last_batch: Mutex<Vec<ReadCall>>,
}

impl MockExecutor {
    /// Create a mock answering through `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &ReadCall) -> DynSolValue + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            failure: Mutex::new(None),
            batches: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            last_batch: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the number of the batch it was part of
    pub fn batch_number() -> Self {
        Self::new(|batch, call| uint_for(call, U256::from(batch)))
    }

    /// Sleep before answering, keeping the batch in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every batch with `message`
    pub fn failing(self, message: &str) -> Self {
        self.set_failure(Some(message));
        self
    }

    /// Switch failing mode on or off between batches
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    /// Number of batches executed, including failed ones
    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    /// Number of individual calls received across all batches
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls of the most recent batch
    pub fn last_batch(&self) -> Vec<ReadCall> {
        self.last_batch.lock().unwrap().clone()
    }
}

#[async_trait]
impl MulticallExecutor for MockExecutor {
    async fn aggregate(&self, calls: &[ReadCall]) -> Result<Vec<DynSolValue>, MulticallError> {
        let batch = self.batches.fetch_add(1, Ordering::SeqCst);
        self.calls.fetch_add(calls.len(), Ordering::SeqCst);
        *self.last_batch.lock().unwrap() = calls.to_vec();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(MulticallError::response_decode(message));
        }

        Ok(calls
            .iter()
            .map(|call| (self.responder)(batch, call))
            .collect())
    }
}

/// An unsigned value sized to the call's declared return type
pub fn uint_for(call: &ReadCall, value: U256) -> DynSolValue {
    let bits = match call.output() {
        DynSolType::Uint(bits) => *bits,
        _ => 256,
    };
    DynSolValue::Uint(value, bits)
}
