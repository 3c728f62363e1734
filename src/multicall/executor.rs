// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Multicall3-backed executor for any alloy provider.

use std::marker::PhantomData;

use alloy_dyn_abi::DynSolValue;
use alloy_network::{AnyNetwork, Network, TransactionBuilder};
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use tracing::{debug, warn, Instrument};

use super::contract::{IMulticall3, MULTICALL3_ADDRESS};
use super::MulticallExecutor;
use crate::batch::ReadCall;
use crate::errors::{MulticallError, RpcError};
use crate::spans;

/// Executes a batch as one `Multicall3.aggregate` `eth_call`.
///
/// `aggregate` reverts if any inner call reverts, which makes every batch
/// atomic: either all results come back or the whole batch fails.
///
/// # Example
///
/// ```rust,ignore
/// use vaultscan::multicall::{Multicall3Executor, MulticallExecutor};
/// use vaultscan::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(ProviderConfig::new("https://polygon-rpc.com"))?;
/// let executor = Multicall3Executor::new(provider);
/// let values = executor.aggregate(&calls).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Multicall3Executor<P, N = AnyNetwork> {
    provider: P,
    address: Address,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> Multicall3Executor<P, N>
where
    P: Provider<N>,
    N: Network,
{
    /// Create an executor targeting the canonical Multicall3 deployment
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            address: MULTICALL3_ADDRESS,
            _network: PhantomData,
        }
    }

    /// Target a Multicall3 deployed at a non-canonical address
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Address of the Multicall3 contract in use
    pub fn address(&self) -> Address {
        self.address
    }

    /// Reference to the inner provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn execute(&self, calls: &[ReadCall]) -> Result<Vec<DynSolValue>, MulticallError> {
        let request = IMulticall3::aggregateCall {
            calls: calls
                .iter()
                .map(|call| IMulticall3::Call {
                    target: call.target(),
                    callData: call.input().clone(),
                })
                .collect(),
        };

        let tx = N::TransactionRequest::default()
            .with_to(self.address)
            .with_input(request.abi_encode());

        let response = self.provider.call(tx).await.map_err(|e| {
            warn!(error = %e, count = calls.len(), "Multicall3.aggregate failed");
            RpcError::chain_connection_failed("Multicall3.aggregate", e)
        })?;

        let decoded = IMulticall3::aggregateCall::abi_decode_returns(&response)
            .map_err(|e| MulticallError::response_decode(e.to_string()))?;

        debug!(
            block_number = %decoded.blockNumber,
            count = decoded.returnData.len(),
            "Multicall3.aggregate returned"
        );

        decode_return_data(calls, decoded.returnData)
    }
}

#[async_trait]
impl<P, N> MulticallExecutor for Multicall3Executor<P, N>
where
    P: Provider<N>,
    N: Network,
{
    async fn aggregate(&self, calls: &[ReadCall]) -> Result<Vec<DynSolValue>, MulticallError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        self.execute(calls)
            .instrument(spans::multicall(self.address, calls.len()))
            .await
    }
}

/// Decode each call's raw return data with the call's declared type.
pub(crate) fn decode_return_data(
    calls: &[ReadCall],
    return_data: Vec<Bytes>,
) -> Result<Vec<DynSolValue>, MulticallError> {
    if calls.len() != return_data.len() {
        return Err(MulticallError::ResultCountMismatch {
            expected: calls.len(),
            actual: return_data.len(),
        });
    }

    calls
        .iter()
        .zip(return_data)
        .enumerate()
        .map(|(index, (call, data))| {
            call.output()
                .abi_decode_params(&data)
                .map_err(|e| MulticallError::decode(index, call.target(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_network::Ethereum;
    use alloy_primitives::{address, U256};
    use alloy_provider::ProviderBuilder;
    use alloy_transport::mock::Asserter;

    alloy_sol_types::sol! {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
    }

    const TOKEN: Address = address!("1111111111111111111111111111111111111111");
    const OWNER: Address = address!("2222222222222222222222222222222222222222");

    fn calls() -> Vec<ReadCall> {
        vec![
            ReadCall::uint256(TOKEN, &balanceOfCall { owner: OWNER }),
            ReadCall::uint8(TOKEN, &decimalsCall {}),
        ]
    }

    fn word(value: u64, bits: usize) -> Bytes {
        DynSolValue::Uint(U256::from(value), bits).abi_encode().into()
    }

    fn aggregate_response(block: u64, return_data: Vec<Bytes>) -> Bytes {
        DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(block), 256),
            DynSolValue::Array(
                return_data
                    .into_iter()
                    .map(|b| DynSolValue::Bytes(b.to_vec()))
                    .collect(),
            ),
        ])
        .abi_encode_params()
        .into()
    }

    fn mocked_executor(
        asserter: &Asserter,
    ) -> Multicall3Executor<impl Provider<Ethereum>, Ethereum> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        Multicall3Executor::new(provider)
    }

    #[test]
    fn test_decode_return_data_uses_declared_types() {
        let values = decode_return_data(&calls(), vec![word(100, 256), word(18, 8)]).unwrap();

        assert_eq!(
            values,
            vec![
                DynSolValue::Uint(U256::from(100), 256),
                DynSolValue::Uint(U256::from(18), 8),
            ]
        );
    }

    #[test]
    fn test_decode_return_data_count_mismatch() {
        let result = decode_return_data(&calls(), vec![word(100, 256)]);
        assert!(matches!(
            result,
            Err(MulticallError::ResultCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_decode_return_data_reports_failing_index() {
        let result = decode_return_data(&calls(), vec![word(100, 256), Bytes::new()]);
        assert!(matches!(
            result,
            Err(MulticallError::Decode { index: 1, target, .. }) if target == TOKEN
        ));
    }

    #[tokio::test]
    async fn test_aggregate_round_trip_through_mocked_provider() {
        let asserter = Asserter::new();
        asserter.push_success(&aggregate_response(
            42,
            vec![word(100, 256), word(18, 8)],
        ));
        let executor = mocked_executor(&asserter);

        let values = executor.aggregate(&calls()).await.unwrap();

        assert_eq!(values[0], DynSolValue::Uint(U256::from(100), 256));
        assert_eq!(values[1], DynSolValue::Uint(U256::from(18), 8));
    }

    #[tokio::test]
    async fn test_aggregate_failure_fails_whole_batch() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted");
        let executor = mocked_executor(&asserter);

        let result = executor.aggregate(&calls()).await;

        assert!(matches!(result, Err(MulticallError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_the_network() {
        // No response queued: any RPC request would fail.
        let asserter = Asserter::new();
        let executor = mocked_executor(&asserter);

        let values = executor.aggregate(&[]).await.unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_with_address_overrides_default() {
        let asserter = Asserter::new();
        let custom = address!("3333333333333333333333333333333333333333");
        let executor = mocked_executor(&asserter).with_address(custom);

        assert_eq!(executor.address(), custom);
        assert_eq!(
            mocked_executor(&asserter).address(),
            MULTICALL3_ADDRESS
        );
    }
}
