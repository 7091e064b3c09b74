//! Result and execution types from results of RPC calls to the network.

use near_gas::NearGas;
use near_primitives::views::{
    CallResult, FinalExecutionOutcomeView, FinalExecutionStatus, StatusResponse,
};

use crate::error::{Error, SerializationError};
use crate::events::{self, MintEvent};
use crate::types::{BlockHeight, CryptoHash, TokenId};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The result from a call into a view function. This contains the contents or
/// the results from the view function call itself. The consumer of this object
/// can choose how to deserialize its contents.
#[non_exhaustive]
pub struct ViewResultDetails {
    /// Our result from our call into a view function.
    pub result: Vec<u8>,
    /// Logs generated from the view function.
    pub logs: Vec<String>,
}

impl ViewResultDetails {
    /// Deserialize an instance of type `T` from bytes of JSON text sourced from the
    /// execution result of this call. This conversion can fail if the structure of
    /// the internal state does not meet up with [`serde::de::DeserializeOwned`]'s
    /// requirements.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.result)
            .map_err(SerializationError::SerdeError)
            .map_err(Into::into)
    }
}

impl From<CallResult> for ViewResultDetails {
    fn from(result: CallResult) -> Self {
        ViewResultDetails {
            result: result.result,
            logs: result.logs,
        }
    }
}

/// Summary of the node's status as reported by the RPC service. The chain id
/// in here is what gets matched against the expected network identifier.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ChainStatus {
    /// Unique chain id, e.g. `testnet`.
    pub chain_id: String,
    /// Binary version of the node.
    pub version: String,
    pub latest_block_height: BlockHeight,
    pub latest_block_hash: CryptoHash,
    /// Whether the node is still syncing headers/blocks.
    pub syncing: bool,
}

impl From<StatusResponse> for ChainStatus {
    fn from(status: StatusResponse) -> Self {
        Self {
            chain_id: status.chain_id,
            version: status.version.version,
            latest_block_height: status.sync_info.latest_block_height,
            latest_block_hash: status.sync_info.latest_block_hash.into(),
            syncing: status.sync_info.syncing,
        }
    }
}

/// The final outcome of a mint transaction after it has been awaited to
/// completion on chain. Holds everything the front-end renders on success:
/// the transaction hash, gas burnt across the transaction and its receipts,
/// the raw execution logs and the mint events parsed out of them.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct MintOutcome {
    /// Hash of the transaction exactly as returned by the RPC service.
    pub transaction_hash: CryptoHash,
    /// Total gas burnt by the transaction and all receipts it generated.
    pub total_gas_burnt: NearGas,
    /// Logs from the transaction and all its receipts, in execution order.
    pub logs: Vec<String>,
    /// NEP-297 `nft_mint` events parsed out of [`MintOutcome::logs`].
    pub events: Vec<MintEvent>,
    pub(crate) status: FinalExecutionStatus,
}

impl MintOutcome {
    /// Checks whether the transaction was successful. Returns true if
    /// the transaction has a status of [`FinalExecutionStatus::SuccessValue`].
    pub fn is_success(&self) -> bool {
        matches!(self.status, FinalExecutionStatus::SuccessValue(_))
    }

    /// Ids of the tokens minted by this transaction, in event order.
    pub fn token_ids(&self) -> Vec<&TokenId> {
        self.events
            .iter()
            .flat_map(|event| &event.token_ids)
            .collect()
    }

    /// Convert a raw execution outcome view into a [`MintOutcome`], failing
    /// with the chain's own error text if the execution did not succeed.
    pub(crate) fn from_outcome(outcome: FinalExecutionOutcomeView) -> Result<Self> {
        match &outcome.status {
            FinalExecutionStatus::SuccessValue(_) => {}
            FinalExecutionStatus::Failure(err) => {
                return Err(Error::ExecutionError(err.to_string()))
            }
            FinalExecutionStatus::NotStarted => {
                return Err(Error::ExecutionError("Transaction not started.".into()))
            }
            FinalExecutionStatus::Started => {
                return Err(Error::ExecutionError(
                    "Transaction still being processed.".into(),
                ))
            }
        }

        let total_gas_burnt = outcome.transaction_outcome.outcome.gas_burnt
            + outcome
                .receipts_outcome
                .iter()
                .map(|t| t.outcome.gas_burnt)
                .sum::<u64>();

        let mut logs = outcome.transaction_outcome.outcome.logs;
        for receipt in &outcome.receipts_outcome {
            logs.extend(receipt.outcome.logs.iter().cloned());
        }

        let events = events::extract_mint_events(&logs);

        Ok(Self {
            transaction_hash: outcome.transaction.hash.into(),
            total_gas_burnt: NearGas::from_gas(total_gas_burnt),
            logs,
            events,
            status: outcome.status,
        })
    }
}
