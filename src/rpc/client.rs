// TODO: Remove this when near-jsonrpc-client crate no longer defaults to deprecation for
//       warnings about unstable API.
#![allow(deprecated)]

use std::time::Duration;

use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

use near_jsonrpc_client::{methods, JsonRpcClient, MethodCallResult};
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::transaction::{
    Action, FunctionCallAction, SignedTransaction, Transaction, TransactionV0,
};
use near_primitives::types::{BlockReference, Finality};
use near_primitives::views::{AccessKeyView, FinalExecutionOutcomeView, QueryRequest};

use crate::error::RpcErrorKind;
use crate::operations::Function;
use crate::result::Result;
use crate::types::{AccountId, InMemorySigner};

/// Client that acts as a communication bridge to the RPC service. Reads get
/// wrapped with exponential backoff retries; a transaction broadcast is sent
/// exactly once, since resubmitting a signed transaction is not ours to decide.
pub struct Client {
    rpc_addr: String,
    rpc_client: JsonRpcClient,
}

impl Client {
    pub(crate) fn new(rpc_addr: &str, api_key: Option<String>) -> Result<Self> {
        let mut rpc_client = JsonRpcClient::connect(rpc_addr);
        if let Some(api_key) = api_key {
            let api_key = near_jsonrpc_client::auth::ApiKey::new(api_key)
                .map_err(|e| RpcErrorKind::ConnectionFailure.with_repr(e.into()))?;
            rpc_client = rpc_client.header(api_key);
        }

        Ok(Self {
            rpc_addr: rpc_addr.into(),
            rpc_client,
        })
    }

    pub(crate) async fn query<M>(&self, method: M) -> MethodCallResult<M::Response, M::Error>
    where
        M: methods::RpcMethod,
    {
        retry(|| async { self.rpc_client.call(&method).await }).await
    }

    pub(crate) async fn status(
        &self,
    ) -> Result<near_primitives::views::StatusResponse> {
        self.query(methods::status::RpcStatusRequest)
            .await
            .map_err(|e| RpcErrorKind::QueryFailure.with_repr(e.into()).into())
    }

    /// Fetch the current access key for the signer's public key, along with a
    /// recent block hash to anchor the transaction to.
    pub(crate) async fn access_key(
        &self,
        account_id: AccountId,
        public_key: near_crypto::PublicKey,
    ) -> Result<(AccessKeyView, near_primitives::hash::CryptoHash)> {
        let query_resp = self
            .query(methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::None),
                request: QueryRequest::ViewAccessKey {
                    account_id,
                    public_key,
                },
            })
            .await
            .map_err(|e| RpcErrorKind::UnableToRetrieveAccessKey.with_repr(e.into()))?;

        match query_resp.kind {
            QueryResponseKind::AccessKey(access_key) => Ok((access_key, query_resp.block_hash)),
            _ => Err(RpcErrorKind::QueryReturnedInvalidData
                .with_msg("while querying access key")
                .into()),
        }
    }

    /// Sign and broadcast one function-call transaction, awaiting its final
    /// execution outcome. The broadcast itself is never retried: the call
    /// either resolves or rejects once.
    pub(crate) async fn call(
        &self,
        signer: &InMemorySigner,
        receiver_id: &AccountId,
        function: Function,
    ) -> Result<FinalExecutionOutcomeView> {
        let args = function.args?;
        let (access_key, block_hash) = self
            .access_key(signer.account_id.clone(), signer.public_key())
            .await?;

        let tx = Transaction::V0(TransactionV0 {
            signer_id: signer.account_id.clone(),
            public_key: signer.public_key(),
            nonce: access_key.nonce + 1,
            receiver_id: receiver_id.clone(),
            block_hash,
            actions: vec![Action::FunctionCall(Box::new(FunctionCallAction {
                method_name: function.name,
                args,
                gas: function.gas.as_gas(),
                deposit: function.deposit.as_yoctonear(),
            }))],
        });
        let signature = signer.secret_key.sign(tx.get_hash_and_size().0.as_ref());

        self.send_tx(SignedTransaction::new(signature, tx)).await
    }

    pub(crate) async fn send_tx(
        &self,
        tx: SignedTransaction,
    ) -> Result<FinalExecutionOutcomeView> {
        self.rpc_client
            .call(&methods::broadcast_tx_commit::RpcBroadcastTxCommitRequest {
                signed_transaction: tx,
            })
            .await
            .map_err(|e| RpcErrorKind::BroadcastTxFailure.with_repr(e.into()).into())
    }

    /// Probe the node until it responds to a status request, so that a
    /// freshly constructed worker does not hand out a dead connection.
    pub(crate) async fn wait_for_rpc(&self) -> Result<()> {
        let timeout_secs = match std::env::var("NEAR_RPC_TIMEOUT_SECS") {
            Ok(secs) => secs.parse::<usize>().map_err(|e| {
                crate::error::ParseError::from_repr(
                    crate::error::ParseErrorKind::InvalidNumericValue,
                    e.into(),
                )
            })?,
            Err(_) => 10,
        };

        let retry_strategy =
            std::iter::repeat_with(|| Duration::from_millis(500)).take(2 * timeout_secs);
        Retry::spawn(retry_strategy, || async { self.status().await })
            .await
            .map_err(|e| {
                RpcErrorKind::ConnectionFailure.with_repr(
                    format!(
                        "failed to connect to RPC service {} within {} seconds: {}",
                        self.rpc_addr, timeout_secs, e
                    )
                    .into(),
                )
            })?;
        Ok(())
    }
}

pub(crate) async fn retry<R, E, T, F>(task: F) -> T::Output
where
    F: FnMut() -> T,
    T: core::future::Future<Output = core::result::Result<R, E>>,
{
    // Exponential backoff starting w/ 10ms for maximum retry of 5 times:
    let retry_strategy = ExponentialBackoff::from_millis(10).map(jitter).take(5);

    Retry::spawn(retry_strategy, task).await
}
