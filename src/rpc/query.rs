//! This module defines a bunch of internal types used solely for querying into
//! RPC methods to get info about what's on the chain.
//!
//! Note that the types defined are exposed as-is for users to reference in their own
//! functions or structs as needed. These types cannot be created outside of minterm.
//! To use them, refer to surface level types like [`Contract`] and [`Worker`].
//!
//! For example, to query into a view function on the collection:
//! ```ignore
//! async fn my_func(worker: &Worker<impl Network>) -> anyhow::Result<()> {
//!     let contract_id: AccountId = "nft.examples.testnet".parse()?;
//!     let supply = worker.view(&contract_id, "nft_total_supply").await?;
//!     Ok(())
//! }
//! ```
//!
//! [`Contract`]: crate::Contract
//! [`Worker`]: crate::Worker

use std::fmt::{Debug, Display};

use near_account_id::AccountId;
use near_jsonrpc_client::methods::query::RpcQueryResponse;
use near_jsonrpc_client::methods::{self, RpcMethod};
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::types::BlockReference;
use near_primitives::views::QueryRequest;

use crate::error::RpcErrorKind;
use crate::operations::Function;
use crate::result::{Result, ViewResultDetails};
use crate::rpc::client::Client;
use crate::rpc::BoxFuture;

/// `Query` object allows creating queries into the network of our choice. This object is
/// usually given from making calls from other functions such as [`view`]. Queries read
/// at the latest block.
///
/// [`view`]: crate::worker::Worker::view
pub struct Query<'a, T> {
    pub(crate) method: T,
    pub(crate) client: &'a Client,
}

impl<'a, T> Query<'a, T> {
    pub(crate) fn new(client: &'a Client, method: T) -> Self {
        Self { method, client }
    }
}

impl<'a, T, R> std::future::IntoFuture for Query<'a, T>
where
    T: ProcessQuery<Output = R> + Send + Sync + 'static,
    <T as ProcessQuery>::Method: RpcMethod + Debug + Send + Sync,
    <<T as ProcessQuery>::Method as RpcMethod>::Response: Debug + Send + Sync,
    <<T as ProcessQuery>::Method as RpcMethod>::Error: Debug + Display + Send + Sync,
{
    type Output = Result<R>;

    // TODO: boxed future required due to impl Trait as type alias being unstable. So once
    // https://github.com/rust-lang/rust/issues/63063 is resolved, we can move to that instead.
    type IntoFuture = BoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let resp = self
                .client
                .query(self.method.into_request(BlockReference::latest())?)
                .await
                .map_err(|e| RpcErrorKind::QueryFailure.with_repr(e.into()))?;

            T::from_response(resp)
        })
    }
}

/// Trait used as a converter from a minterm request to a near-rpc request, and
/// from a near-rpc response back to a minterm result.
///
/// Mostly used internally to facilitate syntax sugar for performing RPC requests with async builders.
pub trait ProcessQuery {
    // TODO: associated default type is unstable. So for now, will require writing
    // the manual impls for query_request
    /// Method for doing the internal RPC request to the network of our choosing.
    type Method: RpcMethod;

    /// Expected output after performing a query. This is mainly to convert over
    /// the type from near-primitives to a minterm type.
    type Output;

    /// Convert into the Request object that is required to perform the RPC request.
    fn into_request(self, block_ref: BlockReference) -> Result<Self::Method>;

    /// Convert the response from the RPC request to a type of our choosing, mainly to conform
    /// to minterm related types from the near-primitives or json types from the network.
    fn from_response(resp: <Self::Method as RpcMethod>::Response) -> Result<Self::Output>;
}

pub struct ViewFunction {
    pub(crate) account_id: AccountId,
    pub(crate) function: Function,
}

impl ProcessQuery for ViewFunction {
    type Method = methods::query::RpcQueryRequest;
    type Output = ViewResultDetails;

    fn into_request(self, block_reference: BlockReference) -> Result<Self::Method> {
        Ok(Self::Method {
            block_reference,
            request: QueryRequest::CallFunction {
                account_id: self.account_id,
                method_name: self.function.name,
                args: self.function.args?.into(),
            },
        })
    }

    fn from_response(resp: RpcQueryResponse) -> Result<Self::Output> {
        match resp.kind {
            QueryResponseKind::CallResult(result) => Ok(result.into()),
            _ => Err(RpcErrorKind::QueryReturnedInvalidData
                .with_msg("while calling into a view function")
                .into()),
        }
    }
}

// Specific builder methods attached to a ViewFunction.
impl Query<'_, ViewFunction> {
    /// Provide the arguments for the call. These args are serialized bytes from
    /// a JSON serializable set of arguments. To use the more ergonomic version,
    /// use [`Query::args_json`].
    pub fn args(mut self, args: Vec<u8>) -> Self {
        self.method.function = self.method.function.args(args);
        self
    }

    /// Similar to `args`, specify an argument that is JSON serializable and can be
    /// accepted by the equivalent contract. Recommend to use something like
    /// `serde_json::json!` macro to easily serialize the arguments.
    pub fn args_json<U: serde::Serialize>(mut self, args: U) -> Self {
        self.method.function = self.method.function.args_json(args);
        self
    }
}
