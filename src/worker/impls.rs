use crate::network::NetworkClient;
use crate::operations::Function;
use crate::result::{ChainStatus, MintOutcome, Result};
use crate::rpc::client::Client;
use crate::rpc::query::{Query, ViewFunction};
use crate::types::{AccountId, InMemorySigner};
use crate::worker::Worker;

impl<T: ?Sized> Worker<T>
where
    T: NetworkClient,
{
    pub(crate) fn client(&self) -> &Client {
        self.workspace.client()
    }

    /// Current status of the node this worker is connected to. The chain id in
    /// the returned [`ChainStatus`] is what network verification checks against.
    pub async fn status(&self) -> Result<ChainStatus> {
        self.client().status().await.map(Into::into)
    }

    /// Call into a contract's view function. Returns a result that yields a JSON
    /// type upon awaiting.
    pub fn view(&self, contract_id: &AccountId, function_name: &str) -> Query<'_, ViewFunction> {
        Query::new(
            self.client(),
            ViewFunction {
                account_id: contract_id.clone(),
                function: Function::new(function_name),
            },
        )
    }

    /// Sign and submit a change-method transaction with `signer`, awaiting the
    /// final execution outcome on chain.
    pub async fn call(
        &self,
        signer: &InMemorySigner,
        contract_id: &AccountId,
        function: Function,
    ) -> Result<MintOutcome> {
        let outcome = self.client().call(signer, contract_id, function).await?;
        MintOutcome::from_outcome(outcome)
    }
}
