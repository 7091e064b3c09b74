//! Handle to the NFT collection contract that the front-end mints from.

use async_trait::async_trait;
use near_gas::NearGas;
use near_token::NearToken;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::network::Network;
use crate::operations::Function;
use crate::result::{MintOutcome, Result};
use crate::types::{AccountId, InMemorySigner, TokenId};
use crate::worker::Worker;

/// Storage deposit attached to `nft_mint` to cover the token record on chain.
pub const DEFAULT_MINT_DEPOSIT: NearToken = NearToken::from_millinear(10);

/// Gas attached to `nft_mint`. Minting a single token is cheap, but metadata
/// hooks on some collections can push past the default function-call budget.
pub const DEFAULT_MINT_GAS: NearGas = NearGas::from_tgas(100);

/// Everything the front-end needs from a collection contract. Abstracting the
/// contract behind a trait keeps the session logic testable without a network.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Chain id reported by the node the collection lives on.
    async fn chain_id(&self) -> Result<String>;

    /// Number of tokens minted so far, via the NEP-171 `nft_total_supply` view.
    async fn total_supply(&self) -> Result<u128>;

    /// Mint one token to the signer's account and await the final outcome.
    async fn mint(&self, signer: &InMemorySigner) -> Result<MintOutcome>;
}

// NEP-171 returns the supply as a U128, which is a JSON string over the wire.
#[derive(Deserialize)]
struct TokenSupply(#[serde(with = "crate::serialize::str")] u128);

/// `Contract` is a handle on a NEP-171 collection deployed to a network,
/// addressed by account id. It holds no keys itself; minting borrows the
/// connected wallet's signer per call.
#[derive(Clone)]
pub struct Contract {
    id: AccountId,
    worker: Worker<dyn Network>,
    deposit: NearToken,
    gas: NearGas,
    token_prefix: String,
}

impl Contract {
    pub fn new(id: AccountId, worker: Worker<impl Network + 'static>) -> Self {
        Self {
            id,
            worker: worker.coerce(),
            deposit: DEFAULT_MINT_DEPOSIT,
            gas: DEFAULT_MINT_GAS,
            token_prefix: "minterm".into(),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Override the storage deposit attached to each mint.
    pub fn with_deposit(mut self, deposit: NearToken) -> Self {
        self.deposit = deposit;
        self
    }

    /// Override the gas attached to each mint.
    pub fn with_gas(mut self, gas: NearGas) -> Self {
        self.gas = gas;
        self
    }

    /// Token ids are minted as `{prefix}-{14 random digits}` to stay unique
    /// across wallets hitting the same shared collection.
    pub fn with_token_prefix(mut self, prefix: &str) -> Self {
        self.token_prefix = prefix.into();
        self
    }

    fn generate_token_id(&self) -> TokenId {
        let suffix: u64 = rand::thread_rng().gen_range(10u64.pow(13)..10u64.pow(14));
        format!("{}-{}", self.token_prefix, suffix)
    }
}

#[async_trait]
impl Collection for Contract {
    async fn chain_id(&self) -> Result<String> {
        let status = self.worker.status().await?;
        Ok(status.chain_id)
    }

    async fn total_supply(&self) -> Result<u128> {
        let result = self.worker.view(&self.id, "nft_total_supply").await?;
        let TokenSupply(supply) = result.json()?;
        Ok(supply)
    }

    async fn mint(&self, signer: &InMemorySigner) -> Result<MintOutcome> {
        let token_id = self.generate_token_id();
        let function = Function::new("nft_mint")
            .args_json(json!({
                "token_id": token_id,
                "receiver_id": signer.account_id(),
                "token_metadata": {
                    "title": format!("Minterm #{}", token_id),
                    "description": "Minted from the minterm terminal front-end.",
                    "copies": 1,
                },
            }))
            .deposit(self.deposit)
            .gas(self.gas);

        self.worker.call(signer, &self.id, function).await
    }
}

impl std::fmt::Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("id", &self.id)
            .field("deposit", &self.deposit)
            .field("gas", &self.gas)
            .field("token_prefix", &self.token_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_supply_deserializes_from_json_string() -> anyhow::Result<()> {
        let TokenSupply(supply) = serde_json::from_str(r#""184""#)?;
        assert_eq!(supply, 184);
        Ok(())
    }

    #[test]
    fn token_ids_carry_prefix_and_fourteen_digits() {
        let suffix: u64 = rand::thread_rng().gen_range(10u64.pow(13)..10u64.pow(14));
        let token_id = format!("minterm-{}", suffix);
        let digits = token_id.trim_start_matches("minterm-");
        assert_eq!(digits.len(), 14);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
