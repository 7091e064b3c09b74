//! A terminal front-end for minting NFTs on NEAR testnet.
//!
//! minterm talks to a NEP-171 collection contract over JSON-RPC, adopts a
//! wallet from the local credentials store, and drives a tiny four-state UI:
//! idle, loading, error or success. The pieces compose like so:
//!
//! ```ignore
//! let worker = minterm::testnet().await?;
//! let wallet = WalletStore::new(&worker.info().keystore_path);
//! let contract = Contract::new("nft.examples.testnet".parse()?, worker);
//! let mut session = Session::new(contract, wallet, "testnet");
//! session.connect().await;
//! session.mint().await;
//! ```
//!
//! Everything network-facing is behind the [`Collection`] trait, so the
//! session logic runs the same against testnet, a custom RPC endpoint, or a
//! fake collection in tests.

mod config;
mod contract;
pub mod error;
mod events;
mod links;
pub mod network;
pub mod operations;
mod result;
pub mod rpc;
pub(crate) mod serialize;
mod session;
mod types;
mod wallet;
mod watcher;
mod worker;

pub use config::AppConfig;
pub use contract::{Collection, Contract, DEFAULT_MINT_DEPOSIT, DEFAULT_MINT_GAS};
pub use events::MintEvent;
pub use links::{
    explorer_account, explorer_transaction, marketplace_token, truncate_account, SOCIAL_HANDLE,
    SOCIAL_URL,
};
pub use network::{Network, NetworkBuilder};
pub use result::{ChainStatus, MintOutcome, Result, ViewResultDetails};
pub use rpc::query::Query;
pub use session::{
    Banner, Phase, Session, CONNECTIVITY_HINT, MINT_SUCCESS, NOT_CONNECTED, NO_ACCOUNTS, NO_WALLET,
};
pub use types::{AccountId, CryptoHash, InMemorySigner, NearGas, NearToken, TokenId};
pub use wallet::WalletStore;
pub use watcher::{MintNotice, MintWatcher};
pub use worker::Worker;

/// Connect to the testnet network provided by near.org.
///
/// ```ignore
/// let worker = minterm::testnet().await?;
/// ```
pub fn testnet<'a>() -> NetworkBuilder<'a, network::Testnet> {
    NetworkBuilder::new("testnet")
}

/// Connect to a custom network with its own chain id and RPC endpoint. The
/// node's reported chain id is expected to match `name`.
///
/// ```ignore
/// let worker = minterm::custom("localnet", "http://localhost:3030").await?;
/// ```
pub fn custom<'a>(name: &'a str, rpc_url: &str) -> NetworkBuilder<'a, network::Custom> {
    NetworkBuilder::new(name).rpc_addr(rpc_url)
}
