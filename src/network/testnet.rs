use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::network::builder::{FromNetworkBuilder, NetworkBuilder};
use crate::network::{Info, NetworkClient, NetworkInfo};
use crate::result::Result;
use crate::rpc::client::Client;

/// URL to the testnet RPC node provided by near.org.
pub const RPC_URL: &str = "https://rpc.testnet.near.org";

/// Chain id the testnet RPC node reports from its status endpoint.
pub const CHAIN_ID: &str = "testnet";

/// URL to the testnet block explorer, used for linking out transactions and accounts.
pub const EXPLORER_URL: &str = "https://testnet.nearblocks.io";

/// URL to the testnet marketplace where freshly minted tokens show up.
pub const MARKETPLACE_URL: &str = "https://testnet.paras.id";

/// Testnet related configuration for interacting with testnet.
///
/// Look at [`minterm::testnet`] for how to spin up a [`Worker`] against testnet.
///
/// [`minterm::testnet`]: crate::testnet
/// [`Worker`]: crate::Worker
pub struct Testnet {
    client: Client,
    info: Info,
}

/// Where the near-cli family of tools stores credentials for `network_name`.
pub(crate) fn default_keystore_path(network_name: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".near-credentials").join(network_name)
}

#[async_trait]
impl FromNetworkBuilder for Testnet {
    async fn from_builder<'a>(build: NetworkBuilder<'a, Self>) -> Result<Self> {
        let rpc_url = build.rpc_addr.unwrap_or_else(|| RPC_URL.into());
        let client = Client::new(&rpc_url, build.api_key)?;
        client.wait_for_rpc().await?;

        Ok(Self {
            client,
            info: Info {
                name: build.name.into(),
                chain_id: CHAIN_ID.into(),
                keystore_path: build
                    .keystore_path
                    .unwrap_or_else(|| default_keystore_path(CHAIN_ID)),
                rpc_url: Url::parse(&rpc_url).expect("url is hardcoded"),
                explorer_url: Url::parse(EXPLORER_URL).expect("url is hardcoded"),
                marketplace_url: Url::parse(MARKETPLACE_URL).expect("url is hardcoded"),
            },
        })
    }
}

impl std::fmt::Debug for Testnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Testnet")
            .field("chain_id", &self.info.chain_id)
            .field("rpc_url", &self.info.rpc_url)
            .finish()
    }
}

impl NetworkClient for Testnet {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl NetworkInfo for Testnet {
    fn info(&self) -> &Info {
        &self.info
    }
}
