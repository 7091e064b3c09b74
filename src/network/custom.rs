use crate::network::{testnet, Info, NetworkClient, NetworkInfo};
use crate::result::Result;
use crate::rpc::client::Client;
use url::Url;

use super::builder::{FromNetworkBuilder, NetworkBuilder};

/// Holds information about a custom network. The builder name doubles as the
/// chain id we expect the node to report.
pub struct Custom {
    client: Client,
    info: Info,
}

#[async_trait::async_trait]
impl FromNetworkBuilder for Custom {
    async fn from_builder<'a>(build: NetworkBuilder<'a, Self>) -> Result<Self> {
        let rpc_url = build
            .rpc_addr
            .expect("rpc address should be provided for custom network");
        let client = Client::new(&rpc_url, build.api_key)?;
        client.wait_for_rpc().await?;

        Ok(Self {
            client,
            info: Info {
                name: build.name.into(),
                chain_id: build.name.into(),
                keystore_path: build
                    .keystore_path
                    .unwrap_or_else(|| testnet::default_keystore_path(build.name)),
                rpc_url: Url::parse(&rpc_url).expect("custom provided url should be valid"),
                // Custom networks have no well-known explorer or marketplace,
                // so links fall back to the testnet ones.
                explorer_url: Url::parse(testnet::EXPLORER_URL).expect("url is hardcoded"),
                marketplace_url: Url::parse(testnet::MARKETPLACE_URL).expect("url is hardcoded"),
            },
        })
    }
}

impl std::fmt::Debug for Custom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custom")
            .field("chain_id", &self.info.chain_id)
            .field("rpc_url", &self.info.rpc_url)
            .finish()
    }
}

impl NetworkClient for Custom {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl NetworkInfo for Custom {
    fn info(&self) -> &Info {
        &self.info
    }
}
