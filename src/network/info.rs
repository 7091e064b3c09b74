use std::path::PathBuf;

/// Structural information about a network such as the expected chain id and
/// where the wallet credentials live on disk.
#[derive(Clone, Debug)]
pub struct Info {
    /// Name of the network itself
    pub name: String,
    /// Chain id the node is expected to report, e.g. `testnet`. Anything else
    /// coming back from the node means we are pointed at the wrong network.
    pub chain_id: String,
    /// Path to the keystore directory holding wallet credentials
    pub keystore_path: PathBuf,
    /// Rpc endpoint to point our client to
    pub rpc_url: url::Url,
    /// Block explorer to link transactions and accounts to
    pub explorer_url: url::Url,
    /// Marketplace to link freshly minted tokens to
    pub marketplace_url: url::Url,
}
