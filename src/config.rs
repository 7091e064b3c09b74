//! Environment-driven configuration for the terminal front-end.

use std::path::PathBuf;
use std::time::Duration;

use near_token::NearToken;

use crate::error::{ParseError, ParseErrorKind};
use crate::result::Result;
use crate::types::AccountId;

/// Collection the app mints from when `MINTERM_CONTRACT_ID` is unset. This is
/// the shared example collection on testnet, capped at 200 tokens.
pub const DEFAULT_CONTRACT_ID: &str = "nft.examples.testnet";

/// How often the watcher polls the collection for supply changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Runtime configuration, read once at startup. Every knob has a default so a
/// bare `minterm` invocation works against testnet out of the box.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Account id of the NEP-171 collection to mint from.
    pub contract_id: AccountId,
    /// Override for the RPC endpoint. `None` means the default testnet node.
    pub rpc_url: Option<String>,
    /// Override for the credentials directory the wallet is detected in.
    pub credentials_dir: Option<PathBuf>,
    /// Override for the storage deposit attached to each mint.
    pub mint_deposit: Option<NearToken>,
    /// How often the background watcher polls for supply changes.
    pub poll_interval: Duration,
    /// API key forwarded to the RPC service, for providers that require one.
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Read configuration from `MINTERM_*` environment variables, falling back
    /// to testnet defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let contract_id = match std::env::var("MINTERM_CONTRACT_ID") {
            Ok(id) => id
                .parse()
                .map_err(|e: near_account_id::ParseAccountError| {
                    ParseError::from_repr(ParseErrorKind::Unknown, e.into())
                })?,
            Err(_) => DEFAULT_CONTRACT_ID
                .parse()
                .expect("default contract id is valid"),
        };

        let mint_deposit = match std::env::var("MINTERM_MINT_DEPOSIT_YOCTO") {
            Ok(yocto) => {
                let yocto = yocto.parse::<u128>().map_err(|e| {
                    ParseError::from_repr(ParseErrorKind::InvalidNumericValue, e.into())
                })?;
                Some(NearToken::from_yoctonear(yocto))
            }
            Err(_) => None,
        };

        let poll_interval = match std::env::var("MINTERM_POLL_INTERVAL_MS") {
            Ok(ms) => {
                let ms = ms.parse::<u64>().map_err(|e| {
                    ParseError::from_repr(ParseErrorKind::InvalidNumericValue, e.into())
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            contract_id,
            rpc_url: std::env::var("MINTERM_RPC_URL").ok(),
            credentials_dir: std::env::var("MINTERM_CREDENTIALS_DIR").ok().map(PathBuf::from),
            mint_deposit,
            poll_interval,
            api_key: std::env::var("NEAR_RPC_API_KEY").ok(),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_id: DEFAULT_CONTRACT_ID
                .parse()
                .expect("default contract id is valid"),
            rpc_url: None,
            credentials_dir: None,
            mint_deposit: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            api_key: None,
        }
    }
}
