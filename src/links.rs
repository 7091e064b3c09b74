//! Outbound links and display helpers for the terminal UI.

use url::Url;

use crate::types::{AccountId, CryptoHash, TokenId};

/// Twitter handle shown in the header of the UI.
pub const SOCIAL_HANDLE: &str = "_life0fmale";

/// Profile link for [`SOCIAL_HANDLE`].
pub const SOCIAL_URL: &str = "https://twitter.com/_life0fmale";

/// Link to a transaction on the block explorer.
pub fn explorer_transaction(explorer: &Url, hash: &CryptoHash) -> Url {
    explorer
        .join(&format!("txns/{}", hash))
        .expect("explorer url is well formed")
}

/// Link to an account page on the block explorer.
pub fn explorer_account(explorer: &Url, account_id: &AccountId) -> Url {
    explorer
        .join(&format!("address/{}", account_id))
        .expect("explorer url is well formed")
}

/// Link to a freshly minted token on the marketplace.
pub fn marketplace_token(marketplace: &Url, contract_id: &AccountId, token_id: &TokenId) -> Url {
    marketplace
        .join(&format!("token/{}::{}", contract_id, token_id))
        .expect("marketplace url is well formed")
}

/// Shorten long account ids for display, keeping the start and end visible.
/// Ids of 15 characters or fewer come back untouched.
pub fn truncate_account(account_id: &AccountId) -> String {
    let id = account_id.as_str();
    if id.len() <= 15 {
        return id.to_string();
    }
    format!("{}...{}", &id[..6], &id[id.len() - 6..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_account_ids_stay_untouched() {
        let id: AccountId = "alice.testnet".parse().unwrap();
        assert_eq!(truncate_account(&id), "alice.testnet");
    }

    #[test]
    fn long_account_ids_get_middle_ellipsis() {
        let id: AccountId = "extremely-long-account-name.testnet".parse().unwrap();
        let shown = truncate_account(&id);
        assert_eq!(shown, "extrem...estnet");
        assert_eq!(shown.len(), 15);
    }

    #[test]
    fn explorer_links_resolve_under_base() {
        let base: Url = "https://testnet.nearblocks.io".parse().unwrap();
        let hash = "11111111111111111111111111111111".parse().unwrap();
        let url = explorer_transaction(&base, &hash);
        assert_eq!(
            url.as_str(),
            "https://testnet.nearblocks.io/txns/11111111111111111111111111111111"
        );
    }

    #[test]
    fn marketplace_links_carry_contract_and_token() {
        let base: Url = "https://testnet.paras.id".parse().unwrap();
        let contract: AccountId = "nft.examples.testnet".parse().unwrap();
        let url = marketplace_token(&base, &contract, &"minterm-1".to_string());
        assert_eq!(
            url.as_str(),
            "https://testnet.paras.id/token/nft.examples.testnet::minterm-1"
        );
    }
}
