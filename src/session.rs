//! The front-end state machine: one connected wallet, one collection, and a
//! single banner slot that holds either an error or a success message.

use crate::contract::Collection;
use crate::links;
use crate::result::Result;
use crate::types::{AccountId, CryptoHash, InMemorySigner, TokenId};
use crate::wallet::WalletStore;

/// Shown when no credentials directory exists at all.
pub const NO_WALLET: &str =
    "no wallet found, sign in with a near-cli tool to create one";

/// Shown when the wallet exists but has no signed-in accounts.
pub const NO_ACCOUNTS: &str = "wallet has no signed-in accounts";

/// Shown when a mint is attempted before connecting.
pub const NOT_CONNECTED: &str = "connect a wallet before minting";

/// Appended to every failure surfaced from the network, mirroring the hint a
/// user needs most often when a testnet call dies.
pub const CONNECTIVITY_HINT: &str = ", check your connection to the RPC endpoint";

/// The success banner after a mint lands.
pub const MINT_SUCCESS: &str = "You just got yourself an NFT";

/// The single message slot of the UI. Holding error and success in one enum
/// makes them mutually exclusive by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    None,
    Error(String),
    Success(String),
}

impl Banner {
    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Banner::Success(_))
    }
}

/// Coarse render state derived from the session, never stored directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Error,
    Success,
}

/// A `Session` owns everything the terminal renders: the adopted wallet
/// account, the last known token supply and the banner. All mutation happens
/// through its methods so the invariants hold at every render point.
pub struct Session<C> {
    collection: C,
    wallet: WalletStore,
    expected_chain_id: String,
    account: Option<AccountId>,
    signer: Option<InMemorySigner>,
    supply: u128,
    last_transaction: Option<CryptoHash>,
    last_minted: Vec<TokenId>,
    busy: bool,
    banner: Banner,
}

impl<C: Collection> Session<C> {
    pub fn new(collection: C, wallet: WalletStore, expected_chain_id: impl Into<String>) -> Self {
        Self {
            collection,
            wallet,
            expected_chain_id: expected_chain_id.into(),
            account: None,
            signer: None,
            supply: 0,
            last_transaction: None,
            last_minted: Vec::new(),
            busy: false,
            banner: Banner::None,
        }
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.account.as_ref()
    }

    /// Account id shortened for display, once connected.
    pub fn account_display(&self) -> Option<String> {
        self.account.as_ref().map(links::truncate_account)
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn supply(&self) -> u128 {
        self.supply
    }

    pub fn last_transaction(&self) -> Option<&CryptoHash> {
        self.last_transaction.as_ref()
    }

    pub fn last_minted(&self) -> &[TokenId] {
        &self.last_minted
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            return Phase::Loading;
        }
        match self.banner {
            Banner::Error(_) => Phase::Error,
            Banner::Success(_) => Phase::Success,
            Banner::None => Phase::Idle,
        }
    }

    /// Whether a wallet is installed at all, before any connection attempt.
    pub fn wallet_present(&self) -> bool {
        self.wallet.is_present()
    }

    /// Clear the banner without touching anything else.
    pub fn dismiss(&mut self) {
        self.banner = Banner::None;
    }

    /// Drop back to the signed-out initial state. Mirrors a full page reload:
    /// everything derived from the wallet is forgotten, the supply stays until
    /// the next refresh overwrites it.
    pub fn reset(&mut self) {
        self.account = None;
        self.signer = None;
        self.last_transaction = None;
        self.last_minted.clear();
        self.busy = false;
        self.banner = Banner::None;
    }

    fn fail(&mut self, err: impl std::fmt::Display) {
        self.banner = Banner::Error(format!("{}{}", err, CONNECTIVITY_HINT));
    }

    /// Check that the node we talk to is on the network we expect. A node on
    /// the wrong chain would happily answer views and broadcast transactions,
    /// so this runs before any account gets adopted.
    pub async fn verify_network(&self) -> Result<bool> {
        let chain_id = self.collection.chain_id().await?;
        Ok(chain_id == self.expected_chain_id)
    }

    /// Startup check: verify the chain id and surface the mismatch banner if
    /// it is off, so a mispointed node is visible before any user action.
    pub async fn check_network(&mut self) {
        match self.verify_network().await {
            Ok(true) => {}
            Ok(false) => self.banner = Banner::Error(self.network_mismatch()),
            Err(e) => self.fail(e),
        }
    }

    fn network_mismatch(&self) -> String {
        format!("connected node is not on {}", self.expected_chain_id)
    }

    /// Startup check: adopt an already-provisioned account if one exists. A
    /// missing wallet surfaces the one-shot "no wallet" banner; a wallet with
    /// no accounts is only logged, since nothing was user-initiated yet.
    pub async fn check_wallet(&mut self) {
        if !self.wallet.is_present() {
            self.banner = Banner::Error(NO_WALLET.into());
            return;
        }
        let account = match self.wallet.detect() {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!("credentials store has no accounts");
                return;
            }
            Err(e) => {
                tracing::warn!(err = %e, "could not scan credentials store");
                return;
            }
        };
        match self.wallet.load(&account) {
            Ok(signer) => {
                self.account = Some(account);
                self.signer = Some(signer);
            }
            Err(e) => {
                tracing::warn!(err = %e, account = %account, "could not load credentials");
                return;
            }
        }
        self.refresh_supply().await;
    }

    /// Adopt the first signed-in wallet account and pull the current supply.
    /// Every failure path lands in the banner rather than bubbling out, since
    /// connect is driven straight from user input.
    pub async fn connect(&mut self) {
        if !self.wallet.is_present() {
            self.banner = Banner::Error(NO_WALLET.into());
            return;
        }

        self.busy = true;
        let connected = self.try_connect().await;
        self.busy = false;

        if let Err(e) = connected {
            self.fail(e);
        }
    }

    async fn try_connect(&mut self) -> Result<()> {
        if !self.verify_network().await? {
            self.banner = Banner::Error(self.network_mismatch());
            return Ok(());
        }

        let account = match self.wallet.detect()? {
            Some(account) => account,
            None => {
                self.banner = Banner::Error(NO_ACCOUNTS.into());
                return Ok(());
            }
        };

        let signer = self.wallet.load(&account)?;
        self.account = Some(account);
        self.signer = Some(signer);
        self.banner = Banner::None;
        self.supply = self.collection.total_supply().await?;
        Ok(())
    }

    /// Re-read the token supply from the collection. The busy flag clears on
    /// both the success and the failure path.
    pub async fn refresh_supply(&mut self) {
        self.busy = true;
        let refreshed = self.collection.total_supply().await;
        self.busy = false;

        match refreshed {
            Ok(supply) => self.supply = supply,
            Err(e) => self.fail(e),
        }
    }

    /// Mint one token to the connected account. No-op while another operation
    /// is in flight, matching the disabled mint button during loading.
    pub async fn mint(&mut self) {
        if self.busy {
            return;
        }
        let signer = match &self.signer {
            Some(signer) => signer.clone(),
            None => {
                self.banner = Banner::Error(NOT_CONNECTED.into());
                return;
            }
        };

        self.busy = true;
        self.banner = Banner::None;
        let minted = self.collection.mint(&signer).await;

        match minted {
            Ok(outcome) => {
                self.last_transaction = Some(outcome.transaction_hash);
                self.last_minted = outcome.token_ids().into_iter().cloned().collect();
                // Refresh before announcing so the success banner never shows
                // next to a stale count.
                match self.collection.total_supply().await {
                    Ok(supply) => {
                        self.supply = supply;
                        self.banner = Banner::Success(MINT_SUCCESS.into());
                    }
                    Err(e) => self.fail(e),
                }
            }
            Err(e) => self.fail(e),
        }
        self.busy = false;
    }

    /// Re-scan the wallet and network for changes out from under us. Signing
    /// out of every account or landing on a different chain resets the session
    /// entirely; switching accounts adopts the new first account in place.
    pub async fn revalidate(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        if !self.verify_network().await? {
            self.reset();
            return Ok(());
        }

        let accounts = self.wallet.accounts()?;
        if accounts.is_empty() {
            self.reset();
            return Ok(());
        }

        let first = &accounts[0];
        if Some(first) != self.account.as_ref() {
            let signer = self.wallet.load(first)?;
            self.account = Some(first.clone());
            self.signer = Some(signer);
            self.last_transaction = None;
            self.last_minted.clear();
            self.banner = Banner::None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use near_primitives::views::FinalExecutionStatus;
    use test_log::test;

    use super::*;
    use crate::error::{Error, RpcErrorKind};
    use crate::events;
    use crate::result::MintOutcome;
    use crate::types::NearGas;

    #[test]
    fn banner_starts_empty() {
        let banner = Banner::default();
        assert!(!banner.is_error());
        assert!(!banner.is_success());
    }

    #[test]
    fn banner_cannot_be_error_and_success_at_once() {
        let banner = Banner::Error("boom".into());
        assert!(banner.is_error());
        assert!(!banner.is_success());

        let banner = Banner::Success(MINT_SUCCESS.into());
        assert!(banner.is_success());
        assert!(!banner.is_error());
    }

    #[derive(Clone)]
    struct FakeCollection {
        chain_id: Arc<Mutex<String>>,
        supply: Arc<Mutex<u128>>,
        fail_views: Arc<AtomicBool>,
        fail_mints: Arc<AtomicBool>,
    }

    impl FakeCollection {
        fn new(chain_id: &str, supply: u128) -> Self {
            Self {
                chain_id: Arc::new(Mutex::new(chain_id.into())),
                supply: Arc::new(Mutex::new(supply)),
                fail_views: Arc::new(AtomicBool::new(false)),
                fail_mints: Arc::new(AtomicBool::new(false)),
            }
        }

        fn set_chain_id(&self, chain_id: &str) {
            *self.chain_id.lock().unwrap() = chain_id.into();
        }
    }

    #[async_trait]
    impl Collection for FakeCollection {
        async fn chain_id(&self) -> Result<String> {
            Ok(self.chain_id.lock().unwrap().clone())
        }

        async fn total_supply(&self) -> Result<u128> {
            if self.fail_views.load(Ordering::SeqCst) {
                return Err(RpcErrorKind::QueryFailure
                    .with_msg("fake rpc is down")
                    .into());
            }
            Ok(*self.supply.lock().unwrap())
        }

        async fn mint(&self, signer: &InMemorySigner) -> Result<MintOutcome> {
            if self.fail_mints.load(Ordering::SeqCst) {
                return Err(Error::ExecutionError(
                    "Smart contract panicked: all tokens are gone".into(),
                ));
            }
            let mut supply = self.supply.lock().unwrap();
            *supply += 1;
            let token_id = format!("fake-{}", *supply);
            let logs = vec![format!(
                "EVENT_JSON:{{\"standard\":\"nep171\",\"version\":\"nft-1.0.0\",\
                 \"event\":\"nft_mint\",\"data\":[{{\"owner_id\":\"{}\",\
                 \"token_ids\":[\"{}\"]}}]}}",
                signer.account_id(),
                token_id
            )];
            let events = events::extract_mint_events(&logs);
            Ok(MintOutcome {
                transaction_hash: CryptoHash([1; 32]),
                total_gas_burnt: NearGas::from_tgas(3),
                logs,
                events,
                status: FinalExecutionStatus::SuccessValue(Vec::new()),
            })
        }
    }

    const CREDENTIALS: &str = r#"{
        "account_id": "alice.testnet",
        "public_key": "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847",
        "private_key": "ed25519:3KyUuch8pYP47krBq4DosFEVBMR5wDTMQ8AThzM8kAEcBQEpsPdYTZ2FPX5ZnSoLrerjwg66hwwJaW1wHzprd5k3"
    }"#;

    fn write_credentials(dir: &Path, account_id: &str) {
        let body = CREDENTIALS.replace("alice.testnet", account_id);
        std::fs::write(dir.join(format!("{}.json", account_id)), body).unwrap();
    }

    fn session_at(
        dir: &Path,
        collection: FakeCollection,
    ) -> Session<FakeCollection> {
        Session::new(collection, WalletStore::new(dir), "testnet")
    }

    #[test(tokio::test)]
    async fn connect_without_wallet_reports_missing_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(
            &dir.path().join("does-not-exist"),
            FakeCollection::new("testnet", 5),
        );

        session.connect().await;

        assert!(!session.is_connected());
        assert_eq!(session.banner(), &Banner::Error(NO_WALLET.into()));
        assert_eq!(session.phase(), Phase::Error);
    }

    #[test(tokio::test)]
    async fn connect_without_accounts_reports_empty_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 5));

        session.connect().await;

        assert!(!session.is_connected());
        assert_eq!(session.banner(), &Banner::Error(NO_ACCOUNTS.into()));
    }

    #[test(tokio::test)]
    async fn connect_adopts_first_account_and_reads_supply() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "bob.testnet");
        write_credentials(dir.path(), "alice.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 42));

        session.connect().await;

        assert_eq!(session.account().unwrap().as_str(), "alice.testnet");
        assert_eq!(session.supply(), 42);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.busy());
    }

    #[test(tokio::test)]
    async fn connect_refuses_wrong_chain() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "alice.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("mainnet", 42));

        session.connect().await;

        assert!(!session.is_connected());
        match session.banner() {
            Banner::Error(msg) => assert!(msg.contains("not on testnet"), "got: {msg}"),
            other => panic!("expected error banner, got {other:?}"),
        }
    }

    #[test(tokio::test)]
    async fn mint_before_connect_reports_not_connected() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 0));

        session.mint().await;

        assert_eq!(session.banner(), &Banner::Error(NOT_CONNECTED.into()));
    }

    #[test(tokio::test)]
    async fn mint_success_updates_supply_before_announcing() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "alice.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 42));

        session.connect().await;
        session.mint().await;

        assert_eq!(session.supply(), 43);
        assert_eq!(session.banner(), &Banner::Success(MINT_SUCCESS.into()));
        assert_eq!(session.phase(), Phase::Success);
        assert_eq!(session.last_transaction(), Some(&CryptoHash([1; 32])));
        assert_eq!(session.last_minted(), ["fake-43".to_string()]);
        assert!(!session.busy());
    }

    #[test(tokio::test)]
    async fn mint_failure_lands_in_banner_with_hint() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "alice.testnet");
        let collection = FakeCollection::new("testnet", 42);
        collection.fail_mints.store(true, Ordering::SeqCst);
        let mut session = session_at(dir.path(), collection);

        session.connect().await;
        session.mint().await;

        match session.banner() {
            Banner::Error(msg) => {
                assert!(msg.contains("Smart contract panicked"), "got: {msg}");
                assert!(msg.ends_with(CONNECTIVITY_HINT), "got: {msg}");
            }
            other => panic!("expected error banner, got {other:?}"),
        }
        assert!(!session.busy());
        assert!(session.last_transaction().is_none());
    }

    #[test(tokio::test)]
    async fn refresh_failure_clears_busy_and_keeps_old_supply() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "alice.testnet");
        let collection = FakeCollection::new("testnet", 42);
        let mut session = session_at(dir.path(), collection.clone());

        session.connect().await;
        collection.fail_views.store(true, Ordering::SeqCst);
        session.refresh_supply().await;

        assert_eq!(session.supply(), 42);
        assert!(session.banner().is_error());
        assert!(!session.busy());
    }

    #[test(tokio::test)]
    async fn dismiss_clears_the_banner() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 0));

        session.mint().await;
        assert!(session.banner().is_error());

        session.dismiss();
        assert_eq!(session.banner(), &Banner::None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test(tokio::test)]
    async fn revalidate_resets_when_all_accounts_sign_out() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_credentials(dir.path(), "alice.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 7));

        session.connect().await;
        assert!(session.is_connected());

        std::fs::remove_file(dir.path().join("alice.testnet.json"))?;
        session.revalidate().await?;

        assert!(!session.is_connected());
        assert_eq!(session.banner(), &Banner::None);
        Ok(())
    }

    #[test(tokio::test)]
    async fn check_wallet_adopts_provisioned_account_silently() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "alice.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 9));

        session.check_wallet().await;

        assert_eq!(session.account().unwrap().as_str(), "alice.testnet");
        assert_eq!(session.supply(), 9);
        assert_eq!(session.banner(), &Banner::None);
    }

    #[test(tokio::test)]
    async fn check_wallet_surfaces_missing_wallet_on_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(
            &dir.path().join("does-not-exist"),
            FakeCollection::new("testnet", 9),
        );

        session.check_wallet().await;

        assert!(!session.is_connected());
        assert_eq!(session.banner(), &Banner::Error(NO_WALLET.into()));
        assert_eq!(session.phase(), Phase::Error);
    }

    #[test(tokio::test)]
    async fn check_wallet_empty_wallet_stays_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 9));

        session.check_wallet().await;

        assert!(!session.is_connected());
        assert_eq!(session.banner(), &Banner::None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test(tokio::test)]
    async fn check_network_surfaces_mismatch_before_any_action() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("mainnet", 9));

        session.check_network().await;

        match session.banner() {
            Banner::Error(msg) => assert!(msg.contains("not on testnet"), "got: {msg}"),
            other => panic!("expected error banner, got {other:?}"),
        }
    }

    #[test(tokio::test)]
    async fn check_network_stays_quiet_on_the_right_chain() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 9));

        session.check_network().await;

        assert_eq!(session.banner(), &Banner::None);
    }

    #[test(tokio::test)]
    async fn revalidate_resets_when_the_chain_changes() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_credentials(dir.path(), "alice.testnet");
        let collection = FakeCollection::new("testnet", 7);
        let mut session = session_at(dir.path(), collection.clone());

        session.connect().await;
        assert!(session.is_connected());

        collection.set_chain_id("mainnet");
        session.revalidate().await?;

        assert!(!session.is_connected());
        Ok(())
    }

    #[test(tokio::test)]
    async fn revalidate_switches_to_new_first_account() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_credentials(dir.path(), "bob.testnet");
        let mut session = session_at(dir.path(), FakeCollection::new("testnet", 7));

        session.connect().await;
        assert_eq!(session.account().unwrap().as_str(), "bob.testnet");

        write_credentials(dir.path(), "alice.testnet");
        session.revalidate().await?;

        assert_eq!(session.account().unwrap().as_str(), "alice.testnet");
        Ok(())
    }
}
