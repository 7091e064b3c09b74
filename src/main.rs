use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use minterm::network::{Info, NetworkInfo};
use minterm::{
    explorer_account, explorer_transaction, marketplace_token, truncate_account, AccountId,
    AppConfig, Banner, Contract, MintWatcher, Session, WalletStore, SOCIAL_HANDLE, SOCIAL_URL,
};

/// The shared example collection caps out at 200 tokens, which is all the
/// supply line communicates.
const MAX_SUPPLY: u128 = 200;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;

    let mut builder = minterm::testnet();
    if let Some(rpc_url) = &config.rpc_url {
        builder = builder.rpc_addr(rpc_url);
    }
    if let Some(api_key) = &config.api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(dir) = &config.credentials_dir {
        builder = builder.keystore_path(dir.clone());
    }
    let worker = builder.await.context("failed to connect to the network")?;
    let info = worker.info().clone();

    let mut contract = Contract::new(config.contract_id.clone(), worker);
    if let Some(deposit) = config.mint_deposit {
        contract = contract.with_deposit(deposit);
    }

    let wallet = WalletStore::new(&info.keystore_path);
    let mut session = Session::new(contract.clone(), wallet, info.chain_id.clone());

    let (_watcher, mut notices) = MintWatcher::spawn(contract, config.poll_interval);

    println!("minterm - NFT minting on {}", info.name);
    println!(
        "collection: {} ({})",
        truncate_account(&config.contract_id),
        explorer_account(&info.explorer_url, &config.contract_id)
    );
    println!("follow @{} for drops ({})", SOCIAL_HANDLE, SOCIAL_URL);
    println!("commands: connect | mint | supply | dismiss | reset | quit");

    // Mount-time checks: adopt an already-provisioned wallet and make sure
    // the node is on the chain we expect, before any user action.
    session.check_wallet().await;
    session.check_network().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(&session, &info, &config.contract_id);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                // Wallet files can change out from under us at any time, so
                // every keypress revalidates before acting.
                if let Err(e) = session.revalidate().await {
                    tracing::warn!(err = %e, "wallet revalidation failed");
                }

                match line.trim() {
                    cmd @ ("connect" | "mint" | "supply") => {
                        // Network-bound commands take a moment; show the
                        // loading line before blocking on them.
                        println!("working...");
                        match cmd {
                            "connect" => session.connect().await,
                            "mint" => session.mint().await,
                            _ => session.refresh_supply().await,
                        }
                    }
                    "dismiss" => session.dismiss(),
                    "reset" => session.reset(),
                    "quit" | "exit" => break,
                    "" => {}
                    other => println!("unknown command: {}", other),
                }
                render(&session, &info, &config.contract_id);
            }
            // Watcher notices are informational only; they never touch the
            // session. The `supply` command re-reads the real count.
            notice = notices.recv() => {
                if let Some(notice) = notice {
                    if notice.minted > 0 {
                        println!(
                            "{} new token(s) minted, supply is now {}",
                            notice.minted, notice.supply
                        );
                    } else {
                        tracing::info!(supply = notice.supply, "observed collection supply");
                    }
                }
            }
        }
    }

    println!("bye!");
    Ok(())
}

fn render(session: &Session<Contract>, info: &Info, contract_id: &AccountId) {
    match session.account_display() {
        Some(account) => println!("wallet: {}", account),
        None => println!("wallet: not connected"),
    }
    println!("minted: {} / {}", session.supply(), MAX_SUPPLY);

    // Operations are awaited to completion before we get here, so rendering
    // only has the banner to show; the loading line prints at dispatch time.
    match session.banner() {
        Banner::Error(msg) => println!("error: {}", msg),
        Banner::Success(msg) => {
            println!("{}", msg);
            if let Some(hash) = session.last_transaction() {
                println!(
                    "transaction: {}",
                    explorer_transaction(&info.explorer_url, hash)
                );
            }
            for token_id in session.last_minted() {
                println!(
                    "token: {}",
                    marketplace_token(&info.marketplace_url, contract_id, token_id)
                );
            }
        }
        Banner::None => {}
    }
}
