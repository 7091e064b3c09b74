//! Background polling for supply changes on the collection.
//!
//! Other wallets mint against the same shared collection, so the counter on
//! screen goes stale the moment it renders. The watcher polls the collection
//! on an interval and pushes a notice over a channel whenever the supply
//! moves. Notices are informational: they get logged or printed, never fed
//! back into session state.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::contract::Collection;

/// One observed change in the collection's token supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintNotice {
    /// Total supply as of this observation.
    pub supply: u128,
    /// Tokens minted since the previous observation. Zero on the first
    /// observation, since there is nothing to diff against.
    pub minted: u128,
}

/// Handle to the polling task. Dropping the watcher aborts the task, so the
/// receiver never outlives its sender silently.
pub struct MintWatcher {
    handle: JoinHandle<()>,
}

impl MintWatcher {
    /// Spawn the poll loop against `collection`, emitting a [`MintNotice`] on
    /// every observed supply change. Poll failures are logged and skipped;
    /// transient RPC hiccups should not kill the loop.
    pub fn spawn<C>(
        collection: C,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<MintNotice>)
    where
        C: Collection + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut last: Option<u128> = None;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let supply = match collection.total_supply().await {
                    Ok(supply) => supply,
                    Err(e) => {
                        tracing::debug!(err = %e, "supply poll failed, will retry next tick");
                        continue;
                    }
                };

                if last == Some(supply) {
                    continue;
                }
                let minted = last.map_or(0, |prev| supply.saturating_sub(prev));
                last = Some(supply);

                if tx.send(MintNotice { supply, minted }).is_err() {
                    // Receiver is gone, nothing left to notify.
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }
}

impl Drop for MintWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
