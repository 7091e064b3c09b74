//! Wallet detection backed by the credentials store on disk.
//!
//! The near-cli family of tools writes one `{account_id}.json` file per signed
//! in account under `$HOME/.near-credentials/{network}/`. That directory is the
//! closest terminal analog to a browser wallet extension: its presence means a
//! wallet is installed, and the files inside are the signed-in accounts.

use std::path::{Path, PathBuf};

use crate::result::Result;
use crate::types::{AccountId, InMemorySigner};

/// A read-only view into the credentials directory of one network.
#[derive(Clone, Debug)]
pub struct WalletStore {
    dir: PathBuf,
}

impl WalletStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a wallet is present at all. A missing credentials directory
    /// means no near-cli style tool has ever signed in on this machine.
    pub fn is_present(&self) -> bool {
        self.dir.is_dir()
    }

    /// All signed-in accounts, sorted lexicographically by account id so the
    /// adopted account stays stable across rescans. Credential files that do
    /// not parse as an account id are skipped.
    pub fn accounts(&self) -> Result<Vec<AccountId>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut accounts = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            match stem.parse::<AccountId>() {
                Ok(id) => accounts.push(id),
                Err(e) => {
                    tracing::debug!(file = %path.display(), err = %e, "skipping credential file");
                }
            }
        }

        accounts.sort();
        Ok(accounts)
    }

    /// First signed-in account in sort order, if any. This is the account the
    /// session adopts on connect.
    pub fn detect(&self) -> Result<Option<AccountId>> {
        Ok(self.accounts()?.into_iter().next())
    }

    /// Load the full signing key for `account_id` from its credential file.
    pub fn load(&self, account_id: &AccountId) -> Result<InMemorySigner> {
        let path = self.dir.join(format!("{}.json", account_id));
        InMemorySigner::from_file(&path)
    }
}
