//! Types used in the minterm crate. A few of these are thin copies of
//! near_primitives types since those APIs are not yet stable. Once they are,
//! we can directly reference them here, so no changes on the library consumer
//! side is needed.

use std::fmt::{self, Debug, Display};
use std::path::Path;
use std::str::FromStr;

pub use near_account_id::AccountId;
pub use near_gas::NearGas;
pub use near_token::NearToken;
use serde::Deserialize;

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::result::Result;

/// Height of a specific block
pub type BlockHeight = u64;

/// Identifier of a single token within an NFT collection. NEP-171 token ids
/// are free-form strings chosen at mint time.
pub type TokenId = String;

fn from_base58(s: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    bs58::decode(s).into_vec().map_err(|err| err.into())
}

// type taken from near_primitives::hash::CryptoHash.
/// CryptoHash is type for storing the hash of a specific block or transaction.
#[derive(Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CryptoHash(pub [u8; 32]);

impl FromStr for CryptoHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = from_base58(s)
            .map_err(|e| ParseError::from_repr(ParseErrorKind::Unknown, e))?;
        Self::try_from(bytes)
    }
}

impl TryFrom<&[u8]> for CryptoHash {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 32 {
            return Err(ParseError::from_kind(ParseErrorKind::IncorrectHashLength {
                expected_length: 32,
                received_length: bytes.len(),
            })
            .into());
        }
        let mut buf = [0; 32];
        buf.copy_from_slice(bytes);
        Ok(CryptoHash(buf))
    }
}

impl TryFrom<Vec<u8>> for CryptoHash {
    type Error = Error;

    fn try_from(v: Vec<u8>) -> Result<Self, Self::Error> {
        <Self as TryFrom<&[u8]>>::try_from(v.as_ref())
    }
}

impl Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&bs58::encode(self.0).into_string(), f)
    }
}

impl From<near_primitives::hash::CryptoHash> for CryptoHash {
    fn from(hash: near_primitives::hash::CryptoHash) -> Self {
        Self(hash.0)
    }
}

/// On-disk shape of one credentials file written by `near login`. Some tools
/// write the key under `secret_key` instead of `private_key`, so both are
/// accepted.
#[derive(Debug, Deserialize)]
struct AccountKeyPair {
    account_id: AccountId,
    #[serde(alias = "secret_key")]
    private_key: near_crypto::SecretKey,
}

/// Signer that keeps the secret key in memory, adopted from a credentials
/// file provisioned out-of-band by `near login`.
#[derive(Clone)]
pub struct InMemorySigner {
    pub(crate) account_id: AccountId,
    pub(crate) secret_key: near_crypto::SecretKey,
}

impl InMemorySigner {
    pub fn from_secret_key(account_id: AccountId, secret_key: near_crypto::SecretKey) -> Self {
        Self {
            account_id,
            secret_key,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let pair: AccountKeyPair = serde_json::from_str(&content)
            .map_err(crate::error::SerializationError::SerdeError)?;

        Ok(Self::from_secret_key(pair.account_id, pair.private_key))
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn public_key(&self) -> near_crypto::PublicKey {
        self.secret_key.public_key()
    }
}

impl Debug for InMemorySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySigner")
            .field("account_id", &self.account_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_hash_base58_round_trip() -> anyhow::Result<()> {
        let hash = CryptoHash([7; 32]);
        let encoded = hash.to_string();
        assert_eq!(CryptoHash::from_str(&encoded)?, hash);
        Ok(())
    }

    #[test]
    fn crypto_hash_rejects_wrong_length() {
        let err = CryptoHash::from_str("2tV").expect_err("3 byte hash should not parse");
        assert!(err.to_string().contains("incorrect hash length"));
    }

    #[test]
    fn signer_from_credentials_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("alice.testnet.json");
        std::fs::write(
            &path,
            r#"{
                "account_id": "alice.testnet",
                "public_key": "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847",
                "private_key": "ed25519:3KyUuch8pYP47krBq4DosFEVBMR5wDTMQ8AThzM8kAEcBQEpsPdYTZ2FPX5ZnSoLrerjwg66hwwJaW1wHzprd5k3"
            }"#,
        )?;

        let signer = InMemorySigner::from_file(&path)?;
        assert_eq!(signer.account_id().as_str(), "alice.testnet");
        assert_eq!(
            signer.public_key().to_string(),
            "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847"
        );
        Ok(())
    }

    #[test]
    fn signer_accepts_secret_key_field() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bob.testnet.json");
        std::fs::write(
            &path,
            r#"{
                "account_id": "bob.testnet",
                "public_key": "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847",
                "secret_key": "ed25519:3KyUuch8pYP47krBq4DosFEVBMR5wDTMQ8AThzM8kAEcBQEpsPdYTZ2FPX5ZnSoLrerjwg66hwwJaW1wHzprd5k3"
            }"#,
        )?;

        let signer = InMemorySigner::from_file(&path)?;
        assert_eq!(signer.account_id().as_str(), "bob.testnet");
        Ok(())
    }
}
