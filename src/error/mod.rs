//! All errors that can occur within minterm, including but not limited to
//! the following: IO, RPC, parsing, and serialization errors.

mod parse;
mod rpc;

pub use self::parse::{ParseError, ParseErrorKind};
pub use self::rpc::{RpcError, RpcErrorKind};

/// Error type that minterm will make use of for all the errors
/// returned from this library
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("RPC error: {0}")]
    RpcError(#[from] RpcError),
    #[error("Execution error: {0}")]
    ExecutionError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Account error: {0}")]
    AccountError(String),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerializationError),
}

unsafe impl Sync for Error {}
unsafe impl Send for Error {}

/// Bytes specific errors such as serialization and deserialization
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SerializationError {
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
