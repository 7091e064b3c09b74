//! All builtin network types, traits and helpers.

mod builder;
mod custom;
mod info;
mod testnet;
mod variants;

pub use self::builder::NetworkBuilder;
pub use self::custom::Custom;
pub use self::info::Info;
pub use self::testnet::Testnet;
pub use self::variants::{Network, NetworkClient, NetworkInfo};
