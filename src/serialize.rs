//! Utility module used for deserializing data coming from contracts.

/// Deserializer used in convention with serde to deserialize objects that are
/// from string into a more concrete type. For example, NEP-171 contracts
/// return `U128` counters as JSON strings, and we do not need to directly
/// import `U128` from near_sdk, and instead can tell serde to deserialize it
/// using this module like so:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct DeserializableStruct {
///     #[serde(with = "crate::serialize::str")]
///     value: u128,
/// }
/// ```
pub mod str {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}
