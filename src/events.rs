//! Parsing of NEP-297 event log lines emitted by the collection contract.
//!
//! Mint contracts announce freshly minted tokens by writing a JSON payload
//! behind an `EVENT_JSON:` prefix into the execution logs. This module is the
//! receiving end of that convention: it picks the `nft_mint` events out of a
//! transaction's logs so they can be reported to the user. Malformed lines
//! are skipped, never surfaced as errors.

use serde::Deserialize;

use crate::types::{AccountId, TokenId};

/// Prefix mandated by NEP-297 for structured event log lines.
pub const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

const NFT_STANDARD_NAME: &str = "nep171";
const NFT_MINT_EVENT: &str = "nft_mint";

/// One `nft_mint` entry from an event's data array: who received which tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MintEvent {
    pub owner_id: AccountId,
    pub token_ids: Vec<TokenId>,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventLog {
    standard: String,
    #[allow(dead_code)]
    version: String,
    event: String,
    data: serde_json::Value,
}

/// Collect all mint events found in the given execution logs. Lines that are
/// not event lines, carry a different standard/event, or fail to parse are
/// skipped.
pub fn extract_mint_events(logs: &[String]) -> Vec<MintEvent> {
    logs.iter()
        .filter_map(|line| parse_line(line))
        .flatten()
        .collect()
}

fn parse_line(line: &str) -> Option<Vec<MintEvent>> {
    let raw = line.strip_prefix(EVENT_JSON_PREFIX)?;
    let event: EventLog = match serde_json::from_str(raw.trim()) {
        Ok(event) => event,
        Err(err) => {
            tracing::debug!(target: "minterm", %err, "skipping malformed event log line");
            return None;
        }
    };

    if event.standard != NFT_STANDARD_NAME || event.event != NFT_MINT_EVENT {
        return None;
    }

    match serde_json::from_value(event.data) {
        Ok(events) => Some(events),
        Err(err) => {
            tracing::debug!(target: "minterm", %err, "skipping nft_mint event with unexpected data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_line() -> String {
        concat!(
            "EVENT_JSON:{\"standard\":\"nep171\",\"version\":\"nft-1.0.0\",",
            "\"event\":\"nft_mint\",\"data\":[{\"owner_id\":\"alice.testnet\",",
            "\"token_ids\":[\"drop-42\"]}]}"
        )
        .to_string()
    }

    #[test]
    fn parses_well_formed_mint_event() {
        let events = extract_mint_events(&[mint_line()]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].owner_id.as_str(), "alice.testnet");
        assert_eq!(events[0].token_ids, vec!["drop-42".to_string()]);
        assert_eq!(events[0].memo, None);
    }

    #[test]
    fn skips_malformed_lines() {
        let logs = vec![
            "EVENT_JSON:{not json at all".to_string(),
            "Transfer 1 yoctoNEAR".to_string(),
            mint_line(),
        ];
        assert_eq!(extract_mint_events(&logs).len(), 1);
    }

    #[test]
    fn skips_other_standards_and_events() {
        let logs = vec![
            concat!(
                "EVENT_JSON:{\"standard\":\"nep141\",\"version\":\"ft-1.0.0\",",
                "\"event\":\"ft_mint\",\"data\":[]}"
            )
            .to_string(),
            concat!(
                "EVENT_JSON:{\"standard\":\"nep171\",\"version\":\"nft-1.0.0\",",
                "\"event\":\"nft_transfer\",\"data\":[]}"
            )
            .to_string(),
        ];
        assert!(extract_mint_events(&logs).is_empty());
    }

    #[test]
    fn multiple_entries_in_one_line() {
        let line = concat!(
            "EVENT_JSON:{\"standard\":\"nep171\",\"version\":\"nft-1.0.0\",",
            "\"event\":\"nft_mint\",\"data\":[",
            "{\"owner_id\":\"alice.testnet\",\"token_ids\":[\"a\",\"b\"]},",
            "{\"owner_id\":\"bob.testnet\",\"token_ids\":[\"c\"],\"memo\":\"gift\"}",
            "]}"
        )
        .to_string();

        let events = extract_mint_events(&[line]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].token_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(events[1].memo.as_deref(), Some("gift"));
    }
}
