use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::errors::Result;

/// Inputs of a draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Block hash keying the shuffle and the random sequence
    pub block_hash: String,
    /// First commitment seed, decoded from hex as-is
    pub commitment_seed_hex: String,
    /// Second commitment seed, base58 with version byte and checksum
    pub commitment_seed_base58: String,
    /// Number of items to shuffle and random values to draw
    pub item_count: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            block_hash: "00000000000000000001e07e0f880e4570ec3b8c6f413c689316b24816901368"
                .to_string(),
            commitment_seed_hex:
                "00000000000000000001e07e0f880e4570ec3b8c6f413c689316b24816901368".to_string(),
            commitment_seed_base58: "13aH1S8Nt5A7fbCVXFPChqWmBTs8tBUv2KWkdaaY8rpq".to_string(),
            item_count: 4,
        }
    }
}

impl DrawConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse a JSON document; missing fields take their default values
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let block_hash = lookup("FAIR_DRAW_BLOCK_HASH").unwrap_or(defaults.block_hash);

        let commitment_seed_hex =
            lookup("FAIR_DRAW_COMMITMENT_SEED_HEX").unwrap_or(defaults.commitment_seed_hex);

        let commitment_seed_base58 = lookup("FAIR_DRAW_COMMITMENT_SEED_BASE58")
            .unwrap_or(defaults.commitment_seed_base58);

        let item_count = lookup("FAIR_DRAW_ITEM_COUNT")
            .and_then(|s| match s.parse::<u32>() {
                Ok(count) => Some(count),
                Err(e) => {
                    warn!(value = %s, error = %e, "ignoring FAIR_DRAW_ITEM_COUNT");
                    None
                }
            })
            .unwrap_or(defaults.item_count);

        Self {
            block_hash,
            commitment_seed_hex,
            commitment_seed_base58,
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DrawConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, DrawConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = DrawConfig::from_lookup(lookup_from(&[
            ("FAIR_DRAW_BLOCK_HASH", "abcd"),
            ("FAIR_DRAW_ITEM_COUNT", "10"),
        ]));
        assert_eq!(config.block_hash, "abcd");
        assert_eq!(config.item_count, 10);
        assert_eq!(
            config.commitment_seed_base58,
            DrawConfig::default().commitment_seed_base58
        );
    }

    #[test]
    fn test_unparseable_count_keeps_default() {
        let config = DrawConfig::from_lookup(lookup_from(&[("FAIR_DRAW_ITEM_COUNT", "-3")]));
        assert_eq!(config.item_count, 4);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DrawConfig::from_json(r#"{"item_count": 0}"#).unwrap();
        assert_eq!(config.item_count, 0);
        assert_eq!(config.block_hash, DrawConfig::default().block_hash);

        assert!(DrawConfig::from_json("{").is_err());
    }
}
