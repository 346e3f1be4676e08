use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Longest display name the token metadata program accepts
pub const MAX_NAME_LENGTH: usize = 32;

/// Longest symbol the token metadata program accepts
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Royalties are expressed in basis points, so 100% is the ceiling
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 10_000;

/// Off-chain NFT metadata document served at a target URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_fee_basis_points: Option<u16>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    /// Fields this tool does not interpret, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NftMetadata {
    /// Check the fields a mint cannot proceed without
    ///
    /// Returns a short reason on failure; callers record the item as
    /// invalid without minting.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!("name exceeds {MAX_NAME_LENGTH} characters"));
        }
        if self.symbol.chars().count() > MAX_SYMBOL_LENGTH {
            return Err(format!("symbol exceeds {MAX_SYMBOL_LENGTH} characters"));
        }
        if let Some(fee) = self.seller_fee_basis_points {
            if fee > MAX_SELLER_FEE_BASIS_POINTS {
                return Err(format!(
                    "seller_fee_basis_points {fee} exceeds {MAX_SELLER_FEE_BASIS_POINTS}"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: Value) -> NftMetadata {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_metadata() {
        let meta = metadata(serde_json::json!({
            "name": "Cosmic Cat #1",
            "symbol": "CCAT",
            "image": "https://example.org/1.png",
            "seller_fee_basis_points": 500,
            "collection": { "name": "Cosmic Cats" }
        }));

        assert!(meta.validate().is_ok());
        assert!(meta.extra.contains_key("collection"));
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let meta = metadata(serde_json::json!({ "symbol": "CCAT" }));
        assert_eq!(meta.validate().unwrap_err(), "name is empty");
    }

    #[test]
    fn test_long_name_is_invalid() {
        let meta = metadata(serde_json::json!({ "name": "x".repeat(33) }));
        assert!(meta.validate().unwrap_err().contains("name exceeds"));
    }

    #[test]
    fn test_long_symbol_is_invalid() {
        let meta = metadata(serde_json::json!({ "name": "ok", "symbol": "TOOLONGSYMBOL" }));
        assert!(meta.validate().unwrap_err().contains("symbol"));
    }

    #[test]
    fn test_royalty_over_100_percent_is_invalid() {
        let meta = metadata(serde_json::json!({ "name": "ok", "seller_fee_basis_points": 10_001 }));
        assert!(meta.validate().is_err());
    }
}
