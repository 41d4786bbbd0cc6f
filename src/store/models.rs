use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered position: instrument, share count, and price basis.
///
/// Immutable once created except for deletion. The serialized field names
/// are the canonical storage schema for the persisted holdings collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    /// Exchange-qualified symbol, e.g. "AAPL" or "7203.T"
    pub symbol: String,
    pub company_name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub registered_at: DateTime<Utc>,
}

/// Validated registration input. The store trusts this; constraint checks
/// (price >= 0.01, quantity >= 1) happen at the CLI boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDraft {
    pub symbol: String,
    pub company_name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holding_round_trips_with_camel_case_fields() {
        let holding = Holding {
            id: "abc123".to_string(),
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            price: dec!(189.79),
            quantity: 10,
            registered_at: Utc::now(),
        };

        let json = serde_json::to_string(&holding).unwrap();
        assert!(json.contains("\"companyName\""));
        assert!(json.contains("\"registeredAt\""));

        let back: Holding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, holding);
    }

    #[test]
    fn test_registered_at_survives_serialization_precision() {
        let holding = Holding {
            id: "x".to_string(),
            symbol: "MSFT".to_string(),
            company_name: "Microsoft Corporation".to_string(),
            price: dec!(416.06),
            quantity: 3,
            registered_at: Utc::now(),
        };

        let json = serde_json::to_string(&holding).unwrap();
        let back: Holding = serde_json::from_str(&json).unwrap();
        assert_eq!(back.registered_at, holding.registered_at);
    }
}
