use serde::{Deserialize, Serialize};

/// `low_stock` entry from `GET /alerts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub name: String,
    pub quantity: i64,
}

/// `near_expiry` entry from `GET /alerts`. The date is displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearExpiryAlert {
    pub name: String,
    pub expiry_date: String,
}

/// Backend-computed alert payload. Missing or null lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSet {
    #[serde(default)]
    low_stock: Option<Vec<LowStockAlert>>,
    #[serde(default)]
    near_expiry: Option<Vec<NearExpiryAlert>>,
}

impl AlertSet {
    pub fn new(low_stock: Vec<LowStockAlert>, near_expiry: Vec<NearExpiryAlert>) -> Self {
        Self {
            low_stock: Some(low_stock),
            near_expiry: Some(near_expiry),
        }
    }

    pub fn low_stock(&self) -> &[LowStockAlert] {
        self.low_stock.as_deref().unwrap_or_default()
    }

    pub fn near_expiry(&self) -> &[NearExpiryAlert] {
        self.near_expiry.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.low_stock().is_empty() && self.near_expiry().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_are_empty() {
        let set: AlertSet = serde_json::from_str("{}").unwrap();
        assert!(set.is_empty());
        assert!(set.low_stock().is_empty());
    }

    #[test]
    fn null_lists_are_empty() {
        let set: AlertSet =
            serde_json::from_str(r#"{"low_stock":null,"near_expiry":null}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn partial_payload_keeps_present_list() {
        let set: AlertSet = serde_json::from_str(
            r#"{"near_expiry":[{"name":"Insulin","expiry_date":"2025-07-01"}]}"#,
        )
        .unwrap();
        assert!(!set.is_empty());
        assert!(set.low_stock().is_empty());
        assert_eq!(set.near_expiry()[0].name, "Insulin");
        assert_eq!(set.near_expiry()[0].expiry_date, "2025-07-01");
    }
}
