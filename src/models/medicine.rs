use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::StockStatus;

/// Quantities strictly below this are low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Days-to-expiry strictly below this (and not negative) are near expiry.
pub const NEAR_EXPIRY_DAYS: i64 = 30;

/// Supplier reference as the backend sends it: numeric key or free-form code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupplierRef {
    Id(i64),
    Code(String),
}

impl std::fmt::Display for SupplierRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// Inventory record as returned by `GET /medicines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub medicine_id: i64,
    pub name: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub supplier_id: SupplierRef,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Medicine {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        days_until_expiry(self.expiry_date, today) < 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    pub fn status(&self, today: NaiveDate) -> Option<StockStatus> {
        classify(self.expiry_date, self.quantity, today)
    }
}

/// Whole days from `today` until expiry (negative once expired).
pub fn days_until_expiry(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

/// Status of a stock line. Expired beats near-expiry beats low.
pub fn classify(expiry_date: NaiveDate, quantity: u32, today: NaiveDate) -> Option<StockStatus> {
    let days = days_until_expiry(expiry_date, today);
    if days < 0 {
        Some(StockStatus::Expired)
    } else if days < NEAR_EXPIRY_DAYS {
        Some(StockStatus::NearExpiry)
    } else if quantity < LOW_STOCK_THRESHOLD {
        Some(StockStatus::Low)
    } else {
        None
    }
}

/// Body of `POST /medicines` and `PUT /medicines/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineInput {
    pub name: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub supplier_id: SupplierRef,
    pub category_id: i64,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn medicine(expiry: NaiveDate, quantity: u32) -> Medicine {
        Medicine {
            medicine_id: 1,
            name: "Paracetamol".into(),
            batch_number: "B-001".into(),
            expiry_date: expiry,
            quantity,
            supplier_id: SupplierRef::Id(3),
            category_id: None,
            price: None,
        }
    }

    #[test]
    fn expired_regardless_of_quantity() {
        let yesterday = today() - Duration::days(1);
        assert_eq!(classify(yesterday, 500, today()), Some(StockStatus::Expired));
        assert_eq!(classify(yesterday, 0, today()), Some(StockStatus::Expired));
    }

    #[test]
    fn expiring_today_is_near_expiry() {
        assert_eq!(classify(today(), 100, today()), Some(StockStatus::NearExpiry));
    }

    #[test]
    fn near_expiry_beats_low_stock() {
        let soon = today() + Duration::days(29);
        assert_eq!(classify(soon, 2, today()), Some(StockStatus::NearExpiry));
    }

    #[test]
    fn thirty_days_out_is_not_near_expiry() {
        let later = today() + Duration::days(30);
        assert_eq!(classify(later, 50, today()), None);
        assert_eq!(classify(later, 9, today()), Some(StockStatus::Low));
    }

    #[test]
    fn low_stock_threshold_is_strict() {
        let far = today() + Duration::days(365);
        assert_eq!(classify(far, 10, today()), None);
        assert_eq!(classify(far, 9, today()), Some(StockStatus::Low));
    }

    #[test]
    fn medicine_helpers_agree_with_classify() {
        let med = medicine(today() - Duration::days(3), 4);
        assert!(med.is_expired(today()));
        assert!(med.is_low_stock());
        assert_eq!(days_until_expiry(med.expiry_date, today()), -3);
        assert_eq!(med.status(today()), Some(StockStatus::Expired));

        let due_today = medicine(today(), 50);
        assert_eq!(days_until_expiry(due_today.expiry_date, today()), 0);
        assert!(!due_today.is_expired(today()));
        assert_eq!(due_today.status(today()), Some(StockStatus::NearExpiry));
    }

    #[test]
    fn deserializes_backend_row() {
        let json = r#"{
            "medicine_id": 7,
            "name": "Amoxicillin",
            "batch_number": "AMX-22",
            "expiry_date": "2026-01-31",
            "quantity": 40,
            "supplier_id": 2,
            "category_id": 1,
            "price": 12.5
        }"#;
        let med: Medicine = serde_json::from_str(json).unwrap();
        assert_eq!(med.medicine_id, 7);
        assert_eq!(med.expiry_date, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(med.supplier_id, SupplierRef::Id(2));
        assert_eq!(med.price, Some(12.5));
    }

    #[test]
    fn supplier_may_be_a_code_and_extras_may_be_missing() {
        let json = r#"{"medicine_id":1,"name":"A","batch_number":"x",
            "expiry_date":"2025-01-01","quantity":0,"supplier_id":"ACME"}"#;
        let med: Medicine = serde_json::from_str(json).unwrap();
        assert_eq!(med.supplier_id.to_string(), "ACME");
        assert!(med.category_id.is_none());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let json = r#"{"medicine_id":1,"name":"A","batch_number":"x",
            "expiry_date":"2025-01-01","quantity":-1,"supplier_id":1}"#;
        assert!(serde_json::from_str::<Medicine>(json).is_err());
    }
}
