//! Shared builders for unit tests.

use chrono::{Duration, NaiveDate};

use crate::models::{Medicine, SupplierRef};

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub(crate) fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(crate) fn medicine(id: i64, name: &str, expiry_date: NaiveDate, quantity: u32) -> Medicine {
    Medicine {
        medicine_id: id,
        name: name.to_string(),
        batch_number: format!("BATCH-{id:03}"),
        expiry_date,
        quantity,
        supplier_id: SupplierRef::Id(100 + id),
        category_id: Some(1),
        price: Some(9.99),
    }
}

/// One medicine per status plus a healthy one.
pub(crate) fn mixed_inventory() -> Vec<Medicine> {
    vec![
        medicine(1, "Amoxicillin", days_from_today(-10), 50),
        medicine(2, "Insulin Glargine", days_from_today(12), 40),
        medicine(3, "Salbutamol", days_from_today(200), 4),
        medicine(4, "Paracetamol", days_from_today(400), 120),
    ]
}
