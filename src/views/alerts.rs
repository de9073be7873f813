//! Alerts panel: low-stock and near-expiry warnings from `GET /alerts`.

use serde::Serialize;

use crate::models::{AlertSet, LowStockAlert, NearExpiryAlert};

pub const ALL_CLEAR_MESSAGE: &str = "All medicines are in good condition.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum AlertSection {
    LowStock(Vec<LowStockAlert>),
    NearExpiry(Vec<NearExpiryAlert>),
}

impl AlertSection {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::LowStock(_) => "Low Stock",
            Self::NearExpiry(_) => "Near Expiry",
        }
    }

    /// One display line per entry.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::LowStock(entries) => entries
                .iter()
                .map(|a| format!("{} (Qty: {})", a.name, a.quantity))
                .collect(),
            Self::NearExpiry(entries) => entries
                .iter()
                .map(|a| format!("{} (Exp: {})", a.name, a.expiry_date))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "sections", rename_all = "snake_case")]
pub enum AlertsModel {
    /// Nothing to warn about; only the positive message is shown.
    AllClear,
    /// Non-empty sections, low stock first.
    Warnings(Vec<AlertSection>),
}

pub fn build_alerts(alerts: &AlertSet) -> AlertsModel {
    if alerts.is_empty() {
        return AlertsModel::AllClear;
    }

    let mut sections = Vec::with_capacity(2);
    if !alerts.low_stock().is_empty() {
        sections.push(AlertSection::LowStock(alerts.low_stock().to_vec()));
    }
    if !alerts.near_expiry().is_empty() {
        sections.push(AlertSection::NearExpiry(alerts.near_expiry().to_vec()));
    }
    AlertsModel::Warnings(sections)
}
