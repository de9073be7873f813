//! Medicine table: one row per medicine, tagged with its stock status.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Medicine, StockStatus};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this medicine?";
pub const DELETE_NOTICE: &str = "Medicine deleted!";

/// Column headers, in cell order.
pub const COLUMNS: [&str; 6] = ["ID", "Name", "Batch", "Expiry", "Quantity", "Supplier"];

/// A rendered table row. `visible` is toggled by the table filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineRow {
    pub medicine_id: i64,
    pub name: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub supplier: String,
    pub status: Option<StockStatus>,
    pub visible: bool,
}

impl MedicineRow {
    pub fn from_medicine(medicine: &Medicine, today: NaiveDate) -> Self {
        Self {
            medicine_id: medicine.medicine_id,
            name: medicine.name.clone(),
            batch_number: medicine.batch_number.clone(),
            expiry_date: medicine.expiry_date,
            quantity: medicine.quantity,
            supplier: medicine.supplier_id.to_string(),
            status: medicine.status(today),
            visible: true,
        }
    }

    /// Displayed cell values, matching `COLUMNS`.
    pub fn cells(&self) -> [String; 6] {
        [
            self.medicine_id.to_string(),
            self.name.clone(),
            self.batch_number.clone(),
            self.expiry_date.format("%Y-%m-%d").to_string(),
            self.quantity.to_string(),
            self.supplier.clone(),
        ]
    }

    /// Concatenated cell text, what the search box matches against.
    pub fn text_content(&self) -> String {
        self.cells().join(" ")
    }

    /// Row CSS class; empty when the row has no status.
    pub fn css_class(&self) -> &'static str {
        self.status.as_ref().map(StockStatus::as_str).unwrap_or("")
    }
}

/// The medicine table as last rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MedicineTable {
    pub rows: Vec<MedicineRow>,
}

impl MedicineTable {
    pub fn visible_rows(&self) -> impl Iterator<Item = &MedicineRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build a fresh table from the fetched list. Status is recomputed every time.
pub fn build_medicine_table(medicines: &[Medicine], today: NaiveDate) -> MedicineTable {
    MedicineTable {
        rows: medicines
            .iter()
            .map(|m| MedicineRow::from_medicine(m, today))
            .collect(),
    }
}

/// Navigation target of a row's edit action.
pub fn edit_location(update_page: &str, medicine_id: i64) -> String {
    format!("{update_page}?id={medicine_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SupplierRef;
    use crate::test_support::{days_from_today, medicine, mixed_inventory, today};

    #[test]
    fn one_row_per_medicine_in_order() {
        let table = build_medicine_table(&mixed_inventory(), today());
        let ids: Vec<i64> = table.rows.iter().map(|r| r.medicine_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(table.rows.iter().all(|r| r.visible));
    }

    #[test]
    fn rows_carry_status_classes() {
        let table = build_medicine_table(&mixed_inventory(), today());
        let classes: Vec<&str> = table.rows.iter().map(|r| r.css_class()).collect();
        assert_eq!(classes, vec!["expired", "near-expiry", "low", ""]);
    }

    #[test]
    fn status_follows_the_render_date() {
        let meds = vec![medicine(1, "Zinc", days_from_today(40), 50)];
        let now = build_medicine_table(&meds, today());
        assert_eq!(now.rows[0].status, None);
        let later = build_medicine_table(&meds, days_from_today(20));
        assert_eq!(later.rows[0].status, Some(StockStatus::NearExpiry));
    }

    #[test]
    fn cells_and_text_content() {
        let mut med = medicine(12, "Loratadine", days_from_today(90), 33);
        med.supplier_id = SupplierRef::Code("MEDSUP".into());
        let row = MedicineRow::from_medicine(&med, today());
        let cells = row.cells();
        assert_eq!(cells[0], "12");
        assert_eq!(cells[3], days_from_today(90).format("%Y-%m-%d").to_string());
        assert_eq!(cells[5], "MEDSUP");
        assert!(row.text_content().contains("Loratadine"));
        assert!(row.text_content().contains("BATCH-012"));
    }

    #[test]
    fn empty_list_gives_empty_table() {
        let table = build_medicine_table(&[], today());
        assert!(table.is_empty());
        assert_eq!(table.visible_rows().count(), 0);
    }

    #[test]
    fn edit_location_carries_id() {
        assert_eq!(
            edit_location("update_medicine.html", 7),
            "update_medicine.html?id=7"
        );
    }
}
