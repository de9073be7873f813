//! Client-side table filters. Both only toggle row visibility.

use crate::models::StockCategory;

use super::medicine_list::MedicineTable;

/// Show rows whose text contains `text`, case-insensitively.
pub fn search(table: &mut MedicineTable, text: &str) {
    let needle = text.to_lowercase();
    for row in &mut table.rows {
        row.visible = row.text_content().to_lowercase().contains(&needle);
    }
}

/// Show rows in `category` (`expired`, `near`, `low`); empty shows all.
///
/// An unknown category matches no row.
pub fn filter_by_category(table: &mut MedicineTable, category: &str) {
    let wanted = match StockCategory::parse_filter(category) {
        Ok(None) => {
            for row in &mut table.rows {
                row.visible = true;
            }
            return;
        }
        Ok(Some(category)) => Some(category.status()),
        Err(e) => {
            tracing::debug!(error = %e, "Unknown category filter");
            None
        }
    };

    for row in &mut table.rows {
        row.visible = wanted.is_some() && row.status == wanted;
    }
}
