//! The dashboard page: which elements exist, and what each currently shows.
//!
//! Views never touch the page directly; the dashboard writes their models
//! into the slots the layout provides. A missing element silently disables
//! whatever would have written to it.

use serde::Serialize;

use crate::views::{AlertsModel, ChartModel, MedicineTable, SummaryCounts};

/// Which page elements are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    pub medicine_table: bool,
    pub alerts: bool,
    pub total_count: bool,
    pub expired_count: bool,
    pub low_stock_count: bool,
    pub chart: bool,
    pub search_input: bool,
    pub category_filter: bool,
}

impl PageLayout {
    /// The full dashboard page.
    pub fn full() -> Self {
        Self {
            medicine_table: true,
            alerts: true,
            total_count: true,
            expired_count: true,
            low_stock_count: true,
            chart: true,
            search_input: true,
            category_filter: true,
        }
    }

    /// A page with the medicine table only (e.g. the inventory listing).
    pub fn table_only() -> Self {
        Self {
            medicine_table: true,
            alerts: false,
            total_count: false,
            expired_count: false,
            low_stock_count: false,
            chart: false,
            search_input: true,
            category_filter: true,
        }
    }
}

impl PageLayout {
    /// No elements at all. Row actions still work, nothing is rendered.
    pub fn empty() -> Self {
        Self {
            medicine_table: false,
            alerts: false,
            total_count: false,
            expired_count: false,
            low_stock_count: false,
            chart: false,
            search_input: false,
            category_filter: false,
        }
    }

    /// Any element the summary view writes into.
    pub fn has_summary(&self) -> bool {
        self.total_count || self.expired_count || self.low_stock_count || self.chart
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::full()
    }
}

/// Current contents of the page. `None` means not (yet) rendered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub layout: PageLayout,
    pub medicine_table: Option<MedicineTable>,
    pub alerts: Option<AlertsModel>,
    pub total_count: Option<usize>,
    pub expired_count: Option<usize>,
    pub low_stock_count: Option<usize>,
    pub chart: Option<ChartModel>,
    /// Value of the search input.
    pub search_text: String,
    /// Value of the category select (`""`, `expired`, `near`, `low`).
    pub category: String,
    /// One-off message from the last row action.
    pub notice: Option<String>,
}

impl Page {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Replace the table body. Returns false when the page has no table.
    pub fn set_medicine_table(&mut self, table: MedicineTable) -> bool {
        if !self.layout.medicine_table {
            return false;
        }
        self.medicine_table = Some(table);
        true
    }

    pub fn set_alerts(&mut self, alerts: AlertsModel) -> bool {
        if !self.layout.alerts {
            return false;
        }
        self.alerts = Some(alerts);
        true
    }

    /// Write each count into its element, skipping absent ones.
    pub fn set_counts(&mut self, counts: &SummaryCounts) {
        if self.layout.total_count {
            self.total_count = Some(counts.total);
        }
        if self.layout.expired_count {
            self.expired_count = Some(counts.expired);
        }
        if self.layout.low_stock_count {
            self.low_stock_count = Some(counts.low_stock);
        }
    }

    pub fn set_chart(&mut self, chart: ChartModel) -> bool {
        if !self.layout.chart {
            return false;
        }
        self.chart = Some(chart);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{build_chart, AlertsModel};

    #[test]
    fn absent_elements_are_not_written() {
        let mut page = Page::new(PageLayout::table_only());
        assert!(!page.set_alerts(AlertsModel::AllClear));
        assert!(!page.set_chart(build_chart(&SummaryCounts::default())));
        page.set_counts(&SummaryCounts {
            total: 3,
            expired: 1,
            low_stock: 1,
        });
        assert!(page.alerts.is_none());
        assert!(page.chart.is_none());
        assert!(page.total_count.is_none());
        assert!(page.set_medicine_table(MedicineTable::default()));
    }

    #[test]
    fn empty_layout_accepts_nothing() {
        let layout = PageLayout::empty();
        assert!(!layout.has_summary());
        let mut page = Page::new(layout);
        assert!(!page.set_medicine_table(MedicineTable::default()));
        assert!(!page.set_alerts(AlertsModel::AllClear));
        assert!(PageLayout::full().has_summary());
        assert!(!PageLayout::table_only().has_summary());
    }

    #[test]
    fn counts_written_individually() {
        let mut layout = PageLayout::full();
        layout.expired_count = false;
        let mut page = Page::new(layout);
        page.set_counts(&SummaryCounts {
            total: 5,
            expired: 2,
            low_stock: 1,
        });
        assert_eq!(page.total_count, Some(5));
        assert_eq!(page.expired_count, None);
        assert_eq!(page.low_stock_count, Some(1));
    }
}
