//! Inventory dashboard: drives the views against the API and writes
//! their output into a [`Page`].
//!
//! Every view fetches for itself; a failed fetch is logged and leaves the
//! view's previous output on the page.

use chrono::NaiveDate;

use crate::client::{FetchError, InventoryApi};
use crate::config::DashboardConfig;
use crate::page::{Page, PageLayout};
use crate::views::{
    build_alerts, build_chart, build_medicine_table, edit_location, filter_by_category, search,
    summarize, DELETE_CONFIRMATION, DELETE_NOTICE,
};

/// User interaction needed by the delete action.
pub trait Prompt {
    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> bool;
    /// Show a message.
    fn notify(&self, message: &str);
}

/// Confirms everything and logs the notice. Backs the CLI's `--yes`.
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Today's date on the local clock.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct InventoryDashboard<A: InventoryApi> {
    api: A,
    config: DashboardConfig,
    page: Page,
    clock: fn() -> NaiveDate,
}

impl<A: InventoryApi> InventoryDashboard<A> {
    pub fn new(api: A, config: DashboardConfig, layout: PageLayout) -> Self {
        Self {
            api,
            config,
            page: Page::new(layout),
            clock: local_today,
        }
    }

    /// Replace the date source used for status classification.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Render list, alerts and summary, in that order.
    pub fn init(&mut self) {
        tracing::info!("Initializing dashboard");
        self.render_medicine_list();
        self.render_alerts();
        self.render_summary();
    }

    /// Skipped entirely, fetch included, when the page has no table.
    pub fn render_medicine_list(&mut self) {
        if !self.page.layout.medicine_table {
            tracing::debug!("No medicine table on page");
            return;
        }
        if let Err(e) = self.try_render_medicine_list() {
            tracing::error!(error = %e, "Error fetching medicines");
        }
    }

    pub fn render_alerts(&mut self) {
        if !self.page.layout.alerts {
            return;
        }
        if let Err(e) = self.try_render_alerts() {
            tracing::error!(error = %e, "Error fetching alerts");
        }
    }

    pub fn render_summary(&mut self) {
        if !self.page.layout.has_summary() {
            return;
        }
        if let Err(e) = self.try_render_summary() {
            tracing::error!(error = %e, "Error loading summary");
        }
    }

    fn try_render_medicine_list(&mut self) -> Result<(), FetchError> {
        let medicines = self.api.list_medicines()?;
        let table = build_medicine_table(&medicines, (self.clock)());
        let rows = table.len();
        self.page.set_medicine_table(table);
        // A fresh table drops any previous filtering.
        self.page.search_text.clear();
        self.page.category.clear();
        tracing::info!(rows, "Medicine table rendered");
        Ok(())
    }

    fn try_render_alerts(&mut self) -> Result<(), FetchError> {
        let alerts = self.api.fetch_alerts()?;
        tracing::debug!(
            low_stock = alerts.low_stock().len(),
            near_expiry = alerts.near_expiry().len(),
            "Alerts fetched"
        );
        self.page.set_alerts(build_alerts(&alerts));
        Ok(())
    }

    fn try_render_summary(&mut self) -> Result<(), FetchError> {
        let medicines = self.api.list_medicines()?;
        let counts = summarize(&medicines, (self.clock)());
        tracing::debug!(
            total = counts.total,
            expired = counts.expired,
            low_stock = counts.low_stock,
            "Summary computed"
        );
        self.page.set_counts(&counts);
        self.page.set_chart(build_chart(&counts));
        Ok(())
    }

    /// Search box input. No-op without a search input or table.
    ///
    /// Overrides any category filter, so the select is reset.
    pub fn search(&mut self, text: &str) {
        if !self.page.layout.search_input {
            return;
        }
        self.page.search_text = text.to_string();
        self.page.category.clear();
        if let Some(table) = self.page.medicine_table.as_mut() {
            search(table, text);
        }
    }

    /// Category select change. No-op without a category select or table.
    ///
    /// Overrides any search, so the search input is reset.
    pub fn filter_by_category(&mut self, category: &str) {
        if !self.page.layout.category_filter {
            return;
        }
        self.page.category = category.to_string();
        self.page.search_text.clear();
        if let Some(table) = self.page.medicine_table.as_mut() {
            filter_by_category(table, category);
        }
    }

    /// Row delete action: confirm, delete, notify, then re-render the list.
    ///
    /// Failed deletes are logged and otherwise handled like successful ones.
    pub fn delete_medicine(&mut self, medicine_id: i64, prompt: &dyn Prompt) -> DeleteOutcome {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_medicine(medicine_id) {
            Ok(()) => tracing::info!(medicine_id, "Medicine deleted"),
            Err(e) => tracing::error!(medicine_id, error = %e, "Error deleting medicine"),
        }
        prompt.notify(DELETE_NOTICE);
        self.render_medicine_list();
        DeleteOutcome::Deleted
    }

    /// Put a one-off message at the top of the page.
    pub fn show_notice(&mut self, message: &str) {
        self.page.notice = Some(message.to_string());
    }

    /// Row edit action: where to navigate.
    pub fn edit_location(&self, medicine_id: i64) -> String {
        edit_location(&self.config.update_page, medicine_id)
    }
}
