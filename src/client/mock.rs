use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{FetchError, InventoryApi};
use crate::models::{AlertSet, Medicine, MedicineInput};

/// In-memory inventory for testing: records every request it serves.
pub struct MockInventoryApi {
    medicines: Mutex<Vec<Medicine>>,
    alerts: AlertSet,
    offline: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl MockInventoryApi {
    pub fn new(medicines: Vec<Medicine>) -> Self {
        Self {
            medicines: Mutex::new(medicines),
            alerts: AlertSet::default(),
            offline: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_alerts(mut self, alerts: AlertSet) -> Self {
        self.alerts = alerts;
        self
    }

    /// While offline every call fails with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Requests served so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, request: String) -> Result<(), FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Connection("mock://inventory".into()));
        }
        Ok(())
    }

    fn inventory(&self) -> Result<std::sync::MutexGuard<'_, Vec<Medicine>>, FetchError> {
        self.medicines
            .lock()
            .map_err(|_| FetchError::HttpClient("mock inventory lock poisoned".into()))
    }
}

impl InventoryApi for MockInventoryApi {
    fn list_medicines(&self) -> Result<Vec<Medicine>, FetchError> {
        self.record("GET /medicines".into())?;
        Ok(self.inventory()?.clone())
    }

    fn delete_medicine(&self, medicine_id: i64) -> Result<(), FetchError> {
        self.record(format!("DELETE /medicines/{medicine_id}"))?;
        self.inventory()?.retain(|m| m.medicine_id != medicine_id);
        Ok(())
    }

    fn fetch_alerts(&self) -> Result<AlertSet, FetchError> {
        self.record("GET /alerts".into())?;
        Ok(self.alerts.clone())
    }

    fn create_medicine(&self, input: &MedicineInput) -> Result<i64, FetchError> {
        self.record("POST /medicines".into())?;
        let mut inventory = self.inventory()?;
        let medicine_id = inventory.iter().map(|m| m.medicine_id).max().unwrap_or(0) + 1;
        inventory.push(Medicine {
            medicine_id,
            name: input.name.clone(),
            batch_number: input.batch_number.clone(),
            expiry_date: input.expiry_date,
            quantity: input.quantity,
            supplier_id: input.supplier_id.clone(),
            category_id: Some(input.category_id),
            price: Some(input.price),
        });
        Ok(medicine_id)
    }

    fn update_medicine(&self, medicine_id: i64, input: &MedicineInput) -> Result<(), FetchError> {
        self.record(format!("PUT /medicines/{medicine_id}"))?;
        let mut inventory = self.inventory()?;
        if let Some(existing) = inventory.iter_mut().find(|m| m.medicine_id == medicine_id) {
            existing.name = input.name.clone();
            existing.batch_number = input.batch_number.clone();
            existing.expiry_date = input.expiry_date;
            existing.quantity = input.quantity;
            existing.supplier_id = input.supplier_id.clone();
            existing.category_id = Some(input.category_id);
            existing.price = Some(input.price);
        }
        Ok(())
    }

    fn search_medicines(&self, query: &str) -> Result<Vec<Medicine>, FetchError> {
        self.record(format!("GET /search?q={query}"))?;
        let needle = query.to_lowercase();
        Ok(self
            .inventory()?
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.batch_number.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
