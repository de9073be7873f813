//! Inventory API client: the only network seam of the dashboard.
//!
//! `InventoryApi` is the trait views and the dashboard depend on;
//! `HttpInventoryClient` speaks to the real backend and
//! `MockInventoryApi` replays an in-memory inventory for tests.

pub mod http;
pub mod mock;

pub use http::*;
pub use mock::*;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{AlertSet, Medicine, MedicineInput};

/// Anything that goes wrong between issuing a request and holding decoded data.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Inventory API is not reachable at {0}")]
    Connection(String),

    #[error("Inventory API returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Operations the dashboard needs from the inventory backend.
pub trait InventoryApi: Send + Sync {
    /// `GET /medicines`
    fn list_medicines(&self) -> Result<Vec<Medicine>, FetchError>;

    /// `DELETE /medicines/{id}`. Any HTTP response counts as done.
    fn delete_medicine(&self, medicine_id: i64) -> Result<(), FetchError>;

    /// `GET /alerts`
    fn fetch_alerts(&self) -> Result<AlertSet, FetchError>;

    /// `POST /medicines`, returning the backend-assigned id.
    fn create_medicine(&self, input: &MedicineInput) -> Result<i64, FetchError>;

    /// `PUT /medicines/{id}`
    fn update_medicine(&self, medicine_id: i64, input: &MedicineInput) -> Result<(), FetchError>;

    /// `GET /search?q=`: backend match on name or batch number.
    fn search_medicines(&self, query: &str) -> Result<Vec<Medicine>, FetchError>;
}

impl<T: InventoryApi + ?Sized> InventoryApi for Arc<T> {
    fn list_medicines(&self) -> Result<Vec<Medicine>, FetchError> {
        (**self).list_medicines()
    }

    fn delete_medicine(&self, medicine_id: i64) -> Result<(), FetchError> {
        (**self).delete_medicine(medicine_id)
    }

    fn fetch_alerts(&self) -> Result<AlertSet, FetchError> {
        (**self).fetch_alerts()
    }

    fn create_medicine(&self, input: &MedicineInput) -> Result<i64, FetchError> {
        (**self).create_medicine(input)
    }

    fn update_medicine(&self, medicine_id: i64, input: &MedicineInput) -> Result<(), FetchError> {
        (**self).update_medicine(medicine_id, input)
    }

    fn search_medicines(&self, query: &str) -> Result<Vec<Medicine>, FetchError> {
        (**self).search_medicines(query)
    }
}
