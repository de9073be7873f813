use std::time::Duration;

use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{FetchError, InventoryApi};
use crate::models::{AlertSet, Medicine, MedicineInput};

/// Fail fast on a dead host; requests themselves are never cut short.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Blocking HTTP client for the inventory REST API.
pub struct HttpInventoryClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Response body from `POST /medicines`.
#[derive(Deserialize)]
struct CreatedResponse {
    medicine_id: i64,
}

impl HttpInventoryClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        request.send().map_err(|e| {
            if e.is_connect() {
                FetchError::Connection(self.base_url.clone())
            } else {
                FetchError::HttpClient(e.to_string())
            }
        })
    }

    /// Send and insist on a 2xx status.
    fn send_checked(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = self.send(request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
        response
            .json()
            .map_err(|e| FetchError::ResponseParsing(e.to_string()))
    }
}

impl InventoryApi for HttpInventoryClient {
    fn list_medicines(&self) -> Result<Vec<Medicine>, FetchError> {
        let response = self.send_checked(self.client.get(self.url("/medicines")))?;
        let medicines: Vec<Medicine> = Self::decode(response)?;
        tracing::debug!(count = medicines.len(), "Fetched medicines");
        Ok(medicines)
    }

    fn delete_medicine(&self, medicine_id: i64) -> Result<(), FetchError> {
        let url = self.url(&format!("/medicines/{medicine_id}"));
        let response = self.send(self.client.delete(url))?;
        tracing::debug!(
            medicine_id,
            status = response.status().as_u16(),
            "Delete request completed"
        );
        Ok(())
    }

    fn fetch_alerts(&self) -> Result<AlertSet, FetchError> {
        let response = self.send_checked(self.client.get(self.url("/alerts")))?;
        Self::decode(response)
    }

    fn create_medicine(&self, input: &MedicineInput) -> Result<i64, FetchError> {
        let request = self.client.post(self.url("/medicines")).json(input);
        let created: CreatedResponse = Self::decode(self.send_checked(request)?)?;
        tracing::info!(medicine_id = created.medicine_id, "Medicine created");
        Ok(created.medicine_id)
    }

    fn update_medicine(&self, medicine_id: i64, input: &MedicineInput) -> Result<(), FetchError> {
        let url = self.url(&format!("/medicines/{medicine_id}"));
        self.send_checked(self.client.put(url).json(input))?;
        tracing::info!(medicine_id, "Medicine updated");
        Ok(())
    }

    fn search_medicines(&self, query: &str) -> Result<Vec<Medicine>, FetchError> {
        let request = self.client.get(self.url("/search")).query(&[("q", query)]);
        Self::decode(self.send_checked(request)?)
    }
}
