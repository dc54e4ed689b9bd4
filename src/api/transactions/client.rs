use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, CreateTransactionRequest, ErrorResponse};
use super::TransactionsApi;
use crate::models::Transaction;

/// REST client for the `transactions` resource
pub struct TransactionsClient {
    http_client: HttpClient,
    base_url: String,
}

impl TransactionsClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3333";
    const RESOURCE: &'static str = "transactions";

    /// Create a new client with custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), Self::RESOURCE)
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Query string for the list endpoint. Blank queries are left out so the
    /// backend returns the full list.
    fn list_params(query: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("_sort", "createdAt".to_string()),
            ("_order", "desc".to_string()),
        ];
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }
        params
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                let message = serde_json::from_str::<ErrorResponse>(&body_text)
                    .ok()
                    .and_then(|err| err.message.or(err.error))
                    .unwrap_or(body_text);
                ApiError::BadRequest(message)
            }
            404 => ApiError::NotFound(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }
}

#[async_trait]
impl TransactionsApi for TransactionsClient {
    /// GET /transactions?_sort=createdAt&_order=desc[&q=...]
    ///
    /// Returns the matching records newest first, exactly as the backend
    /// ordered them.
    async fn list_transactions(&self, query: Option<&str>) -> Result<Vec<Transaction>, ApiError> {
        let url = self.resource_url();
        let params = Self::list_params(query);
        debug!("GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// POST /transactions
    ///
    /// The returned record is authoritative: the backend may assign its own
    /// `id` and normalize `createdAt`.
    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let url = self.resource_url();
        debug!("POST {} ({} {})", url, request.kind, request.price);

        let response = self
            .http_client
            .post(&url)
            .headers(Self::create_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Transaction>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
