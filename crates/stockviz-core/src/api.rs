//! Quote API client.
//!
//! | Method | Request | Result |
//! |--------|---------|--------|
//! | [`StockApi::get_quote`] | `GET /stocks/quote/{symbol}` | [`Quote`] |
//! | [`StockApi::get_history`] | `GET /stocks/history/{symbol}?range=` | [`HistoryData`] |
//! | [`StockApi::search_stocks`] | `GET /stocks/search?q=` | `Vec<SearchResult>` |
//! | [`StockApi::get_batch_quotes`] | `POST /stocks/batch` | `Vec<Quote>` |
//! | [`StockApi::health_check`] | `GET /stocks/health` | `bool` |
//!
//! Quote and history fail loudly when the server rejects the call; search and
//! batch quietly return an empty list for the same envelope, since their
//! callers render an empty result rather than an error. Transport failures
//! and non-2xx statuses are errors for every method. There is no retry and
//! no caching.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use urlencoding::encode;
use uuid::Uuid;

use crate::envelope::ErrorBody;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{ApiConfig, ApiEnvelope, ApiError, HistoryData, Quote, SearchResult, Symbol, TimeRange};

const QUOTE_FALLBACK: &str = "Failed to fetch quote";
const HISTORY_FALLBACK: &str = "Failed to fetch history";
const SERVER_FALLBACK: &str = "API request failed";

/// Thin client over the stock quote API.
#[derive(Clone)]
pub struct StockApi {
    config: ApiConfig,
    http: Arc<dyn HttpClient>,
}

impl StockApi {
    pub fn new(config: ApiConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn with_reqwest(config: ApiConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get_quote(&self, symbol: &Symbol) -> Result<Quote, ApiError> {
        let url = self
            .config
            .endpoint(&format!("/stocks/quote/{}", encode(symbol.as_str())));
        let envelope = self.send::<Quote>(HttpRequest::get(url)).await?;
        require_data(envelope, QUOTE_FALLBACK)
    }

    pub async fn get_history(
        &self,
        symbol: &Symbol,
        range: TimeRange,
    ) -> Result<HistoryData, ApiError> {
        let url = self.config.endpoint(&format!(
            "/stocks/history/{}?range={}",
            encode(symbol.as_str()),
            range.as_str()
        ));
        let envelope = self.send::<HistoryData>(HttpRequest::get(url)).await?;
        require_data(envelope, HISTORY_FALLBACK)
    }

    pub async fn search_stocks(&self, keyword: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = self
            .config
            .endpoint(&format!("/stocks/search?q={}", encode(keyword)));
        let envelope = self.send::<Vec<SearchResult>>(HttpRequest::get(url)).await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    pub async fn get_batch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>, ApiError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::to_string(symbols)?;
        let url = self.config.endpoint("/stocks/batch");
        let envelope = self
            .send::<Vec<Quote>>(HttpRequest::post(url).with_body(body))
            .await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    /// `true` only when the health endpoint answers with `success: true`.
    pub async fn health_check(&self) -> bool {
        let url = self.config.endpoint("/stocks/health");
        match self.send::<Value>(HttpRequest::get(url)).await {
            Ok(envelope) => envelope.success,
            Err(error) => {
                debug!(error = %error, "health check failed");
                false
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let request = request
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout().as_millis() as u64);

        let request_id = Uuid::new_v4();
        let method = request.method;
        let url = request.url.clone();
        debug!(%request_id, %method, %url, "api request");

        let response = self.http.execute(request).await.map_err(|error| {
            warn!(%request_id, %method, %url, timed_out = error.timed_out(), error = %error, "api transport failure");
            ApiError::Network {
                detail: error.message().to_owned(),
            }
        })?;

        if !response.is_success() {
            let message =
                ErrorBody::parse(&response.body).unwrap_or_else(|| SERVER_FALLBACK.to_owned());
            warn!(%request_id, %method, %url, status = response.status, %message, "api error status");
            return Err(ApiError::Server {
                status: response.status,
                message,
            });
        }

        serde_json::from_str(&response.body).map_err(|error| {
            warn!(%request_id, %method, %url, error = %error, "api response did not decode");
            ApiError::Decode(error)
        })
    }
}

fn require_data<T>(envelope: ApiEnvelope<T>, fallback: &str) -> Result<T, ApiError> {
    let message = envelope.message().unwrap_or(fallback).to_owned();
    envelope
        .into_data()
        .ok_or(ApiError::Rejected { message })
}
