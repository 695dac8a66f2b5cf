use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{ServiceError, SuggestionContext, SuggestionService};

/// Where and how patiently to reach the suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionServiceConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for SuggestionServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3400/suggestInvoiceItems".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestRequest {
    /// JSON of the customer's past invoices.
    past_invoice_data: String,
    new_invoice_context: String,
}

/// Response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestResponse {
    suggested_items: Vec<String>,
}

/// [`SuggestionService`] backed by a JSON-over-HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSuggestionService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionService {
    pub fn new(config: SuggestionServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }
}

fn build_request(context: &SuggestionContext) -> Result<SuggestRequest, ServiceError> {
    let past_invoice_data = serde_json::to_string_pretty(&context.past_invoices)
        .map_err(|e| ServiceError::Parse(e.to_string()))?;
    Ok(SuggestRequest {
        past_invoice_data,
        new_invoice_context: context.describe(),
    })
}

fn parse_response(body: &str) -> Result<Vec<String>, ServiceError> {
    let resp: SuggestResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Parse(e.to_string()))?;
    Ok(resp
        .suggested_items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[async_trait]
impl SuggestionService for HttpSuggestionService {
    async fn suggest(&self, context: &SuggestionContext) -> Result<Vec<String>, ServiceError> {
        let req = build_request(context)?;

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Api(format!("HTTP {status}: {body}")));
        }

        let items = parse_response(&body)?;
        tracing::debug!(count = items.len(), "suggestion service answered");
        Ok(items)
    }
}
