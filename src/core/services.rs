//! Contracts for the collaborators surrounding the editor.
//!
//! None of these own a wire format; the `mock` feature provides in-memory
//! implementations and the `suggest` feature an HTTP suggestion client.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::error::ServiceError;
use super::types::*;

/// Customer directory.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError>;

    /// Create a customer. Fails with `ServiceError::Validation` on a malformed
    /// email or missing name/address.
    async fn create(&self, data: NewCustomer) -> Result<Customer, ServiceError>;
}

/// Product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
}

/// Read-only invoice history, used as suggestion context.
#[async_trait]
pub trait InvoiceHistory: Send + Sync {
    async fn invoices_for_customer(&self, customer_id: &str)
    -> Result<Vec<Invoice>, ServiceError>;
}

/// Suggests line-item descriptions for a new invoice.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, context: &SuggestionContext) -> Result<Vec<String>, ServiceError>;
}

/// Persists finalized invoices.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Store the invoice and return its new identifier.
    async fn create(&self, invoice: NewInvoice) -> Result<String, ServiceError>;
}

/// What the suggestion service gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionContext {
    pub customer: Customer,
    /// The customer's past invoices.
    pub past_invoices: Vec<Invoice>,
    pub today: NaiveDate,
}

impl SuggestionContext {
    /// One-line description of the invoice being written.
    pub fn describe(&self) -> String {
        format!(
            "New invoice for customer: {}. Today's date is {}.",
            self.customer.name, self.today
        )
    }
}
