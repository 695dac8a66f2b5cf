use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::seed;
use crate::core::*;

/// Artificial latency of the mock data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Full delay, used for writes. Reads use a fraction of it.
    pub base_delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl MockConfig {
    /// No delay at all.
    pub fn instant() -> Self {
        Self {
            base_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct State {
    customers: Vec<Customer>,
    products: Vec<Product>,
    invoices: Vec<Invoice>,
    numbers: InvoiceNumberSequence,
    next_customer: u64,
    next_invoice: u64,
}

/// In-memory directory, catalog, history and invoice store.
///
/// The lock is only taken after the artificial delay and never across an
/// await point.
#[derive(Debug)]
pub struct MockBackend {
    config: MockConfig,
    state: Mutex<State>,
}

impl MockBackend {
    /// Empty backend. Numbering starts at `{year}-001`.
    pub fn new(config: MockConfig, year: i32) -> Self {
        Self::with_data(
            config,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            InvoiceNumberSequence::starting_at(year, 1),
        )
    }

    /// Backend loaded with the dashboard's placeholder data.
    pub fn seeded(config: MockConfig) -> Self {
        let invoices = seed::seed_invoices();
        let numbers = InvoiceNumberSequence::resume(
            2024,
            invoices.iter().map(|i| i.invoice_number.as_str()),
        );
        Self::with_data(
            config,
            seed::seed_customers(),
            seed::seed_products(),
            invoices,
            numbers,
        )
    }

    fn with_data(
        config: MockConfig,
        customers: Vec<Customer>,
        products: Vec<Product>,
        invoices: Vec<Invoice>,
        numbers: InvoiceNumberSequence,
    ) -> Self {
        let next_invoice = invoices.len() as u64 + 1;
        let next_customer = customers.len() as u64 + 1;
        Self {
            config,
            state: Mutex::new(State {
                customers,
                products,
                invoices,
                numbers,
                next_customer,
                next_invoice,
            }),
        }
    }

    /// All invoices, in creation order.
    pub async fn fetch_invoices(&self) -> Vec<Invoice> {
        self.delay(2).await;
        self.lock().invoices.clone()
    }

    pub async fn fetch_invoice_by_id(&self, id: &str) -> Option<Invoice> {
        self.delay(3).await;
        self.lock().invoices.iter().find(|i| i.id == id).cloned()
    }

    /// Remove a customer. Their existing invoices keep their snapshot.
    pub fn delete_customer(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.lock();
        let before = state.customers.len();
        state.customers.retain(|c| c.id != id);
        if state.customers.len() == before {
            return Err(ServiceError::NotFound(format!("customer '{id}'")));
        }
        Ok(())
    }

    pub fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.lock();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(ServiceError::NotFound(format!("product '{id}'")));
        }
        Ok(())
    }

    async fn delay(&self, divisor: u32) {
        let delay = self.config.base_delay / divisor;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Directory for MockBackend {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.delay(4).await;
        Ok(self.lock().customers.clone())
    }

    async fn create(&self, data: NewCustomer) -> Result<Customer, ServiceError> {
        let errors = validate_new_customer(&data);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        self.delay(4).await;

        let mut state = self.lock();
        let customer = Customer {
            id: format!("cust-{}", state.next_customer),
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            address: data.address.trim().to_string(),
        };
        state.next_customer += 1;
        state.customers.push(customer.clone());
        debug!(customer_id = %customer.id, "mock customer stored");
        Ok(customer)
    }
}

#[async_trait]
impl Catalog for MockBackend {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.delay(4).await;
        Ok(self.lock().products.clone())
    }
}

#[async_trait]
impl InvoiceHistory for MockBackend {
    async fn invoices_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Invoice>, ServiceError> {
        self.delay(2).await;
        Ok(self
            .lock()
            .invoices
            .iter()
            .filter(|i| i.customer.id == customer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InvoiceStore for MockBackend {
    async fn create(&self, invoice: NewInvoice) -> Result<String, ServiceError> {
        self.delay(1).await;

        let mut state = self.lock();
        let id = format!("inv-{:03}", state.next_invoice);
        state.next_invoice += 1;
        let number = state.numbers.number_for(invoice.issue_date);
        debug!(invoice_id = %id, invoice_number = %number, "mock invoice stored");
        state.invoices.push(Invoice::from_new(id.clone(), number, invoice));
        Ok(id)
    }
}
