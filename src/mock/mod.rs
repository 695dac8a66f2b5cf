//! In-memory data layer with artificial network delay.
//!
//! [`MockBackend`] stands in for the storage behind a dashboard: it implements
//! every collaborator trait of [`crate::core`] over plain vectors and sleeps
//! before answering, like a slow remote API would.
//!
//! ```ignore
//! use invoiceswift::mock::*;
//!
//! let backend = MockBackend::seeded(MockConfig::instant());
//! let invoices = backend.fetch_invoices().await;
//! assert_eq!(invoices.len(), 3);
//! ```

mod backend;
mod seed;

pub use backend::{MockBackend, MockConfig};
pub use seed::{seed_customers, seed_invoices, seed_products};
