//! Print every stored invoice the way the dashboard's print view shows it.
//!
//! Run with: `cargo run --example print_invoice --features mock`

use invoiceswift::core::*;
use invoiceswift::mock::{MockBackend, MockConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let backend = MockBackend::seeded(MockConfig::instant());
    let issuer = Issuer::default();

    let invoices = RecordList::new(backend.fetch_invoices().await);
    for invoice in invoices.rows() {
        println!("{}", PrintableInvoice::new(invoice, &issuer));
        println!("[{}]\n", invoice.status);
    }
}
