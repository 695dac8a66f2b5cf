//! Walk through the new-invoice form against the in-memory backend.
//!
//! Run with: `RUST_LOG=debug cargo run --example new_invoice --features mock`

use chrono::Local;
use invoiceswift::core::*;
use invoiceswift::mock::{MockBackend, MockConfig};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

/// Suggests whatever the customer bought before, plus hosting.
struct RepeatBusiness;

#[async_trait::async_trait]
impl SuggestionService for RepeatBusiness {
    async fn suggest(&self, context: &SuggestionContext) -> Result<Vec<String>, ServiceError> {
        let mut items: Vec<String> = context
            .past_invoices
            .iter()
            .flat_map(|i| i.line_items.iter().map(|l| l.description.clone()))
            .collect();
        items.push("Hosting Service".into());
        items.dedup();
        Ok(items)
    }
}

#[tokio::main]
async fn main() -> Result<(), InvoiceError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let backend = MockBackend::seeded(MockConfig {
        base_delay: std::time::Duration::from_millis(200),
    });
    let today = Local::now().date_naive();
    let mut editor =
        InvoiceEditor::load(&backend, &backend, EditorConfig::default(), today).await?;

    editor.select_customer("2")?;
    editor.set_line_item_from_catalog_entry(0, "prod-2")?;
    editor.set_discount(dec!(5))?;

    // An empty custom item fails validation until it is filled in.
    let i = editor.add_line_item(None)?;
    for error in editor.validate() {
        println!("  ! {error}");
    }
    editor.set_description(i, "Brand workshop (half day)")?;
    editor.set_unit_price(i, dec!(650))?;

    let suggestions = editor
        .request_suggestions("2", &backend, &RepeatBusiness)
        .await?
        .to_vec();
    println!("Suggested: {}", suggestions.join(", "));
    if suggestions.iter().any(|s| s == "Hosting Service") {
        editor.accept_suggestion("Hosting Service")?;
    }

    let totals = editor.totals()?;
    println!("Subtotal: {}", format_money(totals.subtotal));
    println!("Tax:      {}", format_money(totals.tax_amount));
    println!("Discount: {}", format_money(-totals.discount_amount));
    println!("Total:    {}", format_money(totals.total));

    let id = editor.submit(&backend).await?;
    if let Some(invoice) = backend.fetch_invoice_by_id(&id).await {
        println!("Created {} as #{}", invoice.id, invoice.invoice_number);
    }
    Ok(())
}
