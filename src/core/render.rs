//! Plain-text printable invoice.
//!
//! Amounts are rounded to cents here and only here.

use std::fmt;

use rust_decimal::Decimal;

use super::config::Issuer;
use super::totals::format_money;
use super::types::Invoice;

const RULE_WIDTH: usize = 64;

/// Printable view of a persisted invoice.
pub struct PrintableInvoice<'a> {
    invoice: &'a Invoice,
    issuer: &'a Issuer,
}

impl<'a> PrintableInvoice<'a> {
    pub fn new(invoice: &'a Invoice, issuer: &'a Issuer) -> Self {
        Self { invoice, issuer }
    }
}

impl fmt::Display for PrintableInvoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inv = self.invoice;
        // An invoice built by hand may carry amounts that no longer compute.
        let totals = inv.totals().ok();
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "INVOICE")?;
        writeln!(f, "# {}", inv.invoice_number)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Billed To: {}", inv.customer.name)?;
        writeln!(f, "           {}", inv.customer.email)?;
        writeln!(f, "           {}", inv.customer.address)?;
        writeln!(f, "From:      {}", self.issuer.name)?;
        writeln!(f, "           {}", self.issuer.email)?;
        writeln!(f, "           {}", self.issuer.address)?;
        writeln!(f, "Issue Date: {}", inv.issue_date)?;
        writeln!(f, "Due Date:   {}", inv.due_date)?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<30} {:>5} {:>12} {:>12}",
            "Description", "Qty", "Unit Price", "Total"
        )?;
        for line in &inv.line_items {
            writeln!(
                f,
                "{:<30} {:>5} {:>12} {:>12}",
                line.description,
                line.quantity,
                format_money(line.unit_price),
                format_money(line.total)
            )?;
        }
        writeln!(f, "{rule}")?;
        summary_row(f, "Subtotal", format_money(inv.subtotal))?;
        summary_row(
            f,
            &format!("Tax ({}%)", inv.tax.normalize()),
            amount_or_na(totals.map(|t| t.tax_amount)),
        )?;
        if inv.discount > Decimal::ZERO {
            summary_row(
                f,
                &format!("Discount ({}%)", inv.discount.normalize()),
                amount_or_na(totals.map(|t| -t.discount_amount)),
            )?;
        }
        summary_row(f, "Total", format_money(inv.total))?;
        writeln!(f, "{rule}")?;
        write!(f, "{}", self.issuer.payment_terms)
    }
}

fn amount_or_na(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| "n/a".to_string(), format_money)
}

fn summary_row(f: &mut fmt::Formatter<'_>, label: &str, amount: String) -> fmt::Result {
    writeln!(f, "{label:>48} {amount:>15}")
}
