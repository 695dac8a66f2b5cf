use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::totals::percent_of;

/// A customer owned by the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Input for creating a customer through the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// A product owned by the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Decimal,
}

/// A line item as edited in a draft.
///
/// Quantity may transiently be zero and the price may be zero while the user
/// is typing; `validate()` is what enforces quantity ≥ 1 and price ≥ 0.01.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Line item populated from a catalog product (quantity 1).
    pub fn from_product(product: &Product) -> Self {
        Self::new(product.name.clone(), 1, product.price)
    }

    /// `quantity × unit_price`, exact. `None` if the product overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

impl Default for LineItem {
    /// Blank item: no description, quantity 1, price 0.
    fn default() -> Self {
        Self::new("", 1, Decimal::ZERO)
    }
}

/// Invoice status. Fixed at creation; no transitions are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived totals of a set of line items. Never stored on a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Σ quantity × unit_price.
    pub subtotal: Decimal,
    /// subtotal × tax / 100.
    pub tax_amount: Decimal,
    /// subtotal × discount / 100.
    pub discount_amount: Decimal,
    /// subtotal + tax_amount − discount_amount.
    pub total: Decimal,
}

impl Totals {
    pub const ZERO: Totals = Totals {
        subtotal: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

/// A line of a finalized invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Line identifier ("li-1", "li-2", ...).
    pub id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// quantity × unit_price.
    pub total: Decimal,
}

impl InvoiceLine {
    /// Freeze draft items into numbered invoice lines, preserving order.
    pub fn from_items(items: &[LineItem]) -> Result<Vec<InvoiceLine>, InvoiceError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let total = item
                    .line_total()
                    .ok_or_else(|| InvoiceError::overflow(format!("line_items[{i}]")))?;
                Ok(InvoiceLine {
                    id: format!("li-{}", i + 1),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    total,
                })
            })
            .collect()
    }
}

/// Finalized invoice data handed to persistence (no identifier yet).
///
/// Embeds a customer snapshot so later directory edits do not alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub customer: Customer,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub line_items: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    /// Tax percentage.
    pub tax: Decimal,
    /// Discount percentage.
    pub discount: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
}

/// A persisted invoice. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer: Customer,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub line_items: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    /// Tax percentage.
    pub tax: Decimal,
    /// Discount percentage.
    pub discount: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Attach the identifier and number assigned by persistence.
    pub fn from_new(
        id: impl Into<String>,
        invoice_number: impl Into<String>,
        new: NewInvoice,
    ) -> Self {
        Self {
            id: id.into(),
            invoice_number: invoice_number.into(),
            customer: new.customer,
            issue_date: new.issue_date,
            due_date: new.due_date,
            line_items: new.line_items,
            subtotal: new.subtotal,
            tax: new.tax,
            discount: new.discount,
            total: new.total,
            status: new.status,
        }
    }

    /// Tax and discount amounts recomputed from the stored subtotal.
    pub fn totals(&self) -> Result<Totals, InvoiceError> {
        let tax_amount =
            percent_of(self.subtotal, self.tax).ok_or_else(|| InvoiceError::overflow("tax"))?;
        let discount_amount = percent_of(self.subtotal, self.discount)
            .ok_or_else(|| InvoiceError::overflow("discount"))?;
        Ok(Totals {
            subtotal: self.subtotal,
            tax_amount,
            discount_amount,
            total: self.total,
        })
    }
}
