use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::totals::check_percent;
use super::types::InvoiceStatus;

/// Defaults and limits applied to new drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tax percentage of a fresh draft.
    pub default_tax: Decimal,
    /// Discount percentage of a fresh draft.
    pub default_discount: Decimal,
    /// Days between issue and due date of a fresh draft.
    pub payment_term_days: u32,
    /// Upper bound on line items accepted by `validate()`.
    pub max_line_items: usize,
    /// Status stamped on submitted invoices.
    pub initial_status: InvoiceStatus,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_tax: dec!(8),
            default_discount: Decimal::ZERO,
            payment_term_days: 30,
            max_line_items: 10_000,
            initial_status: InvoiceStatus::Pending,
        }
    }
}

impl EditorConfig {
    pub fn check(&self) -> Result<(), InvoiceError> {
        check_percent("default_tax", self.default_tax)?;
        check_percent("default_discount", self.default_discount)
    }
}

/// The business issuing invoices, shown in the "From" block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issuer {
    pub name: String,
    pub email: String,
    pub address: String,
    /// Footer line under the totals.
    pub payment_terms: String,
}

impl Default for Issuer {
    fn default() -> Self {
        Self {
            name: "InvoiceSwift Inc.".into(),
            email: "contact@invoiceswift.com".into(),
            address: "123 App Avenue, Tech City".into(),
            payment_terms: "Thank you for your business! Please pay within 30 days.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_invoice_form() {
        let config = EditorConfig::default();
        assert_eq!(config.default_tax, dec!(8));
        assert_eq!(config.payment_term_days, 30);
        assert!(config.check().is_ok());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"default_tax":"19","initial_status":"draft"}"#).unwrap();
        assert_eq!(config.default_tax, dec!(19));
        assert_eq!(config.initial_status, InvoiceStatus::Draft);
        assert_eq!(config.max_line_items, 10_000);
    }

    #[test]
    fn rejects_bad_default_percentages() {
        let config = EditorConfig {
            default_discount: dec!(150),
            ..EditorConfig::default()
        };
        assert!(matches!(
            config.check(),
            Err(InvoiceError::OutOfRange { ref field, .. }) if field == "default_discount"
        ));
    }
}
