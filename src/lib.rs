//! # invoiceswift
//!
//! Invoice computation and draft editing for a small-business invoicing
//! dashboard: line items, tax and discount percentages, derived totals,
//! submission to a store and AI-style line-item suggestions.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are never rounded
//! until they are displayed.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use invoiceswift::core::*;
//! use rust_decimal_macros::dec;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let customers = vec![Customer {
//!     id: "1".into(),
//!     name: "Innovate LLC".into(),
//!     email: "contact@innovate.com".into(),
//!     address: "123 Tech Park, Silicon Valley, CA".into(),
//! }];
//!
//! let mut editor = InvoiceEditor::new(today, customers, Vec::new());
//! editor.select_customer("1").unwrap();
//! editor.set_description(0, "Web Design Package").unwrap();
//! editor.set_unit_price(0, dec!(2500)).unwrap();
//! editor.add_line_item(Some(LineItem::new("Hosting Service", 1, dec!(240)))).unwrap();
//!
//! let totals = editor.totals().unwrap();
//! assert_eq!(totals.subtotal, dec!(2740));
//! assert_eq!(totals.tax_amount, dec!(219.20));
//! assert_eq!(totals.total, dec!(2959.20));
//! assert!(editor.validate().is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals, validation, numbering, the draft editor |
//! | `mock` | In-memory backend with placeholder data and simulated latency |
//! | `suggest` | HTTP client for a line-item suggestion service |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "suggest")]
pub mod suggest;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
