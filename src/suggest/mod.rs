//! HTTP client for an external line-item suggestion service.
//!
//! # Example
//!
//! ```ignore
//! use invoiceswift::suggest::*;
//!
//! let service = HttpSuggestionService::new(SuggestionServiceConfig {
//!     endpoint: "https://ai.example.com/suggest-invoice-items".into(),
//!     ..Default::default()
//! })?;
//! editor.request_suggestions("1", &backend, &service).await?;
//! ```

mod http;

pub use http::{HttpSuggestionService, SuggestionServiceConfig};
