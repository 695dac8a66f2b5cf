//! Core invoice model: types, totals, the draft editor and its collaborators.
//!
//! This module is everything the presentation layer calls into. It performs
//! no I/O of its own; collaborators are reached through [`Directory`],
//! [`Catalog`], [`InvoiceHistory`], [`SuggestionService`] and [`InvoiceStore`].

mod config;
mod editor;
mod error;
mod listing;
mod numbering;
mod render;
mod services;
mod totals;
mod types;
mod validation;

pub use config::*;
pub use editor::*;
pub use error::*;
pub use listing::*;
pub use numbering::*;
pub use render::*;
pub use services::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
