use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by the computation model and the draft editor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more field-level rules failed.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A percentage (or other bounded number) fell outside its contract.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: String, value: Decimal },

    /// An amount grew past what a `Decimal` can hold.
    #[error("{field} is too large to compute")]
    AmountOverflow { field: String },

    /// A line-item index did not address an existing item.
    #[error("line item index {index} out of range (draft has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Unknown customer, product, suggestion or record reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record list was asked to remove a row but has no removal capability.
    #[error("removal is not supported by this list")]
    RemovalUnsupported,

    /// An external collaborator (directory, suggestions, persistence) failed.
    #[error("external service error: {0}")]
    ExternalService(#[from] ServiceError),

    /// The draft was already handed to persistence and is now read-only.
    #[error("draft has already been submitted")]
    AlreadySubmitted,
}

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The collaborator rejected the input (e.g. malformed email).
    #[error("rejected input: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The referenced record does not exist on the collaborator's side.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network or transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an error.
    #[error("API error: {0}")]
    Api(String),

    /// The service answered with something we could not read.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "line_items[0].unit_price").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl InvoiceError {
    pub(crate) fn out_of_range(field: impl Into<String>, value: Decimal) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
        }
    }

    pub(crate) fn overflow(field: impl Into<String>) -> Self {
        Self::AmountOverflow {
            field: field.into(),
        }
    }

    /// Field-level failures carried by this error, if any.
    ///
    /// Covers both local validation and a collaborator rejecting its input,
    /// so the caller can render them next to the offending fields.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            Self::ExternalService(ServiceError::Validation(errors)) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
