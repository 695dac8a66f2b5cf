use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::editor::Draft;
use super::error::{InvoiceError, ValidationError};
use super::totals::{check_percent, compute_totals};
use super::types::*;

/// Smallest price a submitted line item may carry.
pub const MIN_UNIT_PRICE: Decimal = dec!(0.01);

/// Validate a draft for submission.
/// Returns all validation errors found (not just the first); empty iff the
/// draft is submittable.
pub fn validate_draft(
    draft: &Draft,
    customers: &[Customer],
    max_line_items: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let customer_id = draft.customer_id.trim();
    if customer_id.is_empty() {
        errors.push(ValidationError::new("customer_id", "customer is required"));
    } else if !customers.iter().any(|c| c.id == customer_id) {
        errors.push(ValidationError::new(
            "customer_id",
            format!("customer '{customer_id}' does not exist"),
        ));
    }

    // No ordering between issue and due date is enforced.
    if draft.issue_date.is_none() {
        errors.push(ValidationError::new("issue_date", "issue date is required"));
    }
    if draft.due_date.is_none() {
        errors.push(ValidationError::new("due_date", "due date is required"));
    }

    if draft.line_items.is_empty() {
        errors.push(ValidationError::new(
            "line_items",
            "at least one line item is required",
        ));
    } else if draft.line_items.len() > max_line_items {
        errors.push(ValidationError::new(
            "line_items",
            format!("invoice cannot have more than {max_line_items} line items"),
        ));
    }

    let mut line_overflow = false;
    for (i, item) in draft.line_items.iter().enumerate() {
        line_overflow |= !validate_line_item(item, i, &mut errors);
    }

    let tax_ok = check_percent("tax", draft.tax).is_ok();
    if !tax_ok {
        errors.push(ValidationError::new("tax", "tax must be between 0 and 100"));
    }
    let discount_ok = check_percent("discount", draft.discount).is_ok();
    if !discount_ok {
        errors.push(ValidationError::new(
            "discount",
            "discount must be between 0 and 100",
        ));
    }

    // Per-line overflow is already reported above.
    if !line_overflow && tax_ok && discount_ok {
        if let Err(InvoiceError::AmountOverflow { field }) =
            compute_totals(&draft.line_items, draft.tax, draft.discount)
        {
            errors.push(ValidationError::new(field, "amount is too large"));
        }
    }

    errors
}

/// Returns false if the item's line total overflows.
fn validate_line_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) -> bool {
    let prefix = format!("line_items[{index}]");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.description"),
            "description is required",
        ));
    }

    if item.quantity < 1 {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must be at least 1",
        ));
    }

    if item.unit_price < MIN_UNIT_PRICE {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "price must be positive",
        ));
    }

    if item.line_total().is_none() {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "quantity × price is too large",
        ));
        return false;
    }
    true
}

/// Validate input for a new customer.
pub fn validate_new_customer(customer: &NewCustomer) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if customer.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "name is required"));
    }
    if !is_valid_email(&customer.email) {
        errors.push(ValidationError::new("email", "invalid email address"));
    }
    if customer.address.trim().is_empty() {
        errors.push(ValidationError::new("address", "address is required"));
    }

    errors
}

impl NewCustomer {
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_new_customer(self)
    }
}

/// Structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}
