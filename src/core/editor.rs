//! The invoice draft editor.
//!
//! An [`InvoiceEditor`] owns one draft for one editing session. Line-item,
//! tax/discount, date and customer edits are synchronous and checked
//! immediately; the "at least one item, every item priced" rules are only
//! enforced by [`InvoiceEditor::validate`] and [`InvoiceEditor::submit`], so a
//! draft may pass through invalid states while the user is typing.
//!
//! Catalog products and directory customers are snapshots taken when the
//! editor is built. Customers created through
//! [`InvoiceEditor::create_and_select_customer`] are appended to the snapshot.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::EditorConfig;
use super::error::{InvoiceError, ServiceError, ValidationError};
use super::services::*;
use super::totals::{check_percent, compute_totals};
use super::types::*;
use super::validation::validate_draft;

/// Editable invoice state. Totals are derived, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Selected customer, empty until one is chosen.
    pub customer_id: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Insertion order is display and invoice order.
    pub line_items: Vec<LineItem>,
    /// Tax percentage, 0..=100.
    pub tax: Decimal,
    /// Discount percentage, 0..=100.
    pub discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorState {
    Editing,
    Submitted { invoice_id: String },
}

/// Handle for one in-flight suggestion request.
///
/// Obtained from [`InvoiceEditor::begin_suggestions`]. Fetching does not borrow
/// the editor, so the session may keep editing (or start a newer request)
/// while the service is working. Only the newest ticket's result is applied.
#[derive(Debug, Clone)]
pub struct SuggestionTicket {
    generation: u64,
    customer: Customer,
    today: NaiveDate,
}

impl SuggestionTicket {
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Gather the customer's history and ask the suggestion service.
    pub async fn fetch<H, S>(&self, history: &H, service: &S) -> Result<Vec<String>, ServiceError>
    where
        H: InvoiceHistory + ?Sized,
        S: SuggestionService + ?Sized,
    {
        let past_invoices = history.invoices_for_customer(&self.customer.id).await?;
        let context = SuggestionContext {
            customer: self.customer.clone(),
            past_invoices,
            today: self.today,
        };
        service.suggest(&context).await
    }
}

/// Editing session for a single invoice draft.
#[derive(Debug, Clone)]
pub struct InvoiceEditor {
    config: EditorConfig,
    today: NaiveDate,
    draft: Draft,
    customers: Vec<Customer>,
    products: Vec<Product>,
    suggestions: Vec<String>,
    suggestion_generation: u64,
    suggestion_pending: Option<u64>,
    state: EditorState,
}

impl InvoiceEditor {
    /// Start a draft with the default configuration.
    pub fn new(today: NaiveDate, customers: Vec<Customer>, products: Vec<Product>) -> Self {
        let config = EditorConfig::default();
        let draft = fresh_draft(&config, today);
        Self::from_parts(config, today, draft, customers, products)
    }

    /// Start a draft with custom defaults. Fails if the configured default
    /// percentages are outside `[0, 100]`.
    pub fn with_config(
        config: EditorConfig,
        today: NaiveDate,
        customers: Vec<Customer>,
        products: Vec<Product>,
    ) -> Result<Self, InvoiceError> {
        config.check()?;
        let draft = fresh_draft(&config, today);
        Ok(Self::from_parts(config, today, draft, customers, products))
    }

    /// Load customers and products from their owners and start a draft.
    pub async fn load<D, C>(
        directory: &D,
        catalog: &C,
        config: EditorConfig,
        today: NaiveDate,
    ) -> Result<Self, InvoiceError>
    where
        D: Directory + ?Sized,
        C: Catalog + ?Sized,
    {
        let customers = directory.list().await?;
        let products = catalog.list().await?;
        Self::with_config(config, today, customers, products)
    }

    fn from_parts(
        config: EditorConfig,
        today: NaiveDate,
        draft: Draft,
        customers: Vec<Customer>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            config,
            today,
            draft,
            customers,
            products,
            suggestions: Vec::new(),
            suggestion_generation: 0,
            suggestion_pending: None,
            state: EditorState::Editing,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.draft.line_items
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The customer currently selected, if it resolves.
    pub fn selected_customer(&self) -> Option<&Customer> {
        self.find_customer(&self.draft.customer_id)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, EditorState::Submitted { .. })
    }

    /// Identifier returned by persistence once submitted.
    pub fn submitted_invoice_id(&self) -> Option<&str> {
        match &self.state {
            EditorState::Submitted { invoice_id } => Some(invoice_id),
            EditorState::Editing => None,
        }
    }

    /// Totals derived from the current draft. Recomputed on every call.
    pub fn totals(&self) -> Result<Totals, InvoiceError> {
        compute_totals(&self.draft.line_items, self.draft.tax, self.draft.discount)
    }

    // --- Line items ---

    /// Append an item (blank if `None`) and return its index.
    /// Only fails once the draft has been submitted.
    pub fn add_line_item(&mut self, item: Option<LineItem>) -> Result<usize, InvoiceError> {
        self.ensure_editing()?;
        self.draft.line_items.push(item.unwrap_or_default());
        let index = self.draft.line_items.len() - 1;
        debug!(index, "line item added");
        Ok(index)
    }

    /// Remove and return the item at `index`. May leave the draft empty.
    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem, InvoiceError> {
        self.ensure_editing()?;
        self.check_index(index)?;
        let item = self.draft.line_items.remove(index);
        debug!(index, remaining = self.draft.line_items.len(), "line item removed");
        Ok(item)
    }

    pub fn set_description(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> Result<(), InvoiceError> {
        self.item_mut(index)?.description = description.into();
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), InvoiceError> {
        self.item_mut(index)?.quantity = quantity;
        Ok(())
    }

    pub fn set_unit_price(&mut self, index: usize, unit_price: Decimal) -> Result<(), InvoiceError> {
        self.item_mut(index)?.unit_price = unit_price;
        Ok(())
    }

    /// Copy a catalog product's name and price onto the item at `index`,
    /// leaving its quantity alone.
    ///
    /// An unknown product id is not an error: the item is left untouched so
    /// it can be described freely. Returns whether the item was changed.
    pub fn set_line_item_from_catalog_entry(
        &mut self,
        index: usize,
        product_id: &str,
    ) -> Result<bool, InvoiceError> {
        self.ensure_editing()?;
        self.check_index(index)?;
        let Some(product) = self.products.iter().find(|p| p.id == product_id) else {
            debug!(index, product_id, "product not in catalog, keeping custom item");
            return Ok(false);
        };
        let item = &mut self.draft.line_items[index];
        item.description = product.name.clone();
        item.unit_price = product.price;
        debug!(index, product_id, "line item populated from catalog");
        Ok(true)
    }

    // --- Percentages, dates, customer ---

    pub fn set_tax(&mut self, percent: Decimal) -> Result<(), InvoiceError> {
        self.ensure_editing()?;
        check_percent("tax", percent)?;
        self.draft.tax = percent;
        Ok(())
    }

    pub fn set_discount(&mut self, percent: Decimal) -> Result<(), InvoiceError> {
        self.ensure_editing()?;
        check_percent("discount", percent)?;
        self.draft.discount = percent;
        Ok(())
    }

    pub fn set_issue_date(&mut self, date: Option<NaiveDate>) -> Result<(), InvoiceError> {
        self.ensure_editing()?;
        self.draft.issue_date = date;
        Ok(())
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) -> Result<(), InvoiceError> {
        self.ensure_editing()?;
        self.draft.due_date = date;
        Ok(())
    }

    /// Select a customer by id. Existence is checked at submission.
    pub fn select_customer(&mut self, customer_id: impl Into<String>) -> Result<(), InvoiceError> {
        self.ensure_editing()?;
        self.draft.customer_id = customer_id.into();
        Ok(())
    }

    /// Create a customer in the directory and select it.
    ///
    /// A directory rejection leaves the selection unchanged.
    pub async fn create_and_select_customer<D>(
        &mut self,
        directory: &D,
        data: NewCustomer,
    ) -> Result<Customer, InvoiceError>
    where
        D: Directory + ?Sized,
    {
        self.ensure_editing()?;
        let customer = directory.create(data).await?;
        info!(customer_id = %customer.id, name = %customer.name, "customer created");
        self.draft.customer_id = customer.id.clone();
        self.customers.push(customer.clone());
        Ok(customer)
    }

    // --- Suggestions ---

    /// Suggestions waiting to be accepted, in the order the service gave them.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while the newest suggestion request has not completed.
    pub fn is_loading_suggestions(&self) -> bool {
        self.suggestion_pending.is_some()
    }

    /// Start a suggestion request for `customer_id`, superseding any request
    /// still in flight. Clears the pending suggestion list.
    pub fn begin_suggestions(&mut self, customer_id: &str) -> Result<SuggestionTicket, InvoiceError> {
        self.ensure_editing()?;
        if customer_id.trim().is_empty() {
            return Err(InvoiceError::Validation(vec![ValidationError::new(
                "customer_id",
                "select a customer before requesting suggestions",
            )]));
        }
        let customer = self
            .find_customer(customer_id)
            .cloned()
            .ok_or_else(|| InvoiceError::NotFound(format!("customer '{customer_id}'")))?;

        self.suggestion_generation += 1;
        self.suggestion_pending = Some(self.suggestion_generation);
        self.suggestions.clear();

        Ok(SuggestionTicket {
            generation: self.suggestion_generation,
            customer,
            today: self.today,
        })
    }

    /// Apply the outcome of a suggestion request.
    ///
    /// Returns `Ok(false)` and changes nothing if a newer request was started
    /// after `ticket`. A failed newest request leaves the list empty and is
    /// reported as `ExternalService`.
    pub fn complete_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<Vec<String>, ServiceError>,
    ) -> Result<bool, InvoiceError> {
        if self.suggestion_pending != Some(ticket.generation) {
            warn!(
                generation = ticket.generation,
                latest = self.suggestion_generation,
                "discarding stale suggestion response"
            );
            return Ok(false);
        }
        self.suggestion_pending = None;

        match result {
            Ok(items) => {
                debug!(count = items.len(), customer_id = %ticket.customer.id, "suggestions received");
                self.suggestions = items;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, customer_id = %ticket.customer.id, "suggestion request failed");
                self.suggestions.clear();
                Err(e.into())
            }
        }
    }

    /// Begin, fetch and complete a suggestion request in one go.
    pub async fn request_suggestions<H, S>(
        &mut self,
        customer_id: &str,
        history: &H,
        service: &S,
    ) -> Result<&[String], InvoiceError>
    where
        H: InvoiceHistory + ?Sized,
        S: SuggestionService + ?Sized,
    {
        let ticket = self.begin_suggestions(customer_id)?;
        let result = ticket.fetch(history, service).await;
        self.complete_suggestions(ticket, result)?;
        Ok(&self.suggestions)
    }

    /// Turn a pending suggestion into a line item and return its index.
    ///
    /// A suggestion naming a catalog product gets that product's price;
    /// anything else is added with price 0 for the user to fill in. Each
    /// pending suggestion can be accepted once.
    pub fn accept_suggestion(&mut self, description: &str) -> Result<usize, InvoiceError> {
        self.ensure_editing()?;
        let position = self
            .suggestions
            .iter()
            .position(|s| s == description)
            .ok_or_else(|| InvoiceError::NotFound(format!("suggestion '{description}'")))?;
        self.suggestions.remove(position);

        let item = match self.products.iter().find(|p| p.name == description) {
            Some(product) => LineItem::from_product(product),
            None => LineItem::new(description, 1, Decimal::ZERO),
        };
        self.add_line_item(Some(item))
    }

    // --- Validation and submission ---

    /// All field-level failures; empty iff the draft can be submitted.
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_draft(&self.draft, &self.customers, self.config.max_line_items)
    }

    /// Finalize the draft and hand it to persistence.
    ///
    /// The store is never called for an invalid draft. On a store failure the
    /// draft stays editable for a retry; nothing is retried automatically.
    pub async fn submit<S>(&mut self, store: &S) -> Result<String, InvoiceError>
    where
        S: InvoiceStore + ?Sized,
    {
        self.ensure_editing()?;
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(count = errors.len(), "draft rejected by validation");
            return Err(InvoiceError::Validation(errors));
        }

        let invoice = self.finalize()?;
        let customer_id = invoice.customer.id.clone();
        let total = invoice.total;

        match store.create(invoice).await {
            Ok(invoice_id) => {
                info!(%invoice_id, %customer_id, %total, "invoice submitted");
                self.state = EditorState::Submitted {
                    invoice_id: invoice_id.clone(),
                };
                Ok(invoice_id)
            }
            Err(e) => {
                warn!(error = %e, %customer_id, "invoice submission failed");
                Err(e.into())
            }
        }
    }

    /// Assemble the record persistence receives.
    pub fn finalize(&self) -> Result<NewInvoice, InvoiceError> {
        let customer = self.selected_customer().cloned().ok_or_else(|| {
            InvoiceError::NotFound(format!("customer '{}'", self.draft.customer_id))
        })?;
        let (Some(issue_date), Some(due_date)) = (self.draft.issue_date, self.draft.due_date) else {
            return Err(InvoiceError::Validation(vec![ValidationError::new(
                "issue_date",
                "issue and due dates are required",
            )]));
        };
        let totals = self.totals()?;

        Ok(NewInvoice {
            customer,
            issue_date,
            due_date,
            line_items: InvoiceLine::from_items(&self.draft.line_items)?,
            subtotal: totals.subtotal,
            tax: self.draft.tax,
            discount: self.draft.discount,
            total: totals.total,
            status: self.config.initial_status,
        })
    }

    fn ensure_editing(&self) -> Result<(), InvoiceError> {
        match self.state {
            EditorState::Editing => Ok(()),
            EditorState::Submitted { .. } => Err(InvoiceError::AlreadySubmitted),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), InvoiceError> {
        let len = self.draft.line_items.len();
        if index >= len {
            return Err(InvoiceError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, InvoiceError> {
        self.ensure_editing()?;
        self.check_index(index)?;
        Ok(&mut self.draft.line_items[index])
    }

    fn find_customer(&self, customer_id: &str) -> Option<&Customer> {
        let customer_id = customer_id.trim();
        self.customers.iter().find(|c| c.id == customer_id)
    }
}

fn fresh_draft(config: &EditorConfig, today: NaiveDate) -> Draft {
    let due = today
        .checked_add_days(Days::new(u64::from(config.payment_term_days)))
        .unwrap_or(today);
    Draft {
        customer_id: String::new(),
        issue_date: Some(today),
        due_date: Some(due),
        line_items: vec![LineItem::default()],
        tax: config.default_tax,
        discount: config.default_discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
    }

    fn editor() -> InvoiceEditor {
        let customers = vec![Customer {
            id: "2".into(),
            name: "Solutions Co.".into(),
            email: "support@solutions.co".into(),
            address: "456 Business Ave, New York, NY".into(),
        }];
        let products = vec![Product {
            id: "prod-2".into(),
            name: "Logo Design".into(),
            description: "Custom logo and branding guide".into(),
            price: dec!(800),
        }];
        InvoiceEditor::new(today(), customers, products)
    }

    #[test]
    fn fresh_draft_matches_form_defaults() {
        let ed = editor();
        let draft = ed.draft();
        assert_eq!(draft.issue_date, Some(today()));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 8, 19));
        assert_eq!(draft.line_items, vec![LineItem::default()]);
        assert_eq!(draft.tax, dec!(8));
        assert_eq!(draft.discount, dec!(0));
        assert!(draft.customer_id.is_empty());
    }

    #[test]
    fn remove_checks_index() {
        let mut ed = editor();
        assert!(matches!(
            ed.remove_line_item(1),
            Err(InvoiceError::IndexOutOfRange { index: 1, len: 1 })
        ));
        ed.remove_line_item(0).unwrap();
        assert!(ed.line_items().is_empty());
    }

    #[test]
    fn catalog_entry_keeps_quantity() {
        let mut ed = editor();
        ed.set_quantity(0, 3).unwrap();
        assert!(ed.set_line_item_from_catalog_entry(0, "prod-2").unwrap());
        assert_eq!(ed.line_items()[0], LineItem::new("Logo Design", 3, dec!(800)));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut ed = editor();
        let first = ed.begin_suggestions("2").unwrap();
        let second = ed.begin_suggestions("2").unwrap();

        assert!(!ed.complete_suggestions(first, Ok(vec!["Old".into()])).unwrap());
        assert!(ed.is_loading_suggestions());
        assert!(ed.suggestions().is_empty());

        assert!(ed.complete_suggestions(second, Ok(vec!["Logo Design".into()])).unwrap());
        assert!(!ed.is_loading_suggestions());
        assert_eq!(ed.suggestions(), ["Logo Design"]);
    }

    #[test]
    fn failed_suggestions_leave_empty_list() {
        let mut ed = editor();
        let ticket = ed.begin_suggestions("2").unwrap();
        let err = ed
            .complete_suggestions(ticket, Err(ServiceError::Network("timeout".into())))
            .unwrap_err();
        assert!(matches!(err, InvoiceError::ExternalService(_)));
        assert!(ed.suggestions().is_empty());
        assert!(!ed.is_loading_suggestions());
    }

    #[test]
    fn suggestions_need_a_known_customer() {
        let mut ed = editor();
        assert!(matches!(
            ed.begin_suggestions(""),
            Err(InvoiceError::Validation(_))
        ));
        assert!(matches!(
            ed.begin_suggestions("9"),
            Err(InvoiceError::NotFound(_))
        ));
        assert!(!ed.is_loading_suggestions());
    }

    #[test]
    fn accepting_unknown_suggestion_fails() {
        let mut ed = editor();
        assert!(matches!(
            ed.accept_suggestion("Logo Design"),
            Err(InvoiceError::NotFound(_))
        ));
        assert_eq!(ed.line_items().len(), 1);
    }

    #[test]
    fn huge_prices_never_panic() {
        let mut ed = editor();
        ed.select_customer("2").unwrap();
        ed.set_description(0, "Acquisition").unwrap();
        let price = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        ed.set_unit_price(0, price).unwrap();
        ed.set_tax(dec!(100)).unwrap();
        assert_eq!(ed.totals().unwrap().total, price * dec!(2));

        ed.set_quantity(0, u32::MAX).unwrap();
        assert!(matches!(
            ed.totals(),
            Err(InvoiceError::AmountOverflow { .. })
        ));
        assert_eq!(ed.validate()[0].field, "line_items[0].unit_price");
        assert!(matches!(
            ed.finalize(),
            Err(InvoiceError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn finalize_freezes_lines_and_status() {
        let mut ed = editor();
        ed.select_customer("2").unwrap();
        ed.set_line_item_from_catalog_entry(0, "prod-2").unwrap();
        let invoice = ed.finalize().unwrap();
        assert_eq!(invoice.customer.name, "Solutions Co.");
        assert_eq!(invoice.line_items[0].id, "li-1");
        assert_eq!(invoice.line_items[0].total, dec!(800));
        assert_eq!(invoice.total, dec!(864));
        assert_eq!(invoice.status, InvoiceStatus::Pending);
    }
}
