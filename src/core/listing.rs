use super::error::{InvoiceError, ServiceError};
use super::types::{Customer, Invoice, Product};

/// A row that can be addressed by id.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Invoice {
    fn id(&self) -> &str {
        &self.id
    }
}

type Remover<T> = Box<dyn FnMut(&T) -> Result<(), ServiceError> + Send>;

/// Rows of customers, products or invoices in display order.
///
/// Removal is optional: a list built with [`RecordList::new`] is read-only,
/// [`RecordList::with_removal`] supplies the callback that deletes a row at
/// its owner. The row is dropped locally only after the callback succeeds.
pub struct RecordList<T: Record> {
    rows: Vec<T>,
    remover: Option<Remover<T>>,
}

impl<T: Record> RecordList<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows, remover: None }
    }

    pub fn with_removal<F>(mut self, remover: F) -> Self
    where
        F: FnMut(&T) -> Result<(), ServiceError> + Send + 'static,
    {
        self.remover = Some(Box::new(remover));
        self
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn can_remove(&self) -> bool {
        self.remover.is_some()
    }

    /// Delete the row with `id` and return it.
    pub fn remove(&mut self, id: &str) -> Result<T, InvoiceError> {
        let Some(remover) = self.remover.as_mut() else {
            return Err(InvoiceError::RemovalUnsupported);
        };
        let index = self
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| InvoiceError::NotFound(format!("record '{id}'")))?;
        remover(&self.rows[index])?;
        tracing::debug!(id, "record removed");
        Ok(self.rows.remove(index))
    }
}

impl<T: Record + std::fmt::Debug> std::fmt::Debug for RecordList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordList")
            .field("rows", &self.rows)
            .field("can_remove", &self.can_remove())
            .finish()
    }
}
