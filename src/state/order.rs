//! Order draft for the supplier ordering panel.
//!
//! The idempotency key belongs to the draft, not to the HTTP call: retrying
//! the same draft after a timeout resends the same key, and only a reset
//! (after a confirmed order) rotates it.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use super::template::SupplierOrderTemplate;
use crate::net::types::{OrderLine, OrderRequest};

#[derive(Clone, Debug, PartialEq)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub delivery_address: String,
    pub delivery_date: Option<String>,
    pub notes: Option<String>,
    idempotency_key: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            delivery_address: String::new(),
            delivery_date: None,
            notes: None,
            idempotency_key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl OrderDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed lines from a template's items at their default quantities.
    /// Items with a zero default quantity are skipped.
    #[must_use]
    pub fn from_template(template: &SupplierOrderTemplate) -> Self {
        let lines = template
            .items
            .iter()
            .filter(|item| item.default_quantity > 0)
            .map(|item| OrderLine {
                name: item.product_name.clone(),
                quantity: item.default_quantity,
                unit: item.unit.as_str().to_owned(),
                unit_price: item.last_price,
            })
            .collect();
        let notes = Some(template.notes.clone()).filter(|n| !n.trim().is_empty());
        Self { lines, notes, ..Self::default() }
    }

    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    pub fn remove_line(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.lines.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    #[must_use]
    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    #[must_use]
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest {
            items: self.lines.clone(),
            delivery_address: self.delivery_address.clone(),
            delivery_date: self.delivery_date.clone().filter(|d| !d.trim().is_empty()),
            notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}
