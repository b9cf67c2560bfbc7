//! Order-template editor: draft lifecycle, local edits, and submit.
//!
//! SYSTEM CONTEXT
//! ==============
//! A dialog binds to one `TemplateEditor`. Local edits never touch the
//! network; `submit` validates, then issues exactly one create or update.
//! A failed submit leaves the dialog open with the draft intact.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use super::template::{
    ItemField, OrderTemplateItem, SupplierOrderTemplate, TemplateField, ValidationError, Weekday,
};
use crate::net::api::TemplateStore;

/// Shown when the store gives no usable failure message.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save template";

const HISTORY_LIMIT: usize = 50;

/// Result of one `submit` call.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The store accepted the template; the editor has closed.
    Saved { template: SupplierOrderTemplate, created: bool },
    /// Local validation failed; no request was sent.
    Invalid(ValidationError),
    /// The store rejected or never answered; the draft is unchanged.
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct TemplateEditor {
    open: bool,
    draft: SupplierOrderTemplate,
    history: Vec<SupplierOrderTemplate>,
    item_seq: u64,
    error: Option<String>,
    saving: bool,
}

impl TemplateEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on a deep copy of `editing`, or on the canonical empty template.
    ///
    /// Always reinitializes, even when already open on the same target.
    /// Negative or NaN amounts in `editing` are clamped to zero.
    pub fn open(&mut self, editing: Option<&SupplierOrderTemplate>) {
        self.draft = editing.map_or_else(SupplierOrderTemplate::empty, SupplierOrderTemplate::normalized);
        self.item_seq = self.draft.items.len() as u64;
        self.history.clear();
        self.error = None;
        self.saving = false;
        self.open = true;
    }

    /// Close and discard the draft.
    pub fn close(&mut self) {
        self.open = false;
        self.draft = SupplierOrderTemplate::empty();
        self.history.clear();
        self.item_seq = 0;
        self.error = None;
        self.saving = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// True when the draft is an existing store template.
    #[must_use]
    pub fn is_edit_mode(&self) -> bool {
        self.draft.is_persisted()
    }

    #[must_use]
    pub fn draft(&self) -> &SupplierOrderTemplate {
        &self.draft
    }

    /// The single message currently shown to the user, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // =========================================================================
    // LOCAL EDITS
    // =========================================================================

    /// Append a blank item and return its local id.
    pub fn add_item(&mut self) -> String {
        let id = self.next_item_id();
        let next = self.draft.with_item_appended(OrderTemplateItem::blank(id.clone()));
        self.replace(next);
        id
    }

    /// Replace one field of the item at `index`. Returns `false` when out of range.
    pub fn update_item(&mut self, index: usize, field: ItemField) -> bool {
        match self.draft.with_item_updated(index, field) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    /// Remove the item at `index`. Returns `false` when out of range.
    pub fn remove_item(&mut self, index: usize) -> bool {
        match self.draft.with_item_removed(index) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    pub fn update_field(&mut self, field: TemplateField) {
        let next = self.draft.with_field(field);
        self.replace(next);
    }

    pub fn toggle_delivery_day(&mut self, day: Weekday, included: bool) {
        let next = self.draft.with_delivery_day(day, included);
        self.replace(next);
    }

    /// Restore the draft as it was before the last edit.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.draft = previous;
                true
            }
            None => false,
        }
    }

    fn replace(&mut self, next: SupplierOrderTemplate) {
        if next == self.draft {
            return;
        }
        let previous = std::mem::replace(&mut self.draft, next);
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(previous);
    }

    fn next_item_id(&mut self) -> String {
        loop {
            self.item_seq += 1;
            let id = format!("item-{}", self.item_seq);
            if !self.draft.items.iter().any(|item| item.id == id) {
                return id;
            }
        }
    }

    // =========================================================================
    // SUBMIT
    // =========================================================================

    /// Validate and persist the draft as one create or update.
    ///
    /// Validation stops at the first failure and sends nothing. A create
    /// without a supplier id gets a generated one in the outgoing payload
    /// only; the draft itself is never modified by a failed submit.
    pub async fn submit<S: TemplateStore + ?Sized>(&mut self, store: &S) -> SubmitOutcome {
        if let Err(invalid) = self.draft.validate() {
            self.error = Some(invalid.to_string());
            return SubmitOutcome::Invalid(invalid);
        }
        self.error = None;

        let mut payload = self.draft.clone();
        let existing_id = payload.id.clone().filter(|id| !id.trim().is_empty());
        let created = existing_id.is_none();

        self.saving = true;
        let result = match existing_id.as_deref() {
            Some(template_id) => store.update_template(template_id, &payload).await,
            None => {
                if payload.supplier_id.trim().is_empty() {
                    payload.supplier_id = generate_supplier_id();
                }
                store.create_template(&payload).await
            }
        };
        self.saving = false;

        match result {
            Ok(reply) if reply.success => {
                if let Some(template_id) = reply.template_id.filter(|id| !id.is_empty()) {
                    payload.id = Some(template_id);
                }
                tracing::info!(
                    supplier_id = %payload.supplier_id,
                    template_id = payload.id.as_deref().unwrap_or_default(),
                    created,
                    "supplier template saved"
                );
                self.close();
                SubmitOutcome::Saved { template: payload, created }
            }
            Ok(reply) => {
                let message = reply
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| SAVE_FAILED_MESSAGE.to_owned());
                self.fail(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "template save failed");
                let message = e
                    .store_message()
                    .map_or_else(|| SAVE_FAILED_MESSAGE.to_owned(), str::to_owned);
                self.fail(message)
            }
        }
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        self.error = Some(message.clone());
        SubmitOutcome::Failed(message)
    }
}

fn generate_supplier_id() -> String {
    format!("supplier_{}", uuid::Uuid::new_v4().simple())
}
