//! Supplier catalog state: supplier cards, selection, pricing, and ordering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Phase runs `Idle -> Loading -> Populated`, falling back to `Idle` with the
//! previous suppliers kept when a load fails. Selecting a supplier enables
//! the pricing and order panels; there is no unselect.
//!
//! Supplier loads and pricing fetches go through `begin_*`/`apply_*` pairs.
//! Only the response to the most recently issued request is applied, so a
//! slow early response cannot overwrite a newer one.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::BTreeMap;

use super::order::OrderDraft;
use super::seq::{RequestSeq, RequestToken};
use crate::net::api::CatalogStore;
use crate::net::error::StoreError;
use crate::net::types::{PricingQuote, SupplierIntegration};

/// Shown after any failed order submission.
pub const ORDER_FAILED_MESSAGE: &str = "Failed to place order. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogPhase {
    #[default]
    Idle,
    Loading,
    Populated,
}

/// One-shot banner for the ordering panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    OrderPlaced { order_id: String },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("no supplier selected")]
    NoSupplierSelected,
    #[error("order has no items")]
    EmptyOrder,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    pub suppliers: BTreeMap<String, SupplierIntegration>,
    pub phase: CatalogPhase,
    pub selected: Option<String>,
    pub pricing: Vec<PricingQuote>,
    pub pricing_loading: bool,
    pub order: OrderDraft,
    pub placing_order: bool,
    pub notice: Option<Notice>,
    suppliers_seq: RequestSeq,
    pricing_seq: RequestSeq,
}

impl CatalogState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == CatalogPhase::Loading
    }

    #[must_use]
    pub fn selected_supplier(&self) -> Option<&SupplierIntegration> {
        self.selected.as_ref().and_then(|id| self.suppliers.get(id))
    }

    // =========================================================================
    // SUPPLIERS
    // =========================================================================

    pub fn begin_load_suppliers(&mut self) -> RequestToken {
        self.phase = CatalogPhase::Loading;
        self.suppliers_seq.issue()
    }

    /// Apply a supplier-list response. Returns `false` if it was stale.
    pub fn apply_suppliers(
        &mut self,
        token: RequestToken,
        result: Result<BTreeMap<String, SupplierIntegration>, StoreError>,
    ) -> bool {
        if !self.suppliers_seq.is_latest(token) {
            tracing::debug!("discarding stale supplier list response");
            return false;
        }
        match result {
            Ok(suppliers) => {
                tracing::debug!(count = suppliers.len(), "suppliers loaded");
                self.suppliers = suppliers;
                self.phase = CatalogPhase::Populated;
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "failed to load suppliers");
                self.phase = CatalogPhase::Idle;
            }
        }
        true
    }

    pub async fn load_suppliers<S: CatalogStore + ?Sized>(&mut self, store: &S) {
        let token = self.begin_load_suppliers();
        let result = store.list_suppliers().await;
        self.apply_suppliers(token, result);
    }

    /// Enter the detail sub-state for `supplier_id`. Unknown ids are ignored.
    pub fn select(&mut self, supplier_id: &str) -> bool {
        if !self.suppliers.contains_key(supplier_id) {
            return false;
        }
        if self.selected.as_deref() == Some(supplier_id) {
            return true;
        }
        self.selected = Some(supplier_id.to_owned());
        self.pricing.clear();
        self.pricing_loading = false;
        self.pricing_seq.invalidate();
        self.order = OrderDraft::new();
        self.notice = None;
        true
    }

    // =========================================================================
    // PRICING
    // =========================================================================

    pub fn begin_pricing(&mut self) -> RequestToken {
        self.pricing_loading = true;
        self.pricing_seq.issue()
    }

    /// Apply a pricing response. Returns `false` if it was stale.
    pub fn apply_pricing(&mut self, token: RequestToken, result: Result<Vec<PricingQuote>, StoreError>) -> bool {
        if !self.pricing_seq.is_latest(token) {
            tracing::debug!("discarding stale pricing response");
            return false;
        }
        self.pricing_loading = false;
        match result {
            Ok(pricing) => self.pricing = pricing,
            Err(e) => tracing::warn!(error = %e, code = e.error_code(), "failed to fetch pricing"),
        }
        true
    }

    /// Fetch prices for `item_names` from the selected supplier, replacing
    /// the list.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected, or the store error when the
    /// fetch fails; prior pricing is kept.
    pub async fn get_pricing<S: CatalogStore + ?Sized>(
        &mut self,
        store: &S,
        item_names: &[String],
    ) -> Result<(), CatalogError> {
        let supplier_id = self.selected.clone().ok_or(CatalogError::NoSupplierSelected)?;
        let token = self.begin_pricing();
        let result = store.get_pricing(&supplier_id, item_names).await;
        let error = result.as_ref().err().cloned();
        self.apply_pricing(token, result);
        match error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    // =========================================================================
    // ORDERING
    // =========================================================================

    /// Submit the order draft to the selected supplier.
    ///
    /// On success the draft resets (rotating its idempotency key) and a
    /// confirmation notice is set. On failure the draft is kept as-is so a
    /// retry resends the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected, the draft is empty, or the
    /// store does not accept the order.
    pub async fn place_order<S: CatalogStore + ?Sized>(&mut self, store: &S) -> Result<String, CatalogError> {
        let supplier_id = self.selected.clone().ok_or(CatalogError::NoSupplierSelected)?;
        if !self.order.can_submit() {
            return Err(CatalogError::EmptyOrder);
        }

        let request = self.order.to_request();
        let key = self.order.idempotency_key().to_owned();

        self.placing_order = true;
        let result = store.place_order(&supplier_id, &request, &key).await;
        self.placing_order = false;

        match result {
            Ok(order_id) => {
                tracing::info!(%supplier_id, %order_id, lines = request.items.len(), "order placed");
                self.notice = Some(Notice::OrderPlaced { order_id: order_id.clone() });
                self.order = OrderDraft::new();
                Ok(order_id)
            }
            Err(e) => {
                tracing::warn!(%supplier_id, error = %e, code = e.error_code(), "order placement failed");
                self.notice = Some(Notice::Error(ORDER_FAILED_MESSAGE.to_owned()));
                Err(e.into())
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
