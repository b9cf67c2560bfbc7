use super::*;
use crate::net::types::{IntegrationKind, OrderLine, OrderRequest, SmartSuggestion};
use std::sync::Mutex;

// =========================================================================
// FakeCatalogStore
// =========================================================================

#[derive(Default)]
struct FakeCatalogStore {
    suppliers: Mutex<Vec<Result<BTreeMap<String, SupplierIntegration>, StoreError>>>,
    pricing: Mutex<Vec<Result<Vec<PricingQuote>, StoreError>>>,
    orders: Mutex<Vec<Result<String, StoreError>>>,
    order_calls: Mutex<Vec<(String, OrderRequest, String)>>,
    pricing_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCatalogStore {
    fn with_order_replies(replies: Vec<Result<String, StoreError>>) -> Self {
        Self { orders: Mutex::new(replies), ..Self::default() }
    }
}

#[async_trait::async_trait]
impl CatalogStore for FakeCatalogStore {
    async fn list_suppliers(&self) -> Result<BTreeMap<String, SupplierIntegration>, StoreError> {
        self.suppliers.lock().unwrap().remove(0)
    }

    async fn get_pricing(&self, supplier_id: &str, items: &[String]) -> Result<Vec<PricingQuote>, StoreError> {
        self.pricing_calls
            .lock()
            .unwrap()
            .push((supplier_id.to_owned(), items.to_vec()));
        self.pricing.lock().unwrap().remove(0)
    }

    async fn place_order(
        &self,
        supplier_id: &str,
        order: &OrderRequest,
        idempotency_key: &str,
    ) -> Result<String, StoreError> {
        self.order_calls
            .lock()
            .unwrap()
            .push((supplier_id.to_owned(), order.clone(), idempotency_key.to_owned()));
        self.orders.lock().unwrap().remove(0)
    }

    async fn smart_suggestions(&self) -> Result<Vec<SmartSuggestion>, StoreError> {
        Ok(Vec::new())
    }
}

fn supplier(id: &str) -> SupplierIntegration {
    SupplierIntegration {
        id: id.to_owned(),
        name: id.to_uppercase(),
        integration_type: IntegrationKind::Email,
        api_endpoint: None,
        website: None,
        features: vec!["Order Placement".to_owned()],
    }
}

fn supplier_map(ids: &[&str]) -> BTreeMap<String, SupplierIntegration> {
    ids.iter().map(|id| ((*id).to_owned(), supplier(id))).collect()
}

fn quote(name: &str, price: f64) -> PricingQuote {
    PricingQuote {
        item_id: format!("s1_{name}"),
        item_name: name.to_owned(),
        price,
        currency: "USD".to_owned(),
        unit: "each".to_owned(),
        last_updated: "2026-01-01T00:00:00".to_owned(),
        supplier_id: "s1".to_owned(),
    }
}

fn populated(ids: &[&str]) -> CatalogState {
    let mut state = CatalogState::new();
    let token = state.begin_load_suppliers();
    state.apply_suppliers(token, Ok(supplier_map(ids)));
    state
}

fn ready_to_order() -> CatalogState {
    let mut state = populated(&["s1", "s2"]);
    state.select("s1");
    state.order.add_line(OrderLine { name: "Eggs".into(), quantity: 2, unit: "dozen".into(), unit_price: 6.0 });
    state.order.delivery_address = "1 Main St".into();
    state
}

// =========================================================================
// Supplier loading
// =========================================================================

#[test]
fn default_phase_is_idle() {
    let state = CatalogState::new();
    assert_eq!(state.phase, CatalogPhase::Idle);
    assert!(state.suppliers.is_empty());
    assert!(state.selected_supplier().is_none());
}

#[tokio::test]
async fn load_suppliers_populates() {
    let store = FakeCatalogStore::default();
    store.suppliers.lock().unwrap().push(Ok(supplier_map(&["s1", "s2"])));
    let mut state = CatalogState::new();

    state.load_suppliers(&store).await;

    assert_eq!(state.phase, CatalogPhase::Populated);
    assert_eq!(state.suppliers.len(), 2);
}

#[tokio::test]
async fn load_failure_keeps_stale_suppliers() {
    let store = FakeCatalogStore::default();
    store.suppliers.lock().unwrap().push(Err(StoreError::Request("offline".into())));
    let mut state = populated(&["s1"]);

    state.load_suppliers(&store).await;

    assert_eq!(state.phase, CatalogPhase::Idle);
    assert!(state.suppliers.contains_key("s1"));
}

#[test]
fn begin_load_sets_loading() {
    let mut state = CatalogState::new();
    state.begin_load_suppliers();
    assert!(state.is_loading());
}

#[test]
fn stale_supplier_response_is_discarded() {
    let mut state = CatalogState::new();
    let first = state.begin_load_suppliers();
    let second = state.begin_load_suppliers();

    assert!(state.apply_suppliers(second, Ok(supplier_map(&["new"]))));
    assert!(!state.apply_suppliers(first, Ok(supplier_map(&["old"]))));

    assert!(state.suppliers.contains_key("new"));
    assert!(!state.suppliers.contains_key("old"));
    assert_eq!(state.phase, CatalogPhase::Populated);
}

// =========================================================================
// Selection
// =========================================================================

#[test]
fn select_unknown_supplier_is_ignored() {
    let mut state = populated(&["s1"]);
    assert!(!state.select("missing"));
    assert!(state.selected.is_none());
}

#[test]
fn switching_supplier_clears_pricing_and_order() {
    let mut state = ready_to_order();
    state.pricing = vec![quote("Eggs", 6.0)];

    assert!(state.select("s2"));

    assert_eq!(state.selected_supplier().map(|s| s.id.as_str()), Some("s2"));
    assert!(state.pricing.is_empty());
    assert!(!state.order.can_submit());
}

#[test]
fn reselecting_same_supplier_keeps_draft() {
    let mut state = ready_to_order();
    assert!(state.select("s1"));
    assert!(state.order.can_submit());
}

#[test]
fn pricing_for_previous_selection_is_discarded() {
    let mut state = populated(&["s1", "s2"]);
    state.select("s1");
    let token = state.begin_pricing();
    state.select("s2");
    assert!(!state.apply_pricing(token, Ok(vec![quote("Eggs", 6.0)])));
    assert!(state.pricing.is_empty());
}

// =========================================================================
// Pricing
// =========================================================================

#[tokio::test]
async fn get_pricing_replaces_list_without_caching() {
    let store = FakeCatalogStore::default();
    store
        .pricing
        .lock()
        .unwrap()
        .extend([Ok(vec![quote("Eggs", 6.0)]), Ok(vec![quote("Milk", 1.5)])]);
    let mut state = populated(&["s1"]);
    state.select("s1");
    let items = vec!["Eggs".to_owned(), "Milk".to_owned()];

    state.get_pricing(&store, &items).await.unwrap();
    state.get_pricing(&store, &items).await.unwrap();

    assert_eq!(state.pricing, vec![quote("Milk", 1.5)]);
    assert!(!state.pricing_loading);
    let calls = store.pricing_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("s1".to_owned(), items.clone()));
}

#[tokio::test]
async fn get_pricing_requires_selection() {
    let store = FakeCatalogStore::default();
    let mut state = populated(&["s1"]);

    let err = state.get_pricing(&store, &["Eggs".to_owned()]).await.unwrap_err();

    assert_eq!(err, CatalogError::NoSupplierSelected);
    assert!(!state.pricing_loading);
    assert!(store.pricing_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_pricing_targets_selected_supplier() {
    let store = FakeCatalogStore::default();
    store.pricing.lock().unwrap().push(Ok(vec![quote("Eggs", 6.0)]));
    let mut state = populated(&["s1", "s2"]);
    state.select("s2");

    state.get_pricing(&store, &["Eggs".to_owned()]).await.unwrap();

    let calls = store.pricing_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("s2".to_owned(), vec!["Eggs".to_owned()])]);
}

#[tokio::test]
async fn get_pricing_failure_keeps_previous_quotes() {
    let store = FakeCatalogStore::default();
    store.pricing.lock().unwrap().push(Err(StoreError::Status { status: 500, body: String::new() }));
    let mut state = populated(&["s1"]);
    state.select("s1");
    state.pricing = vec![quote("Eggs", 6.0)];

    let err = state.get_pricing(&store, &["Eggs".to_owned()]).await.unwrap_err();

    assert!(matches!(err, CatalogError::Store(StoreError::Status { status: 500, .. })));
    assert_eq!(state.pricing, vec![quote("Eggs", 6.0)]);
}

// =========================================================================
// Ordering
// =========================================================================

#[tokio::test]
async fn place_order_requires_selection() {
    let store = FakeCatalogStore::default();
    let mut state = populated(&["s1"]);
    assert_eq!(state.place_order(&store).await, Err(CatalogError::NoSupplierSelected));
}

#[tokio::test]
async fn place_order_rejects_empty_draft_without_request() {
    let store = FakeCatalogStore::default();
    let mut state = populated(&["s1"]);
    state.select("s1");
    assert_eq!(state.place_order(&store).await, Err(CatalogError::EmptyOrder));
    assert!(store.order_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn place_order_success_confirms_and_resets() {
    let store = FakeCatalogStore::with_order_replies(vec![Ok("ORD-1".into())]);
    let mut state = ready_to_order();
    let key = state.order.idempotency_key().to_owned();

    let order_id = state.place_order(&store).await.unwrap();

    assert_eq!(order_id, "ORD-1");
    assert_eq!(state.notice, Some(Notice::OrderPlaced { order_id: "ORD-1".into() }));
    assert!(!state.order.can_submit());
    assert_ne!(state.order.idempotency_key(), key);
    let calls = store.order_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "s1");
    assert_eq!(calls[0].1.delivery_address, "1 Main St");
    assert_eq!(calls[0].2, key);
}

#[tokio::test]
async fn retry_after_failure_reuses_idempotency_key() {
    let store = FakeCatalogStore::with_order_replies(vec![
        Err(StoreError::Request("timed out".into())),
        Ok("ORD-2".into()),
    ]);
    let mut state = ready_to_order();

    let first = state.place_order(&store).await;
    assert!(matches!(first, Err(CatalogError::Store(StoreError::Request(_)))));
    assert_eq!(state.notice, Some(Notice::Error(ORDER_FAILED_MESSAGE.into())));
    assert!(state.order.can_submit());
    assert!(!state.placing_order);

    state.place_order(&store).await.unwrap();

    let calls = store.order_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].2, calls[1].2);
}

#[test]
fn dismiss_notice_clears_banner() {
    let mut state = CatalogState::new();
    state.notice = Some(Notice::Error("x".into()));
    state.dismiss_notice();
    assert!(state.notice.is_none());
}
