//! Wire schema for the supplier-integration and supplier-ordering endpoints.
//!
//! DESIGN
//! ======
//! Integration endpoints speak snake_case request bodies while the store's
//! documents are camelCase; field renames live here so state models can use
//! plain Rust names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::template::SupplierOrderTemplate;

// =============================================================================
// SUPPLIERS
// =============================================================================

/// How a supplier receives orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    Api,
    WebScraping,
    #[default]
    Manual,
    Email,
    /// Any integration kind this client does not know about yet.
    #[serde(other)]
    Other,
}

impl IntegrationKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::WebScraping => "Web scraping",
            Self::Manual => "Manual",
            Self::Email => "Email",
            Self::Other => "Other",
        }
    }
}

/// A supplier integration as listed by the store. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierIntegration {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "integrationType")]
    pub integration_type: IntegrationKind,
    #[serde(default, alias = "apiEndpoint", skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuppliersResponse {
    #[serde(default)]
    pub suppliers: BTreeMap<String, SupplierIntegration>,
}

// =============================================================================
// PRICING
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct PricingRequest<'a> {
    pub supplier_id: &'a str,
    pub items: &'a [String],
}

/// One price line returned by a supplier. Superseded by the next fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    pub item_id: String,
    pub item_name: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub last_updated: String,
    pub supplier_id: String,
}

fn default_currency() -> String {
    "USD".to_owned()
}

fn default_unit() -> String {
    "each".to_owned()
}

#[derive(Debug, Deserialize)]
pub(crate) struct PricingResponse {
    #[serde(default)]
    pub pricing: Vec<PricingQuote>,
}

// =============================================================================
// ORDERS
// =============================================================================

/// One line of an order being placed with a supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_price: f64,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// An order as submitted to a supplier integration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaceOrderBody<'a> {
    pub supplier_id: &'a str,
    #[serde(flatten)]
    pub order: &'a OrderRequest,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceOrderResponse {
    #[serde(default, rename = "orderId", alias = "order_id")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// Store reply to a template create or update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateListResponse {
    #[serde(default)]
    pub templates: Vec<SupplierOrderTemplate>,
}

// =============================================================================
// SMART SUGGESTIONS
// =============================================================================

/// A reorder suggestion computed by the store from stock and sales history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSuggestion {
    pub item_id: String,
    pub product_name: String,
    pub suggested_quantity: u32,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub confidence: u8,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub average_usage: f64,
    #[serde(default)]
    pub trend_direction: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<SmartSuggestion>,
}

// =============================================================================
// ERROR BODIES
// =============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Pull a human-readable failure message out of an error response body.
///
/// Accepts `{ "error": "..." }` and FastAPI-style `{ "detail": "..." }`.
pub(crate) fn rejection_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if let Some(error) = parsed.error.filter(|e| !e.trim().is_empty()) {
        return Some(error);
    }
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}
