//! REST client for the back-office store.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, StoreError>`; nothing here panics or
//! retries. Non-2xx bodies carrying an `error`/`detail` string surface as
//! `StoreError::Rejected` so callers can show the store's own wording.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;

use super::error::StoreError;
use super::types::{
    OrderRequest, PlaceOrderBody, PlaceOrderResponse, PricingQuote, PricingRequest, PricingResponse,
    SmartSuggestion, SuggestionsResponse, SupplierIntegration, SuppliersResponse, TemplateListResponse,
    TemplateSaveResponse, rejection_message,
};
use crate::auth::TokenProvider;
use crate::config::AppConfig;
use crate::state::template::SupplierOrderTemplate;

pub const SUPPLIERS_PATH: &str = "/api/supplier-integrations/suppliers";
pub const PRICING_PATH: &str = "/api/supplier-integrations/pricing";
pub const ORDER_PATH: &str = "/api/supplier-integrations/order";
pub const TEMPLATES_PATH: &str = "/api/supplier-ordering/templates";
pub const SUGGESTIONS_PATH: &str = "/api/supplier-ordering/smart-suggestions";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

fn template_endpoint(template_id: &str) -> String {
    format!("{TEMPLATES_PATH}/{template_id}")
}

// =============================================================================
// STORE TRAITS
// =============================================================================

/// Supplier catalog, pricing, and ordering operations.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the supplier integrations keyed by supplier id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn list_suppliers(&self) -> Result<BTreeMap<String, SupplierIntegration>, StoreError>;

    /// Fetch current prices for `items` from one supplier. Never cached.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn get_pricing(&self, supplier_id: &str, items: &[String]) -> Result<Vec<PricingQuote>, StoreError>;

    /// Submit an order and return the store's order id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the order is not accepted.
    async fn place_order(
        &self,
        supplier_id: &str,
        order: &OrderRequest,
        idempotency_key: &str,
    ) -> Result<String, StoreError>;

    /// Fetch reorder suggestions derived from stock and sales history.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn smart_suggestions(&self) -> Result<Vec<SmartSuggestion>, StoreError>;
}

/// Supplier order-template persistence.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no store reply could be read.
    async fn create_template(&self, template: &SupplierOrderTemplate) -> Result<TemplateSaveResponse, StoreError>;

    /// # Errors
    ///
    /// Returns a [`StoreError`] when no store reply could be read.
    async fn update_template(
        &self,
        template_id: &str,
        template: &SupplierOrderTemplate,
    ) -> Result<TemplateSaveResponse, StoreError>;

    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn list_templates(&self) -> Result<Vec<SupplierOrderTemplate>, StoreError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Store client over HTTP with bearer tokens from the identity context.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpStore {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_base_url.clone(), tokens })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, StoreError> {
        let token = self.tokens.id_token().await.ok_or(StoreError::MissingToken)?;
        tracing::debug!(%method, path, "store request");
        Ok(self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(token))
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, "store returned failure status");
            return Err(classify_failure(status, text));
        }

        decode(&text)
    }
}

#[async_trait::async_trait]
impl CatalogStore for HttpStore {
    async fn list_suppliers(&self) -> Result<BTreeMap<String, SupplierIntegration>, StoreError> {
        let request = self.request(Method::GET, SUPPLIERS_PATH).await?;
        let body: SuppliersResponse = self.execute(request).await?;
        Ok(body.suppliers)
    }

    async fn get_pricing(&self, supplier_id: &str, items: &[String]) -> Result<Vec<PricingQuote>, StoreError> {
        let payload = PricingRequest { supplier_id, items };
        let request = self.request(Method::POST, PRICING_PATH).await?.json(&payload);
        let body: PricingResponse = self.execute(request).await?;
        Ok(body.pricing)
    }

    async fn place_order(
        &self,
        supplier_id: &str,
        order: &OrderRequest,
        idempotency_key: &str,
    ) -> Result<String, StoreError> {
        let payload = PlaceOrderBody { supplier_id, order };
        let request = self
            .request(Method::POST, ORDER_PATH)
            .await?
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(&payload);
        let body: PlaceOrderResponse = self.execute(request).await?;
        order_id_from_response(body)
    }

    async fn smart_suggestions(&self) -> Result<Vec<SmartSuggestion>, StoreError> {
        let request = self.request(Method::GET, SUGGESTIONS_PATH).await?;
        let body: SuggestionsResponse = self.execute(request).await?;
        Ok(body.suggestions)
    }
}

#[async_trait::async_trait]
impl TemplateStore for HttpStore {
    async fn create_template(&self, template: &SupplierOrderTemplate) -> Result<TemplateSaveResponse, StoreError> {
        let request = self.request(Method::POST, TEMPLATES_PATH).await?.json(template);
        self.execute(request).await
    }

    async fn update_template(
        &self,
        template_id: &str,
        template: &SupplierOrderTemplate,
    ) -> Result<TemplateSaveResponse, StoreError> {
        let request = self
            .request(Method::PUT, &template_endpoint(template_id))
            .await?
            .json(template);
        self.execute(request).await
    }

    async fn list_templates(&self) -> Result<Vec<SupplierOrderTemplate>, StoreError> {
        let request = self.request(Method::GET, TEMPLATES_PATH).await?;
        let body: TemplateListResponse = self.execute(request).await?;
        Ok(body.templates)
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

fn classify_failure(status: u16, body: String) -> StoreError {
    match rejection_message(&body) {
        Some(message) => StoreError::Rejected { status: Some(status), message },
        None => StoreError::Status { status, body },
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Decode(e.to_string()))
}

fn order_id_from_response(body: PlaceOrderResponse) -> Result<String, StoreError> {
    if body.success == Some(false) {
        return Err(StoreError::rejected(
            body.error.unwrap_or_else(|| "order was not accepted".to_owned()),
        ));
    }
    body.order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| StoreError::Decode("missing orderId".to_owned()))
}
