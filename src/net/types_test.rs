use super::*;
use crate::state::template::{Category, Unit};
use serde_json::json;

#[test]
fn suppliers_response_parses_mapping() {
    let body = json!({
        "suppliers": {
            "bidfood": {
                "id": "bidfood",
                "name": "Bidfood",
                "integration_type": "api",
                "api_endpoint": "https://api.bidfood.test/v1",
                "features": ["Real-time Pricing", "Order Placement"]
            },
            "market": {
                "id": "market",
                "name": "Local Market",
                "integration_type": "web_scraping",
                "website": "https://market.test"
            }
        }
    });
    let parsed: SuppliersResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.suppliers.len(), 2);
    let bidfood = &parsed.suppliers["bidfood"];
    assert_eq!(bidfood.integration_type, IntegrationKind::Api);
    assert_eq!(bidfood.api_endpoint.as_deref(), Some("https://api.bidfood.test/v1"));
    assert_eq!(bidfood.features.len(), 2);
    let market = &parsed.suppliers["market"];
    assert_eq!(market.integration_type, IntegrationKind::WebScraping);
    assert!(market.features.is_empty());
}

#[test]
fn unknown_integration_kind_maps_to_other() {
    let supplier: SupplierIntegration =
        serde_json::from_value(json!({ "id": "g", "name": "GraphQL Co", "integration_type": "graphql" })).unwrap();
    assert_eq!(supplier.integration_type, IntegrationKind::Other);
    assert_eq!(supplier.integration_type.label(), "Other");
}

#[test]
fn pricing_quote_parses_camel_case_with_defaults() {
    let quote: PricingQuote = serde_json::from_value(json!({
        "itemId": "bidfood_tomato",
        "itemName": "Tomato",
        "price": 4.5,
        "supplierId": "bidfood"
    }))
    .unwrap();
    assert_eq!(quote.item_id, "bidfood_tomato");
    assert_eq!(quote.currency, "USD");
    assert_eq!(quote.unit, "each");
    assert!((quote.price - 4.5).abs() < f64::EPSILON);
}

#[test]
fn pricing_request_serializes_snake_case() {
    let items = vec!["Milk".to_owned(), "Eggs".to_owned()];
    let body = PricingRequest { supplier_id: "s1", items: &items };
    assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "supplier_id": "s1", "items": ["Milk", "Eggs"] }));
}

#[test]
fn place_order_body_flattens_order() {
    let order = OrderRequest {
        items: vec![OrderLine { name: "Flour".into(), quantity: 2, unit: "bag".into(), unit_price: 12.0 }],
        delivery_address: "1 Main St".into(),
        delivery_date: None,
        notes: Some("Back door".into()),
    };
    let body = PlaceOrderBody { supplier_id: "s1", order: &order };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({
            "supplier_id": "s1",
            "items": [{ "name": "Flour", "quantity": 2, "unit": "bag", "unit_price": 12.0 }],
            "delivery_address": "1 Main St",
            "notes": "Back door"
        })
    );
}

#[test]
fn place_order_response_accepts_both_id_spellings() {
    let camel: PlaceOrderResponse = serde_json::from_value(json!({ "orderId": "ORD-1" })).unwrap();
    let snake: PlaceOrderResponse = serde_json::from_value(json!({ "order_id": "ORD-2" })).unwrap();
    assert_eq!(camel.order_id.as_deref(), Some("ORD-1"));
    assert_eq!(snake.order_id.as_deref(), Some("ORD-2"));
}

#[test]
fn line_total_multiplies_quantity() {
    let line = OrderLine { name: "Milk".into(), quantity: 3, unit: "L".into(), unit_price: 1.5 };
    assert!((line.line_total() - 4.5).abs() < f64::EPSILON);
}

#[test]
fn template_save_response_parses_failure() {
    let resp: TemplateSaveResponse =
        serde_json::from_value(json!({ "success": false, "error": "Duplicate supplier" })).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Duplicate supplier"));
    assert_eq!(resp.template_id, None);
}

#[test]
fn smart_suggestion_parses() {
    let resp: SuggestionsResponse = serde_json::from_value(json!({
        "success": true,
        "suggestions": [{
            "itemId": "i1",
            "productName": "Butter",
            "suggestedQuantity": 7,
            "reason": "Low stock detected",
            "confidence": 90,
            "currentStock": 1,
            "averageUsage": 1.2,
            "trendDirection": "up"
        }]
    }))
    .unwrap();
    assert_eq!(resp.suggestions.len(), 1);
    assert_eq!(resp.suggestions[0].suggested_quantity, 7);
    assert_eq!(resp.suggestions[0].confidence, 90);
}

#[test]
fn rejection_message_reads_error_then_detail() {
    assert_eq!(rejection_message(r#"{"error":"nope"}"#).as_deref(), Some("nope"));
    assert_eq!(rejection_message(r#"{"detail":"Authentication required"}"#).as_deref(), Some("Authentication required"));
    assert_eq!(rejection_message(r#"{"detail":[{"loc":["body"]}]}"#), None);
    assert_eq!(rejection_message("<html>502</html>"), None);
    assert_eq!(rejection_message(r#"{"error":"  "}"#), None);
}

#[test]
fn template_list_keeps_items_with_unlisted_unit_and_category() {
    let body = json!({
        "success": true,
        "templates": [
            {
                "id": "doc-1",
                "supplierId": "pos",
                "supplierName": "POS Import",
                "items": [{
                    "id": "item-1",
                    "productName": "Napkins",
                    "unit": "pieces",
                    "category": "Condiments"
                }]
            },
            {
                "id": "doc-2",
                "supplierId": "bidfood",
                "supplierName": "Bidfood",
                "items": [{ "id": "item-1", "productName": "Eggs", "unit": "dozen", "category": "Dairy" }]
            }
        ]
    });
    let parsed: TemplateListResponse = serde_json::from_value(body).unwrap();

    assert_eq!(parsed.templates.len(), 2);
    let item = &parsed.templates[0].items[0];
    assert_eq!(item.unit, Unit::Custom("pieces".into()));
    assert_eq!(item.category, Category::Custom("Condiments".into()));
    assert_eq!(parsed.templates[1].items[0].unit, Unit::Dozen);

    let echoed = serde_json::to_value(item).unwrap();
    assert_eq!(echoed["unit"], "pieces");
    assert_eq!(echoed["category"], "Condiments");
}
