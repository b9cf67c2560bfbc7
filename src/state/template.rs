//! Supplier order-template aggregate and its typed field updates.
//!
//! DESIGN
//! ======
//! Every edit is a value-to-value function: `with_*` methods borrow the
//! current draft and return the next one, so the editor can keep prior
//! values for undo and tests can compare whole drafts structurally.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Units an ordered product can be counted in.
///
/// Stored templates may carry units outside the known set (`"pieces"`,
/// `"unit"`); those decode to `Custom` and serialize back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Kilogram,
    Gram,
    Litre,
    Millilitre,
    #[default]
    Each,
    Dozen,
    Box,
    Case,
    Bag,
    Bottle,
    Can,
    Pack,
    Custom(String),
}

impl Unit {
    pub const ALL: [Unit; 12] = [
        Unit::Kilogram,
        Unit::Gram,
        Unit::Litre,
        Unit::Millilitre,
        Unit::Each,
        Unit::Dozen,
        Unit::Box,
        Unit::Case,
        Unit::Bag,
        Unit::Bottle,
        Unit::Can,
        Unit::Pack,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Litre => "L",
            Self::Millilitre => "mL",
            Self::Each => "each",
            Self::Dozen => "dozen",
            Self::Box => "box",
            Self::Case => "case",
            Self::Bag => "bag",
            Self::Bottle => "bottle",
            Self::Can => "can",
            Self::Pack => "pack",
            Self::Custom(raw) => raw,
        }
    }

    /// Match one of the known units, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        Self::parse(&raw).unwrap_or(Self::Custom(raw))
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Custom(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Product categories used to group template items. Unknown stored values
/// are kept as `Custom`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Bakery,
    DryGoods,
    Beverages,
    Frozen,
    Cleaning,
    Packaging,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Produce,
        Category::Meat,
        Category::Seafood,
        Category::Dairy,
        Category::Bakery,
        Category::DryGoods,
        Category::Beverages,
        Category::Frozen,
        Category::Cleaning,
        Category::Packaging,
        Category::Other,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Produce => "Produce",
            Self::Meat => "Meat",
            Self::Seafood => "Seafood",
            Self::Dairy => "Dairy",
            Self::Bakery => "Bakery",
            Self::DryGoods => "Dry Goods",
            Self::Beverages => "Beverages",
            Self::Frozen => "Frozen",
            Self::Cleaning => "Cleaning",
            Self::Packaging => "Packaging",
            Self::Other => "Other",
            Self::Custom(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or(Self::Custom(raw))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Delivery weekdays. Ordering follows the calendar week starting Monday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

// =============================================================================
// AGGREGATE
// =============================================================================

/// One product line in a supplier order template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTemplateItem {
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub default_package_size: String,
    #[serde(default)]
    pub default_quantity: u32,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub last_price: f64,
    #[serde(default)]
    pub average_monthly_usage: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub essential: bool,
}

impl OrderTemplateItem {
    /// A blank item carrying only its local identity.
    #[must_use]
    pub fn blank(id: String) -> Self {
        Self { id, default_quantity: 1, ..Self::default() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub rep: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiIntegration {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "type", default = "default_integration_type")]
    pub integration_type: String,
}

impl Default for ApiIntegration {
    fn default() -> Self {
        Self { enabled: false, integration_type: default_integration_type() }
    }
}

fn default_integration_type() -> String {
    "email".to_owned()
}

/// Reusable ordering defaults for one supplier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderTemplate {
    /// Store-assigned document id; present once the template has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub items: Vec<OrderTemplateItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub preferred_delivery_days: BTreeSet<Weekday>,
    #[serde(default)]
    pub minimum_order_value: f64,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub api_integration: ApiIntegration,
}

// =============================================================================
// FIELD UPDATES
// =============================================================================

/// Replacement value for exactly one field of an [`OrderTemplateItem`].
#[derive(Clone, Debug, PartialEq)]
pub enum ItemField {
    ProductName(String),
    DefaultPackageSize(String),
    DefaultQuantity(u32),
    Unit(Unit),
    LastPrice(f64),
    AverageMonthlyUsage(f64),
    Category(Category),
    Essential(bool),
}

impl ItemField {
    fn apply(self, item: &mut OrderTemplateItem) {
        match self {
            Self::ProductName(v) => item.product_name = v,
            Self::DefaultPackageSize(v) => item.default_package_size = v,
            Self::DefaultQuantity(v) => item.default_quantity = v,
            Self::Unit(v) => item.unit = v,
            Self::LastPrice(v) => item.last_price = non_negative(v),
            Self::AverageMonthlyUsage(v) => item.average_monthly_usage = non_negative(v),
            Self::Category(v) => item.category = v,
            Self::Essential(v) => item.essential = v,
        }
    }
}

/// Replacement value for exactly one template-level field.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateField {
    SupplierId(String),
    SupplierName(String),
    Notes(String),
    MinimumOrderValue(f64),
    ContactRep(String),
    ContactEmail(String),
    ContactPhone(String),
    ApiEnabled(bool),
    ApiType(String),
}

impl TemplateField {
    fn apply(self, template: &mut SupplierOrderTemplate) {
        match self {
            Self::SupplierId(v) => template.supplier_id = v,
            Self::SupplierName(v) => template.supplier_name = v,
            Self::Notes(v) => template.notes = v,
            Self::MinimumOrderValue(v) => template.minimum_order_value = non_negative(v),
            Self::ContactRep(v) => template.contact_info.rep = v,
            Self::ContactEmail(v) => template.contact_info.email = v,
            Self::ContactPhone(v) => template.contact_info.phone = v,
            Self::ApiEnabled(v) => template.api_integration.enabled = v,
            Self::ApiType(v) => template.api_integration.integration_type = v,
        }
    }
}

/// Clamp currency/quantity inputs to `0.0`; NaN also becomes `0.0`.
fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// The first reason a draft cannot be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Supplier name is required")]
    MissingSupplierName,
    #[error("Contact email is required")]
    MissingContactEmail,
    #[error("At least one item is required")]
    NoItems,
}

// =============================================================================
// VALUE OPERATIONS
// =============================================================================

impl SupplierOrderTemplate {
    /// The canonical empty template used by create mode.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the store already knows this template.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// Copy with every money and usage figure clamped to `>= 0`, for values
    /// that arrive from the store rather than through field updates.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut next = self.clone();
        next.minimum_order_value = non_negative(next.minimum_order_value);
        for item in &mut next.items {
            item.last_price = non_negative(item.last_price);
            item.average_monthly_usage = non_negative(item.average_monthly_usage);
        }
        next
    }

    /// Check submit preconditions in fixed order, reporting the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] hit: supplier name, then contact
    /// email, then item count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.supplier_name.trim().is_empty() {
            return Err(ValidationError::MissingSupplierName);
        }
        if self.contact_info.email.trim().is_empty() {
            return Err(ValidationError::MissingContactEmail);
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_field(&self, field: TemplateField) -> Self {
        let mut next = self.clone();
        field.apply(&mut next);
        next
    }

    #[must_use]
    pub fn with_item_appended(&self, item: OrderTemplateItem) -> Self {
        let mut next = self.clone();
        next.items.push(item);
        next
    }

    /// Replace one field of the item at `index`; `None` when out of range.
    #[must_use]
    pub fn with_item_updated(&self, index: usize, field: ItemField) -> Option<Self> {
        let mut next = self.clone();
        let item = next.items.get_mut(index)?;
        field.apply(item);
        Some(next)
    }

    /// Remove the item at `index`; `None` when out of range.
    #[must_use]
    pub fn with_item_removed(&self, index: usize) -> Option<Self> {
        if index >= self.items.len() {
            return None;
        }
        let mut next = self.clone();
        next.items.remove(index);
        Some(next)
    }

    #[must_use]
    pub fn with_delivery_day(&self, day: Weekday, included: bool) -> Self {
        let mut next = self.clone();
        if included {
            next.preferred_delivery_days.insert(day);
        } else {
            next.preferred_delivery_days.remove(&day);
        }
        next
    }

    /// Estimated value of one order placed at default quantities and last prices.
    #[must_use]
    pub fn estimated_order_value(&self) -> f64 {
        self.items
            .iter()
            .map(|item| f64::from(item.default_quantity) * item.last_price)
            .sum()
    }

    /// Whether [`Self::estimated_order_value`] reaches the supplier minimum.
    #[must_use]
    pub fn meets_minimum_order(&self) -> bool {
        self.estimated_order_value() >= self.minimum_order_value
    }
}
