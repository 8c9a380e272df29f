//! Shared items for the product catalogue screens

use std::fmt::Display;

/// Catalogue entry as returned by the server
///
/// Only the fields the back office round-trips are modelled, unknown fields
/// from newer servers are ignored on deserialization
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub b2c_price: f64,
    #[serde(default)]
    pub b2b_price: f64,
    #[serde(default)]
    pub compare_at_price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProductStatus,
}

/// Fields the client is allowed to send on create/update
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub b2c_price: f64,
    pub b2b_price: f64,
    pub compare_at_price: f64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProductStatus,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            b2c_price: product.b2c_price,
            b2b_price: product.b2b_price,
            compare_at_price: product.compare_at_price,
            stock: product.stock,
            description: product.description.clone(),
            status: product.status.clone(),
        }
    }
}

/// Lifecycle state of a catalogue entry, an open tag set owned by the server
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProductStatus(String);

impl ProductStatus {
    pub fn draft() -> Self {
        Self("Draft".to_string())
    }

    pub fn active() -> Self {
        Self("Active".to_string())
    }

    pub fn archived() -> Self {
        Self("Archived".to_string())
    }

    pub fn selectable() -> [ProductStatus; 3] {
        [Self::draft(), Self::active(), Self::archived()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::draft()
    }
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary returned by the bulk import endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub success: u64,
    pub failed: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}
