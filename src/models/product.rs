use serde::{Deserialize, Serialize};

/// Core catalog entity. Ids are assigned by the store, never by callers,
/// and are immutable once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// The wire name has no underscore, kept for client compatibility.
    #[serde(rename = "longdescription")]
    pub long_description: String,
    pub price: f64,
    pub image: String,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Create payload. There is deliberately no `id` field: an `id` supplied by
/// the client is dropped during deserialization and the store assigns its own.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "longdescription")]
    pub long_description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
}
