//! Search, suggestions and rocketbar API shapes.

use serde::{Deserialize, Serialize};

/// Raw, unvalidated query parameters accepted by the search endpoints.
///
/// Values stay as strings here; `core::search` validates them into
/// [`SearchData`]-like structures and reports per-field errors instead of
/// failing deserialization wholesale.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchQueryParams {
    /// Free-text query.
    pub q: Option<String>,
    /// Document type filter (`app`, `privileged`, `theme`).
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Page offset.
    pub offset: Option<String>,
    /// Region override; the literal string `"None"` clears the region.
    pub region: Option<String>,
    /// Device filter (`desktop`, `mobile`, `tablet`, `firefoxos`).
    pub device: Option<String>,
    /// Comma separated premium-type codes.
    pub premium_types: Option<String>,
}

/// Pagination metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Total hits matching the query.
    pub total_count: u64,
    /// Applied page size.
    pub limit: u32,
    /// Applied offset.
    pub offset: u32,
}

/// An app document as indexed for search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedApp {
    pub id: i64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub absolute_url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub premium_type: u8,
    #[serde(default)]
    pub device_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub region_exclusions: Vec<String>,
}

/// Standard search payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub meta: Meta,
    pub objects: Vec<IndexedApp>,
}

/// Curated collection groups, keyed by type.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionType {
    Basic,
    Featured,
    Operator,
}

/// A curated collection and its member apps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub collection_type: CollectionType,
    pub apps: Vec<IndexedApp>,
}

/// Featured-search payload: the base search result plus curated groups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeaturedSearchResponse {
    #[serde(flatten)]
    pub base: SearchResponse,
    pub collections: Vec<Collection>,
    pub featured: Vec<Collection>,
    pub operator: Vec<Collection>,
}

/// Body of the suggestions endpoint, serialized as the bare array
/// `[query, names, descriptions, urls, icons]`
/// (`application/x-suggestions+json`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsPayload(
    pub String,
    pub Vec<String>,
    pub Vec<String>,
    pub Vec<String>,
    pub Vec<String>,
);

/// One completion-suggester option returned by the rocketbar endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RocketbarOption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub payload: RocketbarPayload,
}

/// App payload carried by a completion option.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RocketbarPayload {
    pub id: i64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub manifest_url: String,
}
