use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// --- Identity ---

/// ResourceId
///
/// Identifier as returned by the backend. Most records use integer keys, pages
/// and some user records use string keys; the original shape is preserved on
/// serialization so ids round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{id}"),
            ResourceId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        // CLI arguments arrive as text; keep numeric ids numeric.
        id.parse::<i64>()
            .map(ResourceId::Int)
            .unwrap_or_else(|_| ResourceId::Text(id.to_string()))
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::from(id.as_str())
    }
}

// --- Session ---

/// User
///
/// The authenticated user's record as returned by `POST /auth/login` and
/// persisted under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ResourceId,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    // Missing or null roles deserialize as an empty set.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: BTreeSet<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// True when any of `required` is held by this user.
    pub fn has_any_role<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        required.into_iter().any(|role| self.roles.contains(role))
    }
}

/// Session
///
/// The authenticated identity plus its opaque bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// LoginRequest
///
/// Body of `POST /auth/login`. `login` accepts a username or an email.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

/// LoginResponse
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// --- Listing ---

/// ListParams
///
/// Query string of the list endpoints. Unset fields are omitted; `extra`
/// carries resource-specific filters verbatim.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl ListParams {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Flattened `(key, value)` pairs in the order they are sent.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

/// Paginated
///
/// Laravel-style paginator returned by the blog and category listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub last_page: u32,
}

/// Pagination block of the `{success, data, pagination}` page listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// PageList
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageList<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Envelope
///
/// `{success, data}` wrapper used by the page endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Acknowledgement
///
/// Body of delete responses that carry only a success flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
}

// --- Products ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    pub slug: String,
    pub status: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub price: f64,
    pub compare_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub track_quantity: Option<bool>,
    pub quantity: Option<i64>,
    pub min_quantity: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// ProductPayload
///
/// Create/update body. `images` never appears in the JSON encoding; when it
/// is non-empty the service switches to a multipart body instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_quantity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<ResourceId>,
    #[serde(skip)]
    pub images: Vec<ImageUpload>,
}

/// ImageUpload
///
/// One image attachment of a product payload.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub alt: Option<String>,
    pub is_primary: bool,
    pub sort_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: ResourceId,
    pub product_id: ResourceId,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

// --- Blogs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogAuthor {
    pub id: ResourceId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: ResourceId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: ResourceId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<ResourceId>,
    pub author_id: Option<ResourceId>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: Option<BlogAuthor>,
    pub category: Option<CategoryRef>,
}

/// BlogPayload
///
/// `author_id` is filled in by `BlogService::create` from the session; any
/// value set by the caller is overwritten there.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlogPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<ResourceId>,
}

// --- Taxonomies ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Brands and tags share one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: ResourceId,
    pub name: String,
    pub slug: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub type Brand = Label;
pub type Tag = Label;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

// --- Pages ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerImage {
    pub id: ResourceId,
    pub url: String,
    pub name: String,
}

/// Page
///
/// A CMS page with its full SEO/OpenGraph/Twitter metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: ResourceId,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub banner_image_id: Option<ResourceId>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub canonical_url: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub twitter_card: Option<String>,
    pub structured_data: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<BannerImage>,
}

/// PagePayload
///
/// Partial page body. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// Any other page attribute (OpenGraph, Twitter, structured data).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// --- Slugs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugCheckResponse {
    pub success: bool,
    pub available: bool,
    pub slug: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugGenerateResponse {
    pub success: bool,
    pub slug: String,
    pub original_slug: Option<String>,
    pub is_unique: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugSuggestionsResponse {
    pub suggestions: Vec<String>,
}

// --- SEO ---

/// SeoMeta
///
/// SEO record of one public page, keyed by slug in the `SeoStore`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeoMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_description: String,
}

/// Reads an explicit JSON `null` as the type's default, like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_keeps_wire_shape() {
        let int: ResourceId = serde_json::from_str("42").unwrap();
        let text: ResourceId = serde_json::from_str(r#""9f1c""#).unwrap();
        assert_eq!(int, ResourceId::Int(42));
        assert_eq!(serde_json::to_string(&int).unwrap(), "42");
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""9f1c""#);
    }

    #[test]
    fn resource_id_from_cli_text() {
        assert_eq!(ResourceId::from("17"), ResourceId::Int(17));
        assert_eq!(
            ResourceId::from("about-page"),
            ResourceId::Text("about-page".to_string())
        );
    }

    #[test]
    fn user_without_roles_parses_with_empty_set() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"username":"ops","email":"ops@gg.test"}"#).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.name.is_none());
    }

    #[test]
    fn user_with_null_roles_parses_with_empty_set() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"ops","email":"ops@gg.test","roles":null}"#,
        )
        .unwrap();
        assert!(user.roles.is_empty());
        assert!(!user.has_role("admin"));
    }

    #[test]
    fn seo_meta_reads_null_fields_as_empty() {
        let meta: SeoMeta =
            serde_json::from_str(r#"{"seo_title":"About Us","seo_description":null}"#).unwrap();
        assert_eq!(meta.seo_title, "About Us");
        assert_eq!(meta.seo_description, "");
    }

    #[test]
    fn list_params_pairs_keep_order() {
        let params = ListParams::search("kopi").with("status", "active");
        assert_eq!(
            params.to_pairs(),
            vec![
                ("search".to_string(), "kopi".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn blog_payload_always_sends_author_id() {
        let json = serde_json::to_value(BlogPayload::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "author_id": null }));
    }
}
