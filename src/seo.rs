use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    document::{DESCRIPTION_META, DocumentHead},
    error::ApiError,
    http::ApiClient,
    models::SeoMeta,
    routes::RouteMatch,
};

/// Slug used when neither route metadata nor the path yields one.
pub const DEFAULT_SLUG: &str = "home";

// 1. SeoProvider Contract
/// SeoProvider
///
/// Source of per-page SEO records. `HttpSeoProvider` reads the public site
/// API; `StaticSeoProvider` serves canned records in tests.
#[async_trait]
pub trait SeoProvider: Send + Sync {
    /// SEO record for the page identified by `slug`.
    async fn seo_meta(&self, slug: &str) -> Result<SeoMeta, ApiError>;

    /// Raw public record of kind `kind` (e.g. `products`, `blogs`).
    async fn record(&self, kind: &str, slug: &str) -> Result<Value, ApiError>;
}

// 2. The Real Implementation
/// HttpSeoProvider
///
/// Reads `GET {site}/api/seo/{slug}` and `GET {site}/api/{kind}/{slug}`.
pub struct HttpSeoProvider {
    api: ApiClient,
}

impl HttpSeoProvider {
    /// `api` must be rooted at the public `/api` base, not the admin one.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SeoProvider for HttpSeoProvider {
    async fn seo_meta(&self, slug: &str) -> Result<SeoMeta, ApiError> {
        self.api.get(&format!("/seo/{slug}")).await
    }

    async fn record(&self, kind: &str, slug: &str) -> Result<Value, ApiError> {
        self.api.get(&format!("/{kind}/{slug}")).await
    }
}

// 3. The Mock Implementation (For Tests)
/// StaticSeoProvider
///
/// Serves records from memory. Unknown slugs answer 404 like the real API.
#[derive(Default, Clone)]
pub struct StaticSeoProvider {
    pub pages: HashMap<String, SeoMeta>,
    pub records: HashMap<(String, String), Value>,
    /// When true, every lookup fails with a simulated server error.
    pub should_fail: bool,
}

impl StaticSeoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, slug: &str, title: &str, description: &str) -> Self {
        self.pages.insert(
            slug.to_string(),
            SeoMeta {
                seo_title: title.to_string(),
                seo_description: description.to_string(),
            },
        );
        self
    }

    pub fn with_record(mut self, kind: &str, slug: &str, record: Value) -> Self {
        self.records
            .insert((kind.to_string(), slug.to_string()), record);
        self
    }

    fn simulated_failure() -> ApiError {
        ApiError::Status {
            status: 500,
            message: Some("Mock SEO Error: Simulation requested".to_string()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: None,
        }
    }
}

#[async_trait]
impl SeoProvider for StaticSeoProvider {
    async fn seo_meta(&self, slug: &str) -> Result<SeoMeta, ApiError> {
        if self.should_fail {
            return Err(Self::simulated_failure());
        }
        self.pages.get(slug).cloned().ok_or_else(Self::not_found)
    }

    async fn record(&self, kind: &str, slug: &str) -> Result<Value, ApiError> {
        if self.should_fail {
            return Err(Self::simulated_failure());
        }
        self.records
            .get(&(kind.to_string(), slug.to_string()))
            .cloned()
            .ok_or_else(Self::not_found)
    }
}

/// SeoProviderState
pub type SeoProviderState = Arc<dyn SeoProvider>;

/// SeoStore
///
/// Fetches SEO records and keeps the latest one per slug for the lifetime of
/// the store. Entries are never invalidated; a later fetch for the same slug
/// overwrites. Nothing is persisted.
pub struct SeoStore {
    provider: SeoProviderState,
    cache: HashMap<String, SeoMeta>,
}

impl SeoStore {
    pub fn new(provider: SeoProviderState) -> Self {
        Self {
            provider,
            cache: HashMap::new(),
        }
    }

    pub fn cached(&self, slug: &str) -> Option<&SeoMeta> {
        self.cache.get(slug)
    }

    /// Fetches the record for `slug` and caches it on success. Always goes to
    /// the provider; the cache is a read-side convenience only.
    pub async fn fetch(&mut self, slug: &str) -> Result<SeoMeta, ApiError> {
        let meta = self.provider.seo_meta(slug).await?;
        self.cache.insert(slug.to_string(), meta.clone());
        Ok(meta)
    }

    /// fetch_dynamic
    ///
    /// SEO fields of a public record (product, blog, ...). Missing SEO fields
    /// fall back to `name` and `short_desc`, then to empty strings. Failures
    /// are logged and yield `None`.
    pub async fn fetch_dynamic(&self, kind: &str, slug: &str) -> Option<SeoMeta> {
        match self.provider.record(kind, slug).await {
            Ok(record) => Some(SeoMeta {
                seo_title: first_text(&record, &["seo_title", "name"]),
                seo_description: first_text(&record, &["seo_description", "short_desc"]),
            }),
            Err(e) => {
                tracing::error!(kind, slug, error = %e, "dynamic SEO fetch failed");
                None
            }
        }
    }

    /// inject
    ///
    /// Post-navigation hook. Admin routes copy their static title into the
    /// document. Public routes fetch the record for the derived slug and, on
    /// success, set the title and upsert the description meta tag. A failed
    /// fetch is logged and the document is left as it was.
    ///
    /// Returns true when the document was changed.
    pub async fn inject(&mut self, target: &RouteMatch, document: &mut DocumentHead) -> bool {
        if target.route.admin {
            return match &target.route.title {
                Some(title) => {
                    document.set_title(title.clone());
                    true
                }
                None => false,
            };
        }

        let slug = slug_for(target);
        match self.fetch(&slug).await {
            Ok(meta) => {
                document.set_title(meta.seo_title);
                document.upsert_meta(DESCRIPTION_META, meta.seo_description);
                true
            }
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "Failed to fetch SEO meta");
                false
            }
        }
    }
}

/// Explicit route slug, else the last non-empty path segment, else
/// `DEFAULT_SLUG`.
pub fn slug_for(target: &RouteMatch) -> String {
    if let Some(slug) = &target.route.slug {
        return slug.clone();
    }
    target
        .location
        .segments()
        .last()
        .map_or_else(|| DEFAULT_SLUG.to_string(), str::to_string)
}

fn first_text(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}
