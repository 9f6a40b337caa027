use serde_json::json;

use crate::{
    http::ApiClient,
    models::{SlugCheckResponse, SlugGenerateResponse, SlugSuggestionsResponse},
};

/// Slugs shorter than this are never sent for an availability check.
pub const MIN_SLUG_LEN: usize = 3;

/// generate_slug
///
/// Local slug derivation: lowercase, drop everything outside `[a-z0-9]`,
/// whitespace and `-`, turn whitespace runs into `-`, collapse repeated
/// hyphens and trim them from both ends.
pub fn generate_slug(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }
    slug
}

/// SlugService
///
/// Server-side slug helpers for blog posts. These are advisory: every
/// failure degrades to a local answer instead of an error, so an editor form
/// keeps working while the backend is unreachable.
#[derive(Clone)]
pub struct SlugService {
    api: ApiClient,
}

impl SlugService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// True only when the backend confirms the slug is free. Short slugs
    /// and failed checks both report `false`.
    pub async fn check_availability(&self, slug: &str) -> bool {
        if slug.chars().count() < MIN_SLUG_LEN {
            return false;
        }
        let path = format!("/blogs/check-slug/{slug}");
        match self.api.get::<SlugCheckResponse>(&path).await {
            Ok(res) => res.available,
            Err(e) => {
                tracing::warn!(slug, error = %e, "slug availability check failed");
                false
            }
        }
    }

    /// Unique slug for `title` as issued by the backend, or the local
    /// derivation when the request fails.
    pub async fn generate_unique(&self, title: &str) -> String {
        if title.is_empty() {
            return String::new();
        }
        match self
            .api
            .post::<SlugGenerateResponse, _>("/blogs/generate-slug", &json!({ "title": title }))
            .await
        {
            Ok(res) => res.slug,
            Err(e) => {
                tracing::warn!(error = %e, "slug generation failed, using local slug");
                generate_slug(title)
            }
        }
    }

    pub async fn suggestions(&self, title: &str) -> Vec<String> {
        if title.is_empty() {
            return Vec::new();
        }
        match self
            .api
            .post::<SlugSuggestionsResponse, _>("/blogs/suggest-slugs", &json!({ "title": title }))
            .await
        {
            Ok(res) => res.suggestions,
            Err(e) => {
                tracing::warn!(error = %e, "slug suggestions failed");
                Vec::new()
            }
        }
    }
}
