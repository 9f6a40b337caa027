use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{Blog, BlogPayload, ListParams, Paginated, ResourceId, Session},
};

/// BlogService
///
/// Blog posts. Creation stamps the author from the active session.
#[derive(Clone)]
pub struct BlogService {
    resource: Resource,
}

impl BlogService {
    pub const PATH: &'static str = "/blogs";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Blog>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Blog, ApiError> {
        self.resource.get(id).await
    }

    /// create
    ///
    /// Sets `author_id` to the session user's id before submitting, or to
    /// `null` when there is no session. The backend decides whether an
    /// authorless post is acceptable.
    pub async fn create(
        &self,
        payload: BlogPayload,
        session: Option<&Session>,
    ) -> Result<Blog, ApiError> {
        let payload = with_author(payload, session);
        self.resource.create(&payload).await
    }

    pub async fn update(&self, id: &ResourceId, payload: &BlogPayload) -> Result<Blog, ApiError> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }
}

fn with_author(mut payload: BlogPayload, session: Option<&Session>) -> BlogPayload {
    payload.author_id = session.map(|s| s.user.id.clone());
    payload
}
