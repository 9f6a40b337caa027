use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{LabelPayload, ListParams, Paginated, ResourceId, Tag},
};

/// TagService
///
/// Tags share the label shape with brands.
#[derive(Clone)]
pub struct TagService {
    resource: Resource,
}

impl TagService {
    pub const PATH: &'static str = "/tags";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Tag>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Tag, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create(&self, data: &LabelPayload) -> Result<Tag, ApiError> {
        self.resource.create(data).await
    }

    pub async fn update(&self, id: &ResourceId, data: &LabelPayload) -> Result<Tag, ApiError> {
        self.resource.update(id, data).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }
}
