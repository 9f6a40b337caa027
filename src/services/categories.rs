use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{Category, CategoryPayload, ListParams, Paginated, ResourceId},
};

/// CategoryService
///
/// Product and blog categories. Listing is paginated.
#[derive(Clone)]
pub struct CategoryService {
    resource: Resource,
}

impl CategoryService {
    pub const PATH: &'static str = "/categories";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Category>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Category, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, ApiError> {
        self.resource.create(payload).await
    }

    pub async fn update(
        &self,
        id: &ResourceId,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }
}
