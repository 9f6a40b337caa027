use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{Brand, LabelPayload, ListParams, Paginated, ResourceId},
};

#[derive(Clone)]
pub struct BrandService {
    resource: Resource,
}

impl BrandService {
    pub const PATH: &'static str = "/brands";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Brand>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Brand, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create(&self, data: &LabelPayload) -> Result<Brand, ApiError> {
        self.resource.create(data).await
    }

    pub async fn update(&self, id: &ResourceId, data: &LabelPayload) -> Result<Brand, ApiError> {
        self.resource.update(id, data).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }
}
