use serde::Serialize;
use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{ListParams, ResourceId},
};

/// UserService
///
/// Admin user management. The backend's user shape varies between
/// deployments, so records are returned as raw JSON.
#[derive(Clone)]
pub struct UserService {
    resource: Resource,
}

impl UserService {
    pub const PATH: &'static str = "/users";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Value, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.resource.create(data).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: &ResourceId,
        data: &B,
    ) -> Result<Value, ApiError> {
        self.resource.update(id, data).await
    }

    pub async fn remove(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }
}
