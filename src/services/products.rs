use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{ListParams, Paginated, Product, ProductPayload, ProductVariant, ResourceId},
    multipart::form_fields,
};

/// ProductService
///
/// Products and their variants. Create and update pick the body encoding per
/// call: JSON when the payload carries no images, multipart otherwise.
#[derive(Clone)]
pub struct ProductService {
    resource: Resource,
}

impl ProductService {
    pub const PATH: &'static str = "/products";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Product>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Product, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        if payload.images.is_empty() {
            return self.resource.create(payload).await;
        }
        let fields = form_fields(payload, &payload.images, &Method::POST)?;
        self.resource
            .api()
            .multipart(self.resource.path(), fields)
            .await
    }

    pub async fn update(
        &self,
        id: &ResourceId,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        if payload.images.is_empty() {
            return self.resource.update(id, payload).await;
        }
        let fields = form_fields(payload, &payload.images, &Method::PUT)?;
        self.resource
            .api()
            .multipart(&self.resource.item_path(id), fields)
            .await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.resource.delete(id).await
    }

    pub async fn variants(&self, product_id: &ResourceId) -> Result<Vec<ProductVariant>, ApiError> {
        let path = format!("{}/variants", self.resource.item_path(product_id));
        self.resource.api().get(&path).await
    }

    pub async fn create_variant<B: Serialize + ?Sized>(
        &self,
        product_id: &ResourceId,
        data: &B,
    ) -> Result<ProductVariant, ApiError> {
        let path = format!("{}/variants", self.resource.item_path(product_id));
        self.resource.api().post(&path, data).await
    }

    /// Free-text search via `GET /products/search?q=`.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let path = format!("{}/search", Self::PATH);
        self.resource
            .api()
            .get_with_query(&path, &[("q", query)])
            .await
    }
}
