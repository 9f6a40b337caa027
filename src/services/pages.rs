use super::Resource;
use crate::{
    error::ApiError,
    http::ApiClient,
    models::{Acknowledgement, Envelope, ListParams, Page, PageList, PagePayload, ResourceId},
};

/// PageService
///
/// CMS pages. Unlike the other resources every response is wrapped in a
/// `{success, data}` envelope, and the listing carries its own pagination
/// block.
#[derive(Clone)]
pub struct PageService {
    resource: Resource,
}

impl PageService {
    pub const PATH: &'static str = "/pages";

    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, Self::PATH),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<PageList<Page>, ApiError> {
        self.resource.list(params).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Envelope<Page>, ApiError> {
        self.resource.get(id).await
    }

    pub async fn create(&self, payload: &PagePayload) -> Result<Envelope<Page>, ApiError> {
        self.resource.create(payload).await
    }

    pub async fn update(
        &self,
        id: &ResourceId,
        payload: &PagePayload,
    ) -> Result<Envelope<Page>, ApiError> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Acknowledgement, ApiError> {
        self.resource.delete(id).await
    }
}
