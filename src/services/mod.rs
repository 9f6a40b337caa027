//! Typed wrappers over the admin REST resources.
//!
//! Each service maps list/get/create/update/delete 1:1 onto endpoints below
//! the admin API base. No retries and no backoff: failures are logged by
//! `ApiClient` and returned to the caller as `ApiError`.

pub mod blogs;
pub mod brands;
pub mod categories;
pub mod pages;
pub mod products;
pub mod slugs;
pub mod tags;
pub mod users;

pub use blogs::BlogService;
pub use brands::BrandService;
pub use categories::CategoryService;
pub use pages::PageService;
pub use products::ProductService;
pub use slugs::SlugService;
pub use tags::TagService;
pub use users::UserService;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::ApiError,
    http::ApiClient,
    models::{ListParams, ResourceId},
};

/// Resource
///
/// The plain CRUD mapping shared by every service: `GET {path}`,
/// `GET {path}/{id}`, `POST {path}`, `PUT {path}/{id}`, `DELETE {path}/{id}`.
#[derive(Clone)]
pub struct Resource {
    api: ApiClient,
    path: &'static str,
}

impl Resource {
    pub fn new(api: ApiClient, path: &'static str) -> Self {
        Self { api, path }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn item_path(&self, id: &ResourceId) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list<T: DeserializeOwned>(&self, params: &ListParams) -> Result<T, ApiError> {
        self.api.get_with_query(self.path, &params.to_pairs()).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: &ResourceId) -> Result<T, ApiError> {
        self.api.get(&self.item_path(id)).await
    }

    pub async fn create<T, B>(&self, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api.post(self.path, body).await
    }

    pub async fn update<T, B>(&self, id: &ResourceId, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api.put(&self.item_path(id), body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: &ResourceId) -> Result<T, ApiError> {
        self.api.delete(&self.item_path(id)).await
    }
}
