//! Shared HTTP client for the admin API.
//!
//! Every request goes through `ApiClient::send`, which plays the role of the
//! request/response interceptors: it reads the bearer token from client
//! storage right before sending, stamps an `x-request-id`, and logs any
//! failure before handing it back to the caller unchanged.

use reqwest::{Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::ApiError,
    multipart::{FormField, into_form},
    storage::{StorageState, TOKEN_KEY},
};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ApiClient
///
/// Cheap to clone: the underlying `reqwest::Client` and storage handle are
/// reference counted, so every service holds its own copy.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    // None for clients of public endpoints, which never send a token.
    storage: Option<StorageState>,
}

impl ApiClient {
    /// Builds a client rooted at the admin API base of `config`.
    ///
    /// # Errors
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(config: &AppConfig, storage: StorageState) -> Result<Self, ApiError> {
        Self::with_base_url(config.admin_base(), config, storage)
    }

    /// Builds an authenticated client rooted at an arbitrary base.
    pub fn with_base_url(
        base_url: impl Into<String>,
        config: &AppConfig,
        storage: StorageState,
    ) -> Result<Self, ApiError> {
        Self::build(base_url.into(), config, Some(storage))
    }

    /// Builds a client for the public site API (`{site_url}/api`). It never
    /// attaches a bearer token.
    pub fn public(config: &AppConfig) -> Result<Self, ApiError> {
        Self::build(format!("{}/api", config.site_url), config, None)
    }

    fn build(
        base_url: String,
        config: &AppConfig,
        storage: Option<StorageState>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Stored bearer token, if any. A storage failure is logged and treated
    /// as "no token" so the request still goes out unauthenticated.
    fn stored_token(&self) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read token from storage");
                None
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, Uuid) {
        self.request_as(method, path, self.stored_token())
    }

    fn request_as(
        &self,
        method: Method,
        path: &str,
        token: Option<String>,
    ) -> (RequestBuilder, Uuid) {
        let request_id = Uuid::new_v4();
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        (builder, request_id)
    }

    /// send
    ///
    /// Executes a prepared request and decodes a JSON success body. Non-2xx
    /// responses become `ApiError::Status`, carrying the backend's `message`
    /// field when the error body has one.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: Uuid,
        method: &Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let result: Result<T, ApiError> = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            if !status.is_success() {
                let message = serde_json::from_slice::<Value>(&body).ok().and_then(|v| {
                    v.get("message").and_then(Value::as_str).map(str::to_string)
                });
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            // 204 and empty bodies decode as JSON null.
            if body.is_empty() {
                return Ok(serde_json::from_value(Value::Null)?);
            }
            Ok(serde_json::from_slice(&body)?)
        }
        .await;

        if let Err(e) = &result {
            tracing::error!(
                req_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "API Error"
            );
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (builder, id) = self.request(Method::GET, path);
        self.send(builder, id, &Method::GET, path).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let (builder, id) = self.request(Method::GET, path);
        self.send(builder.query(query), id, &Method::GET, path).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_json(Method::POST, path, body).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_json(Method::PUT, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (builder, id) = self.request(Method::DELETE, path);
        self.send(builder, id, &Method::DELETE, path).await
    }

    /// POST with an explicit bearer token instead of the stored one. Used by
    /// logout, which must authenticate with the in-memory session token.
    pub async fn post_with_token<T, B>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (builder, id) = self.request_as(Method::POST, path, Some(token.to_string()));
        let builder = builder.json(body);
        self.send(builder, id, &Method::POST, path).await
    }

    async fn with_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (builder, id) = self.request(method.clone(), path);
        self.send(builder.json(body), id, &method, path).await
    }

    /// multipart
    ///
    /// Sends `fields` as `multipart/form-data`. The backend only parses
    /// multipart bodies on POST, so the caller tunnels other verbs through an
    /// `_method` field (see `multipart::form_fields`) and this always POSTs.
    pub async fn multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<FormField>,
    ) -> Result<T, ApiError> {
        let form = into_form(fields)?;
        let (builder, id) = self.request(Method::POST, path);
        self.send(builder.multipart(form), id, &Method::POST, path)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_base_url(base, &AppConfig::default(), Arc::new(MemoryStorage::new()))
            .unwrap()
    }

    #[test]
    fn url_joins_with_and_without_leading_slash() {
        let api = client("https://be.example.com/api/admin/");
        assert_eq!(api.url("/products"), "https://be.example.com/api/admin/products");
        assert_eq!(api.url("tags/3"), "https://be.example.com/api/admin/tags/3");
    }

    #[test]
    fn stored_token_ignores_empty_value() {
        let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "")]));
        let api =
            ApiClient::with_base_url("http://x", &AppConfig::default(), storage).unwrap();
        assert!(api.stored_token().is_none());
    }

    #[test]
    fn public_client_never_reads_token() {
        let config = AppConfig {
            site_url: "https://gudanggrosiran.com".to_string(),
            ..AppConfig::default()
        };
        let api = ApiClient::public(&config).unwrap();
        assert_eq!(api.base_url(), "https://gudanggrosiran.com/api");
        assert!(api.stored_token().is_none());
    }
}
