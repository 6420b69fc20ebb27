//! REST Client
//!
//! Authenticated JSON requests against the backend. On wasm32 `reqwest`
//! goes through `window.fetch`.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{check_status, ApiError};
use super::session::Session;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn Session>,
}

impl ApiClient {
    /// `base_url` must be absolute, e.g. `https://desk.example.com/api`.
    pub fn new(base_url: &str, session: Arc<dyn Session>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::Config(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{} cannot be a base URL", base_url)));
        }
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a successful response.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::error!(target: "API", "request failed for {}: {}", path, e);
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        check_status(status, &body, self.session.as_ref())?;
        Ok(body)
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(String, String)]) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(params);
        let body = self.send(builder, path).await?;
        Self::parse(&body)
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path).json(payload);
        let body = self.send(builder, path).await?;
        Self::parse(&body)
    }

    /// DELETE; any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder, path).await.map(|_| ())
    }
}
