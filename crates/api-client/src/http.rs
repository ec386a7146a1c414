use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use shared_types::{ApiConfig, AppError};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error_convert::{JsonErrorExt, ReqwestErrorExt};

/// Supplies the bearer token attached to every request.
///
/// Read on each request, so a login or logout is picked up by the next call
/// without rebuilding the client.
pub trait TokenSource {
    fn bearer_token(&self) -> Option<String>;
}

/// HTTP+JSON client for the Quintet API.
///
/// Cheap to clone; clones share the connection pool and token source.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
    tokens: Option<Rc<dyn TokenSource>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_token_source", &self.tokens.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            tokens: None,
        }
    }

    /// Attach the source of the `Authorization: Bearer` header.
    pub fn with_token_source(mut self, tokens: Rc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.endpoint(path))
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.as_ref().and_then(|t| t.bearer_token()) {
            builder = builder.bearer_auth(token);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    /// POST whose response body is irrelevant to the caller.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        self.post::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        self.put::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send::<IgnoredAny>(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    #[tracing::instrument(name = "api_request", skip(self, builder), fields(method = %method, path = %path))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = builder.send().await.map_err(|e| {
            let err = e.into_app_error();
            tracing::warn!(error = %err, "request failed before a response");
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| e.into_app_error())?;

        if !status.is_success() {
            let err = AppError::from_response(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), message = %err.message, "API returned an error");
            return Err(err);
        }

        tracing::debug!(status = status.as_u16(), "API request succeeded");
        decode_body(status, &text)
    }
}

/// Decode a successful response body.
///
/// 204 No Content and empty bodies decode as JSON `null`, which is accepted
/// by `()`, `Option<_>` and `IgnoredAny`.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, AppError> {
    let body = if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        "null"
    } else {
        text
    };
    serde_json::from_str(body).map_err(|e| e.into_app_error())
}
