//! Outbound HTTP client for calls to downstream services.
//!
//! Every request carries `Content-Type: application/json` and, when a
//! RequestContext with an id is passed, the same `X-Request-ID` so a call
//! chain can be correlated across service boundaries.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use thiserror::Error;

use crate::api::v1::extractors::RequestContext;
use crate::middleware::request_id::REQUEST_ID_HEADER;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Per-request headers, applied after the defaults (so they can override them).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn bearer(mut self, token: &str) -> Result<Self, ClientError> {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidHeader("authorization"))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
}

impl ServiceClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ServiceClient, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl ServiceClient {
    pub fn builder() -> ServiceClientBuilder {
        ServiceClientBuilder {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }

    /// Send a request, propagating the request id from `ctx`.
    pub async fn send<B>(
        &self,
        ctx: Option<&RequestContext>,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        if let Some(request_id) = ctx.and_then(RequestContext::request_id) {
            let value = HeaderValue::from_str(request_id)
                .map_err(|_| ClientError::InvalidHeader("x-request-id"))?;
            headers.insert(REQUEST_ID_HEADER, value);
        }

        headers.extend(options.headers);

        let mut request = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        request.send().await.map_err(ClientError::Request)
    }

    pub async fn get(
        &self,
        ctx: Option<&RequestContext>,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        self.send::<()>(ctx, Method::GET, path, None, options).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        ctx: Option<&RequestContext>,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        self.send(ctx, Method::POST, path, Some(body), options).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        ctx: Option<&RequestContext>,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        self.send(ctx, Method::PUT, path, Some(body), options).await
    }

    pub async fn delete(
        &self,
        ctx: Option<&RequestContext>,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        self.send::<()>(ctx, Method::DELETE, path, None, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_path() {
        let client = ServiceClient::builder()
            .base_url("http://svc.internal:8080")
            .build()
            .unwrap();
        assert_eq!(client.url("/api/v1/ping"), "http://svc.internal:8080/api/v1/ping");

        let client = ServiceClient::builder().build().unwrap();
        assert_eq!(client.url("http://x/y"), "http://x/y");
    }

    #[test]
    fn bearer_option_sets_authorization() {
        let options = RequestOptions::new().bearer("abc").unwrap();
        assert_eq!(options.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");

        assert!(RequestOptions::new().bearer("bad\ntoken").is_err());
    }
}
