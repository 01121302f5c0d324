use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::client::USER_AGENT;
use crate::error::ApiError;
use crate::{ClientError, Credentials, HeaderOptions};

/// Blocking client for the Graphstore HTTP API.
///
/// This is the synchronous counterpart of [`crate::Client`]. It carries
/// the same base-URL, credential and error-classification behavior but
/// exposes only the generic transport surface; the typed per-resource
/// methods live on the async client.
#[derive(Debug)]
pub struct BlockingClient {
    base_url: Url,
    credentials: Credentials,
    http: reqwest::blocking::Client,
}

impl BlockingClient {
    /// Creates a new client with the given base URL.
    ///
    /// The URL is normalized to include a trailing slash, so relative
    /// endpoint paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.as_ref().to_owned()))?;
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: ensure_trailing_slash(parsed),
            credentials: Credentials::Anonymous,
            http,
        })
    }

    /// Returns a new client authenticating with HTTP basic auth.
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Returns a new client authenticating with a bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::Bearer {
            token: token.into(),
        };
        self
    }

    /// The normalized base endpoint all request paths resolve against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a `GET` request and parses the response as JSON.
    pub fn get_value(&self, path: &str) -> Result<Value, ClientError> {
        self.request_value(Method::GET, path, None)
    }

    /// Sends a request and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty
    /// body. Responses outside 2xx are classified into
    /// [`ApiError`](crate::ApiError) values.
    pub fn request_value(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let payload = self.request_bytes(method, path, HeaderOptions::json(), body)?;
        if payload.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_slice(&payload)?)
        }
    }

    /// Sends a request and returns the response body verbatim.
    pub fn request_bytes(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<Value>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.build_url(path)?;
        let mut request = self.http.request(method, url);

        if let Some(accept) = headers.accept {
            request = request.header(ACCEPT, accept.as_str());
        }
        if let Some(json_body) = body {
            request = request.json(&json_body);
            if let Some(content_type) = headers.content_type {
                request = request.header(CONTENT_TYPE, content_type.as_str());
            }
        }

        let response = self.credentials.apply_blocking(request).send()?;
        let status = response.status();
        let payload = response.bytes()?;
        if status.is_success() {
            Ok(payload.to_vec())
        } else {
            Err(ApiError::classify(status, &payload).into())
        }
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
