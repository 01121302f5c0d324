use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::{ClientError, Credentials, MediaType};

pub(crate) const USER_AGENT: &str = concat!("graphstore-client/", env!("CARGO_PKG_VERSION"));

/// Shorthand for calls that carry no request body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Per-call content negotiation headers.
///
/// An absent field means the header is not set at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderOptions {
    /// `Content-Type` for the request body, applied only when a body is
    /// present.
    pub content_type: Option<MediaType>,
    /// `Accept` for the response.
    pub accept: Option<MediaType>,
}

impl HeaderOptions {
    /// Accept the given media type, no content type.
    #[must_use]
    pub const fn accept(media_type: MediaType) -> Self {
        Self {
            content_type: None,
            accept: Some(media_type),
        }
    }

    /// JSON in both directions.
    #[must_use]
    pub const fn json() -> Self {
        Self {
            content_type: Some(MediaType::Json),
            accept: Some(MediaType::Json),
        }
    }
}

/// Appends an options struct to a path as query parameters.
///
/// `None` returns the path unchanged. Fields are encoded through their
/// serde attributes, so `Option` fields marked `skip_serializing_if`
/// drop out when unset. When the path already carries a query string the
/// encoded options are merged onto it with `&`.
pub fn add_options<T: Serialize>(path: &str, options: Option<&T>) -> Result<String, ClientError> {
    let Some(options) = options else {
        return Ok(path.to_owned());
    };
    let encoded = serde_qs::to_string(options)?;
    if encoded.is_empty() {
        return Ok(path.to_owned());
    }
    if path.contains('?') {
        Ok(format!("{path}&{encoded}"))
    } else {
        Ok(format!("{path}?{encoded}"))
    }
}

/// Async client for the Graphstore HTTP API.
///
/// Holds the base endpoint, credentials and the underlying HTTP client;
/// all per-call state is local to each call, so a single client is safe
/// to share across tasks.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    credentials: Credentials,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client with the given base URL.
    ///
    /// The URL is normalized to include a trailing slash, so relative
    /// endpoint paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.as_ref().to_owned()))?;
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

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

    /// Builds a request with an optional JSON body.
    ///
    /// The content-type header is taken from `headers` and only applied
    /// when a body is present. No network I/O happens here.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<&B>,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = self.build_url(path)?;
        let mut request = self.http.request(method, url);

        if let Some(accept) = headers.accept {
            request = request.header(ACCEPT, accept.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
            if let Some(content_type) = headers.content_type {
                request = request.header(CONTENT_TYPE, content_type.as_str());
            }
        }
        Ok(request)
    }

    /// Builds a request with a raw textual body (SPARQL text, RDF data).
    pub fn new_raw_request(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: String,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = self.build_url(path)?;
        let mut request = self.http.request(method, url).body(body);

        if let Some(content_type) = headers.content_type {
            request = request.header(CONTENT_TYPE, content_type.as_str());
        }
        if let Some(accept) = headers.accept {
            request = request.header(ACCEPT, accept.as_str());
        }
        Ok(request)
    }

    /// Builds a multipart form request (database creation).
    pub fn new_multipart_request(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = self.build_url(path)?;
        Ok(self.http.request(method, url).multipart(form))
    }

    /// Injects credentials, sends the request and classifies the status.
    ///
    /// Responses outside 2xx are turned into [`ApiError`] values, reading
    /// the full body for the server's `{"message", "code"}` shape.
    /// Transport errors (DNS, TCP, TLS, timeout) propagate unchanged.
    pub async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self.credentials.apply(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::classify(status, &body).into())
    }

    /// Decodes a successful response body as JSON.
    ///
    /// An empty body is success and yields `T::default()`; several
    /// endpoints answer 200/204 with no content.
    pub(crate) async fn decode_json<T: DeserializeOwned + Default>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let body = response.bytes().await?;
        if body.is_empty() {
            Ok(T::default())
        } else {
            Ok(serde_json::from_slice(&body)?)
        }
    }

    /// One-shot JSON call: build, dispatch, decode.
    pub(crate) async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, path, headers, body)?;
        let response = self.execute(request).await?;
        Self::decode_json(response).await
    }

    /// One-shot call discarding the response body.
    pub(crate) async fn request_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<&B>,
    ) -> Result<(), ClientError> {
        let request = self.new_request(method, path, headers, body)?;
        self.execute(request).await?;
        Ok(())
    }

    /// One-shot call returning the body verbatim, no JSON interpretation.
    pub(crate) async fn request_bytes<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<&B>,
    ) -> Result<Vec<u8>, ClientError> {
        let request = self.new_request(method, path, headers, body)?;
        let response = self.execute(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// One-shot call returning the body as text.
    pub(crate) async fn request_text<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderOptions,
        body: Option<&B>,
    ) -> Result<String, ClientError> {
        let request = self.new_request(method, path, headers, body)?;
        let response = self.execute(request).await?;
        Ok(response.text().await?)
    }

    /// Sends a request to an arbitrary path and parses the response as
    /// JSON.
    ///
    /// Escape hatch for endpoints without a typed method; returns
    /// [`Value::Null`] for successful responses with an empty body.
    pub async fn request_value(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.request_json(method, path, HeaderOptions::json(), body.as_ref())
            .await
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

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{Client, add_options};

    #[derive(Serialize)]
    struct ExportOpts {
        #[serde(rename = "server-side", skip_serializing_if = "Option::is_none")]
        server_side: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        compression: Option<String>,
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = Client::new("http://localhost:5820").expect("valid url");
        assert_eq!(client.base_url().path(), "/");
        assert_eq!(client.base_url().as_str(), "http://localhost:5820/");
    }

    #[test]
    fn joins_paths_from_base_with_nested_prefix() {
        let client = Client::new("https://example.com/graphstore").expect("valid url");
        let resolved = client.build_url("admin/databases").expect("valid path");
        assert_eq!(
            resolved.as_str(),
            "https://example.com/graphstore/admin/databases"
        );
    }

    #[test]
    fn add_options_none_is_identity() {
        let path = add_options::<ExportOpts>("db/export?format=trig", None).expect("no options");
        assert_eq!(path, "db/export?format=trig");
    }

    #[test]
    fn add_options_merges_onto_existing_query() {
        let opts = ExportOpts {
            server_side: Some(true),
            compression: None,
        };
        let path = add_options("db/export?format=trig", Some(&opts)).expect("encodes");
        assert_eq!(path, "db/export?format=trig&server-side=true");
    }

    #[test]
    fn add_options_sets_query_when_absent() {
        let opts = ExportOpts {
            server_side: Some(false),
            compression: Some("bzip2".to_owned()),
        };
        let path = add_options("db/export", Some(&opts)).expect("encodes");
        assert_eq!(path, "db/export?server-side=false&compression=bzip2");
        assert_eq!(path.matches('?').count(), 1);
    }

    #[test]
    fn add_options_all_fields_unset_is_identity() {
        let opts = ExportOpts {
            server_side: None,
            compression: None,
        };
        let path = add_options("admin/databases", Some(&opts)).expect("encodes");
        assert_eq!(path, "admin/databases");
    }
}
