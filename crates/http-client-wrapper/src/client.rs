//! HTTP client wrapper

use std::sync::Arc;
use std::time::Duration;

use http::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::Error;
use crate::options::{with_content_type, RequestOption, FORM_URLENCODED};
use crate::request::{Body, Request};
use crate::response::Response;
use crate::transport::Transport;
use crate::url_builder::{join_url, trim_base_path};

/// HTTP client bound to a base path
///
/// Every call joins its path onto the base path, decorates a fresh request
/// with the given options, sends it, runs the handler on the response and
/// then releases the response body, whatever the handler returned.
///
/// The client carries no per-call state: clones share the transport and can
/// be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_path: String,
}

impl Client {
    /// Create a client using the default transport with `timeout`
    pub fn new(base_path: &str, timeout: Duration) -> Result<Self, Error> {
        Self::builder(base_path).timeout(timeout).build()
    }

    /// Create a new client builder
    pub fn builder(base_path: &str) -> ClientBuilder {
        ClientBuilder::new(base_path)
    }

    /// Create a client from serialized settings
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        config.builder().build()
    }

    /// Create a client that sends through `transport`
    pub fn with_transport(base_path: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_path: trim_base_path(base_path),
        }
    }

    /// Base path with trailing slashes removed
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// URL a call to `path` would target
    pub fn request_url(&self, path: &str) -> Result<Url, Error> {
        join_url(&self.base_path, path)
    }

    /// GET `path` and hand the response to `handler`
    ///
    /// Returns the handler's result, or the error of the stage that failed
    /// before the handler could run.
    pub async fn get<T, E, H>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        handler: H,
        options: &[RequestOption],
    ) -> Result<T, E>
    where
        H: AsyncFnOnce(&mut Response) -> Result<T, E>,
        E: From<Error>,
    {
        let request = self.create_request(ctx, Method::GET, path, Body::Empty, options)?;
        self.execute(request, handler).await
    }

    /// POST `body` to `path` and hand the response to `handler`
    ///
    /// The body is passed to the transport untouched.
    pub async fn post<B, T, E, H>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: B,
        handler: H,
        options: &[RequestOption],
    ) -> Result<T, E>
    where
        B: Into<Body>,
        H: AsyncFnOnce(&mut Response) -> Result<T, E>,
        E: From<Error>,
    {
        let request = self.create_request(ctx, Method::POST, path, body.into(), options)?;
        self.execute(request, handler).await
    }

    /// POST `form` as `application/x-www-form-urlencoded`
    ///
    /// A `Content-Type` option is appended after the caller's options, so a
    /// caller-supplied content type is sent first and this one after it.
    pub async fn post_form<F, T, E, H>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        form: &F,
        handler: H,
        options: &[RequestOption],
    ) -> Result<T, E>
    where
        F: Serialize + ?Sized,
        H: AsyncFnOnce(&mut Response) -> Result<T, E>,
        E: From<Error>,
    {
        let encoded =
            serde_urlencoded::to_string(form).map_err(|e| Error::CreateRequest(e.into()))?;

        let mut options = options.to_vec();
        options.push(with_content_type(FORM_URLENCODED));

        self.post(ctx, path, encoded, handler, &options).await
    }

    fn create_request(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        body: Body,
        options: &[RequestOption],
    ) -> Result<Request, Error> {
        let url = self.request_url(path)?;
        let mut request = Request::new(method, url, body, ctx.clone());

        for option in options {
            option.apply(&mut request);
        }

        match request.take_error() {
            Some(err) => Err(Error::CreateRequest(err)),
            None => Ok(request),
        }
    }

    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    async fn execute<T, E, H>(&self, request: Request, handler: H) -> Result<T, E>
    where
        H: AsyncFnOnce(&mut Response) -> Result<T, E>,
        E: From<Error>,
    {
        tracing::debug!("Sending request");
        let mut response = self.transport.send(request).await.map_err(Error::Request)?;
        tracing::debug!(status = %response.status(), "Received response");

        let result = handler(&mut response).await;
        let released = response.close().await;

        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(Error::Release(err).into()),
            (Err(err), _) => Err(err),
        }
    }
}

/// HTTP client builder
#[derive(Debug)]
pub struct ClientBuilder {
    base_path: String,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    fn new(base_path: &str) -> Self {
        Self {
            base_path: trim_base_path(base_path),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport: None,
        }
    }

    /// Bound every call's round trip
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send through `transport` instead of the default one
    ///
    /// The timeout is then up to the given transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client, Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(self.timeout)?,
        };

        Ok(Client {
            transport,
            base_path: self.base_path,
        })
    }
}

#[cfg(feature = "reqwest")]
fn default_transport(timeout: Duration) -> Result<Arc<dyn Transport>, Error> {
    let transport = crate::backends::ReqwestTransport::new(timeout).map_err(Error::Build)?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport(_timeout: Duration) -> Result<Arc<dyn Transport>, Error> {
    Err(Error::Build(crate::error::TransportError::Build(
        "no transport configured; enable the `reqwest` feature or call `transport`".to_string(),
    )))
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_trimmed() {
        let client = Client::builder("http://www.example.com///")
            .build()
            .expect("client builds");
        assert_eq!(client.base_path(), "http://www.example.com");
    }

    #[test]
    fn test_request_url() {
        let client = Client::new("http://www.example.com", Duration::from_secs(60))
            .expect("client builds");
        let cases = [
            ("foo/bar", "http://www.example.com/foo/bar"),
            ("foo/bar?baz=1", "http://www.example.com/foo/bar?baz=1"),
            ("/foo/bar", "http://www.example.com/foo/bar"),
        ];
        for (path, expected) in cases {
            let url = client.request_url(path).expect("valid url");
            assert_eq!(url.as_str(), expected);
        }
    }

    #[test]
    fn test_request_url_double_slash() {
        let client = Client::new("http://www.example.com/", Duration::from_secs(60))
            .expect("client builds");
        let url = client.request_url("/double-slash").expect("valid url");
        assert_eq!(url.as_str(), "http://www.example.com/double-slash");
    }

    #[test]
    fn test_create_request_applies_options_in_order() {
        let client = Client::new("http://www.example.com", Duration::from_secs(60))
            .expect("client builds");
        let ctx = CancellationToken::new();
        let options = [
            crate::with_headers([("X-Tag", "a")]),
            crate::with_query_params([("page", "2")]),
            crate::with_headers([("X-Tag", "b")]),
        ];

        let request = client
            .create_request(&ctx, Method::GET, "items?sort=asc", Body::Empty, &options)
            .expect("request builds");

        assert_eq!(
            request.url().as_str(),
            "http://www.example.com/items?sort=asc&page=2"
        );
        let tags: Vec<_> = request
            .headers()
            .get_all("x-tag")
            .iter()
            .map(|v| v.to_str().expect("ascii"))
            .collect();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_create_request_rejects_bad_header() {
        let client = Client::new("http://www.example.com", Duration::from_secs(60))
            .expect("client builds");
        let ctx = CancellationToken::new();
        let options = [crate::with_headers([("bad header", "x")])];

        let err = client
            .create_request(&ctx, Method::GET, "items", Body::Empty, &options)
            .expect_err("invalid header name");
        assert!(err.to_string().starts_with("create request error: "));
    }

    #[test]
    fn test_builder_with_timeout() {
        let client = Client::builder("http://www.example.com")
            .timeout(Duration::from_secs(3))
            .build()
            .expect("client builds");
        assert_eq!(client.base_path(), "http://www.example.com");
    }

    #[test]
    fn test_builder_custom_transport() {
        let transport = crate::backends::ReqwestTransport::new(Duration::from_secs(1))
            .expect("transport builds");
        let client = Client::builder("http://www.example.com/api/")
            .transport(Arc::new(transport))
            .build()
            .expect("client builds");
        let url = client.request_url("users").expect("valid url");
        assert_eq!(url.as_str(), "http://www.example.com/api/users");
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::new("http://www.example.com/");
        let client = Client::from_config(&config).expect("client builds");
        assert_eq!(client.base_path(), "http://www.example.com");
    }
}
