//! HTTP request and body

use std::fmt;
use std::io;
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::BoxError;

/// Boxed byte stream used for streamed request bodies
pub type BodyStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + Sync + 'static>>;

/// Request body
///
/// The client hands the body to the transport as-is; it never buffers or
/// inspects a streamed body.
#[derive(Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// In-memory body
    Bytes(Bytes),
    /// Caller-supplied byte stream
    Stream(BodyStream),
}

impl Body {
    /// Body backed by a byte stream
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + Sync + 'static,
    {
        Body::Stream(Box::pin(stream))
    }

    /// Body read from any async reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        Body::from_stream(ReaderStream::new(reader))
    }

    /// In-memory contents, if the body is not streamed
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Empty => Some(&[][..]),
            Body::Bytes(bytes) => Some(bytes.as_ref()),
            Body::Stream(_) => None,
        }
    }

    /// Whether there is no body at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Bytes(bytes) => f.debug_tuple("Body::Bytes").field(&bytes.len()).finish(),
            Body::Stream(_) => f.write_str("Body::Stream(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes.into())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Bytes(text.into())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Bytes(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(Bytes::copy_from_slice(bytes))
    }
}

/// One outbound call
///
/// Created fresh by the client for every call, decorated by
/// [`RequestOption`](crate::RequestOption)s and then moved into the
/// transport.
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Body,
    cancellation: CancellationToken,
    error: Option<BoxError>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl Request {
    pub(crate) fn new(
        method: Method,
        url: Url,
        body: Body,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
            cancellation,
            error: None,
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable target URL
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable request headers
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Move the body out, leaving [`Body::Empty`] behind
    pub fn take_body(&mut self) -> Body {
        std::mem::take(&mut self.body)
    }

    /// Cancellation token of the call this request belongs to
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Append a header, keeping any values already present for `key`
    ///
    /// A name or value that is not valid HTTP is remembered and fails the
    /// call before anything is sent.
    pub fn append_header(&mut self, key: &str, value: &str) {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(err) => return self.record_error(format!("invalid header name {key:?}: {err}")),
        };
        let value = match HeaderValue::from_str(value) {
            Ok(value) => value,
            Err(err) => {
                return self.record_error(format!("invalid value for header {key:?}: {err}"))
            }
        };
        self.headers.append(name, value);
    }

    /// Append query pairs to the URL, keeping the query already present
    pub fn append_query_pairs<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return;
        }
        self.url.query_pairs_mut().extend_pairs(pairs);
    }

    /// Record a decoration failure; the first one wins
    pub fn record_error<E: Into<BoxError>>(&mut self, error: E) {
        if self.error.is_none() {
            self.error = Some(error.into());
        }
    }

    pub(crate) fn take_error(&mut self) -> Option<BoxError> {
        self.error.take()
    }
}
