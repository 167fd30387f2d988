//! HTTP response types

use std::fmt;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, TransportError};

/// Closable byte stream behind a [`Response`]
///
/// Implemented by transports. `close` releases whatever the body holds
/// (connection, buffer, file); the client calls it exactly once per
/// response.
#[async_trait]
pub trait ResponseBody: Send {
    /// Next piece of the body, `None` once the body is exhausted
    async fn chunk(&mut self) -> Result<Option<Bytes>, TransportError>;

    /// Release the body
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Response handed to a handler
///
/// Body readers take `&mut self`: the client keeps ownership so it can
/// release the body once the handler returns.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Box<dyn ResponseBody>,
    closed: bool,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Response {
    /// Create a response from its parts
    pub fn new<B>(status: StatusCode, headers: HeaderMap, body: B) -> Self
    where
        B: ResponseBody + 'static,
    {
        Self {
            status,
            headers,
            body: Box::new(body),
            closed: false,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Whether the body has been released
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read the next chunk of the body
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, Error> {
        if self.closed {
            return Err(Error::Body(TransportError::Closed));
        }
        self.body.chunk().await.map_err(Error::Body)
    }

    /// Read the rest of the body
    pub async fn bytes(&mut self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Read the rest of the body as UTF-8 text
    pub async fn text(&mut self) -> Result<String, Error> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Read the rest of the body as JSON
    pub async fn json<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Release the body
    ///
    /// Only the first call reaches the underlying body; later calls are
    /// no-ops. The client calls this after every handler, so handlers only
    /// need it to let go of a connection early.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::trace!(status = %self.status, "releasing response body");
        self.body.close().await
    }
}
