//! reqwest-based transport

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::request::{Body, Request};
use crate::response::{Response, ResponseBody};
use crate::transport::Transport;

/// Transport backed by a [`reqwest::Client`]
///
/// The timeout configured on the client bounds the whole round trip,
/// including reading the body.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport whose round trips are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { inner: client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, mut request: Request) -> Result<Response, TransportError> {
        let body = match request.take_body() {
            Body::Empty => None,
            Body::Bytes(bytes) => Some(reqwest::Body::from(bytes)),
            Body::Stream(stream) => Some(reqwest::Body::wrap_stream(stream)),
        };

        let mut outbound = reqwest::Request::new(request.method().clone(), request.url().clone());
        *outbound.headers_mut() = request.headers().clone();
        *outbound.body_mut() = body;

        let cancellation = request.cancellation().clone();
        let response = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(TransportError::Cancelled),
            response = self.inner.execute(outbound) => response?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        Ok(Response::new(
            status,
            headers,
            ReqwestBody {
                inner: Some(response),
                cancellation,
            },
        ))
    }
}

/// Body of a reqwest response; dropping the response releases the
/// connection
struct ReqwestBody {
    inner: Option<reqwest::Response>,
    cancellation: CancellationToken,
}

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn chunk(&mut self) -> Result<Option<Bytes>, TransportError> {
        let Some(response) = self.inner.as_mut() else {
            return Err(TransportError::Closed);
        };
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(TransportError::Cancelled),
            chunk = response.chunk() => chunk.map_err(TransportError::from),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.inner = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use url::Url;

    use super::*;

    #[test]
    fn test_new() {
        let transport = ReqwestTransport::new(Duration::from_secs(5));
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_before_send() {
        let transport = ReqwestTransport::from_reqwest(reqwest::Client::new());
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let request = Request::new(
            Method::GET,
            Url::parse("http://127.0.0.1:9/unreachable").expect("valid url"),
            Body::Empty,
            cancellation,
        );
        let err = transport
            .send(request)
            .await
            .expect_err("cancelled before send");
        assert!(matches!(err, TransportError::Cancelled));
    }
}
