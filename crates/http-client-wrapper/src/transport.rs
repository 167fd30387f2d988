//! Transport abstraction

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::Request;
use crate::response::Response;

/// Sends requests on behalf of a [`Client`](crate::Client)
///
/// Implementations own connection handling, TLS and timeouts. They must
/// stop promptly with [`TransportError::Cancelled`] once the request's
/// [`cancellation`](Request::cancellation) token fires, and hand back a
/// response whose body can be released through
/// [`ResponseBody::close`](crate::ResponseBody::close).
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Send `request` and return the response head with an open body
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
