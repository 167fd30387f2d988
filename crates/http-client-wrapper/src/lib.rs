//! Base-path HTTP client with request options and response handlers
//!
//! A [`Client`] joins relative paths onto a fixed base path, decorates each
//! request with [`RequestOption`]s (query parameters, headers), sends it
//! through a [`Transport`] and hands the response to a caller-supplied
//! handler. The response body is always released after the handler returns,
//! and the handler's error is the call's error.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use http_client_wrapper::{with_query_params, CancellationToken, Client, Error, Response};
//! use serde_json::Value;
//!
//! async fn example() -> Result<Value, Error> {
//!     let client = Client::new("https://postman-echo.com", Duration::from_secs(60))?;
//!     let ctx = CancellationToken::new();
//!
//!     client
//!         .post_form(
//!             &ctx,
//!             "post",
//!             &[("foo", "bar")],
//!             async |response: &mut Response| -> Result<Value, Error> {
//!                 response.json().await
//!             },
//!             &[with_query_params([("zoo", "zar")])],
//!         )
//!         .await
//! }
//! ```

mod backends;
mod client;
mod config;
mod error;
mod options;
mod request;
mod response;
mod transport;
mod url_builder;

#[cfg(feature = "reqwest")]
pub use backends::ReqwestTransport;
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use error::{BoxError, Error, TransportError};
pub use options::{
    with_accept, with_content_type, with_headers, with_query_params, RequestOption,
    FORM_URLENCODED,
};
pub use request::{Body, BodyStream, Request};
pub use response::{Response, ResponseBody};
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;
pub use url_builder::join_url;
