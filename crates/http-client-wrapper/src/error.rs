//! HTTP error types

use thiserror::Error;

/// Type-erased error used where the original cause can be of any type
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures reported by a [`Transport`](crate::Transport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request timeout
    #[error("request timeout")]
    Timeout,
    /// The caller's cancellation token fired before the call completed
    #[error("request cancelled")]
    Cancelled,
    /// Connection error
    #[error("connection error: {0}")]
    Connection(String),
    /// The transport could not turn the request into a wire request
    #[error("invalid request: {0}")]
    Build(String),
    /// Reading or writing a body failed
    #[error("body error: {0}")]
    Body(String),
    /// The response body was already released
    #[error("response body already closed")]
    Closed,
    /// Other error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Error returned by [`Client`](crate::Client) calls
///
/// Each variant names the stage that failed and keeps the original failure
/// reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    /// The base path and relative path did not join into a valid URL
    #[error("url parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    /// The request could not be assembled (bad header, unencodable form)
    #[error("create request error: {0}")]
    CreateRequest(#[source] BoxError),
    /// The transport failed to deliver the request
    #[error("request error: {0}")]
    Request(#[source] TransportError),
    /// Releasing the response body failed after a successful handler
    #[error("close response body error: {0}")]
    Release(#[source] TransportError),
    /// Reading the response body failed
    #[error("read response body error: {0}")]
    Body(#[source] TransportError),
    /// The response body was not the expected JSON
    #[error("decode response error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response body was not valid UTF-8 text
    #[error("decode response error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The client or its transport could not be built
    #[error("client build error: {0}")]
    Build(#[source] TransportError),
    /// Failure raised by a response handler
    #[error("{message}")]
    Handler {
        /// Human readable message
        message: String,
        /// Original failure, if any
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    /// Wrap `source` behind `message`
    ///
    /// The message is what `Display` shows; the source stays available for
    /// inspection via [`std::error::Error::source`].
    pub fn new<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<BoxError>,
    {
        Error::Handler {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Error carrying only a message
    pub fn msg<M: Into<String>>(message: M) -> Self {
        Error::Handler {
            message: message.into(),
            source: None,
        }
    }

    /// The transport failure behind this error, if the failing stage was
    /// transport-level
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Error::Request(err) | Error::Release(err) | Error::Body(err) | Error::Build(err) => {
                Some(err)
            }
            _ => None,
        }
    }
}
