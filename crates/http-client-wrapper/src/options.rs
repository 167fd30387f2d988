//! Request options
//!
//! An option decorates a [`Request`] before it is sent. Options are applied
//! in the order they are passed and never replace what an earlier option
//! set: query pairs and header values accumulate.

use std::fmt;
use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};

use crate::request::Request;

/// Media type used by [`Client::post_form`](crate::Client::post_form)
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

type DecorateFn = dyn Fn(&mut Request) + Send + Sync;

/// A decoration applied to a request before send
#[derive(Clone)]
pub enum RequestOption {
    /// Append query pairs to the URL
    QueryParams(Vec<(String, String)>),
    /// Append header values
    Headers(Vec<(String, String)>),
    /// Caller-defined decoration
    Custom(Arc<DecorateFn>),
}

impl RequestOption {
    /// Option from an arbitrary function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Request) + Send + Sync + 'static,
    {
        RequestOption::Custom(Arc::new(f))
    }

    /// Apply the decoration to `request`
    pub fn apply(&self, request: &mut Request) {
        match self {
            RequestOption::QueryParams(params) => {
                request.append_query_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
            RequestOption::Headers(headers) => {
                for (key, value) in headers {
                    request.append_header(key, value);
                }
            }
            RequestOption::Custom(f) => f(request),
        }
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOption::QueryParams(params) => {
                f.debug_tuple("QueryParams").field(params).finish()
            }
            RequestOption::Headers(headers) => f.debug_tuple("Headers").field(headers).finish(),
            RequestOption::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn collect_pairs<I, K, V>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Add query parameters, merged with any query already in the URL
pub fn with_query_params<I, K, V>(params: I) -> RequestOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    RequestOption::QueryParams(collect_pairs(params))
}

/// Add headers; values for a key that is already set are appended
pub fn with_headers<I, K, V>(headers: I) -> RequestOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    RequestOption::Headers(collect_pairs(headers))
}

/// Add a `Content-Type` header
pub fn with_content_type(content_type: impl Into<String>) -> RequestOption {
    let content_type: String = content_type.into();
    with_headers([(CONTENT_TYPE.as_str(), content_type)])
}

/// Add an `Accept` header
pub fn with_accept(content_type: impl Into<String>) -> RequestOption {
    let content_type: String = content_type.into();
    with_headers([(ACCEPT.as_str(), content_type)])
}
