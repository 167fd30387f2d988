//! Base path + relative path joining

use url::Url;

use crate::error::Error;

/// Strip every trailing `/` from a base path
pub(crate) fn trim_base_path(base_path: &str) -> String {
    base_path.trim_end_matches('/').to_string()
}

/// Join `path` onto `base_path` and parse the result
///
/// Redundant slashes at the join point collapse into one and any query in
/// `path` is kept as written.
///
/// ```
/// use http_client_wrapper::join_url;
///
/// let url = join_url("http://www.example.com/", "/foo/bar?baz=1").expect("valid url");
/// assert_eq!(url.as_str(), "http://www.example.com/foo/bar?baz=1");
/// ```
pub fn join_url(base_path: &str, path: &str) -> Result<Url, Error> {
    let joined = format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(base_path: &str, path: &str) -> String {
        join_url(base_path, path)
            .expect("valid url")
            .to_string()
    }

    #[test]
    fn test_join_plain_path() {
        assert_eq!(
            join("http://www.example.com", "foo/bar"),
            "http://www.example.com/foo/bar"
        );
    }

    #[test]
    fn test_join_keeps_query() {
        assert_eq!(
            join("http://www.example.com", "foo/bar?baz=1"),
            "http://www.example.com/foo/bar?baz=1"
        );
    }

    #[test]
    fn test_join_leading_slash() {
        assert_eq!(
            join("http://www.example.com", "/foo/bar"),
            "http://www.example.com/foo/bar"
        );
    }

    #[test]
    fn test_join_double_slash() {
        assert_eq!(
            join("http://www.example.com/", "/double-slash"),
            "http://www.example.com/double-slash"
        );
        assert_eq!(
            join("http://www.example.com///", "//double-slash"),
            "http://www.example.com/double-slash"
        );
    }

    #[test]
    fn test_join_base_with_prefix() {
        assert_eq!(
            join("http://www.example.com/api/v1/", "users?page=2&limit=10"),
            "http://www.example.com/api/v1/users?page=2&limit=10"
        );
    }

    #[test]
    fn test_join_invalid_base() {
        let err = join_url("not a url", "foo").expect_err("relative base must fail");
        assert!(matches!(
            err,
            Error::UrlParse(url::ParseError::RelativeUrlWithoutBase)
        ));
    }

    #[test]
    fn test_trim_base_path() {
        assert_eq!(trim_base_path("http://host//"), "http://host");
        assert_eq!(trim_base_path("http://host"), "http://host");
    }
}
