//! URL utilities for consistent URL handling
//!
//! Endpoint paths are appended to a configured base URL, and the backend
//! expects a single identifying query parameter on every request. These
//! helpers keep slash handling and percent-encoding in one place.

use reqwest::Url;

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use gpteng_client::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path
///
/// The base URL is normalized and the endpoint's leading slashes are dropped,
/// so the result never contains a double slash at the seam.
///
/// # Examples
///
/// ```
/// use gpteng_client::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/api/settings"),
///     "http://localhost:8000/api/settings"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Percent-encode a single query or path component.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Append `key=value` to an endpoint path, choosing `?` or `&` as needed.
///
/// `value` must already be encoded.
pub fn append_query(endpoint: &str, key: &str, value: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{key}={value}")
}

/// Scheme, host and port of `base_url`, without a trailing slash.
///
/// Returns `None` when the URL cannot be parsed or has an opaque origin
/// (for example `file:` URLs).
pub fn origin_of(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Look up a query parameter by name and return its decoded value.
///
/// An empty value is treated as absent.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.example.com/v1"),
            "https://api.example.com/v1"
        );
        assert_eq!(
            normalize_base_url("https://api.example.com/v1///"),
            "https://api.example.com/v1"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url() {
        assert_eq!(
            construct_api_url("http://localhost:8000", "api/settings"),
            "http://localhost:8000/api/settings"
        );
        assert_eq!(
            construct_api_url("http://localhost:8000/", "/api/settings"),
            "http://localhost:8000/api/settings"
        );
        assert_eq!(
            construct_api_url("https://host/app///", "///static/img.png"),
            "https://host/app/static/img.png"
        );
    }

    #[test]
    fn encode_component_escapes_path_separators() {
        assert_eq!(encode_component("/p"), "%2Fp");
        assert_eq!(encode_component("my project"), "my%20project");
        assert_eq!(encode_component("undefined"), "undefined");
    }

    #[test]
    fn append_query_picks_separator() {
        assert_eq!(
            append_query("/api/settings", "gpteng_path", "x"),
            "/api/settings?gpteng_path=x"
        );
        assert_eq!(
            append_query("/api/chats/load?chat_name=a", "gpteng_path", "x"),
            "/api/chats/load?chat_name=a&gpteng_path=x"
        );
    }

    #[test]
    fn origin_drops_path_and_keeps_port() {
        assert_eq!(
            origin_of("https://host/app/index.html").as_deref(),
            Some("https://host")
        );
        assert_eq!(
            origin_of("http://localhost:8000/").as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(origin_of("not a url"), None);
    }

    #[test]
    fn query_param_decodes_and_ignores_empty() {
        assert_eq!(
            query_param("http://localhost:8000/?gpteng_path=%2Fhome%2Fme", "gpteng_path")
                .as_deref(),
            Some("/home/me")
        );
        assert_eq!(
            query_param("http://localhost:8000/?gpteng_path=", "gpteng_path"),
            None
        );
        assert_eq!(query_param("http://localhost:8000/", "gpteng_path"), None);
    }
}
