//! Domain extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Extracts the lookup domain from the `Host` header.
///
/// The port is stripped and the result is lower-cased. IPv6 literals keep
/// their brackets (`[::1]:8080` becomes `[::1]`).
///
/// Returns `None` if the header is missing, is not valid UTF-8, or is empty
/// once the port is removed.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "Example.com:8080".parse().unwrap());
///
/// assert_eq!(extract_domain_from_headers(&headers).unwrap(), "example.com");
/// ```
pub fn extract_domain_from_headers(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();

    let domain = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_domain_simple() {
        assert_eq!(
            extract_domain_from_headers(&host("example.com")).as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_extract_domain_with_port() {
        assert_eq!(
            extract_domain_from_headers(&host("example.com:3000")).as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_extract_domain_is_lowercased() {
        assert_eq!(
            extract_domain_from_headers(&host("ShortenURL.ORG:8080")).as_deref(),
            Some("shortenurl.org")
        );
    }

    #[test]
    fn test_extract_domain_localhost_with_port() {
        assert_eq!(
            extract_domain_from_headers(&host("localhost:8080")).as_deref(),
            Some("localhost")
        );
    }

    #[test]
    fn test_extract_domain_ip_with_port() {
        assert_eq!(
            extract_domain_from_headers(&host("192.168.1.1:9000")).as_deref(),
            Some("192.168.1.1")
        );
    }

    #[test]
    fn test_extract_domain_ipv6_with_port() {
        assert_eq!(
            extract_domain_from_headers(&host("[::1]:8080")).as_deref(),
            Some("[::1]")
        );
    }

    #[test]
    fn test_extract_domain_missing_host_header() {
        assert!(extract_domain_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_domain_port_only() {
        assert!(extract_domain_from_headers(&host(":8080")).is_none());
    }

    #[test]
    fn test_extract_domain_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(header::HOST, value);
            assert!(extract_domain_from_headers(&headers).is_none());
        }
    }
}
