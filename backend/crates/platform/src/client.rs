//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Client information recorded alongside QR code scans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// First `X-Forwarded-For` entry, or the direct connection IP
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Extract client IP and User-Agent from request headers
pub fn extract_client_info(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientInfo {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    ClientInfo {
        ip_address: extract_client_ip(headers, direct_ip),
        user_agent,
    }
}

/// Extract client IP address from headers
///
/// The first comma-separated `X-Forwarded-For` value wins (reverse proxy
/// setups); it is kept verbatim so proxies that forward hostnames or
/// `ip:port` pairs are still recorded. Falls back to the direct connection.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .map(str::to_string)
        .or_else(|| direct_ip.map(|ip| ip.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(ip.as_deref(), Some("192.168.1.1"));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(
            extract_client_ip(&headers, Some(direct)).as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(extract_client_ip(&headers, None), None);
    }

    #[test]
    fn test_extract_client_info() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.9 "));

        let info = extract_client_info(&headers, None);
        assert_eq!(info.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0"));
    }
}
