use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Address of whoever sent the request; the `user` field of request logs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolve the requester address.
///
/// Priority:
/// 1. X-Forwarded-For header (first entry of the comma-separated list)
/// 2. X-Real-IP header
/// 3. Socket peer address
///
/// A proxy header that is present but unparseable yields `None`.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        forwarded
            .to_str()
            .ok()
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else if let Some(real_ip) = headers.get("x-real-ip") {
        real_ip.to_str().ok().and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else {
        Some(peer.ip())
    }
}

/// Middleware storing the requester address as a `ClientIp` extension
pub async fn extract_client_ip(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ip) = resolve_client_ip(request.headers(), addr) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        SocketAddr::from(([10, 0, 0, 1], 40000))
    }

    #[test]
    fn falls_back_to_peer_address() {
        let ip = resolve_client_ip(&HeaderMap::new(), peer());
        assert_eq!(ip, Some(peer().ip()));
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.2"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        let ip = resolve_client_ip(&headers, peer());
        assert_eq!(ip, "203.0.113.7".parse().ok());
    }

    #[test]
    fn real_ip_used_without_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        let ip = resolve_client_ip(&headers, peer());
        assert_eq!(ip, "198.51.100.1".parse().ok());
    }

    #[test]
    fn garbage_header_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        assert_eq!(resolve_client_ip(&headers, peer()), None);
    }
}
